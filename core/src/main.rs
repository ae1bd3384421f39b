use std::process::ExitCode;

use anyhow::{Context, Result};
use coffee_shop_env::api::ApiClient;
use coffee_shop_env::args::Args;
use coffee_shop_env::environment::overrides::Overrides;
use coffee_shop_env::environment::{BuildTarget, Environment};
use coffee_shop_env::{config, logs, utils, validation};
use log::{error, info};

fn select_environment(args: &Args) -> Result<Environment> {
    if let Some(path) = &args.source {
        info!("Reading environment source {}", path.display());
        if args.check {
            // validated below, all problems reported
            return Ok(config::read_source(path)?);
        }
        return Ok(config::read_validated(path)?);
    }

    let target = match &args.target {
        Some(raw) => raw.parse::<BuildTarget>()?,
        None => BuildTarget::from_build(),
    };
    info!("Loading environment for target {}", target);
    if args.check {
        // validated below, all problems reported
        return Ok(Environment::assemble(target, Overrides::from_build())?);
    }
    Ok(Environment::load(target)?)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse(std::env::args());
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logs::dispatch_logs(level).context("Cannot setup logs")?;
    info!("coffee_shop_env v{}", utils::app_version());

    let environment = select_environment(&args).context("Cannot load environment")?;

    if args.check {
        let errors = validation::validate_all(&environment);
        if !errors.is_empty() {
            for e in &errors {
                error!("{}", e);
            }
            return Ok(ExitCode::FAILURE);
        }
        info!("Environment is valid");
    }

    if let Some(path) = &args.out {
        config::write_environment(path, &environment).context("Cannot write environment")?;
    } else {
        let json = environment.to_json_pretty()?;
        println!("{json}");
    }

    if args.probe {
        let client = ApiClient::new(&environment)?;
        if let Err(e) = client.probe().await {
            error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
