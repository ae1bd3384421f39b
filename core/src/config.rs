use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::environment::Environment;
use crate::errors::{EnvError, EnvResult};
use crate::validation;

fn io_error(path: &Path, error: std::io::Error) -> EnvError {
    EnvError::E1006_SOURCE_IO {
        path: path.to_string_lossy().to_string(),
        error,
    }
}

/// Reads an environment source file as is, without baked overrides.
pub fn read_source(path: &Path) -> EnvResult<Environment> {
    let data = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Environment::parse(&data, &path.to_string_lossy())
}

/// Reads a source file and applies the same validation as a baked target.
pub fn read_validated(path: &Path) -> EnvResult<Environment> {
    let environment = read_source(path)?;
    validation::validate(&environment)?;
    Ok(environment)
}

pub fn write_environment(path: &Path, environment: &Environment) -> EnvResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(path, e))?;
    }
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, environment).map_err(|error| {
        if error.is_io() {
            io_error(path, error.into())
        } else {
            EnvError::E1001_MALFORMED_SOURCE {
                origin: path.to_string_lossy().to_string(),
                error,
            }
        }
    })?;
    writer.flush().map_err(|e| io_error(path, e))?;
    log::info!("Environment written to {}", path.display());
    Ok(())
}
