pub mod overrides;

use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{EnvError, EnvResult};
use crate::validation;
use overrides::Overrides;

const APP_ENVIRONMENT: Option<&str> = option_env!("APP_ENVIRONMENT");

const DEVELOPMENT_SOURCE: &str = include_str!("../environments/development.json");
const STAGING_SOURCE: &str = include_str!("../environments/staging.json");
const PRODUCTION_SOURCE: &str = include_str!("../environments/production.json");

static CURRENT: OnceLock<Environment> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTarget {
    Development,
    Staging,
    Production,
}

impl BuildTarget {
    pub const ALL: [Self; 3] = [Self::Development, Self::Staging, Self::Production];

    /// Target baked in at compile time through `APP_ENVIRONMENT`, falling back
    /// to the cargo profile when the variable is absent or unrecognized.
    pub fn from_build() -> Self {
        Self::resolve(APP_ENVIRONMENT, cfg!(debug_assertions))
    }

    fn resolve(raw: Option<&str>, debug_build: bool) -> Self {
        let fallback = if debug_build {
            Self::Development
        } else {
            Self::Production
        };

        match raw {
            Some(raw) => match raw.parse() {
                Ok(target) => target,
                Err(e) => {
                    warn!("Ignoring baked APP_ENVIRONMENT: {e}");
                    fallback
                }
            },
            None => fallback,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Staging => "staging",
            Self::Production => "prod",
        }
    }

    pub const fn source(self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT_SOURCE,
            Self::Staging => STAGING_SOURCE,
            Self::Production => PRODUCTION_SOURCE,
        }
    }

    pub const fn is_production(self) -> bool {
        !matches!(self, Self::Development)
    }
}

impl FromStr for BuildTarget {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "staging" | "stage" => Ok(Self::Staging),
            "prod" | "production" => Ok(Self::Production),
            _ => Err(EnvError::E1005_UNKNOWN_TARGET {
                value: s.to_owned(),
            }),
        }
    }
}

impl Display for BuildTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity provider settings consumed by the authentication module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Auth0Settings {
    /// Domain prefix, e.g. `dev--mca9d0n.us` for `dev--mca9d0n.us.auth0.com`.
    pub(crate) url: String,
    pub(crate) audience: String,
    pub(crate) client_id: String,
    #[serde(rename = "callbackURL")]
    pub(crate) callback_url: String,
}

impl Auth0Settings {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }
}

/// The environment record of one build target. Values are fixed once
/// constructed, the active one is shared through [`Environment::current`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Environment {
    pub(crate) production: bool,
    pub(crate) api_server_url: String,
    pub(crate) auth0: Auth0Settings,
}

impl Environment {
    pub fn from_json(raw: &str) -> EnvResult<Self> {
        Self::parse(raw, "<inline>")
    }

    pub(crate) fn parse(raw: &str, origin: &str) -> EnvResult<Self> {
        serde_json::from_str(raw).map_err(|error| EnvError::E1001_MALFORMED_SOURCE {
            origin: origin.to_owned(),
            error,
        })
    }

    pub fn load(target: BuildTarget) -> EnvResult<Self> {
        Self::load_with(target, Overrides::from_build())
    }

    pub fn load_with(target: BuildTarget, overrides: Overrides) -> EnvResult<Self> {
        let environment = Self::assemble(target, overrides)?;
        validation::validate(&environment)?;
        Ok(environment)
    }

    /// Source plus overrides, without validation. Used to report every
    /// problem of a target at once.
    pub fn assemble(target: BuildTarget, overrides: Overrides) -> EnvResult<Self> {
        let origin = format!("environments/{}", target.as_str());
        let source = Self::parse(target.source(), &origin)?;
        if !overrides.is_empty() {
            info!("Applying baked overrides to {target} environment: {overrides:?}");
        }
        Ok(overrides.apply(source))
    }

    pub fn try_current() -> EnvResult<&'static Self> {
        if let Some(environment) = CURRENT.get() {
            return Ok(environment);
        }

        let target = BuildTarget::from_build();
        let environment = Self::load(target)?;
        info!("Environment {target} loaded, api server: {}", environment.api_server_url);
        // A concurrent initializer may have won, both values come from the same source.
        Ok(CURRENT.get_or_init(|| environment))
    }

    /// Active record for this build.
    ///
    /// # Panics
    /// When the baked record does not validate. That is a build defect, use
    /// [`Environment::try_current`] to handle it instead.
    #[allow(clippy::panic)]
    pub fn current() -> &'static Self {
        match Self::try_current() {
            Ok(environment) => environment,
            Err(e) => panic!("Invalid baked environment: {e}"),
        }
    }

    pub const fn production(&self) -> bool {
        self.production
    }

    pub fn api_server_url(&self) -> &str {
        &self.api_server_url
    }

    pub const fn auth0(&self) -> &Auth0Settings {
        &self.auth0
    }

    pub fn to_json_pretty(&self) -> EnvResult<String> {
        serde_json::to_string_pretty(self).map_err(|error| EnvError::E1001_MALFORMED_SOURCE {
            origin: "<serialize>".to_owned(),
            error,
        })
    }
}
