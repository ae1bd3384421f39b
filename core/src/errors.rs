use std::fmt::Display;
use thiserror::Error;

pub type EnvResult<T> = std::result::Result<T, EnvError>;

impl<T> From<EnvError> for EnvResult<T> {
    fn from(value: EnvError) -> Self {
        EnvResult::Err(value)
    }
}

#[allow(non_camel_case_types)]
#[derive(Error, Debug)]
pub enum EnvError {
    E1001_MALFORMED_SOURCE {
        origin: String,
        #[source]
        error: serde_json::Error,
    },
    E1002_EMPTY_FIELD {
        field: &'static str,
    },
    E1003_INVALID_URL {
        field: &'static str,
        value: String,
        reason: String,
    },
    E1004_INVALID_DOMAIN {
        value: String,
    },
    E1005_UNKNOWN_TARGET {
        value: String,
    },
    E1006_SOURCE_IO {
        path: String,
        #[source]
        error: std::io::Error,
    },

    E2001_REQUEST_FAILED {
        url: Option<String>,
        #[source]
        error: reqwest::Error,
    },
    E2002_REQUEST_FAILED_HTTP_CODE {
        url: String,
        code: u16,
    },
}

impl EnvError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::E1001_MALFORMED_SOURCE { .. } => "E1001",
            Self::E1002_EMPTY_FIELD { .. } => "E1002",
            Self::E1003_INVALID_URL { .. } => "E1003",
            Self::E1004_INVALID_DOMAIN { .. } => "E1004",
            Self::E1005_UNKNOWN_TARGET { .. } => "E1005",
            Self::E1006_SOURCE_IO { .. } => "E1006",
            Self::E2001_REQUEST_FAILED { .. } => "E2001",
            Self::E2002_REQUEST_FAILED_HTTP_CODE { .. } => "E2002",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::E1001_MALFORMED_SOURCE { origin, error } => {
                format!("Environment source {origin} is not a valid record: {error}")
            }
            Self::E1002_EMPTY_FIELD { field } => {
                format!("Environment field {field} must not be empty.")
            }
            Self::E1003_INVALID_URL {
                field,
                value,
                reason,
            } => {
                format!("Environment field {field} is not an absolute http(s) URL ({value}): {reason}")
            }
            Self::E1004_INVALID_DOMAIN { value } => {
                format!(
                    "Identity provider domain prefix {value} must be a bare host name without scheme or path."
                )
            }
            Self::E1005_UNKNOWN_TARGET { value } => {
                format!("Unknown build target {value}. Expected one of: dev, staging, prod.")
            }
            Self::E1006_SOURCE_IO { path, .. } => {
                format!("Cannot access environment source at {path}.")
            }
            Self::E2001_REQUEST_FAILED { url, .. } => match url {
                Some(url) => format!("Request to {url} failed. Is the API server running?"),
                None => "Request to the API server failed. Is the API server running?".to_owned(),
            },
            Self::E2002_REQUEST_FAILED_HTTP_CODE { url, code } => {
                format!("Request to {url} returned HTTP status {code}.")
            }
        }
    }
}

impl Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.user_message())
    }
}

impl From<reqwest::Error> for EnvError {
    fn from(value: reqwest::Error) -> Self {
        let url: Option<String> = value.url().map(|e| e.as_str().to_owned());
        Self::E2001_REQUEST_FAILED { url, error: value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = EnvError::E1002_EMPTY_FIELD {
            field: "apiServerUrl",
        };
        let text = err.to_string();
        assert!(text.starts_with("[E1002]"));
        assert!(text.contains("apiServerUrl"));
    }

    #[test]
    fn test_unknown_target_message_lists_targets() {
        let err = EnvError::E1005_UNKNOWN_TARGET {
            value: "qa".to_owned(),
        };
        assert_eq!(err.code(), "E1005");
        assert!(err.user_message().contains("dev, staging, prod"));
    }
}
