use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::environment::Environment;
use crate::errors::{EnvError, EnvResult};

#[allow(clippy::unwrap_used)]
static DOMAIN_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    // literal pattern, covered by the domain prefix tests
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9.-]*[A-Za-z0-9])?$").unwrap()
});

pub fn validate(environment: &Environment) -> EnvResult<()> {
    match validate_all(environment).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every problem of the record, in field order.
pub fn validate_all(environment: &Environment) -> Vec<EnvError> {
    let auth0 = environment.auth0();
    let mut errors = Vec::new();

    let fields: [(&'static str, &str); 5] = [
        ("apiServerUrl", environment.api_server_url()),
        ("auth0.url", auth0.url()),
        ("auth0.audience", auth0.audience()),
        ("auth0.clientId", auth0.client_id()),
        ("auth0.callbackURL", auth0.callback_url()),
    ];

    for (field, value) in fields {
        if value.trim().is_empty() {
            errors.push(EnvError::E1002_EMPTY_FIELD { field });
            continue;
        }

        let check = match field {
            "apiServerUrl" | "auth0.callbackURL" => absolute_http_url(field, value).map(|_| ()),
            "auth0.url" => domain_prefix(value),
            _ => Ok(()),
        };
        if let Err(e) = check {
            errors.push(e);
        }
    }

    errors
}

pub fn absolute_http_url(field: &'static str, value: &str) -> EnvResult<Url> {
    let invalid = |reason: String| EnvError::E1003_INVALID_URL {
        field,
        value: value.to_owned(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_owned()));
    }
    Ok(url)
}

fn domain_prefix(value: &str) -> EnvResult<()> {
    let valid = DOMAIN_PREFIX.is_match(value) && !value.contains("..");

    if valid {
        Ok(())
    } else {
        Err(EnvError::E1004_INVALID_DOMAIN {
            value: value.to_owned(),
        })
    }
}
