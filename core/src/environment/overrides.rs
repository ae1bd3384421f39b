use super::Environment;

const API_SERVER_URL: Option<&str> = option_env!("API_SERVER_URL");
const AUTH0_URL: Option<&str> = option_env!("AUTH0_URL");
const AUTH0_AUDIENCE: Option<&str> = option_env!("AUTH0_AUDIENCE");
const AUTH0_CLIENT_ID: Option<&str> = option_env!("AUTH0_CLIENT_ID");
const AUTH0_CALLBACK_URL: Option<&str> = option_env!("AUTH0_CALLBACK_URL");

/// Per-deployment values injected by the build pipeline. `production` is not
/// part of it, the flag always follows the build target.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub api_server_url: Option<String>,
    pub auth0_url: Option<String>,
    pub auth0_audience: Option<String>,
    pub auth0_client_id: Option<String>,
    pub auth0_callback_url: Option<String>,
}

impl Overrides {
    pub fn from_build() -> Self {
        Self {
            api_server_url: baked(API_SERVER_URL),
            auth0_url: baked(AUTH0_URL),
            auth0_audience: baked(AUTH0_AUDIENCE),
            auth0_client_id: baked(AUTH0_CLIENT_ID),
            auth0_callback_url: baked(AUTH0_CALLBACK_URL),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.api_server_url.is_none()
            && self.auth0_url.is_none()
            && self.auth0_audience.is_none()
            && self.auth0_client_id.is_none()
            && self.auth0_callback_url.is_none()
    }

    #[must_use]
    pub fn apply(self, mut environment: Environment) -> Environment {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        if let Some(value) = non_empty(self.api_server_url) {
            environment.api_server_url = value;
        }
        if let Some(value) = non_empty(self.auth0_url) {
            environment.auth0.url = value;
        }
        if let Some(value) = non_empty(self.auth0_audience) {
            environment.auth0.audience = value;
        }
        if let Some(value) = non_empty(self.auth0_client_id) {
            environment.auth0.client_id = value;
        }
        if let Some(value) = non_empty(self.auth0_callback_url) {
            environment.auth0.callback_url = value;
        }
        environment
    }
}

fn baked(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(ToOwned::to_owned)
}
