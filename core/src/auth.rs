use url::Url;

use crate::environment::Auth0Settings;
use crate::errors::{EnvError, EnvResult};

const AUTH0_HOST_SUFFIX: &str = "auth0.com";

impl Auth0Settings {
    /// Full tenant host, the domain prefix joined with the provider suffix.
    pub fn domain(&self) -> String {
        format!("{}.{}", self.url(), AUTH0_HOST_SUFFIX)
    }

    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain())
    }
}

/// Implicit-flow links for the hosted login page of the identity provider.
pub struct LoginLink<'a> {
    settings: &'a Auth0Settings,
}

impl<'a> LoginLink<'a> {
    pub const fn new(settings: &'a Auth0Settings) -> Self {
        Self { settings }
    }

    fn tenant_url(&self, path: &str) -> EnvResult<Url> {
        let domain = self.settings.domain();
        Url::parse(&format!("https://{domain}{path}"))
            .map_err(|_| EnvError::E1004_INVALID_DOMAIN { value: domain })
    }

    /// Authorization URL; the provider redirects to `callbackURL` followed by
    /// `callback_path` with the token in the fragment.
    pub fn build(&self, callback_path: &str) -> EnvResult<Url> {
        let redirect_uri = format!("{}{}", self.settings.callback_url(), callback_path);

        let mut url = self.tenant_url("/authorize")?;
        url.query_pairs_mut()
            .append_pair("audience", self.settings.audience())
            .append_pair("response_type", "token")
            .append_pair("client_id", self.settings.client_id())
            .append_pair("redirect_uri", &redirect_uri);

        log::debug!("Login link built for redirect {redirect_uri}");
        Ok(url)
    }

    pub fn logout_url(&self, return_to: &str) -> EnvResult<Url> {
        let mut url = self.tenant_url("/v2/logout")?;
        url.query_pairs_mut()
            .append_pair("client_id", self.settings.client_id())
            .append_pair("returnTo", return_to);
        Ok(url)
    }
}
