use log::{error, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::environment::Environment;
use crate::errors::{EnvError, EnvResult};
use crate::validation::absolute_http_url;

/// HTTP client rooted at the `apiServerUrl` of an environment.
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(environment: &Environment) -> EnvResult<Self> {
        Self::with_client(environment, Client::new())
    }

    pub fn with_client(environment: &Environment, client: Client) -> EnvResult<Self> {
        let mut base = absolute_http_url("apiServerUrl", environment.api_server_url())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base, client })
    }

    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves `path` below the base. Full URLs and paths escaping the base
    /// path are rejected, requests never leave the configured API server.
    pub fn endpoint(&self, path: &str) -> EnvResult<Url> {
        let invalid = |reason: &str| EnvError::E1003_INVALID_URL {
            field: "apiServerUrl",
            value: format!("{}{}", self.base, path),
            reason: reason.to_owned(),
        };

        if Url::parse(path).is_ok() {
            return Err(invalid("endpoint path must be relative"));
        }

        let joined = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|e| invalid(&e.to_string()))?;

        if joined.origin() != self.base.origin() || !joined.path().starts_with(self.base.path()) {
            return Err(invalid("endpoint path escapes the API base path"));
        }
        Ok(joined)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> EnvResult<T> {
        let url = self.endpoint(path)?;
        let mut request = self.client.get(url.clone());
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return EnvError::E2002_REQUEST_FAILED_HTTP_CODE {
                url: url.to_string(),
                code: response.status().into(),
            }
            .into();
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Reachability check of the API server, any HTTP answer counts.
    pub async fn probe(&self) -> EnvResult<u16> {
        match self.client.get(self.base.clone()).send().await {
            Ok(response) => {
                let code = response.status().as_u16();
                info!("API server {} answered with {}", self.base, code);
                Ok(code)
            }
            Err(e) => {
                error!("API server {} is unreachable: {}", self.base, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{BuildTarget, overrides::Overrides};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn environment_with_api(api: &str) -> Environment {
        let overrides = Overrides {
            api_server_url: Some(api.to_owned()),
            ..Default::default()
        };
        Environment::load_with(BuildTarget::Development, overrides).unwrap()
    }

    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_endpoint_from_development_record() {
        let env = Environment::load_with(BuildTarget::Development, Overrides::default()).unwrap();
        let client = ApiClient::new(&env).unwrap();

        assert_eq!(client.base().as_str(), "http://127.0.0.1:5000/");
        assert_eq!(
            client.endpoint("/drinks").unwrap().as_str(),
            "http://127.0.0.1:5000/drinks"
        );
        assert_eq!(
            client.endpoint("drinks-detail").unwrap().as_str(),
            "http://127.0.0.1:5000/drinks-detail"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let env = environment_with_api("https://coffee.example/api");
        let client = ApiClient::new(&env).unwrap();

        assert_eq!(
            client.endpoint("/drinks/1").unwrap().as_str(),
            "https://coffee.example/api/drinks/1"
        );
    }

    #[test]
    fn test_endpoint_rejects_full_url() {
        let env = environment_with_api("https://coffee.example/api");
        let client = ApiClient::new(&env).unwrap();

        for path in ["https://other.example/steal", "http://127.0.0.1:5000/drinks"] {
            match client.endpoint(path) {
                Err(EnvError::E1003_INVALID_URL { field, .. }) => assert_eq!(field, "apiServerUrl"),
                other => panic!("{path}: unexpected {other:?}"),
            }
        }
        // leading slashes are stripped, the host stays put
        assert_eq!(
            client.endpoint("//other.example/steal").unwrap().as_str(),
            "https://coffee.example/api/other.example/steal"
        );
    }

    #[test]
    fn test_endpoint_rejects_escaping_base_path() {
        let env = environment_with_api("https://coffee.example/api");
        let client = ApiClient::new(&env).unwrap();

        for path in ["../drinks", "/drinks/../../drinks", "%2e%2e/drinks"] {
            assert!(
                matches!(client.endpoint(path), Err(EnvError::E1003_INVALID_URL { .. })),
                "{path}"
            );
        }
        // dot segments that stay below the base are fine
        assert_eq!(
            client.endpoint("drinks/../drinks-detail").unwrap().as_str(),
            "https://coffee.example/api/drinks-detail"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&environment_with_api(&format!("http://{addr}"))).unwrap();

        match client.get_json::<serde_json::Value>("/drinks", Some("token")).await {
            Err(EnvError::E2001_REQUEST_FAILED { url: Some(url), .. }) => {
                assert!(url.ends_with("/drinks"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            client.probe().await,
            Err(EnvError::E2001_REQUEST_FAILED { url: Some(_), .. })
        ));
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let api = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 17\r\nconnection: close\r\n\r\n{\"success\": true}",
        )
        .await;
        let client = ApiClient::new(&environment_with_api(&api)).unwrap();

        let body: serde_json::Value = client.get_json("/drinks", Some("token")).await.unwrap();
        assert_eq!(body["success"], serde_json::Value::Bool(true));
    }

    #[tokio::test]
    async fn test_get_json_http_error() {
        let api = serve_once(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let client = ApiClient::new(&environment_with_api(&api)).unwrap();

        let result = client.get_json::<serde_json::Value>("/drinks/42", None).await;
        match result {
            Err(EnvError::E2002_REQUEST_FAILED_HTTP_CODE { code, url }) => {
                assert_eq!(code, 404);
                assert!(url.ends_with("/drinks/42"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_probe_reports_status() {
        let api = serve_once(
            "HTTP/1.1 204 No Content\r\nconnection: close\r\n\r\n",
        )
        .await;
        let client = ApiClient::new(&environment_with_api(&api)).unwrap();

        assert_eq!(client.probe().await.unwrap(), 204);
    }
}
