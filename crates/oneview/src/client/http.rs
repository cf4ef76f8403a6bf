//! reqwest-backed [`RestClient`] for the OneView appliance.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::traits::{OneViewError, Query, RestClient};
use crate::config::ClientConfig;

/// Login session endpoint.
const LOGIN_PATH: &str = "/rest/login-sessions";

/// Header carrying the session token.
const AUTH_HEADER: &str = "Auth";

/// Header carrying the REST API version.
const API_VERSION_HEADER: &str = "X-API-Version";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_name: &'a str,
    password: &'a str,
    auth_login_domain: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(rename = "sessionID")]
    session_id: String,
}

/// OneView REST client with a cached login session.
///
/// The session is created on first use. A `401` drops it, logs in again
/// and replays the request once; a second `401` is returned as
/// [`OneViewError::Unauthorized`].
pub struct OneViewClient {
    /// HTTP client.
    client: Client,
    /// Connection settings.
    config: ClientConfig,
    /// Current session token.
    session: RwLock<Option<String>>,
}

impl OneViewClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, OneViewError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            config,
            session: RwLock::new(None),
        })
    }

    /// Absolute URL for an appliance path. Absolute URLs pass through.
    fn url(&self, path: &str) -> String {
        if path.starts_with("https://") || path.starts_with("http://") {
            path.to_string()
        } else {
            format!("{}{path}", self.config.base_url())
        }
    }

    /// Create a login session and cache its token.
    async fn login(&self) -> Result<String, OneViewError> {
        let url = self.url(LOGIN_PATH);
        debug!(url = %url, user = %self.config.username, "Creating login session");

        let body = LoginRequest {
            user_name: &self.config.username,
            password: &self.config.password,
            auth_login_domain: &self.config.auth_login_domain,
        };

        let response = self
            .client
            .post(&url)
            .header(API_VERSION_HEADER, self.config.api_version.to_string())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(OneViewError::Unauthorized(text));
        }
        if !status.is_success() {
            return Err(OneViewError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let login: LoginResponse = serde_json::from_str(&text)?;
        *self.session.write().await = Some(login.session_id.clone());

        info!(endpoint = %self.config.base_url(), "Login session established");
        Ok(login.session_id)
    }

    /// Cached session token, logging in when there is none.
    async fn session_token(&self) -> Result<String, OneViewError> {
        if let Some(token) = self.session.read().await.clone() {
            return Ok(token);
        }
        self.login().await
    }

    /// Send one authenticated request.
    async fn dispatch(
        &self,
        method: &Method,
        url: &str,
        token: &str,
        query: &Query,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, OneViewError> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(AUTH_HEADER, token)
            .header(API_VERSION_HEADER, self.config.api_version.to_string());

        if !query.is_empty() {
            request = request.query(&query.pairs());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Send a request, re-authenticating once on `401`.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&serde_json::Value>,
    ) -> Result<String, OneViewError> {
        let url = self.url(path);
        debug!(method = %method, url = %url, query = ?query, "Request");

        let token = self.session_token().await?;
        let response = self.dispatch(&method, &url, &token, query, body).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::handle_response(response).await;
        }

        warn!(url = %url, "Session rejected, logging in again");
        *self.session.write().await = None;
        let token = self.login().await?;
        let response = self.dispatch(&method, &url, &token, query, body).await?;
        Self::handle_response(response).await
    }

    /// Handle API response, returning the body or an error.
    async fn handle_response(response: Response) -> Result<String, OneViewError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else if status == StatusCode::NOT_FOUND {
            Err(OneViewError::NotFound(text))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(OneViewError::Unauthorized(text))
        } else {
            Err(OneViewError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[async_trait]
impl RestClient for OneViewClient {
    async fn get(&self, path: &str, query: &Query) -> Result<String, OneViewError> {
        self.send(Method::GET, path, query, None).await
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<String, OneViewError> {
        self.send(Method::POST, path, &Query::none(), Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig {
            endpoint: "https://oneview.local/".into(),
            username: "admin".into(),
            password: "secret".into(),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_url_joins_relative_paths() {
        let client = OneViewClient::new(config()).unwrap();
        assert_eq!(
            client.url("/rest/tasks/42"),
            "https://oneview.local/rest/tasks/42"
        );
        assert_eq!(
            client.url("https://other.local/rest/tasks/42"),
            "https://other.local/rest/tasks/42"
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = OneViewClient::new(ClientConfig::default());
        assert!(matches!(result, Err(OneViewError::Config(_))));
    }

    #[test]
    fn test_login_request_field_names() {
        let body = LoginRequest {
            user_name: "admin",
            password: "secret",
            auth_login_domain: "LOCAL",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["userName"], "admin");
        assert_eq!(value["authLoginDomain"], "LOCAL");
    }
}
