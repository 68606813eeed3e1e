use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::envelope::unwrap_envelope;
use super::url::build_api_url;
use crate::auth::TokenStore;
use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::menu::MenuFetcher;

/// JSON client for the portal backend.
///
/// Requests carry the stored access token as a bearer credential when one
/// is present. Enveloped responses are unwrapped to their `data` payload.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_version: String,
    auth_module: String,
    menu_endpoint: String,
    tokens: Arc<dyn TokenStore>,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(settings: &ApiConfig, menu_endpoint: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let base_url = url::Url::parse(settings.base_url.trim())?;
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_version: settings.api_version_path.clone(),
            auth_module: settings.auth_module.clone(),
            menu_endpoint: menu_endpoint.to_string(),
            tokens,
            log_requests: settings.enable_request_logging,
        })
    }

    pub fn auth_module(&self) -> &str {
        &self.auth_module
    }

    pub fn module_url(&self, module: &str, endpoint: &str) -> String {
        build_api_url(&self.base_url, module, &self.api_version, endpoint)
    }

    pub async fn get_module(&self, module: &str, endpoint: &str) -> Result<Value, ClientError> {
        let request = self.request(Method::GET, module, endpoint);
        self.send(request, None).await
    }

    pub async fn post_module<B: Serialize + ?Sized>(
        &self,
        module: &str,
        endpoint: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        let request = self.request(Method::POST, module, endpoint).json(body);
        self.send(request, None).await
    }

    pub async fn delete_module(&self, module: &str, endpoint: &str) -> Result<Value, ClientError> {
        let request = self.request(Method::DELETE, module, endpoint);
        self.send(request, None).await
    }

    fn request(&self, method: Method, module: &str, endpoint: &str) -> RequestBuilder {
        let url = self.module_url(module, endpoint);
        if self.log_requests {
            tracing::debug!("{} {}", method, url);
        }
        self.http.request(method, url)
    }

    async fn send(&self, request: RequestBuilder, token: Option<&str>) -> Result<Value, ClientError> {
        let token = match token {
            Some(token) => Some(token.to_string()),
            None => self.tokens.access_token(),
        };
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(_) if (200..300).contains(&status) => {
                    return Err(ClientError::invalid_response(format!(
                        "expected JSON body, got {} bytes of text",
                        text.len()
                    )));
                }
                Err(_) => Value::Null,
            }
        };

        if self.log_requests {
            tracing::debug!("Response status {}", status);
        }
        unwrap_envelope(status, body)
    }
}

#[async_trait]
impl MenuFetcher for ApiClient {
    async fn fetch_menu(&self, access_token: &str) -> Result<Value, ClientError> {
        let request = self.request(Method::GET, &self.auth_module, &self.menu_endpoint);
        self.send(request, Some(access_token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::config::AppConfig;

    #[test]
    fn module_urls_follow_configuration() {
        let config = AppConfig::default();
        let client = ApiClient::new(&config.api, "menus", Arc::new(MemoryTokenStore::new())).unwrap();
        assert_eq!(
            client.module_url("auth", "menus"),
            "http://localhost:8080/auth/api/v1/menus"
        );
        assert_eq!(client.auth_module(), "auth");
    }

    #[test]
    fn base_url_keeps_its_path_prefix() {
        let mut config = AppConfig::default();
        config.api.base_url = "https://portal.example.com/backend/".to_string();
        let client = ApiClient::new(&config.api, "menus", Arc::new(MemoryTokenStore::new())).unwrap();
        assert_eq!(
            client.module_url("auth", "users/paginate"),
            "https://portal.example.com/backend/auth/api/v1/users/paginate"
        );
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let mut config = AppConfig::default();
        for bad in ["/api/v1", "not a url", ""] {
            config.api.base_url = bad.to_string();
            let result = ApiClient::new(&config.api, "menus", Arc::new(MemoryTokenStore::new()));
            assert!(matches!(result, Err(ClientError::Url(_))), "{} should be rejected", bad);
        }
    }
}
