use crate::config::ClientConfig;
use crate::error::PageError;
use crate::model::{BackendResponse, RecommendationRequest};
use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde_json::Value;

pub const RECOMMENDATIONS_PATH: &str = "/get_recommendations";
pub const USER_RECIPES_PATH: &str = "/get_user_recipes";
pub const SUBSCRIPTION_PATH: &str = "/subscription";

/// The two calls the page makes to the recipe service.
///
/// Implementations return the status together with the parsed JSON body for
/// every HTTP answer, error statuses included. `Err` is reserved for calls
/// that never produced a JSON body.
#[async_trait]
pub trait RecipeBackend: Send + Sync {
    /// Ask for recipes that use the given comma-separated ingredients
    async fn recommend(&self, ingredients: &str) -> Result<BackendResponse, PageError>;

    /// Fetch the recipes saved by the current user
    async fn user_recipes(&self) -> Result<BackendResponse, PageError>;
}

pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a backend client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, PageError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: &str) -> Result<Self, PageError> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base_url(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, PageError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| PageError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn read(response: reqwest::Response) -> Result<BackendResponse, PageError> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        debug!("Backend answered {} with {}", status, body);
        Ok(BackendResponse::new(status, body))
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, PageError> {
    // Url::join replaces the last path segment unless the base ends with '/'
    let normalized = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalized).map_err(|e| PageError::InvalidUrl(format!("{}: {}", base_url, e)))
}

#[async_trait]
impl RecipeBackend for HttpBackend {
    async fn recommend(&self, ingredients: &str) -> Result<BackendResponse, PageError> {
        let url = self.endpoint(RECOMMENDATIONS_PATH)?;
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(&RecommendationRequest { ingredients })
            .send()
            .await?;

        Self::read(response).await
    }

    async fn user_recipes(&self) -> Result<BackendResponse, PageError> {
        let url = self.endpoint(USER_RECIPES_PATH)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        Self::read(response).await
    }
}
