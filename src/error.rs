use thiserror::Error;

use crate::view::ElementId;

/// Errors that can occur while bootstrapping or talking to the backend
#[derive(Error, Debug)]
pub enum PageError {
    /// A required element is not present on the page
    #[error("Required element '{0}' not found on the page")]
    MissingElement(ElementId),

    /// The controller was created outside a tokio runtime
    #[error("Page controller must be created inside a tokio runtime")]
    NoRuntime,

    /// The request never completed
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON we expected
    #[error("Invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// A successful response carried no recipe list
    #[error("Response is missing the 'recipes' array")]
    MissingRecipes,

    /// Backend base URL could not be used
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
