//! Remote color lookup service client

use thiserror::Error;

use crate::models::{self, Color, ColorSample};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("lookup service returned status {0}")]
    Status(u16),
}

/// Lookup of color records by RGB triple or hex string
///
/// Implementations resolve a color to its canonical name and display strings.
/// Callers recover from any error by synthesizing a local fallback sample, so
/// lookup failures are never fatal.
#[async_trait]
pub trait ColorLookup: Send + Sync {
    async fn by_rgb(&self, color: Color) -> Result<ColorSample, LookupError>;

    /// Look up by a clean hex string (`RRGGBB`, no leading `#`)
    async fn by_hex(&self, hex: &str) -> Result<ColorSample, LookupError>;
}

/// Client for `thecolorapi.com`-style `/id` endpoints
pub struct TheColorApi {
    client: reqwest::Client,
    base_url: String,
}

impl TheColorApi {
    pub fn new(config: &models::Lookup) -> Result<Self, LookupError> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(config.timeout())
                .build()?,
            base_url: config.url.trim_end_matches('/').to_owned(),
        })
    }

    async fn fetch(&self, query: &[(&str, String)]) -> Result<ColorSample, LookupError> {
        let response = self
            .client
            .get(format!("{}/id", self.base_url))
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ColorLookup for TheColorApi {
    async fn by_rgb(&self, color: Color) -> Result<ColorSample, LookupError> {
        let (r, g, b) = color.into_components();
        self.fetch(&[("rgb", format!("{},{},{}", r, g, b))]).await
    }

    async fn by_hex(&self, hex: &str) -> Result<ColorSample, LookupError> {
        self.fetch(&[("hex", hex.to_owned())]).await
    }
}
