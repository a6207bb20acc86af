use crate::config::policy;
use crate::domain::ports::PhotoFetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Plain HTTP photo download with the fixed API timeout.
#[derive(Debug, Clone)]
pub struct HttpPhotoFetcher {
    client: Client,
}

impl HttpPhotoFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(policy::API_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PhotoFetcher for HttpPhotoFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
