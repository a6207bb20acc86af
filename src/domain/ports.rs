use crate::domain::model::{Card, Species};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Instant;

/// Where the finished document goes.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Everything the pipeline needs to know about one generation request.
pub trait ConfigProvider: Send + Sync {
    fn place_query(&self) -> &str;
    fn grid_size(&self) -> usize;
    fn pool_size(&self) -> usize;
    fn num_cards(&self) -> usize;
    fn seed(&self) -> Option<u64>;
    fn free_cell(&self) -> bool;
    fn months(&self) -> &[u32];
    fn show_photos(&self) -> bool;
    fn show_common_names(&self) -> bool;
    fn show_scientific_names(&self) -> bool;
    fn title(&self) -> &str;
    fn output_path(&self) -> &str;
    fn api_base_url(&self) -> &str;
}

/// Upstream species-observation service.
#[async_trait]
pub trait SpeciesSource: Send + Sync {
    /// Resolves a free-text place query to a place ID, `None` when nothing
    /// matches (or the lookup itself fails).
    async fn lookup_place(&self, query: &str) -> Result<Option<u64>>;

    /// Top-N qualifying species for a place, optionally restricted to a set
    /// of calendar months. A whole-query upstream failure yields an empty
    /// list; callers must treat emptiness as "unable to fetch".
    async fn top_species(&self, place_id: u64, top_n: usize, months: &[u32])
        -> Result<Vec<Species>>;
}

/// Raw photo bytes by URL.
#[async_trait]
pub trait PhotoFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Injectable time source so cache expiry is testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Species>>;
    async fn transform(&self, pool: Vec<Species>) -> Result<Vec<Card>>;
    async fn load(&self, cards: Vec<Card>) -> Result<String>;
}
