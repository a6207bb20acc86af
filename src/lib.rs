pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::cache::{CachedSpeciesSource, SystemClock};
pub use adapters::inaturalist::INaturalistClient;
pub use adapters::photos::HttpPhotoFetcher;
pub use adapters::storage::LocalStorage;
pub use config::CliConfig;
pub use crate::core::{engine::BingoEngine, pipeline::BingoPipeline};
pub use utils::error::{BingoError, Result};
