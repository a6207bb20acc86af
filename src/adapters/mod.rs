// Adapters layer: concrete implementations for external systems (the
// iNaturalist API, photo downloads, image processing, the filesystem).

pub mod cache;
pub mod image;
pub mod inaturalist;
pub mod photos;
pub mod storage;
