pub mod engine;
pub mod generator;
pub mod layout;
pub mod pipeline;
pub mod renderer;

pub use crate::domain::model::{Card, Cell, Grid, Species};
pub use crate::domain::ports::{
    Clock, ConfigProvider, PhotoFetcher, Pipeline, SpeciesSource, Storage,
};
pub use crate::utils::error::Result;
