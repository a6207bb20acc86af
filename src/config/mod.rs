pub mod policy;

use crate::domain::ports::ConfigProvider;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "inat-bingo")]
#[command(about = "Generate printable bingo cards from iNaturalist species observations")]
pub struct CliConfig {
    /// iNaturalist place, by name or numeric place ID
    #[arg(long)]
    pub place: String,

    /// Grid dimension N for N x N cards
    #[arg(long, default_value = "5")]
    pub grid_size: usize,

    /// Species pool size (top-N species by observation count)
    #[arg(long, default_value = "25")]
    pub pool_size: usize,

    /// Number of cards to generate
    #[arg(long, default_value = "10")]
    pub num_cards: usize,

    /// Base random seed; card i uses seed + i. Omit for non-reproducible cards.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reserve a centre FREE cell (odd grid dimensions only)
    #[arg(long)]
    pub free_cell: bool,

    /// Restrict observations to these calendar months (1-12)
    #[arg(long, value_delimiter = ',')]
    pub months: Vec<u32>,

    #[arg(long, help = "Omit species photos")]
    pub no_photos: bool,

    #[arg(long, help = "Omit common names")]
    pub no_common_names: bool,

    #[arg(long, help = "Omit scientific names")]
    pub no_scientific_names: bool,

    /// Document title printed at the top of every page
    #[arg(long, default_value = "Bingo: Field Trip Edition")]
    pub title: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "https://api.inaturalist.org/v1")]
    pub api_base_url: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn place_query(&self) -> &str {
        &self.place
    }

    fn grid_size(&self) -> usize {
        self.grid_size
    }

    fn pool_size(&self) -> usize {
        self.pool_size
    }

    fn num_cards(&self) -> usize {
        self.num_cards
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn free_cell(&self) -> bool {
        self.free_cell
    }

    fn months(&self) -> &[u32] {
        &self.months
    }

    fn show_photos(&self) -> bool {
        !self.no_photos
    }

    fn show_common_names(&self) -> bool {
        !self.no_common_names
    }

    fn show_scientific_names(&self) -> bool {
        !self.no_scientific_names
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_non_empty_string("place", &self.place)?;
        validation::validate_grid_dimension("grid_size", self.grid_size)?;
        validation::validate_positive_number("pool_size", self.pool_size, 1)?;
        validation::validate_positive_number("num_cards", self.num_cards, 1)?;
        validation::validate_months("months", &self.months)?;
        validation::validate_non_empty_string("title", &self.title)?;
        validation::validate_url("api_base_url", &self.api_base_url)?;
        Ok(())
    }
}
