//! Build-time policy constants: licensing, taxonomy, API behavior and page
//! geometry. These are static policy, not runtime configuration.

use std::time::Duration;

/// Photo license codes acceptable for reuse on a card. A record with no
/// license code is acceptable; a code outside this list excludes the record.
pub const ALLOWED_LICENSES: [&str; 5] = ["cc0", "cc-by", "cc-by-nc", "cc-by-sa", "cc-by-nc-sa"];

/// Taxonomic rank levels that qualify: species (10) through variety (15).
pub const MIN_RANK_LEVEL: f64 = 10.0;
pub const MAX_RANK_LEVEL: f64 = 15.0;

pub const API_TIMEOUT: Duration = Duration::from_secs(10);
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 12);

/// The upstream caps species_counts pages at 500 records.
pub const MAX_PER_PAGE: usize = 500;

pub const OUTPUT_FILENAME: &str = "inat_bingo_cards.pdf";
pub const OUTPUT_MIME_TYPE: &str = "application/pdf";

// Page geometry, in PDF points (1 inch = 72 pt). US letter.
pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;
pub const PAGE_MARGIN: f64 = 72.0;

pub const TITLE_FONT_SIZE: f64 = 18.0;
pub const TITLE_SPACER: f64 = 14.4;

pub const GRID_LINE_WIDTH: f64 = 0.75;
/// Grey level of the cell borders (DeviceGray).
pub const GRID_LINE_GRAY: f64 = 0.5;

pub const FREE_LABEL: &str = "FREE";
pub const FREE_LABEL_FONT_SIZE: f64 = 14.0;

/// Per-dimension layout: photo allotment, text size and cell padding tuned
/// so the grid fits one page. Larger grids get smaller allotments.
#[derive(Debug, Clone, Copy)]
pub struct CellLayout {
    pub photo_size: f64,
    pub text_size: f64,
    pub padding: f64,
}

pub const SUPPORTED_GRID_DIMENSIONS: [usize; 3] = [3, 4, 5];

pub fn cell_layout(grid_size: usize) -> Option<CellLayout> {
    match grid_size {
        3 => Some(CellLayout {
            photo_size: 100.8,
            text_size: 10.0,
            padding: 4.0,
        }),
        4 => Some(CellLayout {
            photo_size: 84.0,
            text_size: 9.0,
            padding: 4.0,
        }),
        5 => Some(CellLayout {
            photo_size: 70.0,
            text_size: 8.0,
            padding: 4.0,
        }),
        _ => None,
    }
}
