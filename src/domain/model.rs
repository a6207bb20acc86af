use crate::utils::error::{BingoError, Result};
use serde::{Deserialize, Serialize};

/// One species as fetched from the observation service. Immutable after fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub taxon_id: u64,
    pub common_name: String,
    pub scientific_name: String,
    pub image_url: String,
}

impl Species {
    /// Common name when present, scientific name otherwise.
    pub fn display_name(&self) -> &str {
        if self.common_name.is_empty() {
            &self.scientific_name
        } else {
            &self.common_name
        }
    }
}

/// A single card cell: a species, or the pre-satisfied centre marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Species(Species),
    Free,
}

pub type Grid = Vec<Vec<Cell>>;

/// A bingo card: an N x N grid plus the parameters that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub grid: Grid,
    pub size: usize,
    pub has_free_cell: bool,
    pub seed: Option<u64>,
}

impl Card {
    /// Builds a card, rejecting any grid whose shape does not match `size`.
    pub fn new(grid: Grid, size: usize, has_free_cell: bool, seed: Option<u64>) -> Result<Self> {
        if grid.len() != size {
            return Err(BingoError::ConfigError {
                message: format!("Grid must have {} rows, got {}", size, grid.len()),
            });
        }
        for (i, row) in grid.iter().enumerate() {
            if row.len() != size {
                return Err(BingoError::ConfigError {
                    message: format!("Row {} must have {} columns, got {}", i, size, row.len()),
                });
            }
        }
        Ok(Self {
            grid,
            size,
            has_free_cell,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(id: u64) -> Species {
        Species {
            taxon_id: id,
            common_name: format!("Common {}", id),
            scientific_name: format!("Species {}", id),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_display_name_prefers_common_name() {
        let s = species(1);
        assert_eq!(s.display_name(), "Common 1");

        let mut unnamed = species(2);
        unnamed.common_name.clear();
        assert_eq!(unnamed.display_name(), "Species 2");
    }

    #[test]
    fn test_card_rejects_wrong_row_count() {
        let grid = vec![vec![Cell::Species(species(1)); 2]];
        assert!(Card::new(grid, 2, false, None).is_err());
    }

    #[test]
    fn test_card_rejects_ragged_rows() {
        let grid = vec![
            vec![Cell::Species(species(1)), Cell::Species(species(2))],
            vec![Cell::Species(species(3))],
        ];
        assert!(Card::new(grid, 2, false, None).is_err());
    }

    #[test]
    fn test_card_accepts_square_grid() {
        let grid = vec![
            vec![Cell::Species(species(1)), Cell::Species(species(2))],
            vec![Cell::Species(species(3)), Cell::Species(species(4))],
        ];
        assert!(Card::new(grid, 2, false, None).is_ok());
    }
}
