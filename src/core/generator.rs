use crate::domain::model::{Card, Cell, Grid, Species};
use crate::utils::error::{BingoError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Arranges a species pool into randomized bingo cards.
pub struct CardGenerator {
    pool: Vec<Species>,
}

impl CardGenerator {
    pub fn new(pool: Vec<Species>) -> Self {
        Self { pool }
    }

    /// Generates one card. A seed makes the shuffle reproducible; `None`
    /// draws fresh entropy. Seed 0 is a real seed, not "no seed".
    pub fn generate_card(
        &self,
        grid_size: usize,
        free_cell: bool,
        seed: Option<u64>,
    ) -> Result<Card> {
        let required = Self::required_species(grid_size, free_cell);
        if self.pool.len() < required {
            return Err(BingoError::CapacityError {
                available: self.pool.len(),
                required,
            });
        }

        let grid = self.build_grid(grid_size, free_cell, seed);
        Card::new(grid, grid_size, free_cell, seed)
    }

    /// Generates `num_cards` independent cards. With a base seed, card i is
    /// seeded `base + i` so batches are reproducible per index without
    /// repeating the same shuffle across the batch.
    pub fn generate_cards(
        &self,
        num_cards: usize,
        grid_size: usize,
        free_cell: bool,
        base_seed: Option<u64>,
    ) -> Result<Vec<Card>> {
        (0..num_cards)
            .map(|i| {
                let card_seed = base_seed.map(|base| base.wrapping_add(i as u64));
                self.generate_card(grid_size, free_cell, card_seed)
            })
            .collect()
    }

    /// Species needed to fill the grid; the centre cell is excluded when it
    /// will hold the free marker (odd dimensions only).
    fn required_species(grid_size: usize, free_cell: bool) -> usize {
        let free_slots = usize::from(free_cell && grid_size % 2 == 1);
        grid_size * grid_size - free_slots
    }

    fn build_grid(&self, grid_size: usize, free_cell: bool, seed: Option<u64>) -> Grid {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let mut shuffled = self.pool.clone();
        shuffled.shuffle(&mut rng);

        let place_free = free_cell && grid_size % 2 == 1;
        let centre = grid_size / 2;
        let mut picks = shuffled.into_iter();

        (0..grid_size)
            .map(|row| {
                (0..grid_size)
                    .map(|col| {
                        if place_free && row == centre && col == centre {
                            Cell::Free
                        } else {
                            // required_species() was checked up front
                            Cell::Species(picks.next().unwrap())
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<Species> {
        (0..n as u64)
            .map(|id| Species {
                taxon_id: id,
                common_name: format!("Common {}", id),
                scientific_name: format!("Species {}", id),
                image_url: String::new(),
            })
            .collect()
    }

    fn species_ids(card: &Card) -> Vec<u64> {
        card.grid
            .iter()
            .flatten()
            .filter_map(|cell| match cell {
                Cell::Species(s) => Some(s.taxon_id),
                Cell::Free => None,
            })
            .collect()
    }

    #[test]
    fn test_card_shape_matches_dimension() {
        let generator = CardGenerator::new(pool(30));
        for &size in &[3usize, 4, 5] {
            for &free in &[false, true] {
                let card = generator.generate_card(size, free, Some(1)).unwrap();
                assert_eq!(card.grid.len(), size);
                assert!(card.grid.iter().all(|row| row.len() == size));
            }
        }
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let generator = CardGenerator::new(pool(9));
        let a = generator.generate_card(3, false, Some(42)).unwrap();
        let b = generator.generate_card(3, false, Some(42)).unwrap();
        assert_eq!(a.grid, b.grid);

        let all: HashSet<u64> = species_ids(&a).into_iter().collect();
        assert_eq!(all.len(), 9, "all nine species placed exactly once");
    }

    #[test]
    fn test_different_seed_changes_arrangement() {
        let generator = CardGenerator::new(pool(9));
        let a = generator.generate_card(3, false, Some(42)).unwrap();
        let b = generator.generate_card(3, false, Some(43)).unwrap();
        assert_ne!(a.grid, b.grid);
    }

    #[test]
    fn test_free_cell_at_centre_of_odd_grid() {
        let generator = CardGenerator::new(pool(24));
        let card = generator.generate_card(5, true, Some(7)).unwrap();

        let free_count = card
            .grid
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, Cell::Free))
            .count();
        assert_eq!(free_count, 1);
        assert_eq!(card.grid[2][2], Cell::Free);
        assert_eq!(species_ids(&card).len(), 24);
    }

    #[test]
    fn test_free_cell_ignored_on_even_grid() {
        let generator = CardGenerator::new(pool(16));
        let card = generator.generate_card(4, true, Some(7)).unwrap();
        assert!(card.grid.iter().flatten().all(|c| matches!(c, Cell::Species(_))));
    }

    #[test]
    fn test_capacity_error_when_pool_too_small() {
        let generator = CardGenerator::new(pool(8));
        let err = generator.generate_card(3, false, Some(1)).unwrap_err();
        match err {
            BingoError::CapacityError {
                available,
                required,
            } => {
                assert_eq!(available, 8);
                assert_eq!(required, 9);
            }
            other => panic!("expected capacity error, got {:?}", other),
        }
    }

    #[test]
    fn test_free_cell_lowers_required_pool() {
        // 24 species fill a 5x5 grid once the centre is reserved.
        let generator = CardGenerator::new(pool(24));
        assert!(generator.generate_card(5, true, None).is_ok());
        assert!(generator.generate_card(5, false, None).is_err());
    }

    #[test]
    fn test_no_species_repeats_within_card() {
        let generator = CardGenerator::new(pool(30));
        let card = generator.generate_card(5, false, Some(11)).unwrap();
        let ids = species_ids(&card);
        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_batch_seed_matches_single_generation() {
        let generator = CardGenerator::new(pool(30));
        let batch = generator.generate_cards(4, 5, true, Some(100)).unwrap();
        for (i, card) in batch.iter().enumerate() {
            let single = generator
                .generate_card(5, true, Some(100 + i as u64))
                .unwrap();
            assert_eq!(card.grid, single.grid);
        }
    }

    #[test]
    fn test_zero_is_a_real_seed() {
        let generator = CardGenerator::new(pool(9));
        let a = generator.generate_card(3, false, Some(0)).unwrap();
        let b = generator.generate_card(3, false, Some(0)).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.seed, Some(0));
    }

    #[test]
    fn test_unseeded_batch_produces_cards() {
        let generator = CardGenerator::new(pool(9));
        let batch = generator.generate_cards(3, 3, false, None).unwrap();
        assert_eq!(batch.len(), 3);
        assert!(batch.iter().all(|c| c.seed.is_none()));
    }
}
