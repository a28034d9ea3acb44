use ndarray::Array3;

use super::*;

/// Uniform rejection-sampling placement: draw random coordinate triples and
/// keep the ones that land on an empty cell until the requested count is
/// placed. Fails fast instead of looping forever when the count cannot fit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineLayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        if config.mines >= config.total_cells() {
            return Err(GameError::TooManyMines);
        }

        let size = config.size;
        let dim = (size, size, size).to_nd_index();
        let mut mine_mask: Array3<bool> = Array3::default(dim);
        let mut mines_placed = 0;
        let mut draws = 0u64;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while mines_placed < config.mines {
            let coords = (
                rng.random_range(0..size),
                rng.random_range(0..size),
                rng.random_range(0..size),
            );
            draws += 1;
            if !mine_mask[coords.to_nd_index()] {
                mine_mask[coords.to_nd_index()] = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "placed {} mines on a {size}^3 board in {draws} draws",
            config.mines
        );
        Ok(MineLayout::from_mine_mask(mine_mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mine_count() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let config = difficulty.config();
            let layout = RandomLayoutGenerator::new(42).generate(config).unwrap();
            assert_eq!(layout.mine_count(), config.mines);
            assert_eq!(layout.total_cells(), config.total_cells());
        }
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let config = Difficulty::Hard.config();
        let a = RandomLayoutGenerator::new(9).generate(config).unwrap();
        let b = RandomLayoutGenerator::new(9).generate(config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dense_board_still_terminates() {
        // 26 of 27 cells mined, the worst case rejection sampling must handle
        let config = GameConfig::new(3, 26);
        let layout = RandomLayoutGenerator::new(0).generate(config).unwrap();
        assert_eq!(layout.mine_count(), 26);
        assert_eq!(layout.safe_cell_count(), 1);
    }

    #[test]
    fn zero_mines_is_a_valid_config() {
        let layout = RandomLayoutGenerator::new(0)
            .generate(GameConfig::new(2, 0))
            .unwrap();
        assert_eq!(layout.mine_count(), 0);
    }

    #[test]
    fn impossible_mine_count_fails_fast() {
        let generator = RandomLayoutGenerator::new(0);
        assert_eq!(
            generator.generate(GameConfig::new(2, 8)),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            generator.generate(GameConfig::new(2, 9)),
            Err(GameError::TooManyMines)
        );
    }
}
