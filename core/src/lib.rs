use core::ops::Index;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

/// Named preset resolving to a cubic board size and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new(4, 6),
            Self::Medium => GameConfig::new(6, 25),
            Self::Hard => GameConfig::new(8, 60),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub const fn total_cells(&self) -> CellCount {
        cube(self.size)
    }
}

/// Immutable mine placement plus the neighbor-mine counts derived from it.
///
/// Counts are computed once at construction over the 26-cell Moore
/// neighborhood; mine cells keep a count of 0 since it is never shown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array3<bool>,
    neighbor_counts: Array3<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array3<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        let neighbor_counts = count_neighbor_mines(&mine_mask);
        Self {
            mine_mask,
            neighbor_counts,
            mine_count,
        }
    }

    /// Builds a layout with mines at exactly the given coordinates, for
    /// deterministic setups.
    pub fn from_mine_coords(size: Coord3, mine_coords: &[Coord3]) -> Result<Self> {
        let mut mine_mask: Array3<bool> = Array3::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 || coords.2 >= size.2 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn validate_coords(&self, coords: Coord3) -> Result<Coord3> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 && coords.2 < size.2 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord3 {
        let dim = self.mine_mask.dim();
        (
            dim.0.try_into().unwrap(),
            dim.1.try_into().unwrap(),
            dim.2.try_into().unwrap(),
        )
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord3) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord3) -> u8 {
        self.neighbor_counts[coords.to_nd_index()]
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord3) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord3> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y, z): Coord3) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize, z as usize)]
    }
}

fn count_neighbor_mines(mine_mask: &Array3<bool>) -> Array3<u8> {
    let mut counts = Array3::default(mine_mask.raw_dim());
    let (x_end, y_end, z_end) = mine_mask.dim();

    for x in 0..x_end {
        for y in 0..y_end {
            for z in 0..z_end {
                if mine_mask[(x, y, z)] {
                    continue;
                }
                let coords = (
                    x.try_into().unwrap(),
                    y.try_into().unwrap(),
                    z.try_into().unwrap(),
                );
                counts[(x, y, z)] = mine_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count()
                    .try_into()
                    .unwrap();
            }
        }
    }

    counts
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
