use ndarray::Array3;

/// Single coordinate axis used for board dimensions and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Three-dimensional coordinates `(x, y, z)`.
pub type Coord3 = (Coord, Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord3 {
    type Output = [usize; 3];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into(), self.2.into()]
    }
}

/// Total cell count of a cubic board with the given edge length.
pub const fn cube(size: Coord) -> CellCount {
    let size = size as CellCount;
    size * size * size
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord3) -> NeighborIter;
}

impl<T> NeighborIterExt for Array3<T> {
    fn iter_neighbors(&self, index: Coord3) -> NeighborIter {
        let dim = self.dim();
        let bounds = (
            dim.0.try_into().unwrap(),
            dim.1.try_into().unwrap(),
            dim.2.try_into().unwrap(),
        );
        NeighborIter::new(index, bounds)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord3, delta: (isize, isize, isize), bounds: Coord3) -> Option<Coord3> {
    let (x, y, z) = coords;
    let (dx, dy, dz) = delta;
    let (max_x, max_y, max_z) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    let next_z = z.checked_add_signed(dz.try_into().ok()?)?;
    if next_z >= max_z {
        return None;
    }

    Some((next_x, next_y, next_z))
}

/// Iterator over the in-bounds Moore neighborhood of a cell, up to 26 positions.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord3,
    bounds: Coord3,
    index: u8,
}

// Displacements are enumerated as base-3 digits of 0..27; 13 is (0, 0, 0).
const DISPLACEMENT_COUNT: u8 = 27;
const CENTER_INDEX: u8 = 13;

const fn displacement(index: u8) -> (isize, isize, isize) {
    let index = index as isize;
    (index / 9 - 1, index / 3 % 3 - 1, index % 3 - 1)
}

impl NeighborIter {
    pub(crate) fn new(center: Coord3, bounds: Coord3) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord3;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.index >= DISPLACEMENT_COUNT {
                return None;
            }

            let current = self.index;
            self.index += 1;

            if current == CENTER_INDEX {
                continue;
            }

            let next_item = apply_delta(self.center, displacement(current), self.bounds);
            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn neighbors_of(center: Coord3, bounds: Coord3) -> Vec<Coord3> {
        NeighborIter::new(center, bounds).collect()
    }

    #[test]
    fn interior_cell_has_26_neighbors() {
        let neighbors = neighbors_of((1, 1, 1), (4, 4, 4));
        assert_eq!(neighbors.len(), 26);
        assert!(!neighbors.contains(&(1, 1, 1)));
    }

    #[test]
    fn corner_cell_has_7_neighbors() {
        let neighbors = neighbors_of((0, 0, 0), (4, 4, 4));
        assert_eq!(neighbors.len(), 7);
        assert!(neighbors.contains(&(1, 1, 1)));
    }

    #[test]
    fn face_cell_has_17_neighbors() {
        assert_eq!(neighbors_of((0, 1, 1), (4, 4, 4)).len(), 17);
    }

    #[test]
    fn neighbors_stay_in_bounds_and_are_distinct() {
        let neighbors = neighbors_of((3, 3, 0), (4, 4, 4));
        let distinct: BTreeSet<_> = neighbors.iter().copied().collect();
        assert_eq!(distinct.len(), neighbors.len());
        for (x, y, z) in neighbors {
            assert!(x < 4 && y < 4 && z < 4);
        }
    }

    #[test]
    fn sole_cell_of_unit_board_has_no_neighbors() {
        assert_eq!(neighbors_of((0, 0, 0), (1, 1, 1)).len(), 0);
    }

    #[test]
    fn cube_matches_volume() {
        assert_eq!(cube(4), 64);
        assert_eq!(cube(8), 512);
        assert_eq!(cube(255), 16_581_375);
    }
}
