use std::time::Duration;

use serde::ser::{Serialize, Serializer};

use crate::*;

/// Sentinel strings used when a snapshot value is not a neighbor count.
const MINE_SENTINEL: &str = "M";
const FLAG_SENTINEL: &str = "F";

/// Value attached to one snapshot cell: a neighbor-mine count, a disclosed
/// mine, or a flag. Serializes as a bare number or the sentinel string.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellValue {
    Count(u8),
    Mine,
    Flag,
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Self::Count(count) => serializer.serialize_u8(*count),
            Self::Mine => serializer.serialize_str(MINE_SENTINEL),
            Self::Flag => serializer.serialize_str(FLAG_SENTINEL),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SnapshotCell {
    pub x: Coord,
    pub y: Coord,
    pub z: Coord,
    pub value: CellValue,
}

/// Read-only projection of a game handed to external advisory tooling.
///
/// Lists only revealed and flagged cells; hidden cell contents never leave the
/// engine through this surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub mine_count: CellCount,
    pub revealed_count: CellCount,
    pub elapsed: Duration,
    pub cells: Vec<SnapshotCell>,
}

impl Snapshot {
    pub fn from_engine(engine: &GameEngine) -> Self {
        let (x_end, y_end, z_end) = engine.size();
        let mut cells = Vec::new();

        for x in 0..x_end {
            for y in 0..y_end {
                for z in 0..z_end {
                    let coords = (x, y, z);
                    let value = match engine.cell_at(coords) {
                        EngineCell::Hidden => continue,
                        EngineCell::Flagged => CellValue::Flag,
                        EngineCell::Revealed(_) if engine.has_mine_at(coords) => CellValue::Mine,
                        EngineCell::Revealed(count) => CellValue::Count(count),
                    };
                    cells.push(SnapshotCell { x, y, z, value });
                }
            }
        }

        Self {
            status: engine.status(),
            mine_count: engine.mine_count(),
            revealed_count: engine.revealed_count(),
            elapsed: engine.elapsed(),
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord3, mines: &[Coord3]) -> GameEngine {
        GameEngine::from_layout(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn snapshot_maps_revealed_and_flagged_cells() {
        let mut engine = engine((2, 2, 2), &[(1, 1, 1)]);

        engine.reveal((0, 0, 0)).unwrap();
        engine.toggle_flag((1, 1, 0)).unwrap();

        let snapshot = engine.snapshot();

        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.mine_count, 1);
        assert_eq!(snapshot.revealed_count, 1);
        assert_eq!(
            snapshot.cells,
            vec![
                SnapshotCell { x: 0, y: 0, z: 0, value: CellValue::Count(1) },
                SnapshotCell { x: 1, y: 1, z: 0, value: CellValue::Flag },
            ]
        );
    }

    #[test]
    fn snapshot_never_lists_hidden_cells() {
        let mut engine = engine((4, 4, 4), &[(0, 0, 0), (2, 2, 2)]);

        engine.reveal((3, 0, 0)).unwrap();
        engine.toggle_flag((0, 0, 0)).unwrap();

        let snapshot = engine.snapshot();
        let listed = snapshot.cells.len() as CellCount;

        assert_eq!(listed, engine.revealed_count() + engine.flagged_count());
        for cell in &snapshot.cells {
            assert_ne!(
                engine.cell_at((cell.x, cell.y, cell.z)),
                EngineCell::Hidden
            );
        }
    }

    #[test]
    fn disclosed_mines_use_the_mine_sentinel() {
        let mut engine = engine((2, 1, 1), &[(0, 0, 0)]);

        engine.reveal((0, 0, 0)).unwrap();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.status, GameStatus::Lost);
        assert_eq!(
            snapshot.cells,
            vec![SnapshotCell { x: 0, y: 0, z: 0, value: CellValue::Mine }]
        );
    }

    #[test]
    fn wire_shape_is_stable() {
        let mut engine = engine((2, 1, 1), &[(1, 0, 0)]);
        engine.toggle_flag((1, 0, 0)).unwrap();
        engine.reveal((0, 0, 0)).unwrap();

        let json = serde_json::to_value(engine.snapshot()).unwrap();

        assert_eq!(json["status"], "WON");
        assert_eq!(json["mine_count"], 1);
        assert_eq!(json["revealed_count"], 1);
        assert_eq!(json["cells"][0]["value"], 1);
        assert_eq!(json["cells"][1]["value"], "F");
        assert!(json["elapsed"].is_object());
    }
}
