use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the gameplay engine.
///
/// A cell is either hidden, flagged, or revealed with its neighbor-mine count;
/// "revealed and flagged" is unrepresentable.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineCell {
    Hidden,
    Revealed(u8),
    Flagged,
}

impl Default for EngineCell {
    fn default() -> Self {
        Self::Hidden
    }
}
