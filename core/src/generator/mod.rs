use crate::*;
pub use random::*;

mod random;

/// Strategy for producing a mine layout from a game configuration.
pub trait MineLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
