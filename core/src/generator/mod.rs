use crate::*;
pub use random::*;

mod random;

/// Strategy that decides where the mines of a new game go.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
