/// Lineup positions and roster-needs accounting.
pub mod roster;
/// Per-channel draft bookkeeping.
pub mod state;

pub use roster::Position;
pub use state::{DraftState, DraftedPlayer};
