pub mod loop_;
pub mod transcript;

pub use loop_::{apply_turn, PendingWrite, SessionLoop, TurnOutcome};
pub use transcript::Transcript;
