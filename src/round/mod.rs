// Round lifecycle: scoring guesses, selling hints and telling the map what changed

// Public API - what other modules can use
pub use controller::{GuessOutcome, RoundController, RoundError, RoundSnapshot, RoundSummary};
pub use events::{RoundEvent, REVEAL_ZOOM};
pub use state::{RoundId, RoundPhase, RoundState, MAX_ATTEMPTS};

// Internal modules
mod controller;
mod events;
mod state;
