// Hint catalogue, the per-round purchase ledger and hint text helpers

// Public API - what other modules can use
pub use economy::{
    HintEconomy, HintExtra, HintRejection, HintReveal, HintStatus, HintValue, NOT_AVAILABLE,
};
pub use kinds::{HintDefinition, HintKind, PlayerField};

// Internal modules
mod economy;
pub mod formatting;
mod kinds;
