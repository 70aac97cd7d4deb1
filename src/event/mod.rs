// Event distribution between the round logic and whatever renders it

// Public API - what other modules can use
pub use bus::EventBus;

// Internal modules
mod bus;
