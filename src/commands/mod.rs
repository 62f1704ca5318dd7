pub mod build;
pub mod evaluate;
pub mod export;

// Re-export command functions for convenience
pub use build::{build, BuildParams};
pub use evaluate::evaluate;
pub use export::export;
