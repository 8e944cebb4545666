pub mod errors;
pub mod settings;
pub mod types;

// Re-export CommandError for convenience
pub use errors::{CommandError, CommandResult};
