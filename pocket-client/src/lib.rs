// Export the client module
pub mod client;
pub mod error;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::client::{
    parse_retrieve_response, parse_send_response, Action, Article, Pocket, SendResponse,
    DEFAULT_BASE_URL,
};
pub use crate::error::PocketError;
