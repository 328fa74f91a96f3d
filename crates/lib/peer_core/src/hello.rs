//! Liveness banner for Peer.

/// Message returned by the root endpoint.
pub const RUNNING_MESSAGE: &str = "Peer Assistant Backend is running";

/// Returns the liveness banner.
pub fn running_message() -> &'static str {
    RUNNING_MESSAGE
}
