use thiserror::Error;

/// Reasons a participant's request is turned down
///
/// None of these are fatal to the relay; they are reported back to the
/// participant that caused them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("No colors left, the game is full")]
    ColorPoolExhausted,

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Participant has already joined")]
    AlreadyJoined,

    #[error("Participant must join before moving")]
    NotJoined,

    #[error("Player id {sent} does not match connection {expected}")]
    IdentityMismatch { expected: String, sent: String },

    #[error("Player color {sent} does not match assigned color {expected}")]
    ColorMismatch { expected: String, sent: String },

    #[error("Position ({x}, {y}) is outside the play area")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Invalid collectible: {0}")]
    InvalidCollectible(String),

    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },
}

/// Startup configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("COLOR_PALETTE must name at least one color")]
    EmptyPalette,

    #[error("COLOR_PALETTE lists {0} more than once")]
    DuplicateColor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SyncError::ColorPoolExhausted.to_string(),
            "No colors left, the game is full"
        );
        assert_eq!(
            SyncError::OutOfBounds { x: 1, y: 2 }.to_string(),
            "Position (1, 2) is outside the play area"
        );
        assert_eq!(
            SyncError::MessageTooLarge { size: 2048, max: 1024 }.to_string(),
            "Message too large: 2048 bytes (max 1024)"
        );
    }
}
