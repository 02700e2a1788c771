use thiserror::Error;

/// Errors raised while building a registry or bringing up the manager.
///
/// Runtime name misses are deliberately absent: an unknown name on
/// `play`/`stop` is logged and ignored, never surfaced as an error.
#[derive(Debug, Error)]
pub enum SoundBankError {
    #[error("Duplicate sound name: {name}")]
    DuplicateName { name: String },

    #[error("Sound name must not be empty")]
    EmptyName,

    #[error("Volume {volume} for sound \"{name}\" is outside 0.0..=1.0")]
    InvalidVolume { name: String, volume: f32 },

    #[error("Pitch {pitch} for sound \"{name}\" is outside -3.0..=3.0")]
    InvalidPitch { name: String, pitch: f32 },

    #[error("A sound bank manager is already active")]
    AlreadyInitialized,

    #[error("Failed to acquire output channel for sound \"{name}\"")]
    ChannelAcquire {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}
