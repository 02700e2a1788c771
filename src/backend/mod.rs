//! Audio backend abstraction.
//!
//! The core never talks to an audio device directly; it issues commands to an
//! [`AudioBackend`], which owns the clips and output channels.

use std::path::Path;

use anyhow::Result;

mod kira_backend;

pub use kira_backend::KiraBackend;

/// Handle for referencing loaded clip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(pub u64);

/// Handle for an output channel acquired from a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

/// Abstraction over audio output backends.
/// Implementations: KiraBackend (production), mock backends (testing).
pub trait AudioBackend {
    /// Acquire an output channel bound to a loaded clip.
    fn acquire_channel(&mut self, clip: ClipId) -> Result<ChannelId>;

    /// Set channel volume as an amplitude in 0.0..=1.0.
    fn set_volume(&mut self, channel: ChannelId, volume: f32) -> Result<()>;

    /// Set channel pitch as a playback-rate multiplier.
    fn set_pitch(&mut self, channel: ChannelId, pitch: f32) -> Result<()>;

    /// Enable or disable looping on a channel.
    fn set_looped(&mut self, channel: ChannelId, looped: bool) -> Result<()>;

    /// Start the channel from the beginning, restarting it if already playing.
    fn play(&mut self, channel: ChannelId) -> Result<()>;

    /// Stop the channel.
    fn stop(&mut self, channel: ChannelId) -> Result<()>;

    /// Whether the channel is currently producing output.
    fn is_playing(&self, channel: ChannelId) -> bool;

    /// Release a channel back to the backend.
    fn release_channel(&mut self, channel: ChannelId) -> Result<()>;

    /// Stop and release everything.
    fn dispose(&mut self) -> Result<()>;
}

/// Source of clip data for bank loading.
///
/// Clip loading happens before the registry is built; the core itself never
/// touches storage.
pub trait ClipLoader {
    fn load_clip(&mut self, path: &Path) -> Result<ClipId>;
}
