//! Sound-bank core: a named-sound registry with lifecycle-bound playback
//! handles and session-boundary cleanup.
//!
//! This crate provides:
//! - [`registry::SoundRegistry`]: Immutable mapping from sound name to definition
//! - [`manager::SoundBankManager`]: Per-sound playback handles with play/stop control
//! - [`backend::AudioBackend`]: Abstraction over audio output backends
//! - [`backend::KiraBackend`]: Production backend using kira
//! - [`config::SoundBankConfig`]: Serde-backed bank configuration

pub mod backend;
pub mod config;
pub mod error;
pub mod manager;
pub mod registry;
