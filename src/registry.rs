//! Named-sound registry, built once from configuration and read-only after.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::backend::ClipId;
use crate::error::SoundBankError;

/// Valid volume range (amplitude).
pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;
/// Valid pitch range (playback-rate multiplier).
pub const PITCH_RANGE: RangeInclusive<f32> = -3.0..=3.0;

/// Immutable configuration record for one named sound.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundDefinition {
    /// Unique key; lookups are case-sensitive exact match.
    pub name: String,
    /// Non-owning reference to clip data held by the backend.
    pub clip: ClipId,
    /// Amplitude in 0.0..=1.0.
    pub volume: f32,
    /// Playback-rate multiplier in -3.0..=3.0.
    pub pitch: f32,
    pub looped: bool,
}

/// Mapping from sound name to definition.
///
/// All parameter validation happens in [`SoundRegistry::build`], so lookups
/// are infallible with respect to parameter correctness; "name not found" is
/// the only runtime possibility.
#[derive(Debug, Default)]
pub struct SoundRegistry {
    sounds: HashMap<String, SoundDefinition>,
}

impl SoundRegistry {
    /// Validate definitions and build a registry.
    pub fn build(definitions: Vec<SoundDefinition>) -> Result<Self, SoundBankError> {
        let mut sounds = HashMap::with_capacity(definitions.len());
        for def in definitions {
            if def.name.is_empty() {
                return Err(SoundBankError::EmptyName);
            }
            if !VOLUME_RANGE.contains(&def.volume) {
                return Err(SoundBankError::InvalidVolume {
                    name: def.name,
                    volume: def.volume,
                });
            }
            if !PITCH_RANGE.contains(&def.pitch) {
                return Err(SoundBankError::InvalidPitch {
                    name: def.name,
                    pitch: def.pitch,
                });
            }
            if sounds.contains_key(&def.name) {
                return Err(SoundBankError::DuplicateName { name: def.name });
            }
            sounds.insert(def.name.clone(), def);
        }
        Ok(Self { sounds })
    }

    /// Look up a definition by name. Absent is a normal outcome, not an error.
    pub fn lookup(&self, name: &str) -> Option<&SoundDefinition> {
        self.sounds.get(name)
    }

    /// Number of registered sounds.
    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    /// Iterate definitions in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &SoundDefinition> {
        self.sounds.values()
    }
}
