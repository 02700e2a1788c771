//! Bank configuration supplied by host asset tooling.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::backend::ClipLoader;
use crate::registry::{SoundDefinition, SoundRegistry};

/// One configured sound in a bank file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundEntry {
    pub name: String,
    /// Clip file on disk; resolution relative to the bank file is the host's
    /// concern.
    pub path: PathBuf,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    #[serde(default)]
    pub looped: bool,
}

fn default_volume() -> f32 {
    1.0
}

fn default_pitch() -> f32 {
    1.0
}

/// Sound bank description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundBankConfig {
    #[serde(default)]
    pub sounds: Vec<SoundEntry>,
    /// Optional track to start as soon as the manager is up.
    #[serde(default)]
    pub startup_sound: Option<String>,
}

impl SoundBankConfig {
    /// Load a bank description from disk.
    ///
    /// A missing or malformed file is a configuration error and fails
    /// loudly, unlike runtime name misses.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read sound bank config: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse sound bank config: {}", path.display()))
    }

    /// Save the bank description to disk.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("failed to write sound bank config: {}", path.display()))
    }
}

/// Host glue: load every configured clip and build the registry.
///
/// Returns the registry plus the startup-sound name to hand to
/// `SoundBankManager::play_startup_sound` once the manager is up.
pub fn load_bank(
    config: &SoundBankConfig,
    clips: &mut impl ClipLoader,
) -> Result<(SoundRegistry, Option<String>)> {
    let definitions = config
        .sounds
        .iter()
        .map(|entry| {
            let clip = clips
                .load_clip(&entry.path)
                .with_context(|| format!("failed to load clip for sound \"{}\"", entry.name))?;
            Ok(SoundDefinition {
                name: entry.name.clone(),
                clip,
                volume: entry.volume,
                pitch: entry.pitch,
                looped: entry.looped,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let registry = SoundRegistry::build(definitions).context("invalid sound bank configuration")?;
    Ok((registry, config.startup_sound.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ClipId;
    use std::io::Write;

    struct StubClips {
        next_id: u64,
        loaded: Vec<PathBuf>,
    }

    impl StubClips {
        fn new() -> Self {
            Self {
                next_id: 1,
                loaded: Vec::new(),
            }
        }
    }

    impl ClipLoader for StubClips {
        fn load_clip(&mut self, path: &Path) -> Result<ClipId> {
            let id = self.next_id;
            self.next_id += 1;
            self.loaded.push(path.to_path_buf());
            Ok(ClipId(id))
        }
    }

    #[test]
    fn entry_defaults_match_unity_serialized_fields() {
        let entry: SoundEntry =
            serde_json::from_str(r#"{"name": "click", "path": "sfx/click.wav"}"#).unwrap();
        assert!((entry.volume - 1.0).abs() < f32::EPSILON);
        assert!((entry.pitch - 1.0).abs() < f32::EPSILON);
        assert!(!entry.looped);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SoundBankConfig {
            sounds: vec![SoundEntry {
                name: "music".to_string(),
                path: PathBuf::from("bgm/theme.ogg"),
                volume: 0.8,
                pitch: 1.0,
                looped: true,
            }],
            startup_sound: Some("music".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: SoundBankConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sounds.len(), 1);
        assert_eq!(parsed.startup_sound.as_deref(), Some("music"));
    }

    #[test]
    fn load_from_tempfile() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"sounds": [{{"name": "click", "path": "sfx/click.wav"}}], "startup_sound": null}}"#
        )
        .unwrap();

        let config = SoundBankConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.sounds.len(), 1);
        assert!(config.startup_sound.is_none());
    }

    #[test]
    fn missing_file_fails_loudly() {
        let err = SoundBankConfig::load_from_path(Path::new("/nonexistent/bank.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_bank_builds_registry_with_loaded_clips() {
        let config = SoundBankConfig {
            sounds: vec![
                SoundEntry {
                    name: "music".to_string(),
                    path: PathBuf::from("bgm/theme.ogg"),
                    volume: 0.8,
                    pitch: 1.0,
                    looped: true,
                },
                SoundEntry {
                    name: "click".to_string(),
                    path: PathBuf::from("sfx/click.wav"),
                    volume: 1.0,
                    pitch: 1.0,
                    looped: false,
                },
            ],
            startup_sound: Some("music".to_string()),
        };

        let mut clips = StubClips::new();
        let (registry, startup) = load_bank(&config, &mut clips).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(clips.loaded.len(), 2);
        assert_eq!(startup.as_deref(), Some("music"));
        assert!(registry.lookup("music").unwrap().looped);
    }

    #[test]
    fn load_bank_rejects_duplicate_names() {
        let entry = SoundEntry {
            name: "click".to_string(),
            path: PathBuf::from("sfx/click.wav"),
            volume: 1.0,
            pitch: 1.0,
            looped: false,
        };
        let config = SoundBankConfig {
            sounds: vec![entry.clone(), entry],
            startup_sound: None,
        };

        let err = load_bank(&config, &mut StubClips::new()).unwrap_err();
        assert!(err.to_string().contains("invalid sound bank configuration"));
    }
}
