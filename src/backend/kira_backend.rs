use std::collections::HashMap;
use std::path::Path;

use anyhow::{Result, anyhow};
use kira::sound::PlaybackState;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, PlaybackRate, Tween};

use crate::backend::{AudioBackend, ChannelId, ClipId, ClipLoader};

/// One output channel bound to a clip.
///
/// Parameters are stored here and applied when the channel is (re)started;
/// volume and pitch also update a live handle immediately.
struct Channel {
    data: StaticSoundData,
    handle: Option<StaticSoundHandle>,
    volume: f32,
    pitch: f32,
    looped: bool,
}

/// Audio backend backed by kira for low-latency playback.
pub struct KiraBackend {
    manager: AudioManager,
    /// Loaded clip data keyed by ClipId.
    clips: HashMap<u64, StaticSoundData>,
    /// Acquired output channels keyed by ChannelId.
    channels: HashMap<u64, Channel>,
    /// Next clip ID to assign.
    next_clip_id: u64,
    /// Next channel ID to assign.
    next_channel_id: u64,
}

impl KiraBackend {
    /// Create a new backend bound to the default audio device.
    pub fn new() -> Result<Self> {
        let settings = AudioManagerSettings::default();
        let manager = AudioManager::<DefaultBackend>::new(settings)
            .map_err(|e| anyhow!("Failed to create audio manager: {e}"))?;
        Ok(Self {
            manager,
            clips: HashMap::new(),
            channels: HashMap::new(),
            next_clip_id: 1,
            next_channel_id: 1,
        })
    }

    /// Load a clip from memory with an explicit format extension.
    pub fn load_clip_from_memory(&mut self, data: &[u8], ext: &str) -> Result<ClipId> {
        let cursor = std::io::Cursor::new(data.to_vec());
        let sound_data = match ext.to_lowercase().as_str() {
            "wav" | "wave" | "ogg" | "mp3" | "flac" => StaticSoundData::from_cursor(cursor),
            _ => return Err(anyhow!("Unsupported audio format: {ext}")),
        }
        .map_err(|e| anyhow!("Failed to load clip from memory ({ext}): {e}"))?;

        let id = self.next_clip_id;
        self.next_clip_id += 1;
        self.clips.insert(id, sound_data);
        Ok(ClipId(id))
    }

    /// Number of loaded clips.
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}

impl ClipLoader for KiraBackend {
    fn load_clip(&mut self, path: &Path) -> Result<ClipId> {
        let data = StaticSoundData::from_file(path)
            .map_err(|e| anyhow!("Failed to load clip {}: {e}", path.display()))?;
        let id = self.next_clip_id;
        self.next_clip_id += 1;
        self.clips.insert(id, data);
        Ok(ClipId(id))
    }
}

/// Convert an amplitude in 0.0..=1.0 to decibels.
fn amplitude_to_db(volume: f32) -> Decibels {
    if volume <= 0.0 {
        Decibels::SILENCE
    } else {
        Decibels(20.0 * volume.log10())
    }
}

impl AudioBackend for KiraBackend {
    fn acquire_channel(&mut self, clip: ClipId) -> Result<ChannelId> {
        let data = self
            .clips
            .get(&clip.0)
            .ok_or_else(|| anyhow!("Clip not loaded: {clip:?}"))?
            .clone();
        let id = self.next_channel_id;
        self.next_channel_id += 1;
        self.channels.insert(
            id,
            Channel {
                data,
                handle: None,
                volume: 1.0,
                pitch: 1.0,
                looped: false,
            },
        );
        Ok(ChannelId(id))
    }

    fn set_volume(&mut self, channel: ChannelId, volume: f32) -> Result<()> {
        if let Some(ch) = self.channels.get_mut(&channel.0) {
            ch.volume = volume;
            if let Some(handle) = ch.handle.as_mut() {
                handle.set_volume(amplitude_to_db(volume), Tween::default());
            }
        }
        Ok(())
    }

    fn set_pitch(&mut self, channel: ChannelId, pitch: f32) -> Result<()> {
        if let Some(ch) = self.channels.get_mut(&channel.0) {
            ch.pitch = pitch;
            if let Some(handle) = ch.handle.as_mut() {
                handle.set_playback_rate(PlaybackRate(f64::from(pitch)), Tween::default());
            }
        }
        Ok(())
    }

    fn set_looped(&mut self, channel: ChannelId, looped: bool) -> Result<()> {
        if let Some(ch) = self.channels.get_mut(&channel.0) {
            // Takes effect on the next start; channels are always restarted
            // with current parameters.
            ch.looped = looped;
        }
        Ok(())
    }

    fn play(&mut self, channel: ChannelId) -> Result<()> {
        let ch = self
            .channels
            .get_mut(&channel.0)
            .ok_or_else(|| anyhow!("Channel not acquired: {channel:?}"))?;

        if let Some(mut old) = ch.handle.take() {
            old.stop(Tween::default());
        }

        let mut data = ch
            .data
            .clone()
            .volume(amplitude_to_db(ch.volume))
            .playback_rate(PlaybackRate(f64::from(ch.pitch)));
        if ch.looped {
            data = data.loop_region(0.0..);
        }

        let handle = self
            .manager
            .play(data)
            .map_err(|e| anyhow!("Failed to start playback: {e}"))?;
        ch.handle = Some(handle);
        Ok(())
    }

    fn stop(&mut self, channel: ChannelId) -> Result<()> {
        if let Some(ch) = self.channels.get_mut(&channel.0)
            && let Some(mut handle) = ch.handle.take()
        {
            handle.stop(Tween::default());
        }
        Ok(())
    }

    fn is_playing(&self, channel: ChannelId) -> bool {
        self.channels.get(&channel.0).is_some_and(|ch| {
            ch.handle
                .as_ref()
                .is_some_and(|h| h.state() == PlaybackState::Playing)
        })
    }

    fn release_channel(&mut self, channel: ChannelId) -> Result<()> {
        if let Some(mut ch) = self.channels.remove(&channel.0)
            && let Some(handle) = ch.handle.as_mut()
        {
            handle.stop(Tween::default());
        }
        Ok(())
    }

    fn dispose(&mut self) -> Result<()> {
        for (_, mut ch) in self.channels.drain() {
            if let Some(mut handle) = ch.handle.take() {
                handle.stop(Tween::default());
            }
        }
        self.clips.clear();
        Ok(())
    }
}
