//! Sound bank manager: one playback handle per registered sound.

use std::collections::HashMap;

use log::{debug, warn};

use crate::backend::{AudioBackend, ChannelId};
use crate::error::SoundBankError;
use crate::registry::{SoundDefinition, SoundRegistry};

/// Runtime binding between a registry entry and an output channel.
///
/// Playback state is never cached here; it is queried from the backend so the
/// two cannot drift apart.
#[derive(Debug)]
struct PlaybackHandle {
    channel: ChannelId,
}

/// Owns one output channel per registered sound and drives play/stop against
/// the backend.
///
/// All methods are expected to run on the host's main update thread; the
/// handle collection is only mutated by `initialize` and `teardown`.
#[derive(Debug)]
pub struct SoundBankManager<A: AudioBackend> {
    registry: SoundRegistry,
    backend: A,
    handles: HashMap<String, PlaybackHandle>,
    torn_down: bool,
}

impl<A: AudioBackend> SoundBankManager<A> {
    /// Acquire one output channel per registry entry and bind them 1:1.
    ///
    /// On channel-acquisition failure the already-acquired channels are
    /// released and the error is surfaced; there is no retry.
    pub fn initialize(registry: SoundRegistry, mut backend: A) -> Result<Self, SoundBankError> {
        let mut handles = HashMap::with_capacity(registry.len());
        for def in registry.iter() {
            match backend.acquire_channel(def.clip) {
                Ok(channel) => {
                    handles.insert(def.name.clone(), PlaybackHandle { channel });
                }
                Err(source) => {
                    for handle in handles.values() {
                        let _ = backend.release_channel(handle.channel);
                    }
                    return Err(SoundBankError::ChannelAcquire {
                        name: def.name.clone(),
                        source,
                    });
                }
            }
        }
        Ok(Self {
            registry,
            backend,
            handles,
            torn_down: false,
        })
    }

    /// Start a sound from the beginning with its configured parameters.
    ///
    /// An already-playing sound is restarted, not queued. An unknown name is
    /// logged and ignored; it must never interrupt the caller's flow.
    pub fn play(&mut self, name: &str) {
        let (Some(def), Some(handle)) = (self.registry.lookup(name), self.handles.get(name)) else {
            warn!("sound \"{name}\" is not registered; play ignored");
            return;
        };
        if let Err(e) = Self::apply_and_start(&mut self.backend, def, handle.channel) {
            warn!("failed to play \"{name}\": {e}");
        }
    }

    /// Stop a sound. An unknown name is logged and ignored.
    pub fn stop(&mut self, name: &str) {
        let Some(handle) = self.handles.get(name) else {
            warn!("sound \"{name}\" is not registered; stop ignored");
            return;
        };
        if let Err(e) = self.backend.stop(handle.channel) {
            warn!("failed to stop \"{name}\": {e}");
        }
    }

    /// Stop every channel the backend reports as playing. Idempotent.
    pub fn stop_all(&mut self) {
        for (name, handle) in &self.handles {
            if self.backend.is_playing(handle.channel)
                && let Err(e) = self.backend.stop(handle.channel)
            {
                warn!("failed to stop \"{name}\": {e}");
            }
        }
    }

    /// Host lifecycle hook: the surrounding context (scene, level, session)
    /// is being torn down, so nothing may keep playing across the boundary.
    pub fn on_boundary_crossed(&mut self) {
        debug!("session boundary crossed; stopping all sounds");
        self.stop_all();
    }

    /// Play the configured startup track, if any. An absent name is a no-op
    /// rather than a warning, since the startup track is optional.
    pub fn play_startup_sound(&mut self, name: &str) {
        if self.registry.lookup(name).is_none() {
            debug!("startup sound \"{name}\" is not registered; skipping");
            return;
        }
        self.play(name);
    }

    /// Whether the named sound is currently playing. Queried from the
    /// backend; unknown names report `false`.
    pub fn is_playing(&self, name: &str) -> bool {
        self.handles
            .get(name)
            .is_some_and(|handle| self.backend.is_playing(handle.channel))
    }

    /// The registry this manager was initialized with.
    pub fn registry(&self) -> &SoundRegistry {
        &self.registry
    }

    /// Get a reference to the underlying backend.
    pub fn backend(&self) -> &A {
        &self.backend
    }

    /// Release every channel back to the backend and dispose the binding.
    pub fn teardown(mut self) {
        self.release();
    }

    fn apply_and_start(
        backend: &mut A,
        def: &SoundDefinition,
        channel: ChannelId,
    ) -> anyhow::Result<()> {
        backend.set_volume(channel, def.volume)?;
        backend.set_pitch(channel, def.pitch)?;
        backend.set_looped(channel, def.looped)?;
        backend.play(channel)
    }

    fn release(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        for handle in self.handles.values() {
            let _ = self.backend.release_channel(handle.channel);
        }
        self.handles.clear();
        if let Err(e) = self.backend.dispose() {
            warn!("backend dispose failed: {e}");
        }
    }
}

impl<A: AudioBackend> Drop for SoundBankManager<A> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Single-instance slot for the manager, owned by the host's composition
/// root.
///
/// There is no global access path to the instance; the cell only enforces
/// that one manager is alive at a time. A rejected `initialize` acquires no
/// backend channels and leaves the active instance untouched.
pub struct SoundBankCell<A: AudioBackend> {
    active: Option<SoundBankManager<A>>,
}

impl<A: AudioBackend> SoundBankCell<A> {
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Bring up the managed instance, rejecting the attempt if one is
    /// already alive.
    pub fn initialize(
        &mut self,
        registry: SoundRegistry,
        backend: A,
    ) -> Result<&mut SoundBankManager<A>, SoundBankError> {
        if self.active.is_some() {
            warn!("sound bank manager already active; discarding new instance");
            return Err(SoundBankError::AlreadyInitialized);
        }
        self.active = Some(SoundBankManager::initialize(registry, backend)?);
        Ok(self.active.as_mut().expect("just set"))
    }

    /// The live instance, if any.
    pub fn get_mut(&mut self) -> Option<&mut SoundBankManager<A>> {
        self.active.as_mut()
    }

    /// Tear down the live instance. Safe to call when none is active.
    pub fn teardown(&mut self) {
        if let Some(manager) = self.active.take() {
            manager.teardown();
        }
    }
}

impl<A: AudioBackend> Default for SoundBankCell<A> {
    fn default() -> Self {
        Self::new()
    }
}
