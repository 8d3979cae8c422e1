// src/audio/mod.rs
use std::collections::HashMap;
use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::assets::SoundClip;
use crate::errors::TowerError;

/// Named playback channels. One sink per channel so a footstep never cuts
/// off a turret shot.
pub const CHANNELS: &[&str] = &["footsteps", "turrets", "score"];

pub struct AudioMixer {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    channels: HashMap<&'static str, Sink>,
}

impl AudioMixer {
    pub fn new() -> Result<Self, TowerError> {
        let (stream, stream_handle) = OutputStream::try_default().map_err(|e| {
            TowerError::SubsystemInit(format!("failed to open audio output stream: {}", e))
        })?;

        let mut channels = HashMap::new();
        for name in CHANNELS {
            let sink = Sink::try_new(&stream_handle)
                .map_err(|e| TowerError::SubsystemInit(format!("failed to create channel {}: {}", name, e)))?;
            sink.set_volume(1.0);
            channels.insert(*name, sink);
        }
        log::info!("audio mixer up with {} channels", channels.len());

        Ok(Self {
            _stream: stream,
            stream_handle,
            channels,
        })
    }

    pub fn channel(&self, name: &str) -> Result<&Sink, TowerError> {
        self.channels
            .get(name)
            .ok_or_else(|| TowerError::Audio(format!("unknown audio channel: {}", name)))
    }

    /// Decodes `clip` and queues it on the named channel.
    pub fn play(&self, channel: &str, clip: &SoundClip) -> Result<(), TowerError> {
        let sink = self.channel(channel)?;
        let source = Decoder::new(Cursor::new(clip.data.clone()))
            .map_err(|e| TowerError::Audio(format!("failed to decode sound: {}", e)))?;
        sink.append(source);
        Ok(())
    }

    /// Stops whatever the channel is playing. The sink is rebuilt because a
    /// stopped rodio sink cannot be reused.
    pub fn stop(&mut self, channel: &str) -> Result<(), TowerError> {
        let name = self
            .channels
            .get_key_value(channel)
            .map(|(k, _)| *k)
            .ok_or_else(|| TowerError::Audio(format!("unknown audio channel: {}", channel)))?;
        if let Some(sink) = self.channels.remove(name) {
            sink.stop();
        }
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| TowerError::Audio(format!("failed to recreate channel {}: {}", name, e)))?;
        sink.set_volume(1.0);
        self.channels.insert(name, sink);
        Ok(())
    }

    pub fn set_channel_volume(&self, channel: &str, volume: f32) -> Result<(), TowerError> {
        self.channel(channel)?.set_volume(volume);
        Ok(())
    }

    /// Handle for code that queues its own sources.
    pub fn stream_handle(&self) -> &OutputStreamHandle {
        &self.stream_handle
    }
}
