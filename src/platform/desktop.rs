// src/platform/desktop.rs
use std::path::PathBuf;

use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyboardInput, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Fullscreen, Window, WindowBuilder};

use crate::assets::AssetStore;
use crate::audio::AudioMixer;
use crate::errors::TowerError;
use crate::events::GameEvent;
use crate::platform::{Platform, ScreenConfig};

/// The real platform: a winit window for display and input, a rodio mixer
/// for audio, and the sprite/sound store. Everything is `None` until
/// `init_subsystems` runs and again after `teardown`.
pub struct DesktopPlatform {
    event_loop: Option<EventLoop<()>>,
    window: Option<Window>,
    mixer: Option<AudioMixer>,
    assets: Option<AssetStore>,
    asset_root: PathBuf,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        Self::with_asset_root(PathBuf::from("assets"))
    }

    pub fn with_asset_root(asset_root: PathBuf) -> Self {
        Self {
            event_loop: None,
            window: None,
            mixer: None,
            assets: None,
            asset_root,
        }
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    pub fn mixer(&self) -> Option<&AudioMixer> {
        self.mixer.as_ref()
    }

    pub fn assets(&self) -> Option<&AssetStore> {
        self.assets.as_ref()
    }
}

impl Default for DesktopPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for DesktopPlatform {
    fn init_subsystems(&mut self, screen: &ScreenConfig) -> Result<(), TowerError> {
        log::info!(
            "opening {}x{} display (fullscreen: {})",
            screen.width,
            screen.height,
            screen.fullscreen
        );

        let event_loop = EventLoop::new();
        let mut builder = WindowBuilder::new()
            .with_title("Tower")
            .with_inner_size(LogicalSize::new(screen.width, screen.height))
            .with_resizable(false);
        if screen.fullscreen {
            builder = builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = builder
            .build(&event_loop)
            .map_err(|e| TowerError::SubsystemInit(format!("window creation failed: {}", e)))?;

        let mixer = AudioMixer::new()?;

        let gfx_dir = self.asset_root.join("gfx");
        let assets = if gfx_dir.is_dir() {
            AssetStore::load(&gfx_dir)?
        } else {
            // Early skeleton: no art shipped yet.
            log::warn!("asset directory {:?} not found, starting empty", gfx_dir);
            AssetStore::empty()
        };

        self.event_loop = Some(event_loop);
        self.window = Some(window);
        self.mixer = Some(mixer);
        self.assets = Some(assets);
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let event_loop = match self.event_loop.as_mut() {
            Some(event_loop) => event_loop,
            None => return events,
        };

        // Pump the winit loop once: collect everything pending, then bail
        // out at MainEventsCleared so the caller keeps control of the frame.
        event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => events.push(GameEvent::Quit),
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state,
                                virtual_keycode: Some(key),
                                ..
                            },
                        ..
                    } => {
                        let event = match state {
                            ElementState::Pressed => GameEvent::KeyDown(key),
                            ElementState::Released => GameEvent::KeyUp(key),
                        };
                        events.push(event);
                    }
                    WindowEvent::Resized(size) => {
                        events.push(GameEvent::Resized(size.width, size.height));
                    }
                    _ => {}
                },
                Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
                _ => {}
            }
        });

        events
    }

    fn teardown(&mut self) {
        log::info!("shutting down display and audio");
        self.assets = None;
        self.mixer = None;
        self.window = None;
        self.event_loop = None;
    }
}
