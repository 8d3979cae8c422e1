// src/platform/mod.rs
//
// The seam between the game core and the window system. The state machine
// and loops only ever see this trait, so the whole engine runs headless in
// tests with a scripted platform.
pub mod desktop;

pub use desktop::DesktopPlatform;

use crate::errors::TowerError;
use crate::events::GameEvent;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 800;

/// Display geometry plus the fullscreen flag, fixed for the lifetime of a
/// game context.
#[derive(Debug, Clone, Copy)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl ScreenConfig {
    pub fn windowed() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            fullscreen: false,
        }
    }

    pub fn fullscreen() -> Self {
        Self {
            fullscreen: true,
            ..Self::windowed()
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self::windowed()
    }
}

/// Everything the game core needs from the outside world: subsystem bring-up
/// and teardown, and a per-frame batch of input events.
pub trait Platform {
    /// Brings up display, audio and assets. Called exactly once, from
    /// `TowerGame::initialize`. Any failure must surface as an error rather
    /// than leaving a half-built platform behind.
    fn init_subsystems(&mut self, screen: &ScreenConfig) -> Result<(), TowerError>;

    /// Drains and returns every pending input event, in arrival order. An
    /// empty batch is normal.
    fn poll_events(&mut self) -> Vec<GameEvent>;

    /// Releases display and audio resources. Called once the state machine
    /// reaches quitting.
    fn teardown(&mut self);
}

#[cfg(test)]
pub mod scripted {
    use std::collections::VecDeque;

    use super::*;

    /// Headless platform for tests: serves pre-scripted event batches in
    /// order, then a lone `Quit` once the script runs out so no test can
    /// loop forever.
    pub struct ScriptedPlatform {
        batches: VecDeque<Vec<GameEvent>>,
        pub init_calls: u32,
        pub teardown_calls: u32,
    }

    impl ScriptedPlatform {
        pub fn new(batches: Vec<Vec<GameEvent>>) -> Self {
            Self {
                batches: batches.into(),
                init_calls: 0,
                teardown_calls: 0,
            }
        }

        pub fn empty() -> Self {
            Self::new(Vec::new())
        }
    }

    impl Platform for ScriptedPlatform {
        fn init_subsystems(&mut self, _screen: &ScreenConfig) -> Result<(), TowerError> {
            self.init_calls += 1;
            Ok(())
        }

        fn poll_events(&mut self) -> Vec<GameEvent> {
            self.batches
                .pop_front()
                .unwrap_or_else(|| vec![GameEvent::Quit])
        }

        fn teardown(&mut self) {
            self.teardown_calls += 1;
        }
    }
}
