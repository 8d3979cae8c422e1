// src/lib.rs - Library Root
pub mod assets;
pub mod audio;
pub mod clock;
pub mod errors;
pub mod events;
pub mod game;
pub mod loops;
pub mod platform;
pub mod state;

pub use errors::TowerError;
pub use events::GameEvent;
pub use game::{GameContext, TowerGame};
pub use platform::{DesktopPlatform, Platform, ScreenConfig};
pub use state::GameState;
