// src/main.rs
use log::info;

use tower::{DesktopPlatform, TowerGame};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Starting Tower...");

    let fullscreen = std::env::args().skip(1).any(|arg| arg == "--fullscreen");
    let mut game = TowerGame::create(DesktopPlatform::new(), fullscreen)?;
    game.run()?;

    Ok(())
}
