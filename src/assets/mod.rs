// src/assets/mod.rs
use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;

use crate::errors::TowerError;

/// Sprite sheet table: logical name -> file name under the gfx directory.
pub const SPRITES: &[(&str, &str)] = &[
    ("game_logo", "game_logo.png"),
    ("land", "land.png"),
    ("road", "road.png"),
];

/// Key for a cached sprite: its logical name plus flip orientation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    pub name: String,
    pub flip_x: bool,
    pub flip_y: bool,
}

/// A decoded sound effect, kept as raw bytes and decoded again at playback
/// time by the mixer.
#[derive(Debug, Clone)]
pub struct SoundClip {
    pub data: Vec<u8>,
}

/// In-memory resource cache. Every sprite is imported once and stored in all
/// four flip orientations so render code never flips at draw time.
#[derive(Debug)]
pub struct AssetStore {
    sprites: HashMap<SpriteKey, RgbaImage>,
}

impl AssetStore {
    pub fn empty() -> Self {
        Self {
            sprites: HashMap::new(),
        }
    }

    /// Imports every sprite in `SPRITES` from `gfx_dir`. A missing or
    /// undecodable file is a hard error.
    pub fn load(gfx_dir: &Path) -> Result<Self, TowerError> {
        let mut store = Self::empty();
        for (name, file_name) in SPRITES {
            store.import_sprite(name, &gfx_dir.join(file_name))?;
        }
        log::info!(
            "imported {} sprites from {:?}",
            SPRITES.len(),
            gfx_dir
        );
        Ok(store)
    }

    fn import_sprite(&mut self, name: &str, path: &Path) -> Result<(), TowerError> {
        let img = image::open(path)
            .map_err(|e| TowerError::Asset(format!("failed to load sprite {:?}: {}", path, e)))?;
        for flip_x in [false, true] {
            for flip_y in [false, true] {
                let mut variant = img.clone();
                if flip_x {
                    variant = variant.fliph();
                }
                if flip_y {
                    variant = variant.flipv();
                }
                self.sprites.insert(
                    SpriteKey {
                        name: name.to_string(),
                        flip_x,
                        flip_y,
                    },
                    variant.to_rgba8(),
                );
            }
        }
        log::debug!("imported sprite {} from {:?}", name, path);
        Ok(())
    }

    pub fn sprite(&self, name: &str, flip_x: bool, flip_y: bool) -> Option<&RgbaImage> {
        self.sprites.get(&SpriteKey {
            name: name.to_string(),
            flip_x,
            flip_y,
        })
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Imports a sound effect as raw bytes for mixer playback.
    pub fn import_sound(path: &Path) -> Result<SoundClip, TowerError> {
        let data = std::fs::read(path)
            .map_err(|e| TowerError::Asset(format!("failed to load sound {:?}: {}", path, e)))?;
        Ok(SoundClip { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_no_sprites() {
        let store = AssetStore::empty();
        assert_eq!(store.sprite_count(), 0);
        assert!(store.sprite("game_logo", false, false).is_none());
    }

    #[test]
    fn flip_variants_are_distinct_keys() {
        let a = SpriteKey {
            name: "land".into(),
            flip_x: false,
            flip_y: false,
        };
        let b = SpriteKey {
            name: "land".into(),
            flip_x: true,
            flip_y: false,
        };
        assert_ne!(a, b);
    }

    #[test]
    fn missing_sprite_file_is_an_asset_error() {
        let err = AssetStore::load(Path::new("/nonexistent/gfx")).unwrap_err();
        assert!(matches!(err, TowerError::Asset(_)));
    }
}
