use crate::gfx::buffer::Buffer;
use crate::gfx::color::Color;
use crate::net::{AssetSource, NetworkError};
use image::imageops::{self, FilterType};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinSet;

pub const FIELD_SPRITE_SIZE: u32 = 65;
pub const CARD_SPRITE_SIZE: u32 = 60;
pub const HOSTILE_SPRITE_SIZE: u32 = 50;
pub const ICON_SIZE: u32 = 50;

const POKEMONS: [&str; 8] = [
    "charmander",
    "squirtle",
    "bulbasaur",
    "pikachu",
    "jigglypuff",
    "meowth",
    "psyduck",
    "growlithe",
];
const ENEMIES: [&str; 4] = ["rattata", "spearow", "zubat", "geodude"];
const UI: [&str; 2] = ["pokeball", "base"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Pokemon,
    Enemy,
    Ui,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Pokemon, AssetKind::Enemy, AssetKind::Ui];

    fn folder(&self) -> &'static str {
        match self {
            AssetKind::Pokemon => "pokemons",
            AssetKind::Enemy => "enemies",
            AssetKind::Ui => "ui",
        }
    }

    /// Every size this kind is drawn at.
    pub fn sizes(&self) -> &'static [u32] {
        match self {
            AssetKind::Pokemon => &[FIELD_SPRITE_SIZE, CARD_SPRITE_SIZE],
            AssetKind::Enemy => &[HOSTILE_SPRITE_SIZE],
            AssetKind::Ui => &[ICON_SIZE],
        }
    }

    pub fn names(&self) -> &'static [&'static str] {
        match self {
            AssetKind::Pokemon => &POKEMONS,
            AssetKind::Enemy => &ENEMIES,
            AssetKind::Ui => &UI,
        }
    }

    pub fn path(&self, name: &str) -> String {
        format!("/static/images/{}/{name}.png", self.folder())
    }
}

/// A decoded image, pre-scaled to each size it is drawn at.
#[derive(Debug, Clone)]
pub struct Sprite {
    scaled: Vec<Buffer>,
}

impl Sprite {
    pub fn decode(bytes: &[u8], sizes: &[u32]) -> Result<Sprite, NetworkError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Ok(Sprite { scaled: Vec::new() });
        }
        let scaled = sizes
            .iter()
            .map(|&size| {
                let resized = imageops::resize(&image, size, size, FilterType::Triangle);
                let data = resized
                    .pixels()
                    .map(|pixel| {
                        let [r, g, b, a] = pixel.0;
                        Color::argb(a, r, g, b).into()
                    })
                    .collect();
                Buffer::from_pixels(size as usize, size as usize, data)
            })
            .collect();
        Ok(Sprite { scaled })
    }

    pub fn is_usable(&self) -> bool {
        !self.scaled.is_empty() && self.scaled.iter().all(|buf| !buf.is_empty())
    }

    pub fn at(&self, size: u32) -> Option<&Buffer> {
        self.scaled.iter().find(|buf| buf.width == size as usize)
    }
}

/// Lowercase name to sprite. `None` records a load that failed.
#[derive(Debug, Default)]
pub struct ImageCache {
    images: HashMap<String, Option<Sprite>>,
}

impl ImageCache {
    pub fn insert(&mut self, name: &str, sprite: Option<Sprite>) {
        self.images.insert(name.to_lowercase(), sprite);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn loaded(&self) -> usize {
        self.images.values().filter(|sprite| sprite.is_some()).count()
    }

    /// A usable sprite for `name`, if one was loaded.
    pub fn sprite(&self, name: &str) -> Option<&Sprite> {
        self.images
            .get(&name.to_lowercase())
            .and_then(Option::as_ref)
            .filter(|sprite| sprite.is_usable())
    }

    pub fn sprite_at(&self, name: &str, size: u32) -> Option<&Buffer> {
        self.sprite(name).and_then(|sprite| sprite.at(size))
    }
}

async fn load_one<S: AssetSource>(source: &S, kind: AssetKind, name: &str) -> Result<Sprite, NetworkError> {
    let bytes = source.fetch_asset(kind.path(name)).await?;
    Sprite::decode(&bytes, kind.sizes())
}

/// Loads every known image concurrently. Individual failures are logged and stored as `None`.
pub async fn load_assets<S: AssetSource>(source: Arc<S>) -> ImageCache {
    let mut tasks = JoinSet::new();
    for kind in AssetKind::ALL {
        for &name in kind.names() {
            let source = Arc::clone(&source);
            tasks.spawn(async move { (name, load_one(source.as_ref(), kind, name).await) });
        }
    }
    let mut cache = ImageCache::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((name, Ok(sprite))) => cache.insert(name, Some(sprite)),
            Ok((name, Err(err))) => {
                warn!("Failed to load image: {name} ({err})");
                cache.insert(name, None);
            }
            Err(err) => warn!("Image task failed: {err}"),
        }
    }
    info!("Loaded {} of {} images", cache.loaded(), cache.len());
    cache
}

pub fn spawn_loader<S: AssetSource>(source: S) -> oneshot::Receiver<ImageCache> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let cache = load_assets(Arc::new(source)).await;
        if tx.send(cache).is_err() {
            debug!("Session closed before images finished loading");
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::Mutex;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[derive(Default)]
    struct Shelf {
        requested: Mutex<Vec<String>>,
    }

    impl AssetSource for Shelf {
        async fn fetch_asset(&self, path: String) -> Result<Vec<u8>, NetworkError> {
            self.requested.lock().unwrap().push(path.clone());
            if path.contains("geodude") {
                Err(NetworkError::Status(404))
            } else if path.contains("zubat") {
                Ok(b"not a png".to_vec())
            } else {
                Ok(png(32, 24))
            }
        }
    }

    #[test]
    fn sprites_are_scaled_to_every_drawn_size() {
        let sprite = Sprite::decode(&png(32, 24), AssetKind::Pokemon.sizes()).unwrap();
        assert!(sprite.is_usable());
        assert_eq!(sprite.at(FIELD_SPRITE_SIZE).map(|buf| buf.height), Some(65));
        assert_eq!(sprite.at(CARD_SPRITE_SIZE).map(|buf| buf.width), Some(60));
        assert!(sprite.at(HOSTILE_SPRITE_SIZE).is_none());
        let pixel = Color::from(sprite.at(60).unwrap().data[0]);
        assert_eq!((pixel.alpha(), pixel.red()), (255, 200));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert_eq!(Sprite::decode(b"GIF89a", &[50]).unwrap_err(), NetworkError::Decode);
    }

    #[test]
    fn paths_follow_the_static_layout() {
        assert_eq!(AssetKind::Pokemon.path("pikachu"), "/static/images/pokemons/pikachu.png");
        assert_eq!(AssetKind::Enemy.path("zubat"), "/static/images/enemies/zubat.png");
        assert_eq!(AssetKind::Ui.path("base"), "/static/images/ui/base.png");
    }

    #[tokio::test]
    async fn one_bad_image_does_not_spoil_the_batch() {
        let shelf = Arc::new(Shelf::default());
        let cache = load_assets(Arc::clone(&shelf)).await;
        assert_eq!(shelf.requested.lock().unwrap().len(), 14);
        assert_eq!(cache.len(), 14);
        assert_eq!(cache.loaded(), 12);
        assert!(cache.sprite("geodude").is_none());
        assert!(cache.sprite("Zubat").is_none());
        assert!(cache.sprite("PIKACHU").is_some());
        assert!(cache.sprite_at("rattata", HOSTILE_SPRITE_SIZE).is_some());
        assert!(cache.sprite_at("pokeball", ICON_SIZE).is_some());
        assert!(cache.sprite("mewtwo").is_none());
    }

    #[tokio::test]
    async fn loader_delivers_the_cache_once_done() {
        let cache = spawn_loader(Shelf::default()).await.unwrap();
        assert_eq!(cache.loaded(), 12);
    }
}
