//! Background asset loading
//!
//! An [`AssetLoader`] owns a worker thread that decodes files with an
//! [`AssetDecoder`] and hands results back over a channel. The frame loop
//! polls without blocking; every request produces exactly one result and is
//! never retried.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use crate::asset_error::AssetError;
use crate::geometry::{MeshData, TextureData};
use crate::scene::SceneLayout;

/// Decodes one kind of asset from a file
pub trait AssetDecoder: Send + 'static {
    type Output: Send + 'static;

    fn decode(&self, path: &Path) -> Result<Self::Output, AssetError>;
}

/// Destination of a loaded asset in the scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    SunTexture,
    PlanetTexture(usize),
    AstronautModel,
}

/// Request sent to the worker thread
struct LoadRequest {
    path: PathBuf,
    slot: AssetSlot,
}

/// Result of one background load
#[derive(Debug)]
pub struct Loaded<T> {
    pub slot: AssetSlot,
    pub path: PathBuf,
    pub result: Result<T, AssetError>,
}

/// Background loader using a dedicated worker thread
///
/// The worker runs until the loader is dropped.
pub struct AssetLoader<T: Send + 'static> {
    sender: Sender<LoadRequest>,
    receiver: Receiver<Loaded<T>>,
    in_flight: usize,
}

impl<T: Send + 'static> AssetLoader<T> {
    /// Spawn a worker thread that decodes with `decoder`
    pub fn new<D: AssetDecoder<Output = T>>(decoder: D) -> Self {
        let (request_tx, request_rx) = channel::<LoadRequest>();
        let (result_tx, result_rx) = channel::<Loaded<T>>();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let result = decoder.decode(&request.path);
                let loaded = Loaded {
                    slot: request.slot,
                    path: request.path,
                    result,
                };
                if result_tx.send(loaded).is_err() {
                    break;
                }
            }
        });

        Self {
            sender: request_tx,
            receiver: result_rx,
            in_flight: 0,
        }
    }

    /// Queue `path` for decoding into `slot`
    pub fn request(&mut self, path: impl Into<PathBuf>, slot: AssetSlot) {
        let request = LoadRequest {
            path: path.into(),
            slot,
        };
        log::debug!("Requesting {} for {:?}", request.path.display(), slot);
        if self.sender.send(request).is_ok() {
            self.in_flight += 1;
        } else {
            log::error!("Asset worker thread has exited; request for {:?} dropped", slot);
        }
    }

    /// Take one finished load, if any (non-blocking)
    pub fn poll(&mut self) -> Option<Loaded<T>> {
        match self.receiver.try_recv() {
            Ok(loaded) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(loaded)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Take every finished load (non-blocking)
    pub fn poll_all(&mut self) -> Vec<Loaded<T>> {
        let mut results = Vec::new();
        while let Some(loaded) = self.poll() {
            results.push(loaded);
        }
        results
    }

    /// Requests whose result has not been polled yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// A finished texture or model load
#[derive(Debug)]
pub enum LoadedAsset {
    Texture(Loaded<TextureData>),
    Model(Loaded<MeshData>),
}

/// Anything the frame driver can drain finished loads from
pub trait AssetSource {
    /// Every load finished since the last call
    fn drain(&mut self) -> Vec<LoadedAsset>;
}

/// Texture and model loaders for one scene
pub struct SceneAssets {
    textures: AssetLoader<TextureData>,
    models: AssetLoader<MeshData>,
}

impl SceneAssets {
    pub fn new<TD, MD>(texture_decoder: TD, model_decoder: MD) -> Self
    where
        TD: AssetDecoder<Output = TextureData>,
        MD: AssetDecoder<Output = MeshData>,
    {
        Self {
            textures: AssetLoader::new(texture_decoder),
            models: AssetLoader::new(model_decoder),
        }
    }

    /// Request every texture and model named by `layout`, relative to `root`
    ///
    /// Returns the number of requests issued.
    pub fn request_layout(&mut self, layout: &SceneLayout, root: &Path) -> usize {
        let mut issued = 0;

        if let Some(path) = &layout.sun.texture {
            self.textures.request(root.join(path), AssetSlot::SunTexture);
            issued += 1;
        }
        for (i, planet) in layout.planets.iter().enumerate() {
            if let Some(path) = &planet.texture {
                self.textures.request(root.join(path), AssetSlot::PlanetTexture(i));
                issued += 1;
            }
        }
        if let Some(path) = &layout.astronaut.model {
            self.models.request(root.join(path), AssetSlot::AstronautModel);
            issued += 1;
        }

        log::info!("Requested {} assets for scene '{}'", issued, layout.name);
        issued
    }

    /// Loads not yet drained
    pub fn pending(&self) -> usize {
        self.textures.in_flight() + self.models.in_flight()
    }
}

impl AssetSource for SceneAssets {
    fn drain(&mut self) -> Vec<LoadedAsset> {
        let mut out: Vec<LoadedAsset> = self
            .textures
            .poll_all()
            .into_iter()
            .map(LoadedAsset::Texture)
            .collect();
        out.extend(self.models.poll_all().into_iter().map(LoadedAsset::Model));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, Instant};

    /// Reads the file and reports its length
    struct LengthDecoder;

    impl AssetDecoder for LengthDecoder {
        type Output = usize;

        fn decode(&self, path: &Path) -> Result<usize, AssetError> {
            Ok(fs::read(path)?.len())
        }
    }

    struct SolidTexture;

    impl AssetDecoder for SolidTexture {
        type Output = TextureData;

        fn decode(&self, path: &Path) -> Result<TextureData, AssetError> {
            fs::metadata(path)?;
            Ok(TextureData::solid([255, 255, 255, 255]))
        }
    }

    struct NoModel;

    impl AssetDecoder for NoModel {
        type Output = MeshData;

        fn decode(&self, path: &Path) -> Result<MeshData, AssetError> {
            Err(AssetError::Empty(path.to_path_buf()))
        }
    }

    fn wait_for<T: Send + 'static>(loader: &mut AssetLoader<T>, count: usize) -> Vec<Loaded<T>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut out = Vec::new();
        while out.len() < count && Instant::now() < deadline {
            out.extend(loader.poll_all());
            std::thread::sleep(Duration::from_millis(5));
        }
        out
    }

    #[test]
    fn test_poll_returns_none_when_empty() {
        let mut loader = AssetLoader::new(LengthDecoder);
        assert!(loader.poll().is_none());
        assert!(loader.poll_all().is_empty());
        assert_eq!(loader.in_flight(), 0);
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let mut loader = AssetLoader::new(LengthDecoder);
        loader.request(&path, AssetSlot::SunTexture);
        assert_eq!(loader.in_flight(), 1);

        let results = wait_for(&mut loader, 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slot, AssetSlot::SunTexture);
        assert_eq!(*results[0].result.as_ref().unwrap(), 4);
        assert_eq!(loader.in_flight(), 0);
    }

    #[test]
    fn test_missing_file_reports_error_once() {
        let mut loader = AssetLoader::new(LengthDecoder);
        loader.request("/nonexistent/texture.png", AssetSlot::PlanetTexture(2));

        let results = wait_for(&mut loader, 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].slot, AssetSlot::PlanetTexture(2));
        assert!(matches!(results[0].result, Err(AssetError::Io(_))));

        std::thread::sleep(Duration::from_millis(20));
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_multiple_requests_each_answered() {
        let mut loader = AssetLoader::new(LengthDecoder);
        for i in 0..3 {
            loader.request(format!("/nonexistent/{}.png", i), AssetSlot::PlanetTexture(i));
        }
        let results = wait_for(&mut loader, 3);
        let mut slots: Vec<AssetSlot> = results.iter().map(|r| r.slot).collect();
        slots.sort_by_key(|s| match s {
            AssetSlot::PlanetTexture(i) => *i,
            _ => usize::MAX,
        });
        assert_eq!(
            slots,
            vec![
                AssetSlot::PlanetTexture(0),
                AssetSlot::PlanetTexture(1),
                AssetSlot::PlanetTexture(2)
            ]
        );
    }

    #[test]
    fn test_scene_assets_requests_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sun.png"), b"x").unwrap();

        let mut layout = SceneLayout::solar_system().with_astronaut_model("astronaut.glb");
        layout.sun.texture = Some("sun.png".to_string());
        layout.planets[0].texture = Some("missing.png".to_string());

        let mut assets = SceneAssets::new(SolidTexture, NoModel);
        assert_eq!(assets.request_layout(&layout, dir.path()), 3);

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut drained = Vec::new();
        while drained.len() < 3 && Instant::now() < deadline {
            drained.extend(assets.drain());
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(drained.len(), 3);
        assert_eq!(assets.pending(), 0);

        for asset in &drained {
            match asset {
                LoadedAsset::Texture(t) if t.slot == AssetSlot::SunTexture => assert!(t.result.is_ok()),
                LoadedAsset::Texture(t) => assert!(t.result.is_err()),
                LoadedAsset::Model(m) => {
                    assert_eq!(m.slot, AssetSlot::AstronautModel);
                    assert!(matches!(m.result, Err(AssetError::Empty(_))));
                }
            }
        }
    }
}
