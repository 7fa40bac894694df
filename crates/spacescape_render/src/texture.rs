//! Image decoding for planet and sun textures

use std::path::Path;

use spacescape_core::{AssetDecoder, AssetError, TextureData};

/// Decodes PNG, JPEG and WebP files into RGBA8
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageDecoder;

impl AssetDecoder for ImageDecoder {
    type Output = TextureData;

    fn decode(&self, path: &Path) -> Result<TextureData, AssetError> {
        let image = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(err) => AssetError::Io(err),
            other => AssetError::decode(path, other),
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Empty(path.to_path_buf()));
        }

        log::debug!("Decoded {} ({}x{})", path.display(), width, height);
        Ok(TextureData {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}
