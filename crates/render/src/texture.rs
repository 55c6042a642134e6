use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to load image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{len} bytes does not match a {width}x{height} RGBA8 image")]
    Size { width: u32, height: u32, len: usize },
    #[error("image has zero size")]
    Empty,
}

/// Decoded RGBA8 pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Image {
    pub const MAGENTA: [u8; 4] = [255, 0, 255, 255];
    pub const BLACK: [u8; 4] = [0, 0, 0, 255];
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];

    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::Empty);
        }
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(ImageError::Size {
                width,
                height,
                len: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// 1x1 image of one color.
    pub fn solid(color: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: color.to_vec(),
        }
    }

    /// Magenta and black squares of `cell` pixels.
    pub fn checkerboard(size: u32, cell: u32) -> Self {
        let size = size.max(1);
        let cell = cell.max(1);
        let mut rgba = Vec::with_capacity(size as usize * size as usize * 4);
        for y in 0..size {
            for x in 0..size {
                let magenta = ((x / cell) + (y / cell)).is_multiple_of(2);
                rgba.extend_from_slice(if magenta { &Self::MAGENTA } else { &Self::BLACK });
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    /// Texture used in place of an image that could not be loaded.
    pub fn fallback() -> Self {
        Self::checkerboard(64, 8)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        tracing::debug!(path = %path.display(), width, height, "image loaded");
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Load `path`, or warn and return [`Image::fallback`].
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "using fallback texture");
                Self::fallback()
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0; 4];
        px.copy_from_slice(&self.rgba[i..i + 4]);
        Some(px)
    }
}

/// Handle of a material registered in [`crate::SceneResources`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// Diffuse and specular maps sampled by the textured and lit shaders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub diffuse: Image,
    pub specular: Image,
}

impl Material {
    /// Diffuse map only; no specular highlights.
    pub fn textured(diffuse: Image) -> Self {
        Self {
            diffuse,
            specular: Image::solid(Image::BLACK),
        }
    }

    pub fn with_specular(mut self, specular: Image) -> Self {
        self.specular = specular;
        self
    }

    /// White maps, leaving color to the record.
    pub fn plain() -> Self {
        Self {
            diffuse: Image::solid(Image::WHITE),
            specular: Image::solid(Image::WHITE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_checks_length() {
        assert!(Image::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            Image::from_rgba(2, 2, vec![0; 15]),
            Err(ImageError::Size { len: 15, .. })
        ));
        assert!(matches!(Image::from_rgba(0, 2, vec![]), Err(ImageError::Empty)));
    }

    #[test]
    fn checkerboard_alternates() {
        let img = Image::checkerboard(4, 2);
        assert_eq!(img.pixel(0, 0), Some(Image::MAGENTA));
        assert_eq!(img.pixel(2, 0), Some(Image::BLACK));
        assert_eq!(img.pixel(2, 2), Some(Image::MAGENTA));
        assert_eq!(img.pixel(4, 0), None);
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let img = Image::load_or_fallback(dir.path().join("nope.png"));
        assert_eq!(img, Image::fallback());
    }

    #[test]
    fn garbage_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(Image::load(&path), Err(ImageError::Decode { .. })));
        assert_eq!(Image::load_or_fallback(&path), Image::fallback());
    }

    #[test]
    fn loads_real_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let buf = image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
        buf.save(&path).unwrap();

        let img = Image::load(&path).unwrap();
        assert_eq!((img.width(), img.height()), (2, 1));
        assert_eq!(img.pixel(1, 0), Some([4, 5, 6, 255]));
    }

    #[test]
    fn textured_material_has_black_specular() {
        let mat = Material::textured(Image::solid(Image::WHITE));
        assert_eq!(mat.specular, Image::solid(Image::BLACK));
    }
}
