//! Concrete ground-truth backends.
//!
//! Backends return device-independent `[C, H, W]` tensor data with values in
//! `[0, 1]`; placement on a device is the provider's job.

use std::path::{Path, PathBuf};

use burn::tensor::TensorData;
use image::{DynamicImage, ImageFormat};
use log::{info, warn};
use walkdir::WalkDir;

use crate::{
    config::SingleImageConfig,
    error::GroundTruthError,
};

/// A source of clean images addressed by position.
pub trait GroundTruthBackend: Send + Sync {
    /// The image at `index` as `[C, H, W]` data.
    fn get(&self, index: usize) -> Result<TensorData, GroundTruthError>;

    /// Number of images.
    fn len(&self) -> usize;

    /// Whether the backend holds no images.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A stable identifier for `index`, independent of iteration order.
    fn unique_id(&self, _index: usize) -> Option<u64> {
        None
    }
}

/// Converts a decoded image to planar `[C, H, W]` data.
pub fn image_to_data(image: DynamicImage, grayscale: bool) -> TensorData {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let (channels, interleaved) = if grayscale {
        (1, image.to_luma32f().into_raw())
    } else {
        (3, image.into_rgb32f().into_raw())
    };

    let plane = height * width;
    let mut planar = vec![0.0f32; channels * plane];
    for (i, value) in interleaved.into_iter().enumerate() {
        let (pixel, channel) = (i / channels, i % channels);
        planar[channel * plane + pixel] = value;
    }

    TensorData::new(planar, [channels, height, width])
}

fn open_image(path: &Path, grayscale: bool) -> Result<TensorData, GroundTruthError> {
    let image = image::open(path).map_err(|source| GroundTruthError::ImageOpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image_to_data(image, grayscale))
}

/// Images read from a directory tree, sorted by path.
#[derive(Debug, Clone)]
pub struct ImageFolder {
    root: PathBuf,
    files: Vec<PathBuf>,
    grayscale: bool,
}

impl ImageFolder {
    /// Collects every file under `root` whose extension the `image` crate knows.
    ///
    /// # Errors
    ///
    /// Fails if `root` is missing, unreadable, or holds no images.
    pub fn scan(root: impl Into<PathBuf>, grayscale: bool) -> Result<Self, GroundTruthError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(GroundTruthError::DirectoryNotFound { path: root });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).follow_links(true) {
            let entry = entry.map_err(|source| GroundTruthError::DirectoryReadFailed {
                path: root.clone(),
                source,
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if ImageFormat::from_path(path).is_ok() {
                files.push(path.to_path_buf());
            } else {
                warn!("Skipping non-image file: {}", path.display());
            }
        }

        if files.is_empty() {
            return Err(GroundTruthError::NoImages { path: root });
        }
        files.sort();

        info!("Found {} images in {}", files.len(), root.display());
        Ok(Self {
            root,
            files,
            grayscale,
        })
    }

    /// The directory the images were collected from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl GroundTruthBackend for ImageFolder {
    fn get(&self, index: usize) -> Result<TensorData, GroundTruthError> {
        let path = self
            .files
            .get(index)
            .ok_or(GroundTruthError::IndexOutOfRange {
                index,
                len: self.files.len(),
            })?;
        open_image(path, self.grayscale)
    }

    fn len(&self) -> usize {
        self.files.len()
    }

    /// Numeric file stems (`0801.png`) identify an image; others fall back.
    fn unique_id(&self, index: usize) -> Option<u64> {
        self.files
            .get(index)?
            .file_stem()?
            .to_str()?
            .parse()
            .ok()
    }
}

/// DIV2K high-resolution images under `<dir>/DIV2K/DIV2K_<split>_HR`.
pub fn div2k(datasets_dir: &Path, split: &str) -> Result<ImageFolder, GroundTruthError> {
    let split = match split {
        "val" | "valid" | "test" => "valid",
        other => other,
    };
    ImageFolder::scan(
        datasets_dir
            .join("DIV2K")
            .join(format!("DIV2K_{split}_HR")),
        false,
    )
}

/// Urban100 images under `<dir>/Urban100/<split>`.
pub fn urban100(datasets_dir: &Path, split: &str) -> Result<ImageFolder, GroundTruthError> {
    ImageFolder::scan(datasets_dir.join("Urban100").join(split), false)
}

/// Grayscale tomography slices under `<dir>/ct/<split>`.
pub fn ct(datasets_dir: &Path, split: &str) -> Result<ImageFolder, GroundTruthError> {
    ImageFolder::scan(datasets_dir.join("ct").join(split), true)
}

/// One image served `duplicates_count` times.
#[derive(Debug, Clone)]
pub struct SingleImage {
    data: TensorData,
    duplicates_count: usize,
}

impl SingleImage {
    /// Decodes the configured image once.
    pub fn open(config: &SingleImageConfig) -> Result<Self, GroundTruthError> {
        let data = open_image(&config.image_path, false)?;
        Ok(Self::from_data(data, config.duplicates_count))
    }

    /// Serves already decoded `[C, H, W]` data.
    pub const fn from_data(data: TensorData, duplicates_count: usize) -> Self {
        Self {
            data,
            duplicates_count,
        }
    }
}

impl GroundTruthBackend for SingleImage {
    fn get(&self, index: usize) -> Result<TensorData, GroundTruthError> {
        if index >= self.duplicates_count {
            return Err(GroundTruthError::IndexOutOfRange {
                index,
                len: self.duplicates_count,
            });
        }
        Ok(self.data.clone())
    }

    fn len(&self) -> usize {
        self.duplicates_count
    }
}
