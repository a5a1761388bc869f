use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the ground-truth backends while reading images.
///
/// These are surfaced unchanged through [`ReconError::Backend`]; nothing in the
/// pipeline retries a failed read.
#[derive(Error, Debug)]
pub enum GroundTruthError {
    /// The expected dataset directory is missing.
    #[error("Dataset directory not found: {path}")]
    DirectoryNotFound {
        /// The directory that was expected to hold the images.
        path: PathBuf,
    },

    /// Walking the dataset directory failed.
    #[error("Failed to read directory: {path}")]
    DirectoryReadFailed {
        /// The directory being walked.
        path: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// The dataset directory holds no decodable images.
    #[error("No images found in: {path}")]
    NoImages {
        /// The directory that was searched.
        path: PathBuf,
    },

    /// Opening or decoding an image failed.
    #[error("Failed to open image: {path}")]
    ImageOpenFailed {
        /// The image that failed to open.
        path: PathBuf,
        /// The underlying decoding error.
        #[source]
        source: image::ImageError,
    },

    /// An index past the end of the backend was requested.
    #[error("Index {index} out of range for dataset of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of items in the backend.
        len: usize,
    },
}

/// The error type for reconstruction sample and loss operations.
#[derive(Error, Debug)]
pub enum ReconError {
    /// An unrecognised ground-truth dataset name.
    #[error("Unknown dataset: {name}")]
    UnknownDataset {
        /// The rejected name.
        name: String,
    },

    /// An unrecognised dataset purpose.
    #[error("Unknown purpose: {name}")]
    UnknownPurpose {
        /// The rejected name.
        name: String,
    },

    /// An unrecognised training method.
    #[error("Unknown method: {name}")]
    UnknownMethod {
        /// The rejected name.
        name: String,
    },

    /// An unrecognised equivariance transform family.
    #[error("Unknown transforms: {name}")]
    UnknownTransform {
        /// The rejected name.
        name: String,
    },

    /// A SURE alternative outside the accepted set.
    #[error("Unknown SURE alternative: {name}")]
    UnknownSureAlternative {
        /// The rejected name.
        name: String,
    },

    /// Any other unrecognised enumerated option.
    #[error("Unknown {option}: {name}")]
    UnknownOption {
        /// The option being parsed.
        option: &'static str,
        /// The rejected name.
        name: String,
    },

    /// A logically inconsistent combination of options.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// Two signals whose shapes must agree do not.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// The shape implied by the resampling ratio or the other operand.
        expected: String,
        /// The shape that was found.
        actual: String,
    },

    /// A crop window does not fit inside the signal it is taken from.
    #[error("Crop of {height}x{width} at ({top}, {left}) does not fit a {available_height}x{available_width} signal")]
    CropOutOfBounds {
        /// First row of the window.
        top: usize,
        /// First column of the window.
        left: usize,
        /// Rows the window spans.
        height: usize,
        /// Columns the window spans.
        width: usize,
        /// Rows of the signal being cropped.
        available_height: usize,
        /// Columns of the signal being cropped.
        available_width: usize,
    },

    /// A ground-truth backend failed.
    #[error(transparent)]
    Backend(#[from] GroundTruthError),
}

impl ReconError {
    /// Whether this error stems from configuration rather than data or shapes.
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownDataset { .. }
                | Self::UnknownPurpose { .. }
                | Self::UnknownMethod { .. }
                | Self::UnknownTransform { .. }
                | Self::UnknownSureAlternative { .. }
                | Self::UnknownOption { .. }
                | Self::InvalidConfiguration { .. }
        )
    }

    pub(crate) fn shape_mismatch(expected: impl std::fmt::Debug, actual: impl std::fmt::Debug) -> Self {
        Self::ShapeMismatch {
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }
}

/// A specialized `Result` type for reconstruction operations.
pub type ReconResult<T> = Result<T, ReconError>;
