//! Enumeration types for the reconstruction pipeline configuration.
//!
//! Every string discriminator of the experiment blueprint maps onto one of the
//! closed enumerations below. Parsing goes through [`FromStr`], so an unknown
//! name is rejected with a configuration error at construction time.

use std::str::FromStr;

use burn::prelude::*;

use crate::error::ReconError;

/// Source of the ground-truth images.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum DatasetName {
    /// DIV2K high-resolution images.
    Div2k,
    /// Urban100 images.
    Urban100,
    /// Computed tomography slices.
    Ct,
    /// A single image repeated a configurable number of times.
    SingleImage,
}

/// Whether a dataset feeds training or evaluation.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum Purpose {
    Train,
    Test,
}

/// The learning strategy used to build pairs and losses.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum Method {
    /// Fully supervised training against ground truth.
    Supervised,
    /// Cycle-split-consistency: ground truth replaced by a degraded proxy.
    Css,
    /// Split-reconstruction training on measurement halves.
    Noise2Inverse,
    /// Stein's unbiased risk estimate, no ground truth needed.
    Sure,
    /// Risk estimate combined with equivariant imaging.
    Proposed,
}

/// Transform family used by the equivariant-imaging strategies.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum TransformKind {
    /// Random quarter-turn rotations.
    Rotations,
    /// Random circular shifts.
    Shifts,
    /// A rotation followed by a shift.
    RotationsShifts,
    /// Random rescaling, see [`ScalingTransformConfig`](super::ScalingTransformConfig).
    ScalingTransforms,
}

/// Replacement for the risk-estimate term of the proposed loss.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum SureAlternative {
    /// Recorrupted-to-recorrupted estimation fused with equivariant imaging.
    R2r,
}

/// Where the training crop is taken from.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum CropLocation {
    /// A uniformly random location, drawn on every call.
    Random,
    /// A fixed `(top, left)` corner in measurement coordinates.
    Fixed(usize, usize),
}

/// Distance used by the supervised family of strategies.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum Metric {
    /// Mean squared error.
    Mse,
    /// Mean absolute error.
    L1,
}

/// How a rescaled image is brought back to a usable extent.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum ScalingKind {
    /// Zero-pad the rescaled image back to the original extent, centred.
    Padded,
    /// Keep the rescaled extent, rounded to a multiple of the resampling ratio.
    Resized,
}

/// The inverse problem a degradation simulator models.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum Task {
    /// Super-resolution.
    Sr,
    /// Deblurring.
    Deblurring,
    /// Computed tomography.
    Tomography,
    /// Pure denoising.
    Denoising,
}

macro_rules! named_enum {
    ($ty:ident, $err:expr, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// The external name of this option.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = ReconError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err($err(s.to_string())),
                }
            }
        }
    };
}

named_enum!(DatasetName, |name| ReconError::UnknownDataset { name }, {
    Div2k => "div2k",
    Urban100 => "urban100",
    Ct => "ct",
    SingleImage => "single_image",
});

named_enum!(Purpose, |name| ReconError::UnknownPurpose { name }, {
    Train => "train",
    Test => "test",
});

named_enum!(Method, |name| ReconError::UnknownMethod { name }, {
    Supervised => "supervised",
    Css => "css",
    Noise2Inverse => "noise2inverse",
    Sure => "sure",
    Proposed => "proposed",
});

named_enum!(TransformKind, |name| ReconError::UnknownTransform { name }, {
    Rotations => "Rotations",
    Shifts => "Shifts",
    RotationsShifts => "Rotations+Shifts",
    ScalingTransforms => "Scaling_Transforms",
});

named_enum!(SureAlternative, |name| ReconError::UnknownSureAlternative { name }, {
    R2r => "r2r",
});

named_enum!(Metric, |name| ReconError::UnknownOption { option: "metric", name }, {
    Mse => "mse",
    L1 => "l1",
});

named_enum!(ScalingKind, |name| ReconError::UnknownOption { option: "scaling kind", name }, {
    Padded => "padded",
    Resized => "resized",
});

named_enum!(Task, |name| ReconError::UnknownOption { option: "task", name }, {
    Sr => "sr",
    Deblurring => "deblurring",
    Tomography => "tomography",
    Denoising => "denoising",
});

impl FromStr for CropLocation {
    type Err = ReconError;

    /// Accepts `random` or a `top,left` pair.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "random" {
            return Ok(Self::Random);
        }

        let invalid = || ReconError::UnknownOption {
            option: "crop location",
            name: s.to_string(),
        };
        let (top, left) = s.split_once(',').ok_or_else(invalid)?;
        let top = top.trim().parse().map_err(|_| invalid())?;
        let left = left.trim().parse().map_err(|_| invalid())?;
        Ok(Self::Fixed(top, left))
    }
}
