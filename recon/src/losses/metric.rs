//! Pixel-wise distances shared by the strategies.

use burn::prelude::*;

use crate::{
    config::Metric,
    error::{ReconError, ReconResult},
};

impl Metric {
    /// Mean distance between `pred` and `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::ShapeMismatch`] if the shapes differ.
    pub fn distance<B: Backend>(
        &self,
        pred: Tensor<B, 4>,
        target: Tensor<B, 4>,
    ) -> ReconResult<Tensor<B, 1>> {
        let (pred_dims, target_dims) = (pred.dims(), target.dims());
        if pred_dims != target_dims {
            return Err(ReconError::shape_mismatch(target_dims, pred_dims));
        }

        let diff = pred - target;
        Ok(match self {
            Self::Mse => diff.powf_scalar(2.0).mean(),
            Self::L1 => diff.abs().mean(),
        })
    }
}
