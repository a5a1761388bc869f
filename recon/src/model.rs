//! The reconstruction model as seen by the loss strategies.

use burn::prelude::*;

use crate::physics::Physics;

/// Maps a measurement batch back to image space.
///
/// Strategies call the model as often as they need, with the physics of the
/// current batch, so implementations may keep per-call state.
pub trait Reconstructor<B: Backend> {
    fn reconstruct(&self, y: Tensor<B, 4>, physics: &dyn Physics<B>) -> Tensor<B, 4>;
}

/// A model-free baseline that applies the approximate inverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoInverse;

impl<B: Backend> Reconstructor<B> for PseudoInverse {
    fn reconstruct(&self, y: Tensor<B, 4>, physics: &dyn Physics<B>) -> Tensor<B, 4> {
        physics.a_dagger(y)
    }
}
