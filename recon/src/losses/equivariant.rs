use burn::prelude::*;

use super::transforms::EquivarianceTransform;
use crate::{
    config::Metric,
    error::ReconResult,
    model::Reconstructor,
    physics::Physics,
};

/// Equivariant imaging: the model must commute with the transform.
///
/// `x2 = T(f(y))` is re-measured and reconstructed; the loss is
/// `weight * mse(f(A(x2) + n), x2)`. With `stop_gradient`, `x2` is detached.
#[derive(Debug, Clone)]
pub struct EquivariantLoss {
    pub transform: EquivarianceTransform,
    pub stop_gradient: bool,
    pub weight: f64,
}

impl EquivariantLoss {
    pub fn forward<B: Backend>(
        &self,
        x_net: Tensor<B, 4>,
        physics: &dyn Physics<B>,
        model: &dyn Reconstructor<B>,
    ) -> ReconResult<Tensor<B, 1>> {
        let mut x2 = self.transform.apply(x_net);
        if self.stop_gradient {
            x2 = x2.detach();
        }

        let y2 = physics.apply(x2.clone(), None);
        let x3 = model.reconstruct(y2, physics);

        Ok(Metric::Mse.distance(x3, x2)?.mul_scalar(self.weight))
    }
}
