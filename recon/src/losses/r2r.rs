use burn::prelude::*;

use super::{equivariant::EquivariantLoss, transforms::EquivarianceTransform};
use crate::{
    config::Metric,
    error::ReconResult,
    model::Reconstructor,
    physics::{standard_normal, Physics},
};

/// Recorrupted-to-recorrupted estimation fused with equivariant imaging.
///
/// A probe `w ~ N(0, I)` splits `y` into `y1 = y + alpha sigma w` and
/// `y2 = y - sigma w / alpha`, whose noises are independent. The model sees
/// only `y1`; its re-measured output is matched against `y2`, and the same
/// output anchors an equivariant-imaging term. The strategy makes every model
/// call itself.
#[derive(Debug, Clone)]
pub struct R2rEquivariantLoss {
    pub transform: EquivarianceTransform,
    pub sigma: f64,
    pub alpha: f64,
    pub stop_gradient: bool,
}

impl R2rEquivariantLoss {
    pub fn forward<B: Backend>(
        &self,
        y: Tensor<B, 4>,
        physics: &dyn Physics<B>,
        model: &dyn Reconstructor<B>,
    ) -> ReconResult<Tensor<B, 1>> {
        let probe = standard_normal::<B, 4>(y.dims(), None, &y.device()).mul_scalar(self.sigma);
        let y1 = y.clone() + probe.clone().mul_scalar(self.alpha);
        let y2 = y - probe.div_scalar(self.alpha);

        let x_net = model.reconstruct(y1, physics);
        let recorrupted = Metric::Mse.distance(physics.forward(x_net.clone()), y2)?;

        let equivariant = EquivariantLoss {
            transform: self.transform.clone(),
            stop_gradient: self.stop_gradient,
            weight: 1.0,
        }
        .forward(x_net, physics, model)?;

        Ok(recorrupted + equivariant)
    }
}
