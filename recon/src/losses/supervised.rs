use burn::prelude::*;

use crate::{config::Metric, error::ReconResult};

/// Distance between the model output and the reference.
///
/// Shared by `supervised`, `css` and `noise2inverse`; only the meaning of the
/// reference differs between them.
#[derive(Debug, Clone)]
pub struct SupervisedLoss {
    pub metric: Metric,
}

impl SupervisedLoss {
    pub const fn new(metric: Metric) -> Self {
        Self { metric }
    }

    pub fn forward<B: Backend>(
        &self,
        x: Tensor<B, 4>,
        x_net: Tensor<B, 4>,
    ) -> ReconResult<Tensor<B, 1>> {
        self.metric.distance(x_net, x)
    }
}
