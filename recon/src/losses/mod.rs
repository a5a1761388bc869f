//! # Loss Composer
//!
//! Scores a batch pair by summing one or more estimator strategies selected by
//! the training method.

mod equivariant;
mod metric;
mod r2r;
mod supervised;
mod sure;
mod transforms;

pub use equivariant::EquivariantLoss;
pub use r2r::R2rEquivariantLoss;
pub use supervised::SupervisedLoss;
pub use sure::SureLoss;
pub use transforms::{EquivarianceTransform, ScalingTransform, SCALING_FACTORS};

use std::sync::Arc;

use burn::prelude::*;
use log::info;

use crate::{
    config::{CropLocation, ExperimentConfig, Method, Metric, SureAlternative},
    error::{ReconError, ReconResult},
    model::Reconstructor,
    pairs::CropPair,
    physics::Physics,
};

/// One loss-computation strategy.
#[derive(Debug, Clone)]
pub enum Estimator {
    Supervised(SupervisedLoss),
    Sure(SureLoss),
    Equivariant(EquivariantLoss),
    R2rEquivariant(R2rEquivariantLoss),
}

impl Estimator {
    /// Scores one batch. Every strategy receives the same arguments and uses
    /// what it needs.
    ///
    /// # Errors
    ///
    /// Fails if a strategy needs the initial reconstruction and none was
    /// computed, or on a shape mismatch.
    pub fn evaluate<B: Backend>(
        &self,
        x: Tensor<B, 4>,
        x_net: Option<Tensor<B, 4>>,
        y: Tensor<B, 4>,
        physics: &dyn Physics<B>,
        model: &dyn Reconstructor<B>,
    ) -> ReconResult<Tensor<B, 1>> {
        let x_net = || {
            x_net.clone().ok_or_else(|| ReconError::InvalidConfiguration {
                reason: format!("{} needs the model output", self.name()),
            })
        };

        match self {
            Self::Supervised(loss) => loss.forward(x, x_net()?),
            Self::Sure(loss) => loss.forward(x_net()?, y, physics, model),
            Self::Equivariant(loss) => loss.forward(x_net()?, physics, model),
            Self::R2rEquivariant(loss) => loss.forward(y, physics, model),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Supervised(_) => "supervised",
            Self::Sure(_) => "sure",
            Self::Equivariant(_) => "equivariant",
            Self::R2rEquivariant(_) => "r2r-equivariant",
        }
    }

    /// Whether the strategy relies on a reconstruction computed beforehand.
    pub const fn needs_x_net(&self) -> bool {
        !matches!(self, Self::R2rEquivariant(_))
    }
}

/// The composed training loss.
pub struct Loss<B: Backend> {
    physics: Arc<dyn Physics<B>>,
    estimators: Vec<Estimator>,
    crop: Option<CropPair>,
}

impl<B: Backend> Loss<B> {
    pub fn new(physics: Arc<dyn Physics<B>>, estimators: Vec<Estimator>) -> Self {
        Self {
            physics,
            estimators,
            crop: None,
        }
    }

    /// Re-crop every batch before scoring it.
    pub fn with_crop(mut self, crop: Option<CropPair>) -> Self {
        self.crop = crop;
        self
    }

    pub fn estimators(&self) -> &[Estimator] {
        &self.estimators
    }

    /// Whether the composer reconstructs the measurement before dispatching.
    pub fn computes_x_net(&self) -> bool {
        self.estimators.iter().any(Estimator::needs_x_net)
    }

    /// The reconstruction handed to the strategies, if any of them needs it.
    pub fn initial_estimate(
        &self,
        y: Tensor<B, 4>,
        model: &dyn Reconstructor<B>,
    ) -> Option<Tensor<B, 4>> {
        self.computes_x_net()
            .then(|| model.reconstruct(y, self.physics.as_ref()))
    }

    /// Scores the batch `(x, y)`; `x` is ignored by strategies that need no
    /// ground truth.
    ///
    /// # Errors
    ///
    /// Fails if the re-crop does not fit or a strategy reports a mismatch.
    pub fn evaluate(
        &self,
        x: Tensor<B, 4>,
        y: Tensor<B, 4>,
        model: &dyn Reconstructor<B>,
    ) -> ReconResult<Tensor<B, 1>> {
        let (x, y) = match &self.crop {
            Some(crop) => crop.apply(x, y, self.physics.ratio())?,
            None => (x, y),
        };

        let x_net = self.initial_estimate(y.clone(), model);
        let physics = self.physics.as_ref();

        let mut total: Option<Tensor<B, 1>> = None;
        for estimator in &self.estimators {
            let term = estimator.evaluate(x.clone(), x_net.clone(), y.clone(), physics, model)?;
            total = Some(match total {
                Some(total) => total + term,
                None => term,
            });
        }

        total.ok_or_else(|| ReconError::InvalidConfiguration {
            reason: "the loss has no strategies".to_string(),
        })
    }
}

/// Builds the loss for `config.method`.
///
/// # Errors
///
/// Fails on an invalid configuration, including an unresolvable SURE margin.
pub fn build_loss<B: Backend>(
    config: &ExperimentConfig,
    physics: Arc<dyn Physics<B>>,
) -> ReconResult<Loss<B>> {
    config.validate()?;

    let sigma = config.sigma();
    let margin = config.sure.resolve_margin(physics.as_ref())?;

    let estimators = match config.method {
        Method::Supervised => vec![Estimator::Supervised(SupervisedLoss::new(
            config.loss.metric.clone(),
        ))],
        Method::Css | Method::Noise2Inverse => {
            vec![Estimator::Supervised(SupervisedLoss::new(Metric::Mse))]
        }
        Method::Sure => vec![Estimator::Sure(config.sure.init(sigma, margin))],
        Method::Proposed => {
            let proposed = &config.proposed;
            let transform = EquivarianceTransform::from_kind(
                &proposed.transforms,
                &config.scaling,
                physics.ratio(),
            );
            match proposed.sure_alternative {
                Some(SureAlternative::R2r) => {
                    vec![Estimator::R2rEquivariant(R2rEquivariantLoss {
                        transform,
                        sigma,
                        alpha: proposed.recorruption_alpha,
                        stop_gradient: proposed.stop_gradient,
                    })]
                }
                None => vec![
                    Estimator::Sure(config.sure.init(sigma, margin)),
                    Estimator::Equivariant(EquivariantLoss {
                        transform,
                        stop_gradient: proposed.stop_gradient,
                        weight: proposed.alpha_tradeoff,
                    }),
                ],
            }
        }
    };

    info!(
        "Loss for {}: [{}], margin {margin}",
        config.method.as_str(),
        estimators
            .iter()
            .map(Estimator::name)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let crop = config
        .loss
        .crop_training_pairs
        .then(|| CropPair::new(config.loss.crop_size, CropLocation::Random));

    Ok(Loss::new(physics, estimators).with_crop(crop))
}
