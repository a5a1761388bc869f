//! Stein's unbiased risk estimate for Gaussian noise.

use burn::prelude::*;
use burn_extra_ops::{CropWindow, TensorExtraOps};

use crate::{
    config::{SureConfig, Task},
    error::{ReconError, ReconResult},
    model::Reconstructor,
    physics::{standard_normal, Physics},
};

impl SureConfig {
    /// Border margin, in measurement pixels, excluded from the estimate.
    ///
    /// Without partial SURE the margin is zero. With it, an explicit margin
    /// wins; otherwise deblurring uses half the kernel support and
    /// super-resolution uses two pixels when `partial_sr` is set.
    ///
    /// # Errors
    ///
    /// Fails if an explicit margin is given without partial SURE, or if a
    /// deblurring operator exposes no kernel.
    pub fn resolve_margin<B: Backend>(&self, physics: &dyn Physics<B>) -> ReconResult<usize> {
        if !self.partial {
            if self.margin.is_some() {
                return Err(ReconError::InvalidConfiguration {
                    reason: "an explicit SURE margin requires partial SURE".to_string(),
                });
            }
            return Ok(0);
        }

        if let Some(margin) = self.margin {
            return Ok(margin);
        }

        match physics.task() {
            Task::Deblurring => {
                let kernel = physics.filter().ok_or_else(|| ReconError::InvalidConfiguration {
                    reason: "partial SURE for deblurring needs the blur kernel".to_string(),
                })?;
                let [_, _, kh, kw] = kernel.dims();
                Ok((kh.max(kw) - 1) / 2)
            }
            Task::Sr if self.partial_sr => Ok(2),
            _ => Ok(0),
        }
    }

    pub fn init(&self, sigma: f64, margin: usize) -> SureLoss {
        SureLoss {
            sigma,
            margin,
            cropped_div: self.cropped_div,
            averaged_cst: self.averaged_cst,
            tau: self.tau,
        }
    }
}

/// SURE with a Monte Carlo divergence.
///
/// With residual `r = A(f(y)) - y` restricted to the region `M` left after
/// removing the margin, a probe `b ~ N(0, I)` and step `tau`:
///
/// - `div = b . (A(f(y + tau b)) - A(f(y))) / tau`, summed over `M` when
///   `cropped_div` is set and over the whole measurement otherwise;
/// - summed form: `|r|^2 - sigma^2 |M| + 2 sigma^2 div`;
/// - averaged form (`averaged_cst`): `|r|^2 / |M| - sigma^2 + 2 sigma^2 div / |D|`,
///   where `D` is the region the divergence was summed over.
///
/// Both are averaged over the batch. No ground truth is involved.
#[derive(Debug, Clone)]
pub struct SureLoss {
    pub sigma: f64,
    pub margin: usize,
    pub cropped_div: bool,
    pub averaged_cst: bool,
    pub tau: f64,
}

impl SureLoss {
    fn interior(&self, height: usize, width: usize) -> ReconResult<CropWindow> {
        let m = self.margin;
        if 2 * m >= height || 2 * m >= width {
            return Err(ReconError::shape_mismatch(
                format!("more than {} pixels per side", 2 * m),
                [height, width],
            ));
        }
        Ok(CropWindow::new(m, m, height - 2 * m, width - 2 * m))
    }

    pub fn forward<B: Backend>(
        &self,
        x_net: Tensor<B, 4>,
        y: Tensor<B, 4>,
        physics: &dyn Physics<B>,
        model: &dyn Reconstructor<B>,
    ) -> ReconResult<Tensor<B, 1>> {
        let dims = y.dims();
        let [batch, channels, height, width] = dims;
        let interior = self.interior(height, width)?;

        let y_net = physics.forward(x_net);
        if y_net.dims() != dims {
            return Err(ReconError::shape_mismatch(dims, y_net.dims()));
        }

        let probe = standard_normal::<B, 4>(dims, None, &y.device());
        let y_perturbed = y.clone() + probe.clone().mul_scalar(self.tau);
        let y_net_perturbed = physics.forward(model.reconstruct(y_perturbed, physics));

        let mut variation = (y_net_perturbed - y_net.clone()) * probe;
        if self.cropped_div {
            variation = variation.crop(interior);
        }
        let div_pixels = variation.dims()[1..].iter().product::<usize>();
        let div = variation
            .reshape([batch, div_pixels])
            .sum_dim(1)
            .div_scalar(self.tau);

        let region_pixels = channels * interior.height * interior.width;
        let residual = (y_net - y)
            .crop(interior)
            .powf_scalar(2.0)
            .reshape([batch, region_pixels])
            .sum_dim(1);

        let (div_pixels, region_pixels) = (div_pixels as f64, region_pixels as f64);

        let variance = self.sigma * self.sigma;
        let per_sample = if self.averaged_cst {
            residual.div_scalar(region_pixels).sub_scalar(variance)
                + div.mul_scalar(2.0 * variance / div_pixels)
        } else {
            residual.sub_scalar(variance * region_pixels) + div.mul_scalar(2.0 * variance)
        };

        Ok(per_sample.mean())
    }
}
