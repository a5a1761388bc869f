//! # Circular Shift
//!
//! Rolls a tensor along one or more dimensions, wrapping elements that fall off
//! one end back in at the other, like `torch.roll`.

use burn::prelude::*;

/// Rolls `input` by `shifts[i]` positions along `dims[i]`.
///
/// Positive shifts move elements towards higher indices. Shifts larger than the
/// dimension wrap around, and a zero-sized dimension is left untouched.
///
/// # Panics
///
/// Panics if `shifts` and `dims` do not have the same length.
pub fn roll<B: Backend, const D: usize>(
    input: Tensor<B, D>,
    shifts: &[i64],
    dims: &[usize],
) -> Tensor<B, D> {
    assert_eq!(
        shifts.len(),
        dims.len(),
        "roll expects one shift per dimension, got {} shifts for {} dims",
        shifts.len(),
        dims.len()
    );

    shifts
        .iter()
        .zip(dims)
        .fold(input, |acc, (&shift, &dim)| roll_dim(acc, shift, dim))
}

fn roll_dim<B: Backend, const D: usize>(input: Tensor<B, D>, shift: i64, dim: usize) -> Tensor<B, D> {
    let size = input.dims()[dim] as i64;
    if size == 0 {
        return input;
    }

    let start = (size - shift).rem_euclid(size);
    if start == 0 {
        return input;
    }

    let head = input
        .clone()
        .narrow(dim, start as usize, (size - start) as usize);
    let tail = input.narrow(dim, 0, start as usize);
    Tensor::cat(vec![head, tail], dim)
}
