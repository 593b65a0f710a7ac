// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Element-wise reduction of contact matrices obtained for multiple simulation repeats.

use nalgebra::DMatrix;

use crate::errors::ReduceError;

use super::matrix::ContactMatrix;

/// Check that all matrices have the same shape as the first one.
fn check_shapes(matrices: &[ContactMatrix]) -> Result<(usize, usize), ReduceError> {
    let expected = matrices.first().ok_or(ReduceError::NoMatrices)?.shape();

    for (i, matrix) in matrices.iter().enumerate().skip(1) {
        if matrix.shape() != expected {
            return Err(ReduceError::ShapeMismatch {
                index: i + 1,
                expected,
                found: matrix.shape(),
            });
        }
    }

    Ok(expected)
}

/// Calculate the element-wise arithmetic mean of the matrices.
///
/// All matrices must have the same shape. The matrices are summed in the order
/// in which they are provided and the sum is then divided by their number,
/// so the result is reproducible for the same input.
pub fn average(matrices: &[ContactMatrix]) -> Result<ContactMatrix, ReduceError> {
    check_shapes(matrices)?;

    let mut sum = matrices[0].data().clone();
    for matrix in &matrices[1..] {
        sum += matrix.data();
    }

    Ok(ContactMatrix::from(sum / matrices.len() as f64))
}

/// Calculate the element-wise sample standard deviation of the matrices.
/// Requires at least two matrices of the same shape.
pub fn standard_deviation(matrices: &[ContactMatrix]) -> Result<ContactMatrix, ReduceError> {
    let (n_rows, n_cols) = check_shapes(matrices)?;
    if matrices.len() < 2 {
        return Err(ReduceError::NotEnoughRepeats(matrices.len()));
    }

    let mean = average(matrices)?;

    let std = DMatrix::from_fn(n_rows, n_cols, |i, j| {
        let values: Vec<f64> = matrices.iter().map(|m| m[(i, j)]).collect();
        statistical::standard_deviation(&values, Some(mean[(i, j)]))
    });

    Ok(ContactMatrix::from(std))
}
