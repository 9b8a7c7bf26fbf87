use crate::FpmError;
use log::debug;
use ndarray::{Array1, Array2};

pub const DEFAULT_POINTS: usize = 201;
pub const DEFAULT_LIMIT: f64 = 1.0;

/// `n` evenly spaced samples over `[start, stop]`, both endpoints included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
  match n {
    0 => Array1::zeros(0),
    1 => Array1::from_elem(1, start),
    _ => {
      let step = (stop - start) / (n - 1) as f64;
      Array1::from_shape_fn(n, |i| {
        // Pin the last sample so rounding never moves the endpoint
        if i == n - 1 {
          stop
        } else {
          start + i as f64 * step
        }
      })
    }
  }
}

/// A pair of equal-shape coordinate arrays sampling the `(v1, v2)` plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
  v1: Array2<f64>,
  v2: Array2<f64>,
}

impl Grid {
  pub fn new(v1: Array2<f64>, v2: Array2<f64>) -> Result<Self, FpmError> {
    if v1.dim() != v2.dim() {
      return Err(FpmError::ShapeMismatch {
        v1: v1.dim(),
        v2: v2.dim(),
      });
    }
    Ok(Grid { v1, v2 })
  }

  /// Cartesian product of two 1D samplings.
  ///
  /// Rows follow `ys` and columns follow `xs`, so `v1[[i, j]] == xs[j]` and
  /// `v2[[i, j]] == ys[i]`.
  pub fn meshgrid(xs: &Array1<f64>, ys: &Array1<f64>) -> Self {
    let shape = (ys.len(), xs.len());
    let v1 = Array2::from_shape_fn(shape, |(_, j)| xs[j]);
    let v2 = Array2::from_shape_fn(shape, |(i, _)| ys[i]);
    Grid { v1, v2 }
  }

  /// Square `n_points x n_points` grid over `[-limit, limit]^2`.
  pub fn square(n_points: usize, range_limit: f64) -> Result<Self, FpmError> {
    if !range_limit.is_finite() || range_limit < 0.0 {
      return Err(FpmError::InvalidGrid(format!(
        "range limit must be finite and non-negative, got {range_limit}"
      )));
    }
    debug!("building {n_points}x{n_points} grid over [-{range_limit}, {range_limit}]");
    let axis = linspace(-range_limit, range_limit, n_points);
    Ok(Self::meshgrid(&axis, &axis))
  }

  pub fn v1(&self) -> &Array2<f64> {
    &self.v1
  }

  pub fn v2(&self) -> &Array2<f64> {
    &self.v2
  }

  pub fn shape(&self) -> (usize, usize) {
    self.v1.dim()
  }

  pub fn len(&self) -> usize {
    self.v1.len()
  }

  pub fn is_empty(&self) -> bool {
    self.v1.is_empty()
  }

  /// The same grid with the roles of `v1` and `v2` exchanged.
  pub fn swapped(&self) -> Self {
    Grid {
      v1: self.v2.clone(),
      v2: self.v1.clone(),
    }
  }
}

impl Default for Grid {
  fn default() -> Self {
    let axis = linspace(-DEFAULT_LIMIT, DEFAULT_LIMIT, DEFAULT_POINTS);
    Self::meshgrid(&axis, &axis)
  }
}
