use crate::grid::Grid;
use crate::params::ModelParams;
use crate::summary::FieldSummary;
use crate::FpmError;
use log::{debug, warn};
use ndarray::{Array2, Zip};
use std::f64::consts::PI;

/// The three closed-form fields the outputs are built from.
#[derive(Debug, Clone, PartialEq)]
pub struct IntermediateFields {
  pub f0: Array2<f64>,
  pub f1: Array2<f64>,
  pub f2: Array2<f64>,
}

/// The two branches f+ and f- sampled over a grid, with the validity mask
/// they were gated by.
#[derive(Debug, Clone, PartialEq)]
pub struct FpmFields {
  pub f_plus: Array2<f64>,
  pub f_minus: Array2<f64>,
  pub mask: Array2<bool>,
}

/// Everything the model yields at a single `(v1, v2)` point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointValue {
  pub f0: f64,
  pub f1: f64,
  pub f2: f64,
  pub valid: bool,
  pub f_plus: f64,
  pub f_minus: f64,
}

/// Combine the intermediate values into `(f+, f-)`.
///
/// Outside the valid region both branches are exactly zero and the
/// formula is never evaluated. On the boundary `S == 0` (and at `v = +-1`)
/// the division is left to IEEE-754, so the result may be infinite or NaN.
fn branches(f0: f64, f1: f64, f2: f64, v1: f64, v2: f64) -> (f64, f64) {
  if !(f1 >= 0.0 && f2 >= 0.0) {
    return (0.0, 0.0);
  }
  let s = (f1 * f2).sqrt();
  // (1 - v1^2)(1 - v2^2) is formed first so swapping v1 and v2 is exact
  let d = 2.0 * PI.powi(2) * ((1.0 - v1.powi(2)) * (1.0 - v2.powi(2))) * s;
  ((f0 + s) / d, (f0 - s) / d)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evaluator {
  params: ModelParams,
}

impl Evaluator {
  pub fn new(params: ModelParams) -> Self {
    Evaluator { params }
  }

  pub fn params(&self) -> &ModelParams {
    &self.params
  }

  pub fn f0(&self, v1: f64, v2: f64) -> f64 {
    let (a1, a2) = (self.params.a1(), self.params.a2());
    let (b1, b2) = (self.params.b1(), self.params.b2());
    let sum = (v1 + v2).powi(2);
    let diff = (v1 - v2).powi(2);
    (((a1 * b2).powi(2) + (a2 * b1).powi(2))
      - (b1.powi(2) + b2.powi(2)) * sum / 4.0
      - (a1.powi(2) + a2.powi(2)) * diff / 4.0)
      / (2.0 * a1 * a2 * b1 * b2)
  }

  pub fn f1(&self, v1: f64, v2: f64) -> f64 {
    let (a1, b1) = (self.params.a1(), self.params.b1());
    1.0
      - (v1 + v2).powi(2) / (4.0 * a1.powi(2))
      - (v1 - v2).powi(2) / (4.0 * b1.powi(2))
  }

  pub fn f2(&self, v1: f64, v2: f64) -> f64 {
    let (a2, b2) = (self.params.a2(), self.params.b2());
    1.0
      - (v1 + v2).powi(2) / (4.0 * a2.powi(2))
      - (v1 - v2).powi(2) / (4.0 * b2.powi(2))
  }

  /// Whether `(v1, v2)` lies in the closed region `F1 >= 0 && F2 >= 0`.
  pub fn is_valid(&self, v1: f64, v2: f64) -> bool {
    self.f1(v1, v2) >= 0.0 && self.f2(v1, v2) >= 0.0
  }

  pub fn point(&self, v1: f64, v2: f64) -> PointValue {
    let f0 = self.f0(v1, v2);
    let f1 = self.f1(v1, v2);
    let f2 = self.f2(v1, v2);
    let (f_plus, f_minus) = branches(f0, f1, f2, v1, v2);
    PointValue {
      f0,
      f1,
      f2,
      valid: f1 >= 0.0 && f2 >= 0.0,
      f_plus,
      f_minus,
    }
  }

  pub fn intermediate(&self, grid: &Grid) -> IntermediateFields {
    IntermediateFields {
      f0: Zip::from(grid.v1())
        .and(grid.v2())
        .map_collect(|&v1, &v2| self.f0(v1, v2)),
      f1: Zip::from(grid.v1())
        .and(grid.v2())
        .map_collect(|&v1, &v2| self.f1(v1, v2)),
      f2: Zip::from(grid.v1())
        .and(grid.v2())
        .map_collect(|&v1, &v2| self.f2(v1, v2)),
    }
  }

  pub fn mask(&self, grid: &Grid) -> Array2<bool> {
    Zip::from(grid.v1())
      .and(grid.v2())
      .map_collect(|&v1, &v2| self.is_valid(v1, v2))
  }

  pub fn f_plus(&self, grid: &Grid) -> Array2<f64> {
    self.evaluate(grid).f_plus
  }

  pub fn f_minus(&self, grid: &Grid) -> Array2<f64> {
    self.evaluate(grid).f_minus
  }

  /// Sample both branches over `grid`.
  pub fn evaluate(&self, grid: &Grid) -> FpmFields {
    let mut f_plus = Array2::zeros(grid.shape());
    let mut f_minus = Array2::zeros(grid.shape());
    let mut mask = Array2::from_elem(grid.shape(), false);
    let mut masked = 0usize;
    let mut non_finite = 0usize;

    Zip::from(&mut f_plus)
      .and(&mut f_minus)
      .and(&mut mask)
      .and(grid.v1())
      .and(grid.v2())
      .for_each(|fp, fm, valid, &v1, &v2| {
        let value = self.point(v1, v2);
        *valid = value.valid;
        if value.valid {
          masked += 1;
          if !value.f_plus.is_finite() || !value.f_minus.is_finite() {
            non_finite += 1;
          }
        }
        *fp = value.f_plus;
        *fm = value.f_minus;
      });

    debug!(
      "evaluated {} points for a1={} a2={}: {masked} inside the mask",
      grid.len(),
      self.params.a1(),
      self.params.a2()
    );
    if non_finite > 0 {
      warn!("{non_finite} points inside the mask produced non-finite values");
    }
    FpmFields {
      f_plus,
      f_minus,
      mask,
    }
  }

  /// `evaluate` on raw coordinate arrays, which must share a shape.
  pub fn evaluate_arrays(
    &self,
    v1: &Array2<f64>,
    v2: &Array2<f64>,
  ) -> Result<FpmFields, FpmError> {
    let grid = Grid::new(v1.clone(), v2.clone())?;
    Ok(self.evaluate(&grid))
  }

  /// Summaries of f+ and f- over `grid`.
  pub fn summarize(&self, grid: &Grid) -> (FieldSummary, FieldSummary) {
    let fields = self.evaluate(grid);
    (
      FieldSummary::collect(&fields.f_plus, &fields.mask),
      FieldSummary::collect(&fields.f_minus, &fields.mask),
    )
  }
}
