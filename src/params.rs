use crate::FpmError;
use log::debug;

/// The two free parameters of the model together with their derived
/// companions `b = sqrt(1 - a^2)`.
///
/// Values are validated once at construction and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
  a1: f64,
  a2: f64,
  b1: f64,
  b2: f64,
}

pub const DEFAULT_A1: f64 = 0.25;
pub const DEFAULT_A2: f64 = 0.75;

fn check_domain(name: &'static str, value: f64) -> Result<f64, FpmError> {
  // NaN fails the comparison too
  if value.abs() < 1.0 {
    Ok(value)
  } else {
    Err(FpmError::ParameterOutOfDomain { name, value })
  }
}

impl ModelParams {
  /// Build a parameter set, rejecting `|a1| >= 1`, `|a2| >= 1` and
  /// non-finite values.
  ///
  /// `a = 0` is accepted. The resulting divisions by zero in the model
  /// formulas propagate as infinities or NaN.
  pub fn new(a1: f64, a2: f64) -> Result<Self, FpmError> {
    let params =
      Self::derive(check_domain("a1", a1)?, check_domain("a2", a2)?);
    debug!(
      "model parameters a1={} a2={} b1={} b2={}",
      params.a1, params.a2, params.b1, params.b2
    );
    Ok(params)
  }

  fn derive(a1: f64, a2: f64) -> Self {
    ModelParams {
      a1,
      a2,
      b1: (1.0 - a1.powi(2)).sqrt(),
      b2: (1.0 - a2.powi(2)).sqrt(),
    }
  }

  pub fn a1(&self) -> f64 {
    self.a1
  }

  pub fn a2(&self) -> f64 {
    self.a2
  }

  pub fn b1(&self) -> f64 {
    self.b1
  }

  pub fn b2(&self) -> f64 {
    self.b2
  }
}

impl Default for ModelParams {
  fn default() -> Self {
    Self::derive(DEFAULT_A1, DEFAULT_A2)
  }
}
