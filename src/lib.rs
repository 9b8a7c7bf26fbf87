use thiserror::Error;

pub mod evaluator;
pub mod grid;
pub mod params;
pub mod summary;

pub use evaluator::{Evaluator, FpmFields, IntermediateFields, PointValue};
pub use grid::{linspace, Grid};
pub use params::ModelParams;
pub use summary::FieldSummary;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FpmError {
  #[error("Parameter {name} = {value} is out of domain: expected |{name}| < 1")]
  ParameterOutOfDomain { name: &'static str, value: f64 },
  #[error("Dimension mismatch: v1 has shape {v1:?} but v2 has shape {v2:?}")]
  ShapeMismatch { v1: (usize, usize), v2: (usize, usize) },
  #[error("Invalid grid: {0}")]
  InvalidGrid(String),
}
