use crate::FpmError;
use ndarray::{Array2, Zip};
use serde_json::{json, Value};

/// What a caller needs to know about an output field before choosing a
/// colour range for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
  pub points: usize,
  /// Points inside the validity mask.
  pub masked: usize,
  /// NaN or infinite values.
  pub non_finite: usize,
  pub min: Option<f64>,
  pub max: Option<f64>,
}

impl FieldSummary {
  /// Summarize `field`, counting the points `mask` marks as valid.
  pub fn of(
    field: &Array2<f64>,
    mask: &Array2<bool>,
  ) -> Result<Self, FpmError> {
    if field.dim() != mask.dim() {
      return Err(FpmError::ShapeMismatch {
        v1: field.dim(),
        v2: mask.dim(),
      });
    }
    Ok(Self::collect(field, mask))
  }

  /// Shapes of `field` and `mask` must already agree.
  pub(crate) fn collect(field: &Array2<f64>, mask: &Array2<bool>) -> Self {
    let mut summary = FieldSummary {
      points: field.len(),
      masked: 0,
      non_finite: 0,
      min: None,
      max: None,
    };
    Zip::from(field).and(mask).for_each(|&value, &valid| {
      if valid {
        summary.masked += 1;
      }
      if !value.is_finite() {
        summary.non_finite += 1;
        return;
      }
      summary.min = Some(summary.min.map_or(value, |m| m.min(value)));
      summary.max = Some(summary.max.map_or(value, |m| m.max(value)));
    });
    summary
  }

  pub fn to_json(&self) -> Value {
    json!({
      "points": self.points,
      "masked": self.masked,
      "non_finite": self.non_finite,
      "min": self.min,
      "max": self.max,
    })
  }
}
