use super::*;
use std::f64::consts::PI;

mod single_point {
  use super::*;

  #[test]
  fn symmetric_parameters_at_origin() {
    let value = with_params(0.5, 0.5).point(0.0, 0.0);
    assert_eq!(value.f0, 1.0);
    assert_eq!(value.f1, 1.0);
    assert_eq!(value.f2, 1.0);
    assert!(value.valid);
    assert!((value.f_plus - 1.0 / PI.powi(2)).abs() < 1e-15);
    assert!((value.f_plus - 0.101321).abs() < 1e-6);
    assert_eq!(value.f_minus, 0.0);
  }

  #[test]
  fn default_parameters_interior_point() {
    let value = Evaluator::default().point(0.1, 0.2);
    assert!(value.valid);
    assert!((value.f0 - 2.174305362529332).abs() < 1e-12);
    assert!((value.f1 - 0.6373333333333332).abs() < 1e-12);
    assert!((value.f2 - 0.9542857142857143).abs() < 1e-12);
    assert!((value.f_plus - 0.20191921916018724).abs() < 1e-12);
    assert!((value.f_minus - 0.09531022963752543).abs() < 1e-12);
  }

  #[test]
  fn outside_mask_is_exact_zero() {
    let value = Evaluator::default().point(0.9, -0.9);
    assert!(value.f1 >= 0.0);
    assert!(value.f2 < 0.0);
    assert!(!value.valid);
    assert_eq!(value.f_plus.to_bits(), 0.0_f64.to_bits());
    assert_eq!(value.f_minus.to_bits(), 0.0_f64.to_bits());
  }

  #[test]
  fn mask_boundary_is_included_and_not_finite() {
    // F1 = F2 = 0 exactly, so S = 0 and D = 0
    let evaluator = with_params(0.5, 0.5);
    let value = evaluator.point(0.5, 0.5);
    assert_eq!(value.f1, 0.0);
    assert_eq!(value.f2, 0.0);
    assert!(evaluator.is_valid(0.5, 0.5));
    assert!(value.valid);
    assert!(!value.f_plus.is_finite());
    assert!(!value.f_minus.is_finite());
  }

  #[test]
  fn unit_coordinate_inside_mask_is_not_finite() {
    // (1, -0.875) is where the a = 1/4 ellipse touches v1 = 1; F1 rounds
    // to a tiny positive value, so the point is valid and D = 0
    let evaluator = with_params(0.25, 0.25);
    for (v1, v2) in [(1.0, -0.875), (-1.0, 0.875), (-0.875, 1.0)] {
      let value = evaluator.point(v1, v2);
      assert!(value.f1 >= 0.0, "F1 = {} at ({v1}, {v2})", value.f1);
      assert!(value.valid);
      assert!(!value.f_plus.is_finite());
      assert!(!value.f_minus.is_finite());
    }
  }

  #[test]
  fn unit_coordinate_rounded_outside_mask_is_zero() {
    // Same tangent point for a = 1/2, but F1 rounds below zero
    let value = with_params(0.5, 0.5).point(1.0, -0.5);
    assert!(value.f1 < 0.0);
    assert!(!value.valid);
    assert_eq!(value.f_plus, 0.0);
    assert_eq!(value.f_minus, 0.0);
  }

  #[test]
  fn zero_parameter_propagates_without_panic() {
    let value = with_params(0.0, 0.5).point(0.1, 0.2);
    assert!(value.f0.is_infinite());
    assert!(!value.valid);
    assert_eq!(value.f_plus, 0.0);
    assert_eq!(value.f_minus, 0.0);
  }

  #[test]
  fn swapping_coordinates() {
    let evaluator = Evaluator::default();
    let a = evaluator.point(0.1, -0.1);
    let b = evaluator.point(-0.1, 0.1);
    assert_eq!(a, b);
    assert!((a.f_plus - 0.17174157366308257).abs() < 1e-12);
    assert!((a.f_minus - 0.06836315958050145).abs() < 1e-12);
  }
}

mod fields {
  use super::*;

  #[test]
  fn reference_grid_shapes_and_zero_fill() {
    let grid = Grid::default();
    let evaluator = Evaluator::default();
    let mask = evaluator.mask(&grid);
    let fields = evaluator.evaluate(&grid);

    assert_eq!(fields.f_plus.dim(), (201, 201));
    assert_eq!(fields.f_minus.dim(), (201, 201));
    assert_eq!(mask.dim(), (201, 201));

    let mut outside = 0;
    Zip::from(&mask)
      .and(&fields.f_plus)
      .and(&fields.f_minus)
      .for_each(|&valid, &plus, &minus| {
        if !valid {
          outside += 1;
          assert_eq!(plus, 0.0);
          assert_eq!(minus, 0.0);
        }
      });
    assert!(outside > 0);
  }

  #[test]
  fn mask_matches_intermediate_fields() {
    let grid = Grid::square(51, 1.0).unwrap();
    let evaluator = with_params(0.375, 0.75);
    let inter = evaluator.intermediate(&grid);
    let mask = evaluator.mask(&grid);
    Zip::from(&mask)
      .and(&inter.f1)
      .and(&inter.f2)
      .for_each(|&valid, &f1, &f2| {
        assert_eq!(valid, f1 >= 0.0 && f2 >= 0.0);
      });
  }

  #[test]
  fn matches_pointwise_evaluation() {
    let grid = Grid::square(21, 1.0).unwrap();
    let evaluator = Evaluator::default();
    let fields = evaluator.evaluate(&grid);
    let expected_plus = Zip::from(grid.v1())
      .and(grid.v2())
      .map_collect(|&v1, &v2| evaluator.point(v1, v2).f_plus);
    assert!(same_bits(&fields.f_plus, &expected_plus));
  }

  #[test]
  fn symmetric_under_coordinate_swap() {
    let grid = Grid::default();
    for (a1, a2) in [(0.25, 0.75), (0.5, 0.5), (0.125, 0.875)] {
      let evaluator = with_params(a1, a2);
      let direct = evaluator.evaluate(&grid);
      let swapped = evaluator.evaluate(&grid.swapped());
      assert!(same_bits(&direct.f_plus, &swapped.f_plus));
      assert!(same_bits(&direct.f_minus, &swapped.f_minus));
      assert!(same_bits(&direct.f_plus, &direct.f_plus.t().to_owned()));
    }
  }

  #[test]
  fn plus_branch_dominates_minus_branch() {
    let grid = Grid::default();
    let evaluator = Evaluator::default();
    let mask = evaluator.mask(&grid);
    let fields = evaluator.evaluate(&grid);
    Zip::from(&mask)
      .and(&fields.f_plus)
      .and(&fields.f_minus)
      .for_each(|&valid, &plus, &minus| {
        if valid && plus.is_finite() && minus.is_finite() {
          assert!(plus >= minus, "f+ = {plus} < f- = {minus}");
        }
      });
  }

  #[test]
  fn repeated_evaluation_is_bit_identical() {
    let grid = Grid::default();
    let evaluator = with_params(0.25, 0.5);
    let first = evaluator.evaluate(&grid);
    let second = evaluator.evaluate(&grid);
    assert!(same_bits(&first.f_plus, &second.f_plus));
    assert!(same_bits(&first.f_minus, &second.f_minus));
  }

  #[test]
  fn evaluation_carries_its_mask() {
    let grid = Grid::default();
    let evaluator = with_params(0.125, 0.875);
    assert_eq!(evaluator.evaluate(&grid).mask, evaluator.mask(&grid));
  }

  #[test]
  fn single_branch_accessors() {
    let grid = Grid::square(31, 1.0).unwrap();
    let evaluator = Evaluator::default();
    let fields = evaluator.evaluate(&grid);
    assert!(same_bits(&evaluator.f_plus(&grid), &fields.f_plus));
    assert!(same_bits(&evaluator.f_minus(&grid), &fields.f_minus));
  }

  #[test]
  fn raw_arrays_must_share_shape() {
    let evaluator = Evaluator::default();
    let result = evaluator
      .evaluate_arrays(&Array2::zeros((3, 3)), &Array2::zeros((3, 4)));
    assert_eq!(
      result,
      Err(FpmError::ShapeMismatch {
        v1: (3, 3),
        v2: (3, 4)
      })
    );
  }

  #[test]
  fn raw_arrays_match_grid_evaluation() {
    let grid = Grid::square(11, 1.0).unwrap();
    let evaluator = Evaluator::default();
    let fields = evaluator.evaluate_arrays(grid.v1(), grid.v2()).unwrap();
    assert!(same_bits(&fields.f_plus, &evaluator.evaluate(&grid).f_plus));
  }
}
