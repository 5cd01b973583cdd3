//! Discrete derivatives: momentum (price) and participation change (volume).
//!
//! First order is the simple difference between consecutive defined values;
//! second order is the difference of the first. Strictly causal: each
//! output point only looks backwards.

use crate::domain::error::StocklensError;
use crate::domain::series::Series;

pub fn derivative(series: &Series, order: usize) -> Result<Series, StocklensError> {
    let name = format!("D{}({})", order, series.name);
    if order == 0 || order > 2 {
        return Err(StocklensError::invalid_parameter(
            &name,
            "order must be 1 or 2",
        ));
    }

    let (start, values) = series
        .defined_suffix()
        .ok_or_else(|| StocklensError::insufficient_data(&name, 0, order + 1))?;
    if values.len() <= order {
        return Err(StocklensError::insufficient_data(
            &name,
            values.len(),
            order + 1,
        ));
    }

    let mut current = values;
    for _ in 0..order {
        current = current.windows(2).map(|w| w[1] - w[0]).collect();
    }

    let mut out: Vec<Option<f64>> = vec![None; series.len()];
    for (i, &v) in current.iter().enumerate() {
        out[start + order + i] = Some(v);
    }

    Ok(Series::from_values(name, &series.dates(), out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::{make_dates, make_series};
    use approx::assert_relative_eq;

    #[test]
    fn first_derivative_of_linear_series() {
        let values: Vec<f64> = (0..6).map(|x| 2.0 * x as f64).collect();
        let s = make_series(&values);
        let out = derivative(&s, 1).unwrap();

        assert_eq!(out.value(0), None);
        for i in 1..6 {
            assert_relative_eq!(out.value(i).unwrap(), 2.0);
        }
    }

    #[test]
    fn second_derivative_of_quadratic_series() {
        let values: Vec<f64> = (0..8).map(|x| (x * x) as f64).collect();
        let s = make_series(&values);
        let out = derivative(&s, 2).unwrap();

        assert_eq!(out.value(0), None);
        assert_eq!(out.value(1), None);
        // x² has a constant second difference of 2.
        for i in 2..8 {
            assert_relative_eq!(out.value(i).unwrap(), 2.0);
        }
    }

    #[test]
    fn first_derivative_telescopes() {
        let values = [3.0, 7.0, 4.0, 9.0, 2.0, 11.0];
        let s = make_series(&values);
        let out = derivative(&s, 1).unwrap();

        let sum: f64 = (1..6).map(|i| out.value(i).unwrap()).sum();
        assert_relative_eq!(sum, values[5] - values[0]);
    }

    #[test]
    fn derivative_skips_undefined_prefix() {
        let dates = make_dates(5);
        let s = crate::domain::series::Series::from_values(
            "smooth",
            &dates,
            vec![None, None, Some(1.0), Some(4.0), Some(9.0)],
        );
        let out = derivative(&s, 1).unwrap();
        assert_eq!(out.value(2), None);
        assert_relative_eq!(out.value(3).unwrap(), 3.0);
        assert_relative_eq!(out.value(4).unwrap(), 5.0);
    }

    #[test]
    fn order_out_of_range_is_invalid() {
        let s = make_series(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            derivative(&s, 0),
            Err(StocklensError::InvalidParameter { .. })
        ));
        assert!(matches!(
            derivative(&s, 3),
            Err(StocklensError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn too_short_for_order() {
        let s = make_series(&[1.0, 2.0]);
        assert!(matches!(
            derivative(&s, 2),
            Err(StocklensError::InsufficientData { .. })
        ));
    }
}
