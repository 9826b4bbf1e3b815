//! Population statistics for norm calibration

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor `N`, not `N-1`)
///
/// Norms describe the whole calibration population rather than
/// estimating a larger one, so the variance is not Bessel-corrected.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let center = mean(values);
    let variance = values
        .iter()
        .map(|value| {
            let diff = value - center;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Mean and population std-dev as one pair
pub fn distribution(values: &[f64]) -> (f64, f64) {
    (mean(values), population_std_dev(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_known_values() {
        assert_eq!(mean(&[10.0, 6.0]), 8.0);
        assert_eq!(mean(&[3.0]), 3.0);
    }

    #[test]
    fn test_mean_of_empty_slice_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_std_dev_uses_divisor_n() {
        // Sample std-dev of [10, 6] would be sqrt(8); population is 2
        assert_eq!(population_std_dev(&[10.0, 6.0]), 2.0);
    }

    #[test]
    fn test_population_std_dev_of_constant_values_is_zero() {
        assert_eq!(population_std_dev(&[4.0, 4.0, 4.0]), 0.0);
    }

    #[test]
    fn test_distribution_pairs_mean_and_std_dev() {
        assert_eq!(distribution(&[2.0, 4.0, 6.0]), (4.0, (8.0f64 / 3.0).sqrt()));
    }
}
