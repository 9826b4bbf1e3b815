// Pure per-value scoring functions

use crate::core::types::{MAX_RAW_ANSWER, MIN_RAW_ANSWER};

/// The population mean maps to this T-score
pub const T_SCORE_CENTER: f64 = 50.0;
/// One population standard deviation in T-score points
pub const T_SCORE_SPREAD: f64 = 10.0;

/// Invert a raw Likert response for a reverse-keyed question
///
/// Valid only on the 1..=5 domain, which callers enforce before
/// aggregation. The transform is applied exactly once, upstream of all
/// summing.
pub fn reverse_score(raw: u8) -> u8 {
    MIN_RAW_ANSWER + MAX_RAW_ANSWER - raw
}

/// Scored value a question contributes to its scale sum
pub fn applied_score(raw: u8, is_reverse_scored: bool) -> f64 {
    if is_reverse_scored {
        reverse_score(raw) as f64
    } else {
        raw as f64
    }
}

/// Normalize a raw score against a population mean and std-dev
///
/// A zero std-dev carries no discriminating information and pins the
/// score to the center rather than dividing by zero.
pub fn t_score(raw: f64, mean: f64, std_dev: f64, bounds: (f64, f64)) -> f64 {
    if std_dev == 0.0 {
        return T_SCORE_CENTER;
    }
    let (min, max) = bounds;
    let t = T_SCORE_CENTER + T_SCORE_SPREAD * (raw - mean) / std_dev;
    t.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: (f64, f64) = (20.0, 80.0);

    #[test]
    fn test_reverse_score_inverts_domain() {
        assert_eq!(reverse_score(1), 5);
        assert_eq!(reverse_score(2), 4);
        assert_eq!(reverse_score(3), 3);
        assert_eq!(reverse_score(4), 2);
        assert_eq!(reverse_score(5), 1);
    }

    #[test]
    fn test_applied_score_forward_and_reverse() {
        assert_eq!(applied_score(1, true), 5.0);
        assert_eq!(applied_score(5, true), 1.0);
        assert_eq!(applied_score(3, true), 3.0);
        assert_eq!(applied_score(4, false), 4.0);
    }

    #[test]
    fn test_t_score_centers_population_mean() {
        assert_eq!(t_score(6.0, 6.0, 2.0, BOUNDS), 50.0);
    }

    #[test]
    fn test_t_score_one_std_dev_is_ten_points() {
        assert_eq!(t_score(8.0, 6.0, 2.0, BOUNDS), 60.0);
        assert_eq!(t_score(4.0, 6.0, 2.0, BOUNDS), 40.0);
    }

    #[test]
    fn test_t_score_zero_std_dev_pins_center() {
        assert_eq!(t_score(0.0, 6.0, 0.0, BOUNDS), 50.0);
        assert_eq!(t_score(999.0, 6.0, 0.0, BOUNDS), 50.0);
    }

    #[test]
    fn test_t_score_clamps_both_ends() {
        assert_eq!(t_score(100.0, 6.0, 2.0, BOUNDS), 80.0);
        assert_eq!(t_score(-100.0, 6.0, 2.0, BOUNDS), 20.0);
    }

    #[test]
    fn test_t_score_honors_wider_bounds() {
        assert_eq!(t_score(16.0, 6.0, 2.0, (0.0, 100.0)), 100.0);
        assert_eq!(t_score(16.0, 6.0, 2.0, BOUNDS), 80.0);
    }
}
