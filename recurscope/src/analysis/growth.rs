//! Theoretical growth curves drawn next to sampled call counts.

use std::fmt;

use super::complexity::ComplexitySample;

/// Big-O family used for the reference curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthModel {
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    Quadratic,
    Exponential,
}

impl GrowthModel {
    /// Read a label such as `O(2^n)`, `O(n log n)` or `linear`.
    ///
    /// Unrecognized labels fall back to [`GrowthModel::Constant`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let pattern: String =
            label.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect();
        if pattern.contains("2^n") || pattern.contains("exponential") {
            GrowthModel::Exponential
        } else if pattern.contains("n^2") || pattern.contains("quadratic") {
            GrowthModel::Quadratic
        } else if pattern.contains("nlogn") {
            GrowthModel::Linearithmic
        } else if pattern.contains("logn") || pattern.contains("logarithmic") {
            GrowthModel::Logarithmic
        } else if pattern.contains("constant") || pattern.contains("o(1)") {
            GrowthModel::Constant
        } else if pattern.contains("linear") || pattern.contains('n') {
            GrowthModel::Linear
        } else {
            GrowthModel::Constant
        }
    }

    /// Unscaled model value at input size `n`
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn eval(self, n: i64) -> f64 {
        let x = n as f64;
        match self {
            GrowthModel::Constant => 1.0,
            GrowthModel::Logarithmic => x.log2(),
            GrowthModel::Linear => x,
            GrowthModel::Linearithmic => x * x.log2(),
            GrowthModel::Quadratic => x * x,
            GrowthModel::Exponential => 2f64.powi(n.clamp(0, 1023) as i32),
        }
    }
}

impl fmt::Display for GrowthModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GrowthModel::Constant => "O(1)",
            GrowthModel::Logarithmic => "O(log n)",
            GrowthModel::Linear => "O(n)",
            GrowthModel::Linearithmic => "O(n log n)",
            GrowthModel::Quadratic => "O(n^2)",
            GrowthModel::Exponential => "O(2^n)",
        };
        f.write_str(label)
    }
}

/// Model values at each sampled size, scaled so the curve peaks at the
/// largest observed call count
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn reference_curve(samples: &[ComplexitySample], model: GrowthModel) -> Vec<f64> {
    let theoretical: Vec<f64> = samples.iter().map(|s| model.eval(s.size)).collect();
    let max_theoretical = theoretical.iter().copied().fold(0.0, f64::max);
    let max_actual = samples.iter().map(|s| s.operation_count).max().unwrap_or(0) as f64;
    let scale = if max_theoretical > 0.0 { max_actual / max_theoretical } else { 1.0 };
    theoretical.into_iter().map(|t| t * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(GrowthModel::from_label("O(2^n)"), GrowthModel::Exponential);
        assert_eq!(GrowthModel::from_label("O(n^2)"), GrowthModel::Quadratic);
        assert_eq!(GrowthModel::from_label("O(n log n)"), GrowthModel::Linearithmic);
        assert_eq!(GrowthModel::from_label("O(log n)"), GrowthModel::Logarithmic);
        assert_eq!(GrowthModel::from_label("O(n)"), GrowthModel::Linear);
        assert_eq!(GrowthModel::from_label("O(1)"), GrowthModel::Constant);
        assert_eq!(GrowthModel::from_label("constant"), GrowthModel::Constant);
        assert_eq!(GrowthModel::from_label("Constant time"), GrowthModel::Constant);
        assert_eq!(GrowthModel::from_label("linear"), GrowthModel::Linear);
    }

    #[test]
    fn test_reference_curve_peaks_at_max_actual() {
        let samples: Vec<_> = (1..=4)
            .map(|n| ComplexitySample { size: n, operation_count: usize::try_from(n * 2).unwrap() })
            .collect();
        let curve = reference_curve(&samples, GrowthModel::Linear);
        assert_eq!(curve, vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_reference_curve_of_nothing() {
        assert!(reference_curve(&[], GrowthModel::Exponential).is_empty());
    }
}
