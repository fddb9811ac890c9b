/// Scales one channel so its peak absolute amplitude is 1.0.
///
/// Feeds detection only; reconstruction always works on original-scale
/// samples. An all-zero channel comes back unchanged rather than dividing
/// by zero and poisoning the energy analysis with NaN.
pub fn normalize_samples(samples: &[f32]) -> Vec<f32> {
    let peak = samples.iter().fold(0.0f32, |max, sample| max.max(sample.abs()));
    if peak == 0.0 {
        return samples.to_vec();
    }
    samples.iter().map(|sample| sample / peak).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_peak_to_one() {
        let normalized = normalize_samples(&[0.25, -0.5, 0.1]);
        assert_eq!(normalized, vec![0.5, -1.0, 0.2]);
    }

    #[test]
    fn negative_peak_counts() {
        let normalized = normalize_samples(&[-0.5, 0.25]);
        assert_eq!(normalized, vec![-1.0, 0.5]);
    }

    #[test]
    fn all_zero_stays_all_zero() {
        let normalized = normalize_samples(&[0.0, 0.0, 0.0]);
        assert_eq!(normalized, vec![0.0, 0.0, 0.0]);
        assert!(normalized.iter().all(|sample| sample.is_finite()));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize_samples(&[]).is_empty());
    }

    #[test]
    fn already_normalized_is_unchanged() {
        let samples = [1.0, -0.5, 0.0];
        assert_eq!(normalize_samples(&samples), samples.to_vec());
    }
}
