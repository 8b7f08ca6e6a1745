pub(crate) fn degree_to_radian(degree: f64) -> f64 {
    degree * std::f64::consts::PI / 180.
}

/// `n` evenly spaced samples from `start` to `end`, both ends included.
///
/// Unlike numpy's `linspace`, which returns `[start]` for a single sample,
/// a single sample sits at the midpoint, so a one-zone grid looks straight
/// down the optical axis.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![(start + end) / 2.],
        _ => {
            let step = (end - start) / ((n - 1) as f64);
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + (i as f64) * step })
                .collect()
        }
    }
}

/// Normalizes `value` by `max` into [0, 1]. A non-positive `max` saturates.
pub(crate) fn normalize_clamped(value: f64, max: f64) -> f64 {
    if max <= 0. || max.is_nan() {
        return 1.;
    }
    (value / max).clamp(0., 1.)
}
