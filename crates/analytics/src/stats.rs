//! Missing-aware descriptive statistics shared by the risk and correlation code.

/// Mean of the non-missing values; NaN when there are none.
pub fn nan_mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Sample standard deviation (n - 1 denominator) of the non-missing values.
///
/// NaN with fewer than two valid observations.
pub fn sample_std<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let valid: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if valid.len() < 2 {
        return f64::NAN;
    }

    let n = valid.len() as f64;
    let mean = valid.iter().sum::<f64>() / n;
    let sum_sq: f64 = valid.iter().map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / (n - 1.0)).sqrt()
}
