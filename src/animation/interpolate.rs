//! Piecewise-linear interpolation between input and output ranges

/// Behaviour outside the input range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Continue the slope of the nearest segment
    #[default]
    Extend,
    /// Hold the nearest edge value
    Clamp,
}

/// Map `value` from `input` to `output`.
///
/// `input` must be ascending and both ranges must have the same length of at
/// least two points.
pub fn interpolate(value: f64, input: &[f64], output: &[f64], extrapolation: Extrapolation) -> f64 {
    debug_assert!(input.len() >= 2, "interpolation needs at least two points");
    debug_assert_eq!(input.len(), output.len(), "range lengths differ");
    debug_assert!(input.windows(2).all(|w| w[0] <= w[1]), "input must be ascending");

    let last = input.len() - 1;
    if value <= input[0] {
        return match extrapolation {
            Extrapolation::Clamp => output[0],
            Extrapolation::Extend => segment(value, input[0], input[1], output[0], output[1]),
        };
    }
    if value >= input[last] {
        return match extrapolation {
            Extrapolation::Clamp => output[last],
            Extrapolation::Extend => segment(
                value,
                input[last - 1],
                input[last],
                output[last - 1],
                output[last],
            ),
        };
    }

    let upper = input.iter().position(|&edge| value < edge).unwrap_or(last);
    let lower = upper - 1;
    segment(value, input[lower], input[upper], output[lower], output[upper])
}

fn segment(value: f64, in_start: f64, in_end: f64, out_start: f64, out_end: f64) -> f64 {
    let span = in_end - in_start;
    if span == 0.0 {
        return out_start;
    }
    out_start + (value - in_start) / span * (out_end - out_start)
}
