//! Golden-section search for the minimum of a unimodal function.

/// `1 / φ`, the fraction of the bracket kept after each iteration.
pub const INVERTED_PHI: f64 = 0.618_033_988_749_894_9;

/// Minimise `f` over `[a, b]` with a fixed number of iterations and return
/// the midpoint of the final bracket.
///
/// Each iteration evaluates `f` once; the surviving probe is reused.  With
/// `iterations == 0` the result is simply `(a + b) / 2`.
pub fn golden_section<F>(mut f: F, mut a: f64, mut b: f64, iterations: usize) -> f64
where
    F: FnMut(f64) -> f64,
{
    let mut low: Option<(f64, f64)> = None;
    let mut high: Option<(f64, f64)> = None;

    for _ in 0..iterations {
        let (x1, y1) = match low {
            Some(probe) => probe,
            None => {
                let x = b - (b - a) * INVERTED_PHI;
                (x, f(x))
            }
        };
        let (x2, y2) = match high {
            Some(probe) => probe,
            None => {
                let x = a + (b - a) * INVERTED_PHI;
                (x, f(x))
            }
        };
        if y1 < y2 {
            b = x2;
            high = Some((x1, y1));
            low = None;
        } else {
            a = x1;
            low = Some((x2, y2));
            high = None;
        }
    }

    (a + b) * 0.5
}

/// Iterations needed to shrink a bracket to `precision` of its width.
///
/// Returns `0` for `precision >= 1` and saturates for non-positive input.
pub fn golden_section_iterations(precision: f64) -> usize {
    if precision >= 1.0 {
        return 0;
    }
    if precision <= 0.0 || precision.is_nan() {
        return 64;
    }
    (precision.ln() / INVERTED_PHI.ln()).ceil() as usize
}
