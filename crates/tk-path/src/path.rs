use tk_core::Point;

/// Result of one planning call.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalPath {
    /// Starts at the agent's position.  Ends at the target, at the edge of
    /// whatever occupies the target, or at the best node found.
    pub points:     Vec<Point>,
    /// `false` when the search stopped on its iteration or tick budget.
    pub reached:    bool,
    pub iterations: usize,
}

impl LocalPath {
    /// The one-point path of an agent already at its target.
    pub fn stay(at: Point) -> Self {
        Self { points: vec![at], reached: true, iterations: 0 }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}
