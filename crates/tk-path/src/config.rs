use tk_core::{CoreError, CoreResult};

/// Tuning knobs for [`plan`](crate::plan).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Grid spacing of the compass successors.
    pub step_size:        i32,
    /// Search nodes arriving later than this are not expanded.
    pub max_ticks:        f64,
    pub max_iterations:   usize,
    /// Clearance below which a step is penalised.
    pub proximity_margin: f64,
    /// Priority added per unit of clearance short of the margin.
    ///
    /// Priority is the remaining distance in map units, so a step that
    /// touches an obstacle costs `proximity_margin · proximity_weight` units
    /// of progress.  At the defaults that is 10, half a default step.  Raise
    /// it for a wider berth.
    pub proximity_weight: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            step_size:        20,
            max_ticks:        200.0,
            max_iterations:   1000,
            proximity_margin: 10.0,
            proximity_weight: 1.0,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.step_size <= 0 {
            return Err(CoreError::Config(format!("step_size must be positive, got {}", self.step_size)));
        }
        if !(self.max_ticks > 0.0) {
            return Err(CoreError::Config(format!("max_ticks must be positive, got {}", self.max_ticks)));
        }
        if self.max_iterations == 0 {
            return Err(CoreError::Config("max_iterations must be positive".into()));
        }
        if self.proximity_margin < 0.0 || self.proximity_weight < 0.0 {
            return Err(CoreError::Config("proximity margin and weight must be non-negative".into()));
        }
        Ok(())
    }
}
