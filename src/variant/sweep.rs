//! Arithmetic parameter sweeps for building scale and angle lists.

use crate::util::{SdcError, SdcResult};

const MAX_SAMPLES: usize = 1 << 16;

/// Half-open arithmetic progression `start, start + step, ...` below `stop`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sweep {
    start: f32,
    stop: f32,
    step: f32,
    len: usize,
}

impl Sweep {
    /// Creates a sweep over `[start, stop)` with a positive step.
    pub fn new(start: f32, stop: f32, step: f32) -> SdcResult<Self> {
        if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
            return Err(SdcError::InvalidParameter {
                reason: "non-finite sweep parameters",
            });
        }
        if step <= 0.0 {
            return Err(SdcError::InvalidParameter {
                reason: "sweep step must be > 0",
            });
        }
        if stop <= start {
            return Err(SdcError::InvalidParameter {
                reason: "sweep stop must be greater than start",
            });
        }

        let mut len = 0usize;
        while start + (len as f32) * step < stop {
            len += 1;
            if len > MAX_SAMPLES {
                return Err(SdcError::InvalidParameter {
                    reason: "sweep has too many samples",
                });
            }
        }

        Ok(Self {
            start,
            stop,
            step,
            len,
        })
    }

    /// Creates a sweep of angles over a full turn, `[0, 360)`.
    pub fn full_turn(step_deg: f32) -> SdcResult<Self> {
        Self::new(0.0, 360.0, step_deg)
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the sweep has no samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first sample (inclusive).
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Returns the upper bound (exclusive).
    pub fn stop(&self) -> f32 {
        self.stop
    }

    /// Returns the step between samples.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Returns the sample at `idx`.
    pub fn value_at(&self, idx: usize) -> f32 {
        debug_assert!(idx < self.len);
        self.start + (idx as f32) * self.step
    }

    /// Iterates over all samples in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.len).map(|idx| self.value_at(idx))
    }

    /// Collects the samples into a list.
    pub fn to_vec(&self) -> Vec<f32> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Sweep;

    #[test]
    fn sweep_is_half_open() {
        let sweep = Sweep::new(0.5, 1.5, 0.25).unwrap();
        assert_eq!(sweep.to_vec(), vec![0.5, 0.75, 1.0, 1.25]);
    }

    #[test]
    fn full_turn_counts_steps() {
        let sweep = Sweep::full_turn(90.0).unwrap();
        assert_eq!(sweep.to_vec(), vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(Sweep::new(0.0, 1.0, 0.0).is_err());
        assert!(Sweep::new(1.0, 1.0, 0.1).is_err());
        assert!(Sweep::new(0.0, f32::INFINITY, 0.1).is_err());
        assert!(Sweep::new(0.0, 1.0, 1e-9).is_err());
    }
}
