//! Dash patterns and the painted stretches they select along a sub-path.

use crate::error::PathError;

use core::ops::Range;

/// A dash pattern: alternating lengths of painted and unpainted stretches, and the
/// distance into the pattern at which each sub-path starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DashPattern {
    dashes: Vec<f32>,
    offset: f32,
}

impl DashPattern {
    /// Lists with an odd number of entries are repeated once, so that `[5.0]` means five
    /// units painted then five units skipped.
    pub fn new(dashes: Vec<f32>, offset: f32) -> Result<Self, PathError> {
        let mut total = 0.0;
        for &dash in &dashes {
            if !dash.is_finite() || dash < 0.0 {
                return Err(PathError::InvalidDashLength(dash));
            }
            total += dash;
        }

        if total <= 0.0 || !total.is_finite() {
            return Err(PathError::ZeroLengthDashCycle);
        }

        let mut dashes = dashes;
        if dashes.len() % 2 == 1 {
            dashes.extend_from_within(..);
        }

        let offset = if offset.is_finite() { offset } else { 0.0 };

        Ok(DashPattern { dashes, offset })
    }

    pub fn dashes(&self) -> &[f32] {
        &self.dashes
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    fn cycle_length(&self) -> f32 {
        self.dashes.iter().sum()
    }

    /// Calls `output` with the painted stretches of the pattern along a sub-path of the
    /// given length, as distance ranges from its start.
    ///
    /// The pattern starts over at `offset` for each call. A painted entry of zero length
    /// produces an empty range, which strokes as a single point.
    pub(crate) fn for_each_dash(&self, length: f32, output: &mut dyn FnMut(Range<f32>)) {
        let mut position = -self.offset.rem_euclid(self.cycle_length());
        let mut cycle_start = position;
        let mut index = 0;

        while position <= length {
            let dash = self.dashes[index];
            let end = position + dash;

            if index % 2 == 0 {
                if dash == 0.0 {
                    if position >= 0.0 {
                        output(position..position);
                    }
                } else if end > 0.0 && position < length {
                    output(position.max(0.0)..end.min(length));
                }
            }

            position = end;
            index = (index + 1) % self.dashes.len();

            if index == 0 {
                // The cycle is too short to move forward at this distance.
                if position <= cycle_start {
                    log::debug!("Dash cycle too short for a sub-path of length {:?}.", length);
                    return;
                }
                cycle_start = position;
            }
        }
    }
}

#[cfg(test)]
fn collect_dashes(pattern: &DashPattern, length: f32) -> Vec<Range<f32>> {
    let mut dashes = Vec::new();
    pattern.for_each_dash(length, &mut |dash| dashes.push(dash));
    dashes
}

#[test]
fn invalid_patterns() {
    assert_eq!(
        DashPattern::new(vec![1.0, -1.0], 0.0),
        Err(PathError::InvalidDashLength(-1.0))
    );
    assert!(DashPattern::new(vec![1.0, f32::NAN], 0.0).is_err());
    assert_eq!(
        DashPattern::new(vec![0.0, 0.0], 0.0),
        Err(PathError::ZeroLengthDashCycle)
    );
    assert_eq!(
        DashPattern::new(vec![], 0.0),
        Err(PathError::ZeroLengthDashCycle)
    );
}

#[test]
fn odd_patterns_repeat() {
    let pattern = DashPattern::new(vec![5.0], 0.0).unwrap();
    assert_eq!(pattern.dashes(), &[5.0, 5.0]);
}

#[test]
fn dashes_along_a_line() {
    let pattern = DashPattern::new(vec![4.0, 2.0], 0.0).unwrap();
    assert_eq!(collect_dashes(&pattern, 10.0), vec![0.0..4.0, 6.0..10.0]);
}

#[test]
fn dash_offsets() {
    let pattern = DashPattern::new(vec![4.0, 2.0], 1.0).unwrap();
    assert_eq!(collect_dashes(&pattern, 6.0), vec![0.0..3.0, 5.0..6.0]);

    // Negative offsets wrap around the cycle.
    let pattern = DashPattern::new(vec![4.0, 2.0], -1.0).unwrap();
    assert_eq!(collect_dashes(&pattern, 10.0), vec![1.0..5.0, 7.0..10.0]);
}

#[test]
fn zero_length_dashes() {
    let pattern = DashPattern::new(vec![0.0, 4.0], 0.0).unwrap();
    assert_eq!(
        collect_dashes(&pattern, 10.0),
        vec![0.0..0.0, 4.0..4.0, 8.0..8.0]
    );

    // A dot lands exactly on the end of the sub-path.
    assert_eq!(collect_dashes(&pattern, 8.0), vec![0.0..0.0, 4.0..4.0, 8.0..8.0]);
}
