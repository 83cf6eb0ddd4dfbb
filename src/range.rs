use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Inclusive range of 1-based line numbers to replace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    /// First line removed (1-indexed, inclusive)
    pub start_line: usize,
    /// Last line removed (1-indexed, inclusive)
    pub end_line: usize,
}

/// How out-of-range line numbers are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Clamp the slice bounds to the document; never fail on range
    #[default]
    Permissive,
    /// Reject anything outside `1 <= start <= end <= line_count`
    Strict,
}

/// Error types for line ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Line numbers start at 1
    ZeroLine {
        start_line: usize,
        end_line: usize,
    },
    /// Start comes after end
    StartAfterEnd {
        start_line: usize,
        end_line: usize,
    },
    /// Start lies beyond the last line
    StartPastEnd {
        start_line: usize,
        line_count: usize,
    },
    /// End lies beyond the last line
    EndPastEnd {
        end_line: usize,
        line_count: usize,
    },
}

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeError::ZeroLine { start_line, end_line } => {
                write!(f, "Line numbers are 1-based, got {}-{}", start_line, end_line)
            }
            RangeError::StartAfterEnd { start_line, end_line } => {
                write!(f, "Invalid range: start ({}) > end ({})", start_line, end_line)
            }
            RangeError::StartPastEnd { start_line, line_count } => {
                write!(f, "Start line {} out of bounds (line count: {})", start_line, line_count)
            }
            RangeError::EndPastEnd { end_line, line_count } => {
                write!(f, "End line {} out of bounds (line count: {})", end_line, line_count)
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// 0-based slice bounds into a line sequence
///
/// `prefix_end` is exclusive for the kept prefix, `suffix_start` is where the
/// kept suffix begins. With a permissive policy `suffix_start` may be smaller
/// than `prefix_end`, in which case the overlapping lines are emitted twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceBounds {
    pub prefix_end: usize,
    pub suffix_start: usize,
}

impl SliceBounds {
    /// Number of original lines that do not survive the splice
    pub fn removed_count(&self) -> usize {
        self.suffix_start.saturating_sub(self.prefix_end)
    }
}

impl LineRange {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self { start_line, end_line }
    }

    /// Check the range against a document of `line_count` lines
    ///
    /// # Returns
    /// * `Ok(())` if `1 <= start_line <= end_line <= line_count`
    /// * `Err(RangeError)` describing the first violated bound
    pub fn validate(&self, line_count: usize) -> Result<(), RangeError> {
        self.check_nonzero()?;

        if self.start_line > self.end_line {
            return Err(RangeError::StartAfterEnd {
                start_line: self.start_line,
                end_line: self.end_line,
            });
        }

        if self.start_line > line_count {
            return Err(RangeError::StartPastEnd {
                start_line: self.start_line,
                line_count,
            });
        }

        if self.end_line > line_count {
            return Err(RangeError::EndPastEnd {
                end_line: self.end_line,
                line_count,
            });
        }

        Ok(())
    }

    /// Convert to slice bounds for a document of `line_count` lines
    ///
    /// The prefix is `lines[..start_line - 1]` and the suffix is
    /// `lines[end_line..]`, both clamped to `line_count` when the policy is
    /// permissive. A zero line number is rejected under either policy.
    ///
    /// # Example
    /// ```
    /// use line_splice::{LineRange, RangePolicy};
    /// let bounds = LineRange::new(3, 5).slice_bounds(10, RangePolicy::Permissive).unwrap();
    /// assert_eq!(bounds.prefix_end, 2);
    /// assert_eq!(bounds.suffix_start, 5);
    /// assert_eq!(bounds.removed_count(), 3);
    /// ```
    pub fn slice_bounds(
        &self,
        line_count: usize,
        policy: RangePolicy,
    ) -> Result<SliceBounds, RangeError> {
        match policy {
            RangePolicy::Strict => self.validate(line_count)?,
            RangePolicy::Permissive => self.check_nonzero()?,
        }

        Ok(SliceBounds {
            prefix_end: (self.start_line - 1).min(line_count),
            suffix_start: self.end_line.min(line_count),
        })
    }

    fn check_nonzero(&self) -> Result<(), RangeError> {
        if self.start_line == 0 || self.end_line == 0 {
            return Err(RangeError::ZeroLine {
                start_line: self.start_line,
                end_line: self.end_line,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start_line, self.end_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_bounds_in_range() {
        let bounds = LineRange::new(3, 5)
            .slice_bounds(10, RangePolicy::Permissive)
            .unwrap();

        assert_eq!(bounds, SliceBounds { prefix_end: 2, suffix_start: 5 });
        assert_eq!(bounds.removed_count(), 3);
    }

    #[test]
    fn test_slice_bounds_start_of_file() {
        let bounds = LineRange::new(1, 4)
            .slice_bounds(10, RangePolicy::Permissive)
            .unwrap();

        assert_eq!(bounds.prefix_end, 0);
        assert_eq!(bounds.suffix_start, 4);
    }

    #[test]
    fn test_slice_bounds_end_past_file_is_clamped() {
        let bounds = LineRange::new(8, 50)
            .slice_bounds(10, RangePolicy::Permissive)
            .unwrap();

        assert_eq!(bounds.prefix_end, 7);
        assert_eq!(bounds.suffix_start, 10);
        assert_eq!(bounds.removed_count(), 3);
    }

    #[test]
    fn test_slice_bounds_start_past_file_removes_nothing() {
        let bounds = LineRange::new(20, 25)
            .slice_bounds(10, RangePolicy::Permissive)
            .unwrap();

        assert_eq!(bounds.prefix_end, 10);
        assert_eq!(bounds.suffix_start, 10);
        assert_eq!(bounds.removed_count(), 0);
    }

    #[test]
    fn test_slice_bounds_reversed_range_overlaps() {
        // 7..=2 keeps lines 1-6 and then lines 3-10 again
        let bounds = LineRange::new(7, 2)
            .slice_bounds(10, RangePolicy::Permissive)
            .unwrap();

        assert_eq!(bounds.prefix_end, 6);
        assert_eq!(bounds.suffix_start, 2);
        assert_eq!(bounds.removed_count(), 0);
    }

    #[test]
    fn test_zero_line_rejected_under_both_policies() {
        for policy in [RangePolicy::Permissive, RangePolicy::Strict] {
            let result = LineRange::new(0, 3).slice_bounds(10, policy);
            assert!(matches!(result, Err(RangeError::ZeroLine { .. })));
        }
    }

    #[test]
    fn test_strict_rejects_out_of_range() {
        assert_eq!(
            LineRange::new(5, 3).slice_bounds(10, RangePolicy::Strict),
            Err(RangeError::StartAfterEnd { start_line: 5, end_line: 3 })
        );
        assert_eq!(
            LineRange::new(11, 12).slice_bounds(10, RangePolicy::Strict),
            Err(RangeError::StartPastEnd { start_line: 11, line_count: 10 })
        );
        assert_eq!(
            LineRange::new(9, 11).slice_bounds(10, RangePolicy::Strict),
            Err(RangeError::EndPastEnd { end_line: 11, line_count: 10 })
        );
    }

    #[test]
    fn test_strict_accepts_whole_file() {
        let bounds = LineRange::new(1, 10)
            .slice_bounds(10, RangePolicy::Strict)
            .unwrap();

        assert_eq!(bounds.prefix_end, 0);
        assert_eq!(bounds.suffix_start, 10);
    }

    #[test]
    fn test_policy_deserializes_lowercase() {
        let policy: RangePolicy = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(policy, RangePolicy::Strict);
    }

    #[test]
    fn test_policy_parses_from_command_line_value() {
        assert_eq!(RangePolicy::from_str("permissive", true), Ok(RangePolicy::Permissive));
        assert_eq!(RangePolicy::from_str("strict", true), Ok(RangePolicy::Strict));
        assert!(RangePolicy::from_str("lenient", true).is_err());
    }
}
