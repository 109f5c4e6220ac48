//! Ordered reference buckets.
//!
//! A reference file lists `/// <reference path="..." />` directives. Two
//! signature comments split it into three regions:
//!
//! ```text
//! /// <reference path="first.ts" />      <- before
//! //grunt-start
//! /// <reference path="any.ts" />        <- unordered (or generated)
//! //grunt-end
//! /// <reference path="last.ts" />       <- after
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Comment that opens the unordered region.
pub const SIGNATURE_START: &str = "//grunt-start";

/// Comment that closes the unordered region.
pub const SIGNATURE_END: &str = "//grunt-end";

/// Which region of the reference file the scanner is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Before,
    Unordered,
    After,
}

impl ScanState {
    /// Compute the state after reading `line`.
    ///
    /// `Before -> Unordered` on the start signature, `Unordered -> After` on
    /// the end signature. A line carrying only the end signature also closes
    /// the region when it was never opened. `After` is terminal.
    pub fn advance(self, line: &str) -> ScanState {
        if self == ScanState::After {
            return self;
        }
        let mut next = self;
        if line.contains(SIGNATURE_START) {
            next = ScanState::Unordered;
        }
        if line.contains(SIGNATURE_END) {
            next = ScanState::After;
        }
        next
    }
}

/// One of the four ordering categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Before,
    Generated,
    Unordered,
    After,
}

impl Bucket {
    /// All buckets in load order.
    pub const ALL: [Bucket; 4] = [
        Bucket::Before,
        Bucket::Generated,
        Bucket::Unordered,
        Bucket::After,
    ];
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Before => write!(f, "before"),
            Bucket::Generated => write!(f, "generated"),
            Bucket::Unordered => write!(f, "unordered"),
            Bucket::After => write!(f, "after"),
        }
    }
}

/// References classified into buckets, in manifest order within each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceOrder {
    pub before: Vec<PathBuf>,
    pub generated: Vec<PathBuf>,
    pub unordered: Vec<PathBuf>,
    pub after: Vec<PathBuf>,
}

impl ReferenceOrder {
    /// Get the paths of one bucket.
    pub fn bucket(&self, bucket: Bucket) -> &[PathBuf] {
        match bucket {
            Bucket::Before => &self.before,
            Bucket::Generated => &self.generated,
            Bucket::Unordered => &self.unordered,
            Bucket::After => &self.after,
        }
    }

    /// Get a mutable handle to one bucket.
    pub fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<PathBuf> {
        match bucket {
            Bucket::Before => &mut self.before,
            Bucket::Generated => &mut self.generated,
            Bucket::Unordered => &mut self.unordered,
            Bucket::After => &mut self.after,
        }
    }

    /// Every reference: `before ++ generated ++ unordered ++ after`.
    pub fn all(&self) -> Vec<PathBuf> {
        Bucket::ALL
            .iter()
            .flat_map(|b| self.bucket(*b).iter().cloned())
            .collect()
    }

    /// Total number of references.
    pub fn len(&self) -> usize {
        Bucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }

    /// Check whether no references were found.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply `f` to every path, bucket by bucket.
    pub fn map_paths(self, mut f: impl FnMut(PathBuf) -> PathBuf) -> ReferenceOrder {
        ReferenceOrder {
            before: self.before.into_iter().map(&mut f).collect(),
            generated: self.generated.into_iter().map(&mut f).collect(),
            unordered: self.unordered.into_iter().map(&mut f).collect(),
            after: self.after.into_iter().map(&mut f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_state_transitions() {
        let state = ScanState::default();
        assert_eq!(state, ScanState::Before);

        let state = state.advance("/// <reference path=\"a.ts\" />");
        assert_eq!(state, ScanState::Before);

        let state = state.advance("//grunt-start");
        assert_eq!(state, ScanState::Unordered);

        let state = state.advance("//grunt-end");
        assert_eq!(state, ScanState::After);
    }

    #[test]
    fn test_scan_state_after_is_terminal() {
        let state = ScanState::After.advance("//grunt-start");
        assert_eq!(state, ScanState::After);
    }

    #[test]
    fn test_all_is_fixed_order_concatenation() {
        let order = ReferenceOrder {
            before: vec![PathBuf::from("b1")],
            generated: vec![PathBuf::from("g1")],
            unordered: vec![PathBuf::from("u1"), PathBuf::from("u2")],
            after: vec![PathBuf::from("a1")],
        };

        let names: Vec<_> = order.all().iter().map(|p| p.display().to_string()).collect();
        assert_eq!(names, vec!["b1", "g1", "u1", "u2", "a1"]);
        assert_eq!(order.len(), 5);
        assert!(!order.is_empty());
    }
}
