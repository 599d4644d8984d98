//! Positional labels for lattice cells.

use crate::error::CoordError;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Ordered integer label attached to a cell, one entry per dimension.
///
/// Uses `SmallVec<[i32; 4]>` so lattices up to four dimensions never
/// touch the heap for coordinates. A vector is mutable while its lattice
/// is being built and frozen once the lattice is finalized; writes to a
/// frozen vector fail with [`CoordError::Immutable`].
///
/// Ordering puts shorter vectors first and compares equal-length vectors
/// lexicographically. The frozen flag takes no part in equality,
/// ordering, or hashing.
///
/// # Examples
///
/// ```
/// use latticework_core::CoordVector;
///
/// let c: CoordVector = "(1, -2, 3)".parse().unwrap();
/// assert_eq!(c.as_slice(), &[1, -2, 3]);
/// assert_eq!(c.to_string(), "(1, -2, 3)");
///
/// let shorter = CoordVector::from_slice(&[9, 9]);
/// assert!(shorter < c);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CoordVector {
    values: SmallVec<[i32; 4]>,
    frozen: bool,
}

impl CoordVector {
    /// A zero-dimensional coordinate.
    pub fn new() -> Self {
        Self::default()
    }

    /// A coordinate holding `values`, one per axis.
    pub fn from_slice(values: &[i32]) -> Self {
        Self {
            values: SmallVec::from_slice(values),
            frozen: false,
        }
    }

    /// Number of axes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether this is a zero-dimensional coordinate.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw axis values.
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    /// Value on `axis`.
    pub fn get(&self, axis: usize) -> Result<i32, CoordError> {
        self.values
            .get(axis)
            .copied()
            .ok_or(CoordError::IndexOutOfRange {
                index: axis,
                len: self.values.len(),
            })
    }

    /// Overwrite the value on `axis`.
    pub fn set(&mut self, axis: usize, value: i32) -> Result<(), CoordError> {
        self.ensure_mutable()?;
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(axis)
            .ok_or(CoordError::IndexOutOfRange { index: axis, len })?;
        *slot = value;
        Ok(())
    }

    /// Resize to `n` axes, padding new axes with zero or truncating from
    /// the end. Overlapping axes keep their values.
    pub fn set_dimension_count(&mut self, n: usize) -> Result<(), CoordError> {
        self.ensure_mutable()?;
        self.values.resize(n, 0);
        Ok(())
    }

    /// A mutable copy with `axis` set to `value`.
    pub fn with_axis(&self, axis: usize, value: i32) -> Result<Self, CoordError> {
        let mut copy = Self {
            values: self.values.clone(),
            frozen: false,
        };
        copy.set(axis, value)?;
        Ok(copy)
    }

    /// Reject all further writes.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Allow writes again.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Whether writes are currently rejected.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn ensure_mutable(&self) -> Result<(), CoordError> {
        if self.frozen {
            Err(CoordError::Immutable)
        } else {
            Ok(())
        }
    }
}

impl PartialEq for CoordVector {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for CoordVector {}

impl Hash for CoordVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl Ord for CoordVector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.values
            .len()
            .cmp(&other.values.len())
            .then_with(|| self.values.as_slice().cmp(other.values.as_slice()))
    }
}

impl PartialOrd for CoordVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Vec<i32>> for CoordVector {
    fn from(values: Vec<i32>) -> Self {
        Self {
            values: SmallVec::from_vec(values),
            frozen: false,
        }
    }
}

impl FromIterator<i32> for CoordVector {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
            frozen: false,
        }
    }
}

impl fmt::Display for CoordVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

impl FromStr for CoordVector {
    type Err = CoordError;

    /// Parse the `(v0, v1, ..., vn)` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| CoordError::Format {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| malformed("expected parenthesised list"))?
            .trim();
        if inner.is_empty() {
            return Ok(Self::new());
        }
        inner
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<i32>()
                    .map_err(|_| malformed(&format!("'{part}' is not an integer")))
            })
            .collect()
    }
}
