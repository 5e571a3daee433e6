//! Fixed-capacity tensor dimensions

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum rank a network tensor can have.
pub const MAX_DIMS: usize = 8;

/// Extent value marking a dimension only known at runtime.
pub const DYNAMIC_DIM: i32 = -1;

/// Ordered extents of a tensor, up to [`MAX_DIMS`] of them.
///
/// Stored inline so the type is `Copy`, like the descriptors the network
/// builder hands out. Extents past `rank()` are always zero and never take
/// part in comparisons.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct Dims {
    nb_dims: usize,
    d: [i32; MAX_DIMS],
}

impl Dims {
    /// Build dimensions from a list of extents.
    ///
    /// # Errors
    /// Returns [`Error::TooManyDims`] if more than [`MAX_DIMS`] extents are
    /// given, or [`Error::InvalidDim`] for an extent below [`DYNAMIC_DIM`].
    pub fn new(extents: &[i32]) -> Result<Self> {
        if extents.len() > MAX_DIMS {
            return Err(Error::TooManyDims {
                rank: extents.len(),
                max: MAX_DIMS,
            });
        }
        if let Some((axis, &value)) = extents
            .iter()
            .enumerate()
            .find(|(_, v)| **v < DYNAMIC_DIM)
        {
            return Err(Error::InvalidDim { axis, value });
        }
        let mut d = [0; MAX_DIMS];
        d[..extents.len()].copy_from_slice(extents);
        Ok(Self {
            nb_dims: extents.len(),
            d,
        })
    }

    /// Rank-0 dimensions (a scalar).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            nb_dims: 0,
            d: [0; MAX_DIMS],
        }
    }

    /// Number of dimensions
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.nb_dims
    }

    /// The active extents
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.d[..self.nb_dims]
    }

    /// Returns true if any extent is [`DYNAMIC_DIM`]
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.as_slice().contains(&DYNAMIC_DIM)
    }

    /// Total number of elements, or `None` when an extent is dynamic or the
    /// count does not fit in an `i64`.
    #[must_use]
    pub fn volume(&self) -> Option<i64> {
        if self.is_dynamic() {
            return None;
        }
        self.as_slice()
            .iter()
            .try_fold(1i64, |acc, &v| acc.checked_mul(i64::from(v)))
    }
}

impl Default for Dims {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Dims {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Dims {}

impl Hash for Dims {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl TryFrom<&[i32]> for Dims {
    type Error = Error;

    fn try_from(extents: &[i32]) -> Result<Self> {
        Self::new(extents)
    }
}

impl TryFrom<Vec<i32>> for Dims {
    type Error = Error;

    fn try_from(extents: Vec<i32>) -> Result<Self> {
        Self::new(&extents)
    }
}

impl From<Dims> for Vec<i32> {
    fn from(dims: Dims) -> Self {
        dims.as_slice().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_extents() {
        let dims = Dims::new(&[1, 3, 224, 224]).unwrap();
        assert_eq!(dims.rank(), 4);
        assert_eq!(dims.as_slice(), &[1, 3, 224, 224]);
        assert_eq!(dims.volume(), Some(150_528));
    }

    #[test]
    fn test_empty_is_scalar() {
        let dims = Dims::empty();
        assert_eq!(dims.rank(), 0);
        assert!(dims.as_slice().is_empty());
        assert_eq!(dims.volume(), Some(1));
        assert_eq!(dims, Dims::default());
    }

    #[test]
    fn test_max_rank_accepted() {
        let dims = Dims::new(&[1; MAX_DIMS]).unwrap();
        assert_eq!(dims.rank(), MAX_DIMS);
    }

    #[test]
    fn test_too_many_dims_rejected() {
        let err = Dims::new(&[1; MAX_DIMS + 1]).unwrap_err();
        assert!(matches!(err, Error::TooManyDims { rank: 9, max: 8 }));
    }

    #[test]
    fn test_dynamic_extent() {
        let dims = Dims::new(&[-1, 3, 32, 32]).unwrap();
        assert!(dims.is_dynamic());
        assert_eq!(dims.volume(), None);
    }

    #[test]
    fn test_volume_overflow_is_none() {
        let dims = Dims::new(&[i32::MAX, i32::MAX, i32::MAX]).unwrap();
        assert_eq!(dims.volume(), None);
        let dims = Dims::new(&[i32::MAX, i32::MAX]).unwrap();
        assert_eq!(dims.volume(), Some(i64::from(i32::MAX) * i64::from(i32::MAX)));
    }

    #[test]
    fn test_invalid_negative_extent() {
        let err = Dims::new(&[2, -4]).unwrap_err();
        assert!(matches!(err, Error::InvalidDim { axis: 1, value: -4 }));
    }

    #[test]
    fn test_display() {
        let dims = Dims::new(&[1, 3, 224, 224]).unwrap();
        assert_eq!(dims.to_string(), "[1,3,224,224]");
        assert_eq!(Dims::empty().to_string(), "[]");
    }

    #[test]
    fn test_serde_as_list() {
        let dims: Dims = serde_json::from_str("[2, 4]").unwrap();
        assert_eq!(dims.as_slice(), &[2, 4]);
        assert_eq!(serde_json::to_string(&dims).unwrap(), "[2,4]");
        assert!(serde_json::from_str::<Dims>("[1,1,1,1,1,1,1,1,1]").is_err());
    }
}
