//! Shape and element type of a tensor

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dims::Dims;
use crate::dtype::{DataType, TensorDType};

/// Element type plus extents; everything needed to reason about a tensor
/// without building it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TensorDesc {
    #[serde(default)]
    pub dtype: DataType,
    pub dims: Dims,
}

impl TensorDesc {
    #[must_use]
    pub const fn new(dtype: DataType, dims: Dims) -> Self {
        Self { dtype, dims }
    }

    /// Descriptor whose element type is that of `T`.
    #[must_use]
    pub const fn of<T: TensorDType>(dims: Dims) -> Self {
        Self::new(T::DTYPE, dims)
    }

    /// Size of the described tensor in bytes, `None` when dynamic or too
    /// large for an `i64`.
    #[must_use]
    pub fn size_in_bytes(&self) -> Option<i64> {
        let elem = i64::try_from(self.dtype.size_in_bytes()).ok()?;
        self.dims.volume()?.checked_mul(elem)
    }
}

impl fmt::Display for TensorDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.dtype, self.dims)
    }
}
