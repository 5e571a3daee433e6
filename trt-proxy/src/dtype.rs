//! Element types for network tensors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Element type of a tensor in the network under construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 32-bit floating point
    #[default]
    Float,
    /// 16-bit floating point (IEEE 754)
    Half,
    /// 8-bit signed integer (quantized)
    Int8,
    /// 32-bit signed integer
    Int32,
    /// Boolean
    Bool,
}

impl DataType {
    /// Size of one element in bytes
    #[must_use]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::Float | Self::Int32 => 4,
            Self::Half => 2,
            Self::Int8 | Self::Bool => 1,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float => write!(f, "float"),
            Self::Half => write!(f, "half"),
            Self::Int8 => write!(f, "int8"),
            Self::Int32 => write!(f, "int32"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" => Ok(Self::Float),
            "half" => Ok(Self::Half),
            "int8" => Ok(Self::Int8),
            "int32" => Ok(Self::Int32),
            "bool" => Ok(Self::Bool),
            other => Err(Error::UnknownDataType(other.to_string())),
        }
    }
}

/// Trait for Rust types that map onto a network element type
pub trait TensorDType: Copy + Send + Sync + 'static {
    /// The corresponding `DataType` value
    const DTYPE: DataType;
}

impl TensorDType for f32 {
    const DTYPE: DataType = DataType::Float;
}

impl TensorDType for half::f16 {
    const DTYPE: DataType = DataType::Half;
}

impl TensorDType for i8 {
    const DTYPE: DataType = DataType::Int8;
}

impl TensorDType for i32 {
    const DTYPE: DataType = DataType::Int32;
}

impl TensorDType for bool {
    const DTYPE: DataType = DataType::Bool;
}
