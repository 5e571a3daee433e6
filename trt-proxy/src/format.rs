//! Memory location and storage format tags

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a tensor's memory lives at execution time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorLocation {
    /// Device (GPU) memory
    #[default]
    Device,
    /// Host (CPU) memory
    Host,
}

impl fmt::Display for TensorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device => write!(f, "device"),
            Self::Host => write!(f, "host"),
        }
    }
}

/// Storage layout of a network tensor.
///
/// The discriminant is the bit index used in [`TensorFormats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TensorFormat {
    /// Row-major linear layout
    Linear = 0,
    /// Two-wide channel vectorized
    Chw2 = 1,
    /// Eight-channel interleaved
    Hwc8 = 2,
    /// Four-wide channel vectorized
    Chw4 = 3,
    /// Sixteen-wide channel vectorized
    Chw16 = 4,
    /// Thirty-two-wide channel vectorized
    Chw32 = 5,
    /// Eight-channel interleaved, 3D
    Dhwc8 = 6,
    /// Thirty-two-wide channel vectorized, 3D
    Cdhw32 = 7,
    /// Non-vectorized channel-last
    Hwc = 8,
    /// DLA linear layout
    DlaLinear = 9,
    /// DLA four-channel interleaved
    DlaHwc4 = 10,
    /// Sixteen-channel interleaved
    Hwc16 = 11,
}

/// Bitmask of allowed [`TensorFormat`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TensorFormats(u32);

impl TensorFormats {
    /// Only the linear format.
    pub const LINEAR: Self = Self(1);

    /// No format allowed.
    pub const NONE: Self = Self(0);

    /// Build a mask from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Mask containing a single format.
    #[must_use]
    pub const fn from_format(format: TensorFormat) -> Self {
        Self(1 << format as u32)
    }

    /// Returns this mask with `format` added.
    #[must_use]
    pub const fn with(self, format: TensorFormat) -> Self {
        Self(self.0 | (1 << format as u32))
    }

    /// Returns true if `format` is allowed by this mask.
    #[must_use]
    pub const fn contains(self, format: TensorFormat) -> bool {
        self.0 & (1 << format as u32) != 0
    }

    /// Raw bits
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl From<TensorFormat> for TensorFormats {
    fn from(format: TensorFormat) -> Self {
        Self::from_format(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_is_bit_zero() {
        assert_eq!(TensorFormats::LINEAR.bits(), 1);
        assert_eq!(TensorFormats::from_format(TensorFormat::Linear), TensorFormats::LINEAR);
    }

    #[test]
    fn test_with_and_contains() {
        let formats = TensorFormats::LINEAR.with(TensorFormat::Chw32);
        assert_eq!(formats.bits(), 0b10_0001);
        assert!(formats.contains(TensorFormat::Linear));
        assert!(formats.contains(TensorFormat::Chw32));
        assert!(!formats.contains(TensorFormat::Hwc8));
        assert!(!TensorFormats::NONE.contains(TensorFormat::Linear));
    }

    #[test]
    fn test_location_default_is_device() {
        assert_eq!(TensorLocation::default(), TensorLocation::Device);
        assert_eq!(TensorLocation::Host.to_string(), "host");
    }
}
