//! Fake network tensor for unit tests.

use std::cell::{Cell, RefCell};

use crate::dims::Dims;
use crate::dtype::DataType;
use crate::error::Result;
use crate::format::{TensorFormats, TensorLocation};
use crate::tensor::NetworkTensor;

/// Test double with the same fields as
/// [`ValidationTensor`](crate::validation::ValidationTensor).
///
/// Always uniquely owned by the handle that wraps it.
#[derive(Debug, Clone, Default)]
pub struct FakeTensor {
    name: RefCell<String>,
    dims: Cell<Dims>,
    dtype: Cell<DataType>,
    location: Cell<TensorLocation>,
    dynamic_range: Cell<f32>,
}

impl FakeTensor {
    /// Rank-0 float tensor with no name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dims(dims: Dims) -> Self {
        Self {
            dims: Cell::new(dims),
            ..Self::default()
        }
    }

    /// Build from a plain shape such as `&[1, 3, 224, 224]`.
    ///
    /// # Errors
    /// Returns an error if `shape` is not valid [`Dims`].
    pub fn from_shape(shape: &[i32]) -> Result<Self> {
        Ok(Self::with_dims(Dims::new(shape)?))
    }

    #[must_use]
    pub fn dynamic_range(&self) -> f32 {
        self.dynamic_range.get()
    }
}

impl NetworkTensor for FakeTensor {
    fn name(&self) -> String {
        self.name.borrow().clone()
    }

    fn set_name(&self, name: &str) {
        *self.name.borrow_mut() = name.to_string();
    }

    fn dimensions(&self) -> Dims {
        self.dims.get()
    }

    fn set_dimensions(&self, dims: Dims) {
        self.dims.set(dims);
    }

    fn data_type(&self) -> DataType {
        self.dtype.get()
    }

    fn set_data_type(&self, dtype: DataType) {
        self.dtype.set(dtype);
    }

    fn is_network_input(&self) -> bool {
        false
    }

    fn is_network_output(&self) -> bool {
        false
    }

    fn broadcast_across_batch(&self) -> bool {
        false
    }

    fn set_broadcast_across_batch(&self, broadcast: bool) {
        if broadcast {
            tracing::warn!(
                name = %self.name.borrow(),
                "broadcast-across-batch is not tracked on fake tensors"
            );
        }
    }

    fn location(&self) -> TensorLocation {
        self.location.get()
    }

    fn set_location(&self, location: TensorLocation) {
        self.location.set(location);
    }

    fn set_dynamic_range(&self, min: f32, max: f32) -> bool {
        self.dynamic_range.set(min.abs().max(max.abs()));
        true
    }

    fn dynamic_range_is_set(&self) -> bool {
        true
    }

    fn reset_dynamic_range(&self) {}

    fn dynamic_range_min(&self) -> f32 {
        0.0
    }

    fn dynamic_range_max(&self) -> f32 {
        0.0
    }

    fn allowed_formats(&self) -> TensorFormats {
        TensorFormats::LINEAR
    }

    fn set_allowed_formats(&self, formats: TensorFormats) {
        if formats != TensorFormats::LINEAR {
            tracing::warn!(
                name = %self.name.borrow(),
                bits = formats.bits(),
                "allowed formats are not tracked on fake tensors"
            );
        }
    }

    fn is_shape_tensor(&self) -> bool {
        false
    }

    fn is_execution_tensor(&self) -> bool {
        true
    }
}
