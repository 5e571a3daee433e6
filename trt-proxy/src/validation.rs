//! Shape-and-type-only tensor used to check node convertibility.
//!
//! A validator runs op converters against these instead of real network
//! tensors: converters only need shape and type information and must never
//! touch the network builder during validation. Everything a converter might
//! set beyond that (formats, broadcast flag, quantization range) is accepted
//! and mostly discarded.

use std::cell::{Cell, RefCell};

use crate::descriptor::TensorDesc;
use crate::dims::Dims;
use crate::dtype::DataType;
use crate::format::{TensorFormats, TensorLocation};
use crate::tensor::NetworkTensor;

/// Stand-in for a network tensor carrying only a descriptor, a name, a
/// location and a symmetric dynamic range.
///
/// Shared between handles through `Rc` so aliased handles observe the same
/// state.
#[derive(Debug, Clone, Default)]
pub struct ValidationTensor {
    name: RefCell<String>,
    dtype: Cell<DataType>,
    dims: Cell<Dims>,
    location: Cell<TensorLocation>,
    dynamic_range: Cell<f32>,
}

impl ValidationTensor {
    #[must_use]
    pub fn new(dtype: DataType, dims: Dims) -> Self {
        Self {
            dtype: Cell::new(dtype),
            dims: Cell::new(dims),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_desc(desc: TensorDesc) -> Self {
        Self::new(desc.dtype, desc.dims)
    }

    /// Current descriptor
    #[must_use]
    pub fn desc(&self) -> TensorDesc {
        TensorDesc::new(self.dtype.get(), self.dims.get())
    }

    /// The symmetric range stored by the last `set_dynamic_range`, 0 if never set.
    #[must_use]
    pub fn dynamic_range(&self) -> f32 {
        self.dynamic_range.get()
    }
}

impl NetworkTensor for ValidationTensor {
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
                "broadcast-across-batch is not tracked on validation tensors"
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
                "allowed formats are not tracked on validation tensors"
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
