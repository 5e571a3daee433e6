//! Host-side network tensor.

use std::cell::{Cell, RefCell};

use trt_proxy::{DataType, Dims, NetworkTensor, TensorDesc, TensorFormats, TensorLocation};

/// A tensor owned by a [`HostNetwork`](crate::HostNetwork).
///
/// Unlike the validation and fake tensors, every setter here takes effect:
/// the quantization range keeps both bounds and can be cleared, and the
/// broadcast flag and allowed formats are stored.
#[derive(Debug)]
pub struct HostTensor {
    name: RefCell<String>,
    dims: Cell<Dims>,
    dtype: Cell<DataType>,
    input: bool,
    output: bool,
    shape: bool,
    broadcast: Cell<bool>,
    location: Cell<TensorLocation>,
    dynamic_range: Cell<Option<(f32, f32)>>,
    formats: Cell<TensorFormats>,
}

impl HostTensor {
    pub(crate) fn new(name: &str, desc: TensorDesc, input: bool, shape: bool) -> Self {
        Self {
            name: RefCell::new(name.to_string()),
            dims: Cell::new(desc.dims),
            dtype: Cell::new(desc.dtype),
            input,
            output: false,
            shape,
            broadcast: Cell::new(false),
            location: Cell::new(TensorLocation::Device),
            dynamic_range: Cell::new(None),
            formats: Cell::new(TensorFormats::LINEAR),
        }
    }

    pub(crate) fn mark_output(&mut self) {
        self.output = true;
    }

    #[must_use]
    pub fn desc(&self) -> TensorDesc {
        TensorDesc::new(self.dtype.get(), self.dims.get())
    }
}

impl NetworkTensor for HostTensor {
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
        self.input
    }

    fn is_network_output(&self) -> bool {
        self.output
    }

    fn broadcast_across_batch(&self) -> bool {
        self.broadcast.get()
    }

    fn set_broadcast_across_batch(&self, broadcast: bool) {
        self.broadcast.set(broadcast);
    }

    fn location(&self) -> TensorLocation {
        self.location.get()
    }

    fn set_location(&self, location: TensorLocation) {
        self.location.set(location);
    }

    fn set_dynamic_range(&self, min: f32, max: f32) -> bool {
        if min.is_nan() || max.is_nan() || min > max {
            tracing::warn!(name = %self.name.borrow(), min, max, "rejected dynamic range");
            return false;
        }
        self.dynamic_range.set(Some((min, max)));
        true
    }

    fn dynamic_range_is_set(&self) -> bool {
        self.dynamic_range.get().is_some()
    }

    fn reset_dynamic_range(&self) {
        self.dynamic_range.set(None);
    }

    fn dynamic_range_min(&self) -> f32 {
        self.dynamic_range.get().map_or(0.0, |(min, _)| min)
    }

    fn dynamic_range_max(&self) -> f32 {
        self.dynamic_range.get().map_or(0.0, |(_, max)| max)
    }

    fn allowed_formats(&self) -> TensorFormats {
        self.formats.get()
    }

    fn set_allowed_formats(&self, formats: TensorFormats) {
        self.formats.set(formats);
    }

    fn is_shape_tensor(&self) -> bool {
        self.shape
    }

    fn is_execution_tensor(&self) -> bool {
        !self.shape
    }
}
