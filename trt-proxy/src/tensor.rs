//! Network tensor trait definition

use crate::dims::Dims;
use crate::dtype::DataType;
use crate::format::{TensorFormats, TensorLocation};

/// Capability surface of a tensor inside a network under construction.
///
/// A network tensor is owned by its network and shared by every handle that
/// refers to it, so all methods take `&self`; setters mutate in place and
/// implementors rely on interior mutability. Implementations are not
/// synchronized and must not be shared across threads.
pub trait NetworkTensor {
    /// Tensor name
    fn name(&self) -> String;

    fn set_name(&self, name: &str);

    /// Tensor extents
    fn dimensions(&self) -> Dims;

    fn set_dimensions(&self, dims: Dims);

    /// Element type
    fn data_type(&self) -> DataType;

    fn set_data_type(&self, dtype: DataType);

    /// Returns true if the tensor is an input of the network.
    fn is_network_input(&self) -> bool;

    /// Returns true if the tensor is marked as a network output.
    fn is_network_output(&self) -> bool;

    /// Whether the tensor is broadcast across the implicit batch dimension.
    fn broadcast_across_batch(&self) -> bool;

    fn set_broadcast_across_batch(&self, broadcast: bool);

    /// Memory location at execution time
    fn location(&self) -> TensorLocation;

    fn set_location(&self, location: TensorLocation);

    /// Set the quantization range observed for this tensor.
    ///
    /// Returns false if the range was rejected.
    fn set_dynamic_range(&self, min: f32, max: f32) -> bool;

    fn dynamic_range_is_set(&self) -> bool;

    fn reset_dynamic_range(&self);

    fn dynamic_range_min(&self) -> f32;

    fn dynamic_range_max(&self) -> f32;

    /// Storage formats the builder may pick for this tensor
    fn allowed_formats(&self) -> TensorFormats;

    fn set_allowed_formats(&self, formats: TensorFormats);

    /// Returns true if the tensor carries shape values consumed at build time.
    fn is_shape_tensor(&self) -> bool;

    /// Returns true if the tensor is consumed during execution.
    fn is_execution_tensor(&self) -> bool;
}
