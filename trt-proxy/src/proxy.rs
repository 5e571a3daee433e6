//! One handle over the three kinds of tensor a converter may be handed.
//!
//! - **Real**: a tensor owned by the network under construction. Borrowed
//!   for `'a`, so no handle can outlive the network that owns it.
//! - **Validation**: a shape-and-type-only stand-in used while checking
//!   whether a node is convertible. Reference counted, so several handles
//!   may alias the same validation state.
//! - **Fake**: a test double, uniquely owned by its handle.
//!
//! Every [`NetworkTensor`] call on a [`TensorProxy`] is forwarded verbatim to
//! the active variant.

use std::fmt;
use std::rc::Rc;

use crate::descriptor::TensorDesc;
use crate::dims::Dims;
use crate::dtype::DataType;
use crate::error::Result;
use crate::fake::FakeTensor;
use crate::format::{TensorFormats, TensorLocation};
use crate::tensor::NetworkTensor;
use crate::validation::ValidationTensor;

/// Which representation a [`TensorProxy`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TensorKind {
    Real,
    Validation,
    Fake,
}

impl fmt::Display for TensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real => write!(f, "real"),
            Self::Validation => write!(f, "validation"),
            Self::Fake => write!(f, "fake"),
        }
    }
}

/// A real, validation or fake tensor behind one capability surface.
pub enum TensorProxy<'a> {
    /// Tensor owned by the network; not owned here.
    Real(&'a dyn NetworkTensor),
    /// Shared shape-and-type-only tensor.
    Validation(Rc<ValidationTensor>),
    /// Uniquely owned test tensor.
    Fake(Box<FakeTensor>),
}

/// Forward `$call` to whichever tensor is active, bound as `$t`.
macro_rules! dispatch {
    ($self:ident, $t:ident => $call:expr) => {
        match $self {
            TensorProxy::Real($t) => $call,
            TensorProxy::Validation($t) => $call,
            TensorProxy::Fake($t) => $call,
        }
    };
}

impl<'a> TensorProxy<'a> {
    /// Wrap a tensor owned by the network under construction.
    #[must_use]
    pub fn real(tensor: &'a dyn NetworkTensor) -> Self {
        Self::Real(tensor)
    }

    /// Wrap a validation tensor, sharing it with any other holder.
    #[must_use]
    pub fn validation(tensor: Rc<ValidationTensor>) -> Self {
        Self::Validation(tensor)
    }

    /// Create a new validation tensor from an element type and extents.
    #[must_use]
    pub fn new_validation(dtype: DataType, dims: Dims) -> Self {
        tracing::trace!(%dtype, %dims, "creating validation tensor");
        Self::Validation(Rc::new(ValidationTensor::new(dtype, dims)))
    }

    /// Take ownership of a fake tensor.
    #[must_use]
    pub fn fake(tensor: FakeTensor) -> Self {
        Self::Fake(Box::new(tensor))
    }

    #[must_use]
    pub fn fake_with_dims(dims: Dims) -> Self {
        Self::fake(FakeTensor::with_dims(dims))
    }

    /// Fake tensor with the given plain shape.
    ///
    /// # Errors
    /// Returns an error if `shape` is not valid [`Dims`].
    pub fn fake_from_shape(shape: &[i32]) -> Result<Self> {
        Ok(Self::fake(FakeTensor::from_shape(shape)?))
    }

    #[must_use]
    pub fn kind(&self) -> TensorKind {
        match self {
            Self::Real(_) => TensorKind::Real,
            Self::Validation(_) => TensorKind::Validation,
            Self::Fake(_) => TensorKind::Fake,
        }
    }

    #[must_use]
    pub fn is_real_tensor(&self) -> bool {
        matches!(self, Self::Real(_))
    }

    #[must_use]
    pub fn is_validation_tensor(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub fn is_fake_tensor(&self) -> bool {
        matches!(self, Self::Fake(_))
    }

    /// The network tensor, if this is a real handle.
    #[must_use]
    pub fn real_tensor(&self) -> Option<&'a dyn NetworkTensor> {
        match self {
            Self::Real(t) => Some(*t),
            _ => None,
        }
    }

    /// The shared validation tensor, if this is a validation handle.
    ///
    /// Clone the `Rc` to build another handle aliasing the same state.
    #[must_use]
    pub fn validation_tensor(&self) -> Option<&Rc<ValidationTensor>> {
        match self {
            Self::Validation(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn fake_tensor(&self) -> Option<&FakeTensor> {
        match self {
            Self::Fake(t) => Some(t),
            _ => None,
        }
    }

    /// Current element type and extents.
    #[must_use]
    pub fn desc(&self) -> TensorDesc {
        TensorDesc::new(self.data_type(), self.dimensions())
    }

    /// Returns true if both handles refer to the very same tensor.
    ///
    /// Real handles match on the network tensor they borrow, validation
    /// handles on the shared allocation, fake handles on the boxed tensor.
    #[must_use]
    pub fn is_same_tensor(&self, other: &TensorProxy<'_>) -> bool {
        self.kind() == other.kind() && self.identity() == other.identity()
    }

    /// Address of the underlying tensor.
    pub(crate) fn identity(&self) -> *const () {
        match self {
            Self::Real(t) => std::ptr::from_ref(*t).cast(),
            Self::Validation(t) => Rc::as_ptr(t).cast(),
            Self::Fake(t) => std::ptr::from_ref::<FakeTensor>(t).cast(),
        }
    }
}

impl Default for TensorProxy<'_> {
    fn default() -> Self {
        Self::fake(FakeTensor::new())
    }
}

impl<'a> From<&'a dyn NetworkTensor> for TensorProxy<'a> {
    fn from(tensor: &'a dyn NetworkTensor) -> Self {
        Self::Real(tensor)
    }
}

impl From<Rc<ValidationTensor>> for TensorProxy<'_> {
    fn from(tensor: Rc<ValidationTensor>) -> Self {
        Self::Validation(tensor)
    }
}

impl From<ValidationTensor> for TensorProxy<'_> {
    fn from(tensor: ValidationTensor) -> Self {
        Self::Validation(Rc::new(tensor))
    }
}

impl From<FakeTensor> for TensorProxy<'_> {
    fn from(tensor: FakeTensor) -> Self {
        Self::fake(tensor)
    }
}

impl fmt::Debug for TensorProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorProxy")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("dtype", &self.data_type())
            .field("dims", &self.dimensions())
            .finish()
    }
}

impl NetworkTensor for TensorProxy<'_> {
    fn name(&self) -> String {
        dispatch!(self, t => t.name())
    }

    fn set_name(&self, name: &str) {
        dispatch!(self, t => t.set_name(name));
    }

    fn dimensions(&self) -> Dims {
        dispatch!(self, t => t.dimensions())
    }

    fn set_dimensions(&self, dims: Dims) {
        dispatch!(self, t => t.set_dimensions(dims));
    }

    fn data_type(&self) -> DataType {
        dispatch!(self, t => t.data_type())
    }

    fn set_data_type(&self, dtype: DataType) {
        dispatch!(self, t => t.set_data_type(dtype));
    }

    fn is_network_input(&self) -> bool {
        dispatch!(self, t => t.is_network_input())
    }

    fn is_network_output(&self) -> bool {
        dispatch!(self, t => t.is_network_output())
    }

    fn broadcast_across_batch(&self) -> bool {
        dispatch!(self, t => t.broadcast_across_batch())
    }

    fn set_broadcast_across_batch(&self, broadcast: bool) {
        dispatch!(self, t => t.set_broadcast_across_batch(broadcast));
    }

    fn location(&self) -> TensorLocation {
        dispatch!(self, t => t.location())
    }

    fn set_location(&self, location: TensorLocation) {
        dispatch!(self, t => t.set_location(location));
    }

    fn set_dynamic_range(&self, min: f32, max: f32) -> bool {
        dispatch!(self, t => t.set_dynamic_range(min, max))
    }

    fn dynamic_range_is_set(&self) -> bool {
        dispatch!(self, t => t.dynamic_range_is_set())
    }

    fn reset_dynamic_range(&self) {
        dispatch!(self, t => t.reset_dynamic_range());
    }

    fn dynamic_range_min(&self) -> f32 {
        dispatch!(self, t => t.dynamic_range_min())
    }

    fn dynamic_range_max(&self) -> f32 {
        dispatch!(self, t => t.dynamic_range_max())
    }

    fn allowed_formats(&self) -> TensorFormats {
        dispatch!(self, t => t.allowed_formats())
    }

    fn set_allowed_formats(&self, formats: TensorFormats) {
        dispatch!(self, t => t.set_allowed_formats(formats));
    }

    fn is_shape_tensor(&self) -> bool {
        dispatch!(self, t => t.is_shape_tensor())
    }

    fn is_execution_tensor(&self) -> bool {
        dispatch!(self, t => t.is_execution_tensor())
    }
}
