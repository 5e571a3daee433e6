//! Nullable, cheaply cloneable handle to a [`TensorProxy`].
//!
//! Converters pass tensors around as `TensorProxyPtr` so that "no tensor"
//! can be represented and so tensors can key maps. Cloning aliases the same
//! proxy.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

use crate::dims::Dims;
use crate::dtype::DataType;
use crate::error::Result;
use crate::fake::FakeTensor;
use crate::proxy::TensorProxy;
use crate::tensor::NetworkTensor;
use crate::validation::ValidationTensor;

/// Shared, possibly null, reference to a [`TensorProxy`].
///
/// Two pointers are equal when both are null, or when both point at the
/// same underlying tensor (see [`TensorProxy::is_same_tensor`]). Hashing
/// uses that same identity, so pointers can be used as `HashMap` keys.
///
/// Dereferencing a null pointer panics.
#[derive(Clone)]
pub struct TensorProxyPtr<'a>(Option<Rc<TensorProxy<'a>>>);

impl<'a> TensorProxyPtr<'a> {
    #[must_use]
    pub const fn null() -> Self {
        Self(None)
    }

    /// Take ownership of `proxy`.
    #[must_use]
    pub fn new(proxy: TensorProxy<'a>) -> Self {
        Self(Some(Rc::new(proxy)))
    }

    /// Validation tensor with the given element type and extents.
    #[must_use]
    pub fn new_validation(dtype: DataType, dims: Dims) -> Self {
        Self::new(TensorProxy::new_validation(dtype, dims))
    }

    /// Empty fake tensor.
    #[must_use]
    pub fn fake() -> Self {
        Self::new(TensorProxy::default())
    }

    #[must_use]
    pub fn fake_with_dims(dims: Dims) -> Self {
        Self::new(TensorProxy::fake_with_dims(dims))
    }

    /// Fake tensor with a plain shape.
    ///
    /// # Errors
    /// Returns an error if `shape` is not valid [`Dims`].
    pub fn fake_from_shape(shape: &[i32]) -> Result<Self> {
        Ok(Self::new(TensorProxy::fake_from_shape(shape)?))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub fn get(&self) -> Option<&TensorProxy<'a>> {
        self.0.as_deref()
    }

    /// Mutable access, only while no other pointer aliases the proxy.
    pub fn get_mut(&mut self) -> Option<&mut TensorProxy<'a>> {
        self.0.as_mut().and_then(Rc::get_mut)
    }

    /// Returns true if both pointers alias the same proxy allocation.
    ///
    /// Stricter than `==`: two proxies built separately over the same
    /// network tensor compare equal but are not `ptr_eq`.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> Option<Rc<TensorProxy<'a>>> {
        self.0
    }
}

impl<'a> Deref for TensorProxyPtr<'a> {
    type Target = TensorProxy<'a>;

    fn deref(&self) -> &Self::Target {
        match &self.0 {
            Some(proxy) => proxy,
            None => panic!("dereferenced a null TensorProxyPtr"),
        }
    }
}

impl<'a> From<Rc<TensorProxy<'a>>> for TensorProxyPtr<'a> {
    fn from(proxy: Rc<TensorProxy<'a>>) -> Self {
        Self(Some(proxy))
    }
}

impl<'a> From<TensorProxy<'a>> for TensorProxyPtr<'a> {
    fn from(proxy: TensorProxy<'a>) -> Self {
        Self::new(proxy)
    }
}

impl<'a> From<&'a dyn NetworkTensor> for TensorProxyPtr<'a> {
    fn from(tensor: &'a dyn NetworkTensor) -> Self {
        Self::new(TensorProxy::real(tensor))
    }
}

impl From<Rc<ValidationTensor>> for TensorProxyPtr<'_> {
    fn from(tensor: Rc<ValidationTensor>) -> Self {
        Self::new(TensorProxy::validation(tensor))
    }
}

impl From<ValidationTensor> for TensorProxyPtr<'_> {
    fn from(tensor: ValidationTensor) -> Self {
        Self::new(TensorProxy::from(tensor))
    }
}

impl From<FakeTensor> for TensorProxyPtr<'_> {
    fn from(tensor: FakeTensor) -> Self {
        Self::new(TensorProxy::fake(tensor))
    }
}

impl PartialEq for TensorProxyPtr<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => a.is_same_tensor(b),
            _ => false,
        }
    }
}

impl Eq for TensorProxyPtr<'_> {}

impl Hash for TensorProxyPtr<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0
            .as_ref()
            .map(|proxy| (proxy.kind(), proxy.identity()))
            .hash(state);
    }
}

impl fmt::Debug for TensorProxyPtr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(proxy) => f.debug_tuple("TensorProxyPtr").field(proxy).finish(),
            None => write!(f, "TensorProxyPtr(null)"),
        }
    }
}
