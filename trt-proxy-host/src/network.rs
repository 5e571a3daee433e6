//! Host-side network under construction.

use std::fmt;

use trt_proxy::{
    DataType, Dims, Error, NetworkTensor, Result, TensorDesc, TensorProxy, TensorProxyPtr,
};

use crate::tensor::HostTensor;

/// Index of a tensor within its [`HostNetwork`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TensorId(usize);

impl TensorId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns every tensor of a network being built on the host.
///
/// Handles to these tensors borrow the network, so the network always
/// outlives them. Structural changes (adding tensors, marking outputs) need
/// `&mut self` and therefore happen while no handle is alive; per-tensor
/// properties can be changed through handles at any time.
#[derive(Debug, Default)]
pub struct HostNetwork {
    tensors: Vec<HostTensor>,
}

impl HostNetwork {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a network input.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateTensor`] if a tensor with this name exists.
    pub fn add_input(&mut self, name: &str, dtype: DataType, dims: Dims) -> Result<TensorId> {
        self.push(name, TensorDesc::new(dtype, dims), true, false)
    }

    /// Add an `Int32` input whose values are consumed as a shape.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateTensor`] if a tensor with this name exists.
    pub fn add_shape_input(&mut self, name: &str, dims: Dims) -> Result<TensorId> {
        self.push(name, TensorDesc::new(DataType::Int32, dims), true, true)
    }

    /// Add an intermediate tensor, as produced by a layer.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateTensor`] if a tensor with this name exists.
    pub fn add_tensor(&mut self, name: &str, desc: TensorDesc) -> Result<TensorId> {
        self.push(name, desc, false, false)
    }

    /// Mark a tensor as a network output.
    ///
    /// # Errors
    /// Returns [`Error::TensorNotFound`] if `id` does not belong to this network.
    pub fn mark_output(&mut self, id: TensorId) -> Result<()> {
        let tensor = self
            .tensors
            .get_mut(id.0)
            .ok_or_else(|| Error::TensorNotFound(id.to_string()))?;
        tensor.mark_output();
        tracing::debug!(%id, name = %tensor.name(), "marked network output");
        Ok(())
    }

    #[must_use]
    pub fn tensor(&self, id: TensorId) -> Option<&HostTensor> {
        self.tensors.get(id.0)
    }

    /// Real tensor handle for `id`.
    #[must_use]
    pub fn proxy(&self, id: TensorId) -> Option<TensorProxyPtr<'_>> {
        self.tensor(id).map(|t| TensorProxyPtr::from(TensorProxy::real(t)))
    }

    /// Find a tensor by its current name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<TensorId> {
        self.tensors
            .iter()
            .position(|t| t.name() == name)
            .map(TensorId)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &HostTensor> {
        self.tensors.iter().filter(|t| t.is_network_input())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &HostTensor> {
        self.tensors.iter().filter(|t| t.is_network_output())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }

    fn push(
        &mut self,
        name: &str,
        desc: TensorDesc,
        input: bool,
        shape: bool,
    ) -> Result<TensorId> {
        if self.find(name).is_some() {
            return Err(Error::DuplicateTensor(name.to_string()));
        }
        let id = TensorId(self.tensors.len());
        tracing::debug!(%id, name, %desc, input, shape, "adding tensor");
        self.tensors.push(HostTensor::new(name, desc, input, shape));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(extents: &[i32]) -> Dims {
        Dims::new(extents).unwrap()
    }

    #[test]
    fn test_add_and_lookup() {
        let mut network = HostNetwork::new();
        assert!(network.is_empty());
        let x = network.add_input("x", DataType::Float, dims(&[1, 4])).unwrap();
        let y = network
            .add_tensor("y", TensorDesc::new(DataType::Float, dims(&[1, 2])))
            .unwrap();
        assert_eq!(network.len(), 2);
        assert_eq!(network.find("x"), Some(x));
        assert_eq!(network.find("y"), Some(y));
        assert_eq!(network.find("z"), None);
        assert_eq!(network.tensor(y).unwrap().dimensions(), dims(&[1, 2]));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut network = HostNetwork::new();
        network.add_input("x", DataType::Float, dims(&[1])).unwrap();
        let err = network
            .add_input("x", DataType::Half, dims(&[2]))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateTensor(ref n) if n == "x"));
    }

    #[test]
    fn test_mark_output() {
        let mut network = HostNetwork::new();
        let x = network.add_input("x", DataType::Float, dims(&[3])).unwrap();
        let y = network
            .add_tensor("y", TensorDesc::new(DataType::Float, dims(&[3])))
            .unwrap();
        network.mark_output(y).unwrap();
        assert_eq!(network.inputs().count(), 1);
        let outputs: Vec<_> = network.outputs().map(NetworkTensor::name).collect();
        assert_eq!(outputs, vec!["y".to_string()]);
        assert!(!network.tensor(x).unwrap().is_network_output());
    }

    #[test]
    fn test_mark_unknown_output() {
        let mut network = HostNetwork::new();
        let err = network.mark_output(TensorId(7)).unwrap_err();
        assert!(matches!(err, Error::TensorNotFound(ref id) if id == "#7"));
    }

    #[test]
    fn test_shape_input() {
        let mut network = HostNetwork::new();
        let s = network.add_shape_input("shape", dims(&[4])).unwrap();
        let t = network.tensor(s).unwrap();
        assert_eq!(t.data_type(), DataType::Int32);
        assert!(t.is_shape_tensor());
        assert!(t.is_network_input());
    }

    #[test]
    fn test_proxy_is_real() {
        let mut network = HostNetwork::new();
        let x = network.add_input("x", DataType::Float, dims(&[2])).unwrap();
        let proxy = network.proxy(x).unwrap();
        assert!(proxy.is_real_tensor());
        proxy.set_name("renamed");
        assert_eq!(network.find("renamed"), Some(x));
        assert!(network.proxy(TensorId(3)).is_none());
    }
}
