//! Host backend for trt-proxy
//!
//! A network-construction context that lives entirely in host memory. It
//! owns its tensors and hands out real [`TensorProxy`](trt_proxy::TensorProxy)
//! handles that borrow them, which makes converter code exercisable end to
//! end without an accelerator runtime.

pub mod network;
pub mod tensor;

pub use network::{HostNetwork, TensorId};
pub use tensor::HostTensor;
