//! trt-proxy: one handle over network, validation and fake tensors
//!
//! Op converters for an accelerator network builder are written once against
//! [`TensorProxy`] and run in three settings: building the real network
//! (tensors owned by the network), checking whether a node is convertible
//! (shape-and-type-only [`ValidationTensor`]s), and unit tests
//! ([`FakeTensor`]s). Concrete networks live in separate crates and
//! implement [`NetworkTensor`].

pub mod config;
pub mod descriptor;
pub mod dims;
pub mod dtype;
pub mod error;
pub mod fake;
pub mod format;
pub mod proxy;
pub mod proxy_ptr;
pub mod tensor;
pub mod validation;

pub use config::{InputConfig, ValidationConfig};
pub use descriptor::TensorDesc;
pub use dims::{Dims, DYNAMIC_DIM, MAX_DIMS};
pub use dtype::{DataType, TensorDType};
pub use error::{Error, Result};
pub use fake::FakeTensor;
pub use format::{TensorFormat, TensorFormats, TensorLocation};
pub use proxy::{TensorKind, TensorProxy};
pub use proxy_ptr::TensorProxyPtr;
pub use tensor::NetworkTensor;
pub use validation::ValidationTensor;
