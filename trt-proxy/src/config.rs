//! Validation input configuration
//!
//! Describes the network inputs a node validator should seed before running
//! converters, parsed from JSON:
//!
//! ```json
//! {
//!   "inputs": [
//!     { "name": "input", "dtype": "half", "dims": [-1, 3, 224, 224] },
//!     { "name": "scale", "dims": [1], "location": "host", "dynamic_range": [-4.0, 4.0] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::descriptor::TensorDesc;
use crate::dims::Dims;
use crate::dtype::DataType;
use crate::format::TensorLocation;
use crate::proxy_ptr::TensorProxyPtr;
use crate::tensor::NetworkTensor;
use crate::validation::ValidationTensor;
use crate::Result;

/// One network input
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Tensor name
    pub name: String,

    /// Element type (defaults to `float`)
    #[serde(default)]
    pub dtype: DataType,

    /// Extents; `-1` marks a dynamic dimension
    pub dims: Dims,

    /// Memory location (defaults to `device`)
    #[serde(default)]
    pub location: TensorLocation,

    /// Calibrated `[min, max]`, applied through `set_dynamic_range`
    #[serde(default)]
    pub dynamic_range: Option<(f32, f32)>,
}

impl InputConfig {
    #[must_use]
    pub fn desc(&self) -> TensorDesc {
        TensorDesc::new(self.dtype, self.dims)
    }

    /// Build a named validation tensor for this input.
    #[must_use]
    pub fn to_validation_tensor(&self) -> ValidationTensor {
        let tensor = ValidationTensor::from_desc(self.desc());
        tensor.set_name(&self.name);
        tensor.set_location(self.location);
        if let Some((min, max)) = self.dynamic_range {
            tensor.set_dynamic_range(min, max);
        }
        tensor
    }
}

/// Set of inputs to seed a validation run with
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub inputs: Vec<InputConfig>,
}

impl ValidationConfig {
    /// Parse from a JSON string.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or an input has invalid dims.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        tracing::debug!(inputs = config.inputs.len(), "parsed validation config");
        Ok(config)
    }

    /// Load from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading validation config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Look up an input by name.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&InputConfig> {
        self.inputs.iter().find(|i| i.name == name)
    }

    /// One validation tensor handle per input, in declaration order.
    #[must_use]
    pub fn build_inputs(&self) -> Vec<TensorProxyPtr<'static>> {
        self.inputs
            .iter()
            .map(|input| {
                tracing::trace!(name = %input.name, desc = %input.desc(), "seeding input");
                TensorProxyPtr::from(input.to_validation_tensor())
            })
            .collect()
    }
}
