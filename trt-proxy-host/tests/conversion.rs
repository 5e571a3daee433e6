//! A converter written once against `TensorProxyPtr`, run against a host
//! network, a validation config and fake tensors.

use std::collections::HashMap;

use proptest::prelude::*;

use trt_proxy::{
    DataType, Dims, NetworkTensor, TensorFormat, TensorFormats, TensorProxyPtr, ValidationConfig,
};
use trt_proxy_host::HostNetwork;

/// Output extents of a flatten of `input` starting at `axis`, after
/// tagging the input for int8 execution the way a quantizing converter would.
fn convert_flatten(input: &TensorProxyPtr<'_>, axis: usize) -> Option<Dims> {
    if !input.set_dynamic_range(-8.0, 8.0) {
        return None;
    }
    input.set_allowed_formats(TensorFormats::LINEAR.with(TensorFormat::Chw32));

    let dims = input.dimensions();
    let extents = dims.as_slice();
    if axis > extents.len() || dims.is_dynamic() {
        return None;
    }
    let mut out: Vec<i32> = extents[..axis].to_vec();
    out.push(extents[axis..].iter().product());
    Dims::new(&out).ok()
}

#[test]
fn test_same_converter_runs_on_every_kind() {
    let mut network = HostNetwork::new();
    let id = network
        .add_input("input", DataType::Float, Dims::new(&[2, 3, 4, 4]).unwrap())
        .unwrap();
    let real = network.proxy(id).unwrap();

    let config = ValidationConfig::from_json(
        r#"{"inputs": [{"name": "input", "dims": [2, 3, 4, 4]}]}"#,
    )
    .unwrap();
    let validation = config.build_inputs().remove(0);

    let fake = TensorProxyPtr::fake_from_shape(&[2, 3, 4, 4]).unwrap();

    let expected = Dims::new(&[2, 48]).unwrap();
    for input in [&real, &validation, &fake] {
        assert_eq!(convert_flatten(input, 1), Some(expected));
    }

    // Only the real tensor keeps what the converter set.
    let host = network.tensor(id).unwrap();
    assert_eq!(host.dynamic_range_min(), -8.0);
    assert!(host.allowed_formats().contains(TensorFormat::Chw32));
    assert_eq!(validation.dynamic_range_max(), 0.0);
    assert_eq!(fake.allowed_formats(), TensorFormats::LINEAR);
}

#[test]
fn test_dynamic_input_is_rejected() {
    let mut network = HostNetwork::new();
    let id = network
        .add_input("input", DataType::Half, Dims::new(&[-1, 16]).unwrap())
        .unwrap();
    let real = network.proxy(id).unwrap();
    assert_eq!(convert_flatten(&real, 1), None);
}

#[test]
fn test_real_handles_over_one_tensor_share_a_map_slot() {
    let mut network = HostNetwork::new();
    let x = network
        .add_input("x", DataType::Float, Dims::new(&[1]).unwrap())
        .unwrap();
    let y = network
        .add_input("y", DataType::Float, Dims::new(&[1]).unwrap())
        .unwrap();

    let x1 = network.proxy(x).unwrap();
    let x2 = network.proxy(x).unwrap();
    let y1 = network.proxy(y).unwrap();
    assert!(!x1.ptr_eq(&x2));
    assert_eq!(x1, x2);
    assert_ne!(x1, y1);

    let mut producers: HashMap<TensorProxyPtr<'_>, &str> = HashMap::new();
    producers.insert(x1, "input:x");
    producers.insert(y1, "input:y");
    assert_eq!(producers.get(&x2), Some(&"input:x"));
    assert_eq!(producers.len(), 2);
}

#[test]
fn test_real_handle_sees_network_state() {
    let mut network = HostNetwork::new();
    let out = network
        .add_tensor(
            "out",
            trt_proxy::TensorDesc::new(DataType::Float, Dims::new(&[4]).unwrap()),
        )
        .unwrap();
    network.mark_output(out).unwrap();

    let proxy = network.proxy(out).unwrap();
    assert!(proxy.is_network_output());
    assert!(!proxy.is_network_input());
    assert!(!proxy.dynamic_range_is_set());
    let real: *const dyn NetworkTensor = proxy.real_tensor().unwrap();
    let host: *const trt_proxy_host::HostTensor = network.tensor(out).unwrap();
    assert!(std::ptr::addr_eq(real, host));
}

proptest! {
    #[test]
    fn prop_real_dynamic_range_round_trips(a in -100.0f32..100.0, b in -100.0f32..100.0) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let mut network = HostNetwork::new();
        let id = network.add_input("t", DataType::Int8, Dims::empty()).unwrap();
        let proxy = network.proxy(id).unwrap();
        prop_assert!(proxy.set_dynamic_range(min, max));
        prop_assert_eq!(proxy.dynamic_range_min(), min);
        prop_assert_eq!(proxy.dynamic_range_max(), max);
    }
}
