use tapegrad_core::Tensor;

// Installs env_logger once per test binary; later calls are no-ops.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn tensor(data: &[f64], shape: &[usize]) -> Tensor {
    Tensor::new(data.to_vec(), shape.to_vec()).expect("Test tensor creation failed")
}
