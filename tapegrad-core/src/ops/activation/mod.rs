pub mod log_softmax;
pub mod relu;
pub mod sigmoid;
