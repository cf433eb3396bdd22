pub mod linear;
pub mod matmul;
