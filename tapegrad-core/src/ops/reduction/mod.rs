pub mod mean;
pub mod sum;
