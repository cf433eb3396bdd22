pub mod add;
pub mod mul;
pub mod sub;
