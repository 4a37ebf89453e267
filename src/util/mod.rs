pub mod builder;
pub mod constants;
