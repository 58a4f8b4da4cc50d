pub mod input_validation;
pub mod separators;
