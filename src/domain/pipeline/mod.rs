//! The normalization pipeline every raw row passes through before
//! persistence: field-name aliasing, value coercion, rule validation.

pub mod coercer;
pub mod normalizer;
pub mod validator;
