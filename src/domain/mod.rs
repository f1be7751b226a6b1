pub mod entities;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod values;
