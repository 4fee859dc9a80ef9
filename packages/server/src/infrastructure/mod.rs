//! Infrastructure layer: concrete implementations of the domain seams and
//! transport-facing data types.

pub mod dto;
pub mod registry;
