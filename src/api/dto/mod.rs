//! Data Transfer Objects for REST request/response serialization.

pub mod visit_dto;

pub use visit_dto::*;
