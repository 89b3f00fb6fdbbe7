//! Conversions between domain types and the `shared` DTOs.

pub mod auth_mapper;
pub mod entry_mapper;
pub mod report_mapper;
