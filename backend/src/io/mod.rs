//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services: request
//! parsing, session lookup, DTO mapping and error-to-status translation.

pub mod rest;

pub use rest::*;
