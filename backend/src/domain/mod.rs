//! # Domain Module
//!
//! Business logic of the cash tracker, independent of storage backend and
//! transport.
//!
//! ## Services
//!
//! - **EntryService**: the cashier's daily form. Loads a day's counts (zero
//!   defaults when nothing was stored) and saves a submitted form as a full
//!   replacement of that day.
//! - **ReportService**: the manager's cash breakdown. Sums denomination counts
//!   across cashiers per date and converts them to currency values.
//! - **AuthService**: login against the configured credential list, session
//!   lookup by token, logout.
//!
//! Every service call that acts on behalf of a user takes the caller's
//! [`models::Session`] explicitly; roles are checked inside the services.

pub mod auth_service;
pub mod commands;
pub mod entry_service;
pub mod formatting;
pub mod models;
pub mod report_service;

pub use auth_service::*;
pub use entry_service::*;
pub use report_service::*;
