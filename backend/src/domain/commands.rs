//! Domain-level command types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

pub mod entries {
    use chrono::NaiveDate;

    /// Input for saving a cashier's daily form.
    ///
    /// Denominations and counts are raw values; the entry service validates them.
    #[derive(Debug, Clone)]
    pub struct SaveDailyEntryCommand {
        pub date: NaiveDate,
        pub counts: Vec<(i64, i64)>,
        pub parking: i64,
        pub saving: i64,
        pub debt_credit: i64,
    }
}
