pub mod cash_entry;
pub mod denomination;
pub mod session;

pub use cash_entry::*;
pub use denomination::*;
pub use session::*;
