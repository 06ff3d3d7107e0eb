//! Prelude module for date_panel crate.
//!
//! Re-exports commonly used derive macros from derive_more and chrono's
//! field accessor traits.

#[allow(unused_imports)]
pub use chrono::{Datelike, Timelike};
#[allow(unused_imports)]
pub use derive_more::{Deref, Display, From, FromStr, Into, TryInto};
