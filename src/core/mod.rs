//! Core billing types, amount computation, validation and naming.
//!
//! Everything here is pure: no filesystem access, no PDF types. A
//! [`BillingRecord`] goes in, a [`Computation`] (totals plus printable table
//! rows) comes out.

mod amounts;
mod builder;
mod error;
mod filename;
mod numbering;
mod types;
mod validation;
mod wrap;

pub use amounts::*;
pub use builder::*;
pub use error::*;
pub use filename::*;
pub use numbering::*;
pub use types::*;
pub use validation::*;
pub use wrap::*;
