//! AeroNav CLI library.
//!
//! Terminal styling and output formatting shared by the `aeronav` binary.

pub mod output;
pub mod terminal;
