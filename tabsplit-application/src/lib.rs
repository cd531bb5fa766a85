#![warn(clippy::uninlined_format_args)]

pub mod bill_store;

pub use bill_store::BillStore;
