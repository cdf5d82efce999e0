//! Adapters between the outside world and the application: CSV export,
//! text rendering and lenient input parsing.

pub mod csv;
pub mod display;
pub mod input;
