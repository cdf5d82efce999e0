//! Domain layer: calculator inputs, the payout formula engine, saved
//! history entries and the storage ports the application depends on.

pub mod history;
pub mod inputs;
pub mod payout;
pub mod ports;
