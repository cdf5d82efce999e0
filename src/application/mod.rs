//! Application layer tying the payout engine to its storage.
//!
//! This module defines the `PayoutService` which acts as the primary entry point
//! for calculating, saving and listing payouts. Storage is injected as boxed
//! trait objects so the same service runs on memory, a JSON file or RocksDB.

pub mod service;
