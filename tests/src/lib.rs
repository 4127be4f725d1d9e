//! # AMS Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── asset_lifecycle.rs  # create / update / delete / list through the service
//!     ├── transfer_flows.rs   # two-phase transfer, events, invocation envelope
//!     └── concurrency.rs      # conflicting transactions and atomicity
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ams-tests
//! cargo test -p ams-tests integration::concurrency
//! ```

#![allow(dead_code)]

pub mod integration;
