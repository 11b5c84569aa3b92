//! # Commands Module
//!
//! Entry points view consumers and the CLI call.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! └── cart.rs     ◄─── Cart reads and mutations
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  caller (view / CLI)                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  validate input ── bad? ──► ApiError { VALIDATION_ERROR }              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  provider.cart()? ── not ready? ──► ApiError { UNINITIALIZED }         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CartStore mutation (notify + persist inside)                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CartResponse { items, totals }                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
