//! Versioned object storage.
//!
//! The host serialises transactions on shared objects by version: a
//! transaction is built against a checked-out snapshot, and at most one
//! commit lands per version. Losers observe the bumped version and must
//! re-checkout. The settlement core itself never locks or retries; this
//! module provides the reference in-memory store the integration tests run
//! against.

mod memory;
pub use memory::*;
