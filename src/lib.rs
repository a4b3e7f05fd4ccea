//! # Escrow Settlement
//!
//! Settlement core for an atomic cross-chain swap protocol: a maker funds a
//! hashlocked [`Wallet`](types::Wallet), resolvers race a Dutch auction to
//! mint [`EscrowSrc`](types::EscrowSrc)/[`EscrowDst`](types::EscrowDst)
//! objects against it, and revealing a secret preimage unlocks both sides.
//! A staged timelock machine guarantees refund safety if any party defects.
//!
//! The crate is deterministic and synchronous. Host concerns enter through
//! the seams in [`host`]: a transaction context (sender, clock reading,
//! object id allocation), typed balances, and an event sink. Operations
//! never transfer funds themselves; they return payouts the host applies
//! atomically with the commit.

pub mod auction;
pub mod constants;
pub mod error;
pub mod fills;
pub mod host;
pub mod settlement;
pub mod storage;
pub mod types;
