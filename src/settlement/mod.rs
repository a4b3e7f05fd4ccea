//! Settlement operations.
//!
//! The public transaction surface of the core: wallet lifecycle
//! ([`create_wallet`], [`rescue_wallet`]), source escrows
//! ([`create_escrow_src`], [`withdraw_src`], [`cancel_src`],
//! [`rescue_src`]) and destination escrows ([`create_escrow_dst`],
//! [`withdraw_dst`], [`cancel_dst`], [`rescue_dst`]).
//!
//! Every operation validates fully before mutating, updates status fields
//! before extracting balances, emits exactly one event on success and none
//! on failure. Funds leave as [`Payout`](crate::host::Payout)s for the host
//! to apply atomically with the commit.

mod auth;

mod wallet;
pub use wallet::*;

mod source;
pub use source::*;

mod destination;
pub use destination::*;

use crate::{
    host::Payout,
    types::{Balance, Native},
};
use alloy::primitives::Address;

/// The two payouts produced by every escrow exit path: the swap tokens to
/// the party the transition benefits, and the safety deposit to whoever
/// executed it.
#[derive(Debug)]
pub struct Disbursement<A> {
    /// The locked swap tokens.
    pub token: Payout<A>,
    /// The safety deposit, rewarded to the executing caller.
    pub safety_deposit: Payout<Native>,
}

impl<A> Disbursement<A> {
    fn new(token_to: Address, token: Balance<A>, caller: Address, deposit: Balance<Native>) -> Self {
        Self { token: Payout::new(token_to, token), safety_deposit: Payout::new(caller, deposit) }
    }
}
