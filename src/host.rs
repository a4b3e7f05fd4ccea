//! Host environment seam.
//!
//! The core runs inside a host that executes each operation as an atomic
//! transaction against an object store. The host supplies a monotonic clock
//! reading, the transaction sender, fresh object ids, and an event sink; the
//! core supplies pure state transitions plus [`Payout`] descriptions of every
//! balance movement for the host to apply with the commit.

use crate::types::{Balance, SettlementEvent};
use alloy::primitives::{keccak256, Address, B256};
use std::cell::Cell;

/// Address of an object in the host's store.
pub type ObjectId = B256;

/// Per-transaction context handed to every operation.
///
/// Captured once at transaction start: there are no suspension points inside
/// a transaction, so a single clock reading is the transaction's notion of
/// "now".
#[derive(Debug)]
pub struct TxContext {
    sender: Address,
    now_ms: u64,
    tx_hash: B256,
    fresh: Cell<u64>,
}

impl TxContext {
    /// Builds a context for one transaction.
    ///
    /// `tx_hash` seeds object id derivation and must be unique per
    /// transaction; the host's transaction digest is the natural choice.
    pub fn new(sender: Address, now_ms: u64, tx_hash: B256) -> Self {
        Self { sender, now_ms, tx_hash, fresh: Cell::new(0) }
    }

    /// The transaction sender.
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Wall-clock milliseconds at transaction start.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Allocates a fresh object id, unique within and across transactions.
    pub fn fresh_object_id(&self) -> ObjectId {
        let n = self.fresh.get();
        self.fresh.set(n + 1);
        let mut buf = [0u8; 40];
        buf[..32].copy_from_slice(self.tx_hash.as_slice());
        buf[32..].copy_from_slice(&n.to_be_bytes());
        keccak256(buf)
    }
}

/// Sink for the structured records emitted at each state transition.
///
/// Emission happens inside the transaction, after all validation: observers
/// never see an event for an aborted transition, and never see a committed
/// transition without its event.
pub trait EventSink {
    /// Records one event.
    fn emit(&mut self, event: SettlementEvent);
}

/// [`EventSink`] that buffers events in memory. Used for testing.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<SettlementEvent>,
}

impl RecordingSink {
    /// All events recorded so far, in emission order.
    pub fn events(&self) -> &[SettlementEvent] {
        &self.events
    }

    /// Drains the recorded events.
    pub fn take(&mut self) -> Vec<SettlementEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: SettlementEvent) {
        self.events.push(event);
    }
}

/// A balance owed to an address, to be applied by the host atomically with
/// the transaction commit.
#[derive(Debug)]
pub struct Payout<A> {
    /// The beneficiary.
    pub to: Address,
    /// The funds.
    pub balance: Balance<A>,
}

impl<A> Payout<A> {
    /// Builds a payout.
    pub fn new(to: Address, balance: Balance<A>) -> Self {
        Self { to, balance }
    }

    /// The payout amount.
    pub fn amount(&self) -> u64 {
        self.balance.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::b256;

    #[test]
    fn fresh_ids_are_unique_within_a_transaction() {
        let ctx = TxContext::new(Address::ZERO, 0, b256!("0x1111111111111111111111111111111111111111111111111111111111111111"));
        let a = ctx.fresh_object_id();
        let b = ctx.fresh_object_id();
        assert_ne!(a, b);
    }

    #[test]
    fn fresh_ids_differ_across_transactions() {
        let a = TxContext::new(Address::ZERO, 0, b256!("0x1111111111111111111111111111111111111111111111111111111111111111"));
        let b = TxContext::new(Address::ZERO, 0, b256!("0x2222222222222222222222222222222222222222222222222222222222222222"));
        assert_ne!(a.fresh_object_id(), b.fresh_object_id());
    }
}
