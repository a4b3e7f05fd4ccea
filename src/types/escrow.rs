//! Escrow objects and the immutable fill snapshot they carry.

use crate::{
    host::ObjectId,
    types::{AssetSymbol, Balance, Native, Timelocks},
};
use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an escrow.
///
/// Assigned exactly once away from `Active`; from `Withdrawn` or `Cancelled`
/// the only remaining transition is destruction via rescue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum EscrowStatus {
    /// Funds are locked and the stage machine governs access.
    Active = 0,
    /// The secret was revealed and the swap leg completed.
    Withdrawn = 1,
    /// The leg was unwound and funds refunded.
    Cancelled = 2,
}

/// Snapshot captured into an escrow at mint time, never mutated thereafter.
///
/// For a partial fill, `hashlock` is the specific leaf hash consumed by this
/// fill, not the order's Merkle root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Immutables {
    /// Identifier of the logical order this fill belongs to.
    pub order_hash: B256,
    /// Commitment the withdrawal secret must hash to.
    pub hashlock: B256,
    /// Refund target on the source side, beneficiary on the destination.
    pub maker: Address,
    /// The resolver committed to this fill.
    pub taker: Address,
    /// Label of the locked asset.
    pub token: AssetSymbol,
    /// Locked token amount.
    pub amount: u64,
    /// Safety deposit posted with the escrow, in native base units.
    pub safety_deposit_amount: u64,
    /// Stage offsets inherited from the order.
    pub timelocks: Timelocks,
}

macro_rules! escrow_accessors {
    () => {
        /// Object id in the host's store.
        pub fn id(&self) -> ObjectId {
            self.id
        }

        /// The fill snapshot.
        pub fn immutables(&self) -> &Immutables {
            &self.immutables
        }

        /// Current lifecycle status.
        pub fn status(&self) -> EscrowStatus {
            self.status
        }

        /// Creation time in milliseconds.
        pub fn created_at(&self) -> u64 {
            self.created_at
        }

        /// Locked tokens still inside the escrow.
        pub fn balance_value(&self) -> u64 {
            self.balance.value()
        }

        /// Safety deposit still inside the escrow.
        pub fn safety_deposit_value(&self) -> u64 {
            self.safety_deposit.value()
        }

        pub(crate) fn set_status(&mut self, status: EscrowStatus) {
            debug_assert_eq!(self.status, EscrowStatus::Active, "status is assigned only once");
            self.status = status;
        }

        pub(crate) fn take_balances(&mut self) -> (Balance<A>, Balance<Native>) {
            (self.balance.withdraw_all(), self.safety_deposit.withdraw_all())
        }
    };
}

/// Source-side escrow: one fill's tokens, debited from a wallet and locked
/// until the secret is revealed or the cancel cascade returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct EscrowSrc<A> {
    pub(crate) id: ObjectId,
    pub(crate) immutables: Immutables,
    pub(crate) balance: Balance<A>,
    pub(crate) safety_deposit: Balance<Native>,
    pub(crate) created_at: u64,
    pub(crate) status: EscrowStatus,
}

impl<A> EscrowSrc<A> {
    escrow_accessors!();

    /// First instant at which this escrow may be rescued.
    pub fn rescue_start(&self) -> u64 {
        self.immutables.timelocks.src_rescue_start(self.created_at)
    }
}

/// Destination-side escrow: the taker's mirrored deposit, released to the
/// maker once the secret crosses over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct EscrowDst<A> {
    pub(crate) id: ObjectId,
    pub(crate) immutables: Immutables,
    pub(crate) balance: Balance<A>,
    pub(crate) safety_deposit: Balance<Native>,
    pub(crate) created_at: u64,
    pub(crate) status: EscrowStatus,
}

impl<A> EscrowDst<A> {
    escrow_accessors!();

    /// First instant at which this escrow may be rescued.
    pub fn rescue_start(&self) -> u64 {
        self.immutables.timelocks.dst_rescue_start(self.created_at)
    }
}
