//! Structured records emitted at each state transition.
//!
//! Events are the sole channel by which off-chain orchestration observes
//! progress; in particular, [`EscrowWithdrawn`] carries the revealed secret,
//! which is how the counterparty chain learns the preimage. Records are
//! copy-only snapshots with no references into live objects.

use crate::{host::ObjectId, types::Timelocks};
use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the swap an escrow lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscrowSide {
    /// The chain holding the maker's funds.
    Source,
    /// The chain holding the taker's mirrored deposit.
    Destination,
}

impl fmt::Display for EscrowSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Destination => "destination",
        })
    }
}

/// A maker funded a new wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletCreated {
    /// The new wallet object.
    pub wallet_id: ObjectId,
    /// Identifier of the logical order.
    pub order_hash: B256,
    /// Caller-chosen salt.
    pub salt: U256,
    /// The funding maker.
    pub maker: Address,
    /// Offered asset label.
    pub maker_asset: String,
    /// Wanted asset label.
    pub taker_asset: String,
    /// Offered source tokens.
    pub making_amount: u64,
    /// Minimum acceptable destination tokens.
    pub taking_amount: u64,
    /// Auction span in milliseconds.
    pub duration_ms: u64,
    /// Secret commitment (single hash or Merkle root).
    pub hashlock: B256,
    /// The seven relative offsets.
    pub timelocks: Timelocks,
    /// Minimum source-side safety deposit.
    pub src_safety_deposit_amount: u64,
    /// Minimum destination-side safety deposit.
    pub dst_safety_deposit_amount: u64,
    /// Whether partial fills are allowed.
    pub allow_partial_fills: bool,
    /// Number of fill buckets (zero for single fill).
    pub parts_amount: u8,
    /// Creation time in milliseconds.
    pub created_at: u64,
}

/// A resolver locked funds into a new escrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowCreated {
    /// The new escrow object.
    pub escrow_id: ObjectId,
    /// Identifier of the logical order.
    pub order_hash: B256,
    /// Commitment for this specific fill.
    pub hashlock: B256,
    /// The order's maker.
    pub maker: Address,
    /// The committed resolver.
    pub taker: Address,
    /// Locked token amount.
    pub amount: u64,
    /// Posted safety deposit.
    pub safety_deposit_amount: u64,
    /// Creation time in milliseconds.
    pub created_at: u64,
    /// The wallet's secret-index cursor after this fill. Holds the unused
    /// sentinel for destination escrows, which do not track indices.
    pub last_used_index: u8,
}

/// A secret was revealed and an escrow paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowWithdrawn {
    /// The withdrawn escrow.
    pub escrow_id: ObjectId,
    /// Identifier of the logical order.
    pub order_hash: B256,
    /// The commitment the secret satisfied.
    pub hashlock: B256,
    /// The revealed preimage.
    pub secret: Bytes,
    /// The caller rewarded with the safety deposit.
    pub withdrawn_by: Address,
    /// The order's maker.
    pub maker: Address,
    /// The fill's taker.
    pub taker: Address,
    /// Token amount paid out.
    pub amount: u64,
    /// Withdrawal time in milliseconds.
    pub withdrawn_at: u64,
}

/// An escrow was unwound and refunded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowCancelled {
    /// The cancelled escrow.
    pub escrow_id: ObjectId,
    /// Identifier of the logical order.
    pub order_hash: B256,
    /// The order's maker.
    pub maker: Address,
    /// The fill's taker.
    pub taker: Address,
    /// The caller rewarded with the safety deposit.
    pub cancelled_by: Address,
    /// Token amount refunded.
    pub amount: u64,
    /// Cancellation time in milliseconds.
    pub cancelled_at: u64,
}

/// A wallet was destroyed past its rescue deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRescued {
    /// The destroyed wallet.
    pub wallet_id: ObjectId,
    /// Identifier of the logical order.
    pub order_hash: B256,
    /// The maker refunded with the residue.
    pub maker: Address,
    /// The caller that executed the rescue.
    pub rescued_by: Address,
    /// Residual amount returned to the maker.
    pub amount: u64,
    /// Rescue time in milliseconds.
    pub rescued_at: u64,
}

/// An escrow was destroyed past its rescue deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowRescued {
    /// The destroyed escrow.
    pub escrow_id: ObjectId,
    /// Identifier of the logical order.
    pub order_hash: B256,
    /// Commitment for the fill.
    pub hashlock: B256,
    /// The order's maker.
    pub maker: Address,
    /// The fill's taker.
    pub taker: Address,
    /// The caller that executed the rescue.
    pub rescued_by: Address,
    /// Residual token amount refunded.
    pub amount: u64,
    /// Rescue time in milliseconds.
    pub rescued_at: u64,
    /// Which side of the swap the escrow lived on.
    pub escrow_type: EscrowSide,
}

/// Any record the settlement core can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementEvent {
    /// See [`WalletCreated`].
    WalletCreated(WalletCreated),
    /// See [`EscrowCreated`].
    EscrowCreated(EscrowCreated),
    /// See [`EscrowWithdrawn`].
    EscrowWithdrawn(EscrowWithdrawn),
    /// See [`EscrowCancelled`].
    EscrowCancelled(EscrowCancelled),
    /// See [`WalletRescued`].
    WalletRescued(WalletRescued),
    /// See [`EscrowRescued`].
    EscrowRescued(EscrowRescued),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escrow_side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EscrowSide::Source).unwrap(), "\"source\"");
        assert_eq!(serde_json::to_string(&EscrowSide::Destination).unwrap(), "\"destination\"");
        assert_eq!(EscrowSide::Destination.to_string(), "destination");
    }
}
