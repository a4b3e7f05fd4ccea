//! The order-scoped funding buffer.

use crate::{
    auction::DutchAuction,
    constants::UNUSED_INDEX,
    error::SettlementError,
    host::ObjectId,
    types::{AssetSymbol, Balance, Timelocks},
};
use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// A shared funding buffer for one order on the source chain.
///
/// Created by the maker with the full `making_amount`; every successful
/// source escrow debits it. The balance only ever decreases, and only via
/// escrow creation, so `filled() + balance_value() == making_amount` holds
/// for the wallet's whole life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct Wallet<A> {
    pub(crate) id: ObjectId,
    pub(crate) order_hash: B256,
    pub(crate) salt: U256,
    pub(crate) maker: Address,
    pub(crate) maker_asset: AssetSymbol,
    pub(crate) taker_asset: AssetSymbol,
    pub(crate) making_amount: u64,
    pub(crate) taking_amount: u64,
    pub(crate) duration_ms: u64,
    pub(crate) hashlock: B256,
    pub(crate) timelocks: Timelocks,
    pub(crate) src_safety_deposit_amount: u64,
    pub(crate) dst_safety_deposit_amount: u64,
    pub(crate) allow_partial_fills: bool,
    pub(crate) parts_amount: u8,
    pub(crate) last_used_index: u8,
    pub(crate) balance: Balance<A>,
    pub(crate) created_at: u64,
    pub(crate) is_active: bool,
}

impl<A> Wallet<A> {
    /// Object id in the host's store.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Unique identifier of the logical order.
    pub fn order_hash(&self) -> B256 {
        self.order_hash
    }

    /// Caller-chosen salt.
    pub fn salt(&self) -> U256 {
        self.salt
    }

    /// The order's maker, funder and refund target.
    pub fn maker(&self) -> Address {
        self.maker
    }

    /// Label of the offered (source) asset.
    pub fn maker_asset(&self) -> &AssetSymbol {
        &self.maker_asset
    }

    /// Label of the wanted (destination) asset.
    pub fn taker_asset(&self) -> &AssetSymbol {
        &self.taker_asset
    }

    /// Maximum source tokens offered; also the auction's start-high bound.
    pub fn making_amount(&self) -> u64 {
        self.making_amount
    }

    /// Minimum acceptable destination tokens; the auction's end-low bound.
    pub fn taking_amount(&self) -> u64 {
        self.taking_amount
    }

    /// Auction span in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// `keccak(secret)` for single fills, the Merkle root over the secret
    /// leaves for partial fills.
    pub fn hashlock(&self) -> B256 {
        self.hashlock
    }

    /// The seven relative timelock offsets, captured into every escrow
    /// minted against this wallet.
    pub fn timelocks(&self) -> Timelocks {
        self.timelocks
    }

    /// Minimum safety deposit for source escrows.
    pub fn src_safety_deposit_amount(&self) -> u64 {
        self.src_safety_deposit_amount
    }

    /// Minimum safety deposit for destination escrows.
    pub fn dst_safety_deposit_amount(&self) -> u64 {
        self.dst_safety_deposit_amount
    }

    /// Whether the order may be filled in parts.
    pub fn allow_partial_fills(&self) -> bool {
        self.allow_partial_fills
    }

    /// Number of equal fill buckets; there are `parts_amount + 1` secrets.
    /// Zero in single-fill mode.
    pub fn parts_amount(&self) -> u8 {
        self.parts_amount
    }

    /// Index of the most recently consumed secret, or
    /// [`UNUSED_INDEX`](crate::constants::UNUSED_INDEX) before the first
    /// fill.
    pub fn last_used_index(&self) -> u8 {
        self.last_used_index
    }

    /// Remaining undebited funds.
    pub fn balance_value(&self) -> u64 {
        self.balance.value()
    }

    /// Source tokens already locked into escrows.
    pub fn filled(&self) -> u64 {
        self.making_amount - self.balance.value()
    }

    /// Creation time in milliseconds.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Whether the wallet can still fund escrows.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// The order's Dutch-auction curve.
    pub fn auction(&self) -> DutchAuction {
        DutchAuction::new(self.making_amount, self.taking_amount, self.created_at, self.duration_ms)
    }

    /// First instant at which the wallet may be rescued. The wallet lives on
    /// the source chain, so its rescue window follows the source side's last
    /// cancellation deadline.
    pub fn rescue_start(&self) -> u64 {
        self.timelocks.src_rescue_start(self.created_at)
    }

    /// Splits `amount` off the wallet balance for a new escrow.
    ///
    /// Draining the last token deactivates the wallet: nothing can be minted
    /// against it afterwards, only rescue remains.
    pub(crate) fn debit_for_escrow(&mut self, amount: u64) -> Result<Balance<A>, SettlementError> {
        if !self.is_active {
            return Err(SettlementError::WalletInactive);
        }
        let debited = self.balance.split(amount).ok_or(SettlementError::InsufficientBalance)?;
        if self.balance.is_zero() {
            self.is_active = false;
        }
        Ok(debited)
    }

    /// Records a consumed secret index after a successful partial fill.
    pub(crate) fn mark_index_used(&mut self, index: u8) {
        debug_assert!(
            self.last_used_index == UNUSED_INDEX || index > self.last_used_index,
            "index progression must be strictly monotonic"
        );
        self.last_used_index = index;
    }

    /// Extracts the residual balance during rescue.
    pub(crate) fn drain(&mut self) -> Balance<A> {
        self.is_active = false;
        self.balance.withdraw_all()
    }
}
