//! Wallet lifecycle: creation and rescue.

use crate::{
    constants::UNUSED_INDEX,
    error::SettlementError,
    host::{EventSink, Payout, TxContext},
    types::{AssetSymbol, Balance, SettlementEvent, Timelocks, Wallet, WalletCreated, WalletRescued},
};
use alloy::primitives::{B256, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Order terms for [`create_wallet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletParams {
    /// Unique identifier of the logical order.
    pub order_hash: B256,
    /// Caller-chosen salt.
    pub salt: U256,
    /// Label of the offered (source) asset.
    pub maker_asset: AssetSymbol,
    /// Label of the wanted (destination) asset.
    pub taker_asset: AssetSymbol,
    /// Maximum source tokens offered; the auction's start-high bound.
    pub making_amount: u64,
    /// Minimum acceptable destination tokens; the auction's end-low bound.
    pub taking_amount: u64,
    /// Auction span in milliseconds.
    pub duration_ms: u64,
    /// `keccak(secret)` for single fills, Merkle root over the secret
    /// leaves for partial fills.
    pub hashlock: B256,
    /// Minimum safety deposit resolvers must post on the source side.
    pub src_safety_deposit_amount: u64,
    /// Minimum safety deposit resolvers must post on the destination side.
    pub dst_safety_deposit_amount: u64,
    /// Whether the order may be filled in parts.
    pub allow_partial_fills: bool,
    /// Number of fill buckets; zero in single-fill mode, at least two
    /// otherwise.
    pub parts_amount: u8,
    /// The seven relative timelock offsets.
    pub timelocks: Timelocks,
}

/// Creates and funds a wallet for one order. The caller is the maker.
///
/// `funding` must carry exactly `making_amount`; the wallet's balance only
/// ever decreases afterwards, and only via escrow creation.
pub fn create_wallet<A>(
    params: WalletParams,
    funding: Balance<A>,
    ctx: &TxContext,
    events: &mut dyn EventSink,
) -> Result<Wallet<A>, SettlementError> {
    validate_params(&params, funding.value()).inspect_err(|err| {
        debug!(order_hash = %params.order_hash, code = err.code(), "wallet creation rejected");
    })?;

    let wallet = Wallet {
        id: ctx.fresh_object_id(),
        order_hash: params.order_hash,
        salt: params.salt,
        maker: ctx.sender(),
        maker_asset: params.maker_asset,
        taker_asset: params.taker_asset,
        making_amount: params.making_amount,
        taking_amount: params.taking_amount,
        duration_ms: params.duration_ms,
        hashlock: params.hashlock,
        timelocks: params.timelocks,
        src_safety_deposit_amount: params.src_safety_deposit_amount,
        dst_safety_deposit_amount: params.dst_safety_deposit_amount,
        allow_partial_fills: params.allow_partial_fills,
        parts_amount: params.parts_amount,
        last_used_index: UNUSED_INDEX,
        balance: funding,
        created_at: ctx.now_ms(),
        is_active: true,
    };

    info!(
        wallet_id = %wallet.id,
        order_hash = %wallet.order_hash,
        making_amount = wallet.making_amount,
        parts_amount = wallet.parts_amount,
        "wallet created"
    );

    events.emit(SettlementEvent::WalletCreated(WalletCreated {
        wallet_id: wallet.id,
        order_hash: wallet.order_hash,
        salt: wallet.salt,
        maker: wallet.maker,
        maker_asset: wallet.maker_asset.as_str().to_owned(),
        taker_asset: wallet.taker_asset.as_str().to_owned(),
        making_amount: wallet.making_amount,
        taking_amount: wallet.taking_amount,
        duration_ms: wallet.duration_ms,
        hashlock: wallet.hashlock,
        timelocks: wallet.timelocks,
        src_safety_deposit_amount: wallet.src_safety_deposit_amount,
        dst_safety_deposit_amount: wallet.dst_safety_deposit_amount,
        allow_partial_fills: wallet.allow_partial_fills,
        parts_amount: wallet.parts_amount,
        created_at: wallet.created_at,
    }));

    Ok(wallet)
}

fn validate_params(params: &WalletParams, funding: u64) -> Result<(), SettlementError> {
    if params.order_hash == B256::ZERO {
        return Err(SettlementError::InvalidOrderHash);
    }
    if params.hashlock == B256::ZERO {
        return Err(SettlementError::InvalidHashlock);
    }
    if params.making_amount == 0 || params.taking_amount == 0 || params.duration_ms == 0 {
        return Err(SettlementError::InvalidAmount);
    }
    if funding != params.making_amount {
        return Err(SettlementError::InvalidAmount);
    }
    if !params.timelocks.is_valid() {
        return Err(SettlementError::InvalidTimelock);
    }
    // Exactly two shapes exist: single fill (no parts) or partial fill with
    // at least two buckets. The index sentinel must stay unreachable.
    let shape_ok = if params.allow_partial_fills {
        params.parts_amount > 1 && params.parts_amount < UNUSED_INDEX
    } else {
        params.parts_amount == 0
    };
    if !shape_ok {
        return Err(SettlementError::InvalidAmount);
    }
    Ok(())
}

/// Destroys a wallet past its rescue deadline and refunds the residue to
/// the maker. Open to any caller, whatever state the wallet is in.
pub fn rescue_wallet<A>(
    mut wallet: Wallet<A>,
    ctx: &TxContext,
    events: &mut dyn EventSink,
) -> Result<Payout<A>, SettlementError> {
    if ctx.now_ms() < wallet.rescue_start() {
        debug!(wallet_id = %wallet.id, "rescue before deadline rejected");
        return Err(SettlementError::NotCancellable);
    }

    let residue = wallet.drain();
    let amount = residue.value();

    info!(wallet_id = %wallet.id, amount, rescued_by = %ctx.sender(), "wallet rescued");

    events.emit(SettlementEvent::WalletRescued(WalletRescued {
        wallet_id: wallet.id,
        order_hash: wallet.order_hash,
        maker: wallet.maker,
        rescued_by: ctx.sender(),
        amount,
        rescued_at: ctx.now_ms(),
    }));

    Ok(Payout::new(wallet.maker, residue))
}
