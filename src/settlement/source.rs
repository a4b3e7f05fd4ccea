//! Source-side escrow lifecycle.

use crate::{
    constants::MIN_SECRET_LEN,
    error::SettlementError,
    fills::is_valid_fill_index,
    host::{EventSink, TxContext},
    settlement::{auth, Disbursement},
    types::{
        hash_secret, verify_proof, Balance, EscrowCancelled, EscrowCreated, EscrowRescued,
        EscrowSide, EscrowSrc, EscrowStatus, EscrowWithdrawn, Immutables, Native,
        SettlementEvent, Wallet,
    },
};
use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A resolver's commitment to fill part or all of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcFill {
    /// The leaf hash consumed by this fill; `keccak(secret)` itself for a
    /// single-fill order.
    pub hashlock: B256,
    /// Index of the consumed secret. Zero for single fills.
    pub secret_index: u8,
    /// Inclusion proof binding `hashlock` to the order's Merkle root.
    /// Empty for single fills.
    pub merkle_proof: Vec<B256>,
    /// The resolver that will receive the source tokens.
    pub taker: Address,
    /// Source tokens to lock.
    pub making_amount: u64,
    /// Destination tokens the resolver commits to provide. Must meet or
    /// beat the Dutch-auction price at fill time.
    pub taking_amount: u64,
}

/// Mints a source escrow against `wallet`, debiting its balance.
///
/// Validation order: input shape, safety deposit, wallet capacity, auction
/// compliance, then secret-index admissibility and Merkle inclusion. The
/// wallet is only mutated once every check has passed.
pub fn create_escrow_src<A>(
    wallet: &mut Wallet<A>,
    fill: SrcFill,
    safety_deposit: Balance<Native>,
    ctx: &TxContext,
    events: &mut dyn EventSink,
) -> Result<EscrowSrc<A>, SettlementError> {
    validate_fill(wallet, &fill, safety_deposit.value(), ctx).inspect_err(|err| {
        debug!(
            wallet_id = %wallet.id(),
            secret_index = fill.secret_index,
            making_amount = fill.making_amount,
            code = err.code(),
            "source escrow rejected"
        );
    })?;

    let balance = wallet.debit_for_escrow(fill.making_amount)?;
    if wallet.allow_partial_fills() {
        wallet.mark_index_used(fill.secret_index);
    }

    let escrow = EscrowSrc {
        id: ctx.fresh_object_id(),
        immutables: Immutables {
            order_hash: wallet.order_hash(),
            hashlock: fill.hashlock,
            maker: wallet.maker(),
            taker: fill.taker,
            token: wallet.maker_asset().clone(),
            amount: fill.making_amount,
            safety_deposit_amount: safety_deposit.value(),
            timelocks: wallet.timelocks(),
        },
        balance,
        safety_deposit,
        created_at: ctx.now_ms(),
        status: EscrowStatus::Active,
    };

    info!(
        escrow_id = %escrow.id,
        wallet_id = %wallet.id(),
        taker = %fill.taker,
        amount = fill.making_amount,
        remaining = wallet.balance_value(),
        "source escrow created"
    );

    events.emit(SettlementEvent::EscrowCreated(EscrowCreated {
        escrow_id: escrow.id,
        order_hash: escrow.immutables.order_hash,
        hashlock: escrow.immutables.hashlock,
        maker: escrow.immutables.maker,
        taker: escrow.immutables.taker,
        amount: escrow.immutables.amount,
        safety_deposit_amount: escrow.immutables.safety_deposit_amount,
        created_at: escrow.created_at,
        last_used_index: wallet.last_used_index(),
    }));

    Ok(escrow)
}

fn validate_fill<A>(
    wallet: &Wallet<A>,
    fill: &SrcFill,
    safety_deposit: u64,
    ctx: &TxContext,
) -> Result<(), SettlementError> {
    if fill.making_amount == 0 || fill.taking_amount == 0 {
        return Err(SettlementError::InvalidAmount);
    }
    if fill.hashlock == B256::ZERO {
        return Err(SettlementError::InvalidHashlock);
    }
    if fill.taker == Address::ZERO {
        return Err(SettlementError::InvalidAddress);
    }
    if safety_deposit < wallet.src_safety_deposit_amount() {
        return Err(SettlementError::SafetyDepositTooLow);
    }
    if !wallet.is_active() {
        return Err(SettlementError::WalletInactive);
    }
    if fill.making_amount > wallet.balance_value() {
        return Err(SettlementError::InsufficientBalance);
    }
    if fill.taking_amount < wallet.auction().expected_taking(fill.making_amount, ctx.now_ms()) {
        return Err(SettlementError::AuctionViolated);
    }

    if wallet.allow_partial_fills() {
        let cumulative = wallet.filled() + fill.making_amount;
        if !is_valid_fill_index(
            wallet.making_amount(),
            wallet.parts_amount(),
            wallet.last_used_index(),
            fill.secret_index,
            cumulative,
        ) {
            return Err(SettlementError::SecretIndexUsed);
        }
        if !verify_proof(fill.hashlock, &fill.merkle_proof, wallet.hashlock()) {
            return Err(SettlementError::InvalidMerkleProof);
        }
    } else {
        // Single fill: index 0, no proof, and the fill must take the whole
        // remaining balance in one go.
        if fill.secret_index != 0 {
            return Err(SettlementError::SecretIndexUsed);
        }
        if !fill.merkle_proof.is_empty() {
            return Err(SettlementError::InvalidMerkleProof);
        }
        if fill.making_amount != wallet.balance_value() {
            return Err(SettlementError::InvalidAmount);
        }
        // With an empty proof the inclusion check degenerates to equality
        // with the wallet's hashlock.
        if fill.hashlock != wallet.hashlock() {
            return Err(SettlementError::InvalidHashlock);
        }
    }
    Ok(())
}

/// Pays out an active source escrow against the revealed secret: tokens to
/// the taker, safety deposit to the caller.
///
/// Reachable in the taker-exclusive withdraw stage (taker only) and the
/// public withdraw stage (anyone). The emitted event carries the secret;
/// that is the reveal the counterparty chain watches for.
pub fn withdraw_src<A>(
    escrow: &mut EscrowSrc<A>,
    secret: &[u8],
    ctx: &TxContext,
    events: &mut dyn EventSink,
) -> Result<Disbursement<A>, SettlementError> {
    ensure_active(escrow.status)?;
    check_secret(secret, escrow.immutables.hashlock)?;
    let stage = escrow.immutables.timelocks.src_stage(escrow.created_at, ctx.now_ms());
    auth::ensure_withdrawable(stage, ctx.sender(), escrow.immutables.taker).inspect_err(|err| {
        debug!(escrow_id = %escrow.id, ?stage, code = err.code(), "source withdraw rejected");
    })?;

    // Status commits before any balance leaves the object.
    escrow.set_status(EscrowStatus::Withdrawn);
    let (token, deposit) = escrow.take_balances();

    info!(escrow_id = %escrow.id, taker = %escrow.immutables.taker, "source escrow withdrawn");

    events.emit(SettlementEvent::EscrowWithdrawn(EscrowWithdrawn {
        escrow_id: escrow.id,
        order_hash: escrow.immutables.order_hash,
        hashlock: escrow.immutables.hashlock,
        secret: Bytes::copy_from_slice(secret),
        withdrawn_by: ctx.sender(),
        maker: escrow.immutables.maker,
        taker: escrow.immutables.taker,
        amount: escrow.immutables.amount,
        withdrawn_at: ctx.now_ms(),
    }));

    Ok(Disbursement::new(escrow.immutables.taker, token, ctx.sender(), deposit))
}

/// Unwinds an active source escrow: tokens back to the maker, safety
/// deposit to the caller.
///
/// Reachable in the taker-exclusive cancel stage (taker only) and the
/// public cancel stage (anyone).
pub fn cancel_src<A>(
    escrow: &mut EscrowSrc<A>,
    ctx: &TxContext,
    events: &mut dyn EventSink,
) -> Result<Disbursement<A>, SettlementError> {
    ensure_active(escrow.status)?;
    let stage = escrow.immutables.timelocks.src_stage(escrow.created_at, ctx.now_ms());
    auth::ensure_cancellable_src(stage, ctx.sender(), escrow.immutables.taker).inspect_err(
        |err| {
            debug!(escrow_id = %escrow.id, ?stage, code = err.code(), "source cancel rejected");
        },
    )?;

    escrow.set_status(EscrowStatus::Cancelled);
    let (token, deposit) = escrow.take_balances();

    info!(escrow_id = %escrow.id, maker = %escrow.immutables.maker, "source escrow cancelled");

    events.emit(SettlementEvent::EscrowCancelled(EscrowCancelled {
        escrow_id: escrow.id,
        order_hash: escrow.immutables.order_hash,
        maker: escrow.immutables.maker,
        taker: escrow.immutables.taker,
        cancelled_by: ctx.sender(),
        amount: escrow.immutables.amount,
        cancelled_at: ctx.now_ms(),
    }));

    Ok(Disbursement::new(escrow.immutables.maker, token, ctx.sender(), deposit))
}

/// Destroys a source escrow past its rescue deadline, whatever its status:
/// residual tokens to the maker, residual deposit to the caller.
pub fn rescue_src<A>(
    mut escrow: EscrowSrc<A>,
    ctx: &TxContext,
    events: &mut dyn EventSink,
) -> Result<Disbursement<A>, SettlementError> {
    if ctx.now_ms() < escrow.rescue_start() {
        debug!(escrow_id = %escrow.id, "rescue before deadline rejected");
        return Err(SettlementError::NotCancellable);
    }

    let (token, deposit) = escrow.take_balances();
    let amount = token.value();

    info!(escrow_id = %escrow.id, amount, rescued_by = %ctx.sender(), "source escrow rescued");

    events.emit(SettlementEvent::EscrowRescued(EscrowRescued {
        escrow_id: escrow.id,
        order_hash: escrow.immutables.order_hash,
        hashlock: escrow.immutables.hashlock,
        maker: escrow.immutables.maker,
        taker: escrow.immutables.taker,
        rescued_by: ctx.sender(),
        amount,
        rescued_at: ctx.now_ms(),
        escrow_type: EscrowSide::Source,
    }));

    Ok(Disbursement::new(escrow.immutables.maker, token, ctx.sender(), deposit))
}

/// Maps a non-active status to its abort: a withdrawn escrow reports
/// `AlreadyWithdrawn`, a cancelled one `InactiveEscrow`.
pub(crate) fn ensure_active(status: EscrowStatus) -> Result<(), SettlementError> {
    match status {
        EscrowStatus::Active => Ok(()),
        EscrowStatus::Withdrawn => Err(SettlementError::AlreadyWithdrawn),
        EscrowStatus::Cancelled => Err(SettlementError::InactiveEscrow),
    }
}

/// Validates the secret's length and preimage relation to `hashlock`.
pub(crate) fn check_secret(secret: &[u8], hashlock: B256) -> Result<(), SettlementError> {
    if secret.len() < MIN_SECRET_LEN || hash_secret(secret) != hashlock {
        return Err(SettlementError::InvalidSecret);
    }
    Ok(())
}
