//! Destination-side escrow lifecycle.
//!
//! Destination escrows are minted directly by the resolver who mirrors the
//! maker's deposit; no wallet and no Merkle proof are involved. The source
//! chain's fill has already fixed which leaf this escrow commits to, so the
//! destination trusts the submitted hashlock as-is.

use crate::{
    constants::{MIN_SAFETY_DEPOSIT, UNUSED_INDEX},
    error::SettlementError,
    host::{EventSink, TxContext},
    settlement::{
        auth,
        source::{check_secret, ensure_active},
        Disbursement,
    },
    types::{
        AssetSymbol, Balance, EscrowCancelled, EscrowCreated, EscrowDst, EscrowRescued,
        EscrowSide, EscrowStatus, EscrowWithdrawn, Immutables, Native, SettlementEvent, Timelocks,
    },
};
use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Terms for [`create_escrow_dst`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstParams {
    /// Identifier of the logical order being mirrored.
    pub order_hash: B256,
    /// The specific leaf hash this fill committed to on the source side.
    pub hashlock: B256,
    /// The maker who will receive the deposit on withdrawal.
    pub maker: Address,
    /// Label of the deposited asset.
    pub token: AssetSymbol,
    /// The seven relative timelock offsets, as published in the order.
    pub timelocks: Timelocks,
}

/// Mints a destination escrow from the caller's deposit. The caller is the
/// taker.
pub fn create_escrow_dst<A>(
    params: DstParams,
    deposit: Balance<A>,
    safety_deposit: Balance<Native>,
    ctx: &TxContext,
    events: &mut dyn EventSink,
) -> Result<EscrowDst<A>, SettlementError> {
    validate_params(&params, deposit.value(), safety_deposit.value()).inspect_err(|err| {
        debug!(order_hash = %params.order_hash, code = err.code(), "destination escrow rejected");
    })?;

    let escrow = EscrowDst {
        id: ctx.fresh_object_id(),
        immutables: Immutables {
            order_hash: params.order_hash,
            hashlock: params.hashlock,
            maker: params.maker,
            taker: ctx.sender(),
            token: params.token,
            amount: deposit.value(),
            safety_deposit_amount: safety_deposit.value(),
            timelocks: params.timelocks,
        },
        balance: deposit,
        safety_deposit,
        created_at: ctx.now_ms(),
        status: EscrowStatus::Active,
    };

    info!(
        escrow_id = %escrow.id,
        order_hash = %escrow.immutables.order_hash,
        taker = %escrow.immutables.taker,
        amount = escrow.immutables.amount,
        "destination escrow created"
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
        // Destination escrows do not track fill indices.
        last_used_index: UNUSED_INDEX,
    }));

    Ok(escrow)
}

fn validate_params(
    params: &DstParams,
    amount: u64,
    safety_deposit: u64,
) -> Result<(), SettlementError> {
    if params.order_hash == B256::ZERO {
        return Err(SettlementError::InvalidOrderHash);
    }
    if params.hashlock == B256::ZERO {
        return Err(SettlementError::InvalidHashlock);
    }
    if params.maker == Address::ZERO {
        return Err(SettlementError::InvalidAddress);
    }
    if amount == 0 {
        return Err(SettlementError::InvalidAmount);
    }
    if safety_deposit < MIN_SAFETY_DEPOSIT {
        return Err(SettlementError::SafetyDepositTooLow);
    }
    if !params.timelocks.is_valid() {
        return Err(SettlementError::InvalidTimelock);
    }
    Ok(())
}

/// Pays out an active destination escrow against the revealed secret:
/// tokens to the maker, safety deposit to the caller.
pub fn withdraw_dst<A>(
    escrow: &mut EscrowDst<A>,
    secret: &[u8],
    ctx: &TxContext,
    events: &mut dyn EventSink,
) -> Result<Disbursement<A>, SettlementError> {
    ensure_active(escrow.status)?;
    check_secret(secret, escrow.immutables.hashlock)?;
    let stage = escrow.immutables.timelocks.dst_stage(escrow.created_at, ctx.now_ms());
    auth::ensure_withdrawable(stage, ctx.sender(), escrow.immutables.taker).inspect_err(|err| {
        debug!(escrow_id = %escrow.id, ?stage, code = err.code(), "destination withdraw rejected");
    })?;

    // Status commits before any balance leaves the object.
    escrow.set_status(EscrowStatus::Withdrawn);
    let (token, deposit) = escrow.take_balances();

    info!(escrow_id = %escrow.id, maker = %escrow.immutables.maker, "destination escrow withdrawn");

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

    Ok(Disbursement::new(escrow.immutables.maker, token, ctx.sender(), deposit))
}

/// Unwinds an active destination escrow, refunding the taker's own deposit.
///
/// Taker-only, from the destination cancellation stage onward: the
/// destination deliberately has no public-cancel window, so nobody can
/// adversarially unwind the taker's deposit for them.
pub fn cancel_dst<A>(
    escrow: &mut EscrowDst<A>,
    ctx: &TxContext,
    events: &mut dyn EventSink,
) -> Result<Disbursement<A>, SettlementError> {
    ensure_active(escrow.status)?;
    let stage = escrow.immutables.timelocks.dst_stage(escrow.created_at, ctx.now_ms());
    auth::ensure_cancellable_dst(stage, ctx.sender(), escrow.immutables.taker).inspect_err(
        |err| {
            debug!(escrow_id = %escrow.id, ?stage, code = err.code(), "destination cancel rejected");
        },
    )?;

    escrow.set_status(EscrowStatus::Cancelled);
    let (token, deposit) = escrow.take_balances();

    info!(escrow_id = %escrow.id, taker = %escrow.immutables.taker, "destination escrow cancelled");

    events.emit(SettlementEvent::EscrowCancelled(EscrowCancelled {
        escrow_id: escrow.id,
        order_hash: escrow.immutables.order_hash,
        maker: escrow.immutables.maker,
        taker: escrow.immutables.taker,
        cancelled_by: ctx.sender(),
        amount: escrow.immutables.amount,
        cancelled_at: ctx.now_ms(),
    }));

    Ok(Disbursement::new(escrow.immutables.taker, token, ctx.sender(), deposit))
}

/// Destroys a destination escrow past its rescue deadline, whatever its
/// status: residual tokens to the taker, residual deposit to the caller.
pub fn rescue_dst<A>(
    mut escrow: EscrowDst<A>,
    ctx: &TxContext,
    events: &mut dyn EventSink,
) -> Result<Disbursement<A>, SettlementError> {
    if ctx.now_ms() < escrow.rescue_start() {
        debug!(escrow_id = %escrow.id, "rescue before deadline rejected");
        return Err(SettlementError::NotCancellable);
    }

    let (token, deposit) = escrow.take_balances();
    let amount = token.value();

    info!(escrow_id = %escrow.id, amount, rescued_by = %ctx.sender(), "destination escrow rescued");

    events.emit(SettlementEvent::EscrowRescued(EscrowRescued {
        escrow_id: escrow.id,
        order_hash: escrow.immutables.order_hash,
        hashlock: escrow.immutables.hashlock,
        maker: escrow.immutables.maker,
        taker: escrow.immutables.taker,
        rescued_by: ctx.sender(),
        amount,
        rescued_at: ctx.now_ms(),
        escrow_type: EscrowSide::Destination,
    }));

    Ok(Disbursement::new(escrow.immutables.taker, token, ctx.sender(), deposit))
}
