//! Per-stage caller authorization.

use crate::{error::SettlementError, types::Stage};
use alloy::primitives::Address;

/// The compact stage/caller predicate: whether `caller` may act at all in
/// `stage` against an escrow whose committed resolver is `taker`.
pub(crate) fn may_act(stage: Stage, caller: Address, taker: Address) -> bool {
    match stage {
        Stage::FinalityLock => false,
        Stage::ResolverExclusiveWithdraw | Stage::ResolverExclusiveCancel => caller == taker,
        Stage::PublicWithdraw | Stage::PublicCancel | Stage::Rescue => true,
    }
}

/// Gate for withdraw paths: only the two withdraw stages are reachable, and
/// the exclusive one demands the taker.
pub(crate) fn ensure_withdrawable(
    stage: Stage,
    caller: Address,
    taker: Address,
) -> Result<(), SettlementError> {
    match stage {
        Stage::ResolverExclusiveWithdraw | Stage::PublicWithdraw => {
            if may_act(stage, caller, taker) {
                Ok(())
            } else {
                Err(SettlementError::Unauthorised)
            }
        }
        _ => Err(SettlementError::NotWithdrawable),
    }
}

/// Gate for source-side cancel paths: the exclusive and public cancel
/// stages.
pub(crate) fn ensure_cancellable_src(
    stage: Stage,
    caller: Address,
    taker: Address,
) -> Result<(), SettlementError> {
    match stage {
        Stage::ResolverExclusiveCancel | Stage::PublicCancel => {
            if may_act(stage, caller, taker) {
                Ok(())
            } else {
                Err(SettlementError::Unauthorised)
            }
        }
        _ => Err(SettlementError::NotCancellable),
    }
}

/// Gate for destination-side cancel paths. The destination has no public
/// cancel window, so this stays taker-exclusive forever.
pub(crate) fn ensure_cancellable_dst(
    stage: Stage,
    caller: Address,
    taker: Address,
) -> Result<(), SettlementError> {
    match stage {
        Stage::ResolverExclusiveCancel => {
            if may_act(stage, caller, taker) {
                Ok(())
            } else {
                Err(SettlementError::Unauthorised)
            }
        }
        _ => Err(SettlementError::NotCancellable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const TAKER: Address = address!("0x00000000000000000000000000000000000000aa");
    const OTHER: Address = address!("0x00000000000000000000000000000000000000bb");

    #[test]
    fn finality_lock_blocks_everyone() {
        assert!(!may_act(Stage::FinalityLock, TAKER, TAKER));
        assert!(!may_act(Stage::FinalityLock, OTHER, TAKER));
    }

    #[test]
    fn exclusive_stages_require_the_taker() {
        assert!(may_act(Stage::ResolverExclusiveWithdraw, TAKER, TAKER));
        assert!(!may_act(Stage::ResolverExclusiveWithdraw, OTHER, TAKER));
        assert!(may_act(Stage::ResolverExclusiveCancel, TAKER, TAKER));
        assert!(!may_act(Stage::ResolverExclusiveCancel, OTHER, TAKER));
    }

    #[test]
    fn public_stages_admit_anyone() {
        assert!(may_act(Stage::PublicWithdraw, OTHER, TAKER));
        assert!(may_act(Stage::PublicCancel, OTHER, TAKER));
        assert!(may_act(Stage::Rescue, OTHER, TAKER));
    }

    #[test]
    fn withdraw_gate_maps_errors() {
        assert_eq!(
            ensure_withdrawable(Stage::FinalityLock, TAKER, TAKER),
            Err(SettlementError::NotWithdrawable)
        );
        assert_eq!(
            ensure_withdrawable(Stage::ResolverExclusiveWithdraw, OTHER, TAKER),
            Err(SettlementError::Unauthorised)
        );
        assert_eq!(ensure_withdrawable(Stage::PublicWithdraw, OTHER, TAKER), Ok(()));
        assert_eq!(
            ensure_withdrawable(Stage::ResolverExclusiveCancel, TAKER, TAKER),
            Err(SettlementError::NotWithdrawable)
        );
    }

    #[test]
    fn dst_cancel_gate_has_no_public_stage() {
        assert_eq!(
            ensure_cancellable_dst(Stage::PublicCancel, OTHER, TAKER),
            Err(SettlementError::NotCancellable)
        );
        assert_eq!(
            ensure_cancellable_dst(Stage::ResolverExclusiveCancel, OTHER, TAKER),
            Err(SettlementError::Unauthorised)
        );
        assert_eq!(ensure_cancellable_dst(Stage::ResolverExclusiveCancel, TAKER, TAKER), Ok(()));
    }
}
