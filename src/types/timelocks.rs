//! Timelock offsets and the stage machine derived from them.

use crate::constants::RESCUE_DELAY_MS;
use serde::{Deserialize, Serialize};

/// The discrete authorization windows an escrow moves through.
///
/// Stages are derived purely from `(created_at, now)` and the relative
/// offsets in [`Timelocks`]; nothing is scheduled at runtime. Lower bounds
/// are inclusive: at exactly `created_at + src_withdrawal` the source escrow
/// is already in [`Stage::ResolverExclusiveWithdraw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Stage {
    /// Nobody may act; the cross-chain finality lock.
    FinalityLock = 0,
    /// Only the taker may withdraw.
    ResolverExclusiveWithdraw = 1,
    /// Anyone may withdraw (with the correct secret).
    PublicWithdraw = 2,
    /// Only the taker may cancel.
    ResolverExclusiveCancel = 3,
    /// Anyone may cancel. Source side only: the destination deliberately has
    /// no public-cancel window, so destination cancels cannot be adversarial.
    PublicCancel = 4,
    /// Destructive cleanup, open to anyone once the rescue delay has passed.
    Rescue = 5,
}

/// The seven relative offsets, in milliseconds from an object's
/// `created_at`, that shape both chains' stage machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timelocks {
    /// Source chain: taker-exclusive withdraw opens.
    pub src_withdrawal: u64,
    /// Source chain: public withdraw opens.
    pub src_public_withdrawal: u64,
    /// Source chain: taker-exclusive cancel opens.
    pub src_cancellation: u64,
    /// Source chain: public cancel opens.
    pub src_public_cancellation: u64,
    /// Destination chain: taker-exclusive withdraw opens.
    pub dst_withdrawal: u64,
    /// Destination chain: public withdraw opens.
    pub dst_public_withdrawal: u64,
    /// Destination chain: taker-exclusive cancel opens.
    pub dst_cancellation: u64,
}

impl Timelocks {
    /// Validates the structure: all offsets positive, each chain's windows
    /// strictly ordered, and every destination window strictly ahead of its
    /// source counterpart so the destination always unlocks (and locks up)
    /// first.
    pub fn is_valid(&self) -> bool {
        self.dst_withdrawal > 0
            && self.src_withdrawal < self.src_public_withdrawal
            && self.src_public_withdrawal < self.src_cancellation
            && self.src_cancellation < self.src_public_cancellation
            && self.dst_withdrawal < self.dst_public_withdrawal
            && self.dst_public_withdrawal < self.dst_cancellation
            && self.dst_withdrawal < self.src_withdrawal
            && self.dst_public_withdrawal < self.src_public_withdrawal
            && self.dst_cancellation < self.src_cancellation
    }

    /// Current stage of a source-side object created at `created_at`.
    pub fn src_stage(&self, created_at: u64, now: u64) -> Stage {
        let elapsed = now.saturating_sub(created_at);
        if elapsed < self.src_withdrawal {
            Stage::FinalityLock
        } else if elapsed < self.src_public_withdrawal {
            Stage::ResolverExclusiveWithdraw
        } else if elapsed < self.src_cancellation {
            Stage::PublicWithdraw
        } else if elapsed < self.src_public_cancellation {
            Stage::ResolverExclusiveCancel
        } else {
            Stage::PublicCancel
        }
    }

    /// Current stage of a destination-side object created at `created_at`.
    ///
    /// Four windows only: past `dst_cancellation` the escrow stays in the
    /// taker-exclusive cancel stage forever.
    pub fn dst_stage(&self, created_at: u64, now: u64) -> Stage {
        let elapsed = now.saturating_sub(created_at);
        if elapsed < self.dst_withdrawal {
            Stage::FinalityLock
        } else if elapsed < self.dst_public_withdrawal {
            Stage::ResolverExclusiveWithdraw
        } else if elapsed < self.dst_cancellation {
            Stage::PublicWithdraw
        } else {
            Stage::ResolverExclusiveCancel
        }
    }

    /// First instant at which a source-side object may be rescued.
    pub fn src_rescue_start(&self, created_at: u64) -> u64 {
        created_at + self.src_public_cancellation + RESCUE_DELAY_MS
    }

    /// First instant at which a destination-side object may be rescued.
    pub fn dst_rescue_start(&self, created_at: u64) -> u64 {
        created_at + self.dst_cancellation + RESCUE_DELAY_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timelocks() -> Timelocks {
        Timelocks {
            src_withdrawal: 300_000,
            src_public_withdrawal: 600_000,
            src_cancellation: 900_000,
            src_public_cancellation: 1_200_000,
            dst_withdrawal: 250_000,
            dst_public_withdrawal: 550_000,
            dst_cancellation: 850_000,
        }
    }

    #[test]
    fn valid_structure_accepted() {
        assert!(timelocks().is_valid());
    }

    #[test]
    fn zero_offset_rejected() {
        let mut t = timelocks();
        t.dst_withdrawal = 0;
        assert!(!t.is_valid());
    }

    #[test]
    fn src_ordering_must_be_strict() {
        let mut t = timelocks();
        t.src_public_withdrawal = t.src_withdrawal;
        assert!(!t.is_valid());
    }

    #[test]
    fn dst_must_lead_src() {
        let mut t = timelocks();
        t.dst_withdrawal = t.src_withdrawal;
        assert!(!t.is_valid());

        let mut t = timelocks();
        t.dst_cancellation = t.src_cancellation;
        assert!(!t.is_valid());
    }

    #[test]
    fn src_stage_windows() {
        let t = timelocks();
        let t0 = 1_000_000;
        assert_eq!(t.src_stage(t0, t0), Stage::FinalityLock);
        assert_eq!(t.src_stage(t0, t0 + 299_999), Stage::FinalityLock);
        // Lower bounds are inclusive.
        assert_eq!(t.src_stage(t0, t0 + 300_000), Stage::ResolverExclusiveWithdraw);
        assert_eq!(t.src_stage(t0, t0 + 600_000), Stage::PublicWithdraw);
        assert_eq!(t.src_stage(t0, t0 + 900_000), Stage::ResolverExclusiveCancel);
        assert_eq!(t.src_stage(t0, t0 + 1_200_000), Stage::PublicCancel);
        assert_eq!(t.src_stage(t0, u64::MAX), Stage::PublicCancel);
    }

    #[test]
    fn dst_stage_has_no_public_cancel() {
        let t = timelocks();
        let t0 = 500;
        assert_eq!(t.dst_stage(t0, t0 + 250_000), Stage::ResolverExclusiveWithdraw);
        assert_eq!(t.dst_stage(t0, t0 + 550_000), Stage::PublicWithdraw);
        assert_eq!(t.dst_stage(t0, t0 + 850_000), Stage::ResolverExclusiveCancel);
        assert_eq!(t.dst_stage(t0, u64::MAX), Stage::ResolverExclusiveCancel);
    }

    #[test]
    fn rescue_windows_follow_last_cancellation() {
        let t = timelocks();
        assert_eq!(t.src_rescue_start(100), 100 + 1_200_000 + RESCUE_DELAY_MS);
        assert_eq!(t.dst_rescue_start(100), 100 + 850_000 + RESCUE_DELAY_MS);
    }

    #[test]
    fn before_creation_is_finality_lock() {
        let t = timelocks();
        assert_eq!(t.src_stage(1_000, 0), Stage::FinalityLock);
    }
}
