//! Dutch-auction price calculator.
//!
//! An order's taking amount decays linearly from `making_amount` (the
//! start-high bound) down to `taking_amount` (the end-low bound) over the
//! auction duration. At fill time the resolver's submitted taking amount
//! must meet or beat the curve; that is the sole auction-compliance check.

/// Linear-interpolated Dutch price between a start-high and end-low bound.
///
/// All intermediate math is `u128`, which cannot overflow for products of
/// `u64` amounts with `u64` durations. Rounding always favors the maker:
/// expected taking amounts round up, making amounts for a given taking
/// round down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutchAuction {
    start_amount: u64,
    end_amount: u64,
    start_at: u64,
    duration_ms: u64,
}

impl DutchAuction {
    /// Builds the curve for an order.
    ///
    /// `start_amount` and `end_amount` are the order's making and taking
    /// amounts; `duration_ms` must be positive (enforced at wallet
    /// creation).
    pub fn new(start_amount: u64, end_amount: u64, start_at: u64, duration_ms: u64) -> Self {
        Self { start_amount, end_amount, start_at, duration_ms }
    }

    /// The auction-wide taking amount at `now`, clamped to the curve's
    /// endpoints: `start_amount` before the auction opens, `end_amount`
    /// once it has run out.
    pub fn taking_amount(&self, now: u64) -> u64 {
        let t = now.clamp(self.start_at, self.start_at + self.duration_ms);
        let elapsed = (t - self.start_at) as u128;
        let left = self.duration_ms as u128 - elapsed;
        let num = self.start_amount as u128 * left + self.end_amount as u128 * elapsed;
        (num / self.duration_ms as u128) as u64
    }

    /// The minimum taking amount a resolver must submit at `now` for a fill
    /// of `making` source tokens: `ceil(T(now) * making / start_amount)`.
    pub fn expected_taking(&self, making: u64, now: u64) -> u64 {
        let num = self.taking_amount(now) as u128 * making as u128;
        num.div_ceil(self.start_amount as u128) as u64
    }

    /// Inverse of [`expected_taking`](Self::expected_taking): the largest
    /// making amount covered by `taking` destination tokens at `now`.
    pub fn making_for_taking(&self, taking: u64, now: u64) -> u64 {
        let num = self.start_amount as u128 * taking as u128;
        (num / self.taking_amount(now) as u128) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAKING: u64 = 1_000_000_000;
    const TAKING: u64 = 900_000_000;
    const T0: u64 = 5_000_000;
    const DURATION: u64 = 3_600_000;

    fn auction() -> DutchAuction {
        DutchAuction::new(MAKING, TAKING, T0, DURATION)
    }

    #[test]
    fn starts_at_making_amount() {
        assert_eq!(auction().taking_amount(T0), MAKING);
        assert_eq!(auction().expected_taking(MAKING, T0), MAKING);
    }

    #[test]
    fn ends_at_taking_amount() {
        assert_eq!(auction().taking_amount(T0 + DURATION), TAKING);
        assert_eq!(auction().taking_amount(T0 + DURATION * 10), TAKING);
        assert_eq!(auction().expected_taking(MAKING, T0 + DURATION), TAKING);
    }

    #[test]
    fn midpoint_is_strictly_between_bounds() {
        let mid = auction().taking_amount(T0 + DURATION / 2);
        assert!(mid < MAKING && mid > TAKING);
        assert_eq!(mid, (MAKING + TAKING) / 2);
    }

    #[test]
    fn clamps_before_start() {
        assert_eq!(auction().taking_amount(0), MAKING);
    }

    #[test]
    fn quarter_fill_at_expiry() {
        // 25% of the order at the end of the auction costs 25% of the
        // end-low bound.
        let expected = auction().expected_taking(MAKING / 4, T0 + DURATION);
        assert_eq!(expected, TAKING / 4);
    }

    #[test]
    fn expected_taking_rounds_up() {
        // T = 3 per 10 units of making; 1 unit must cost ceil(3/10) = 1.
        let a = DutchAuction::new(10, 3, 0, 100);
        assert_eq!(a.expected_taking(1, 100), 1);
    }

    #[test]
    fn making_for_taking_rounds_down() {
        let a = DutchAuction::new(10, 3, 0, 100);
        // At expiry T = 3: 2 taking buys floor(10 * 2 / 3) = 6 making.
        assert_eq!(a.making_for_taking(2, 100), 6);
    }

    #[test]
    fn no_overflow_at_u64_extremes() {
        let a = DutchAuction::new(u64::MAX, u64::MAX - 1, 0, u64::MAX);
        assert_eq!(a.taking_amount(0), u64::MAX);
        let _ = a.expected_taking(u64::MAX, u64::MAX / 2);
    }
}
