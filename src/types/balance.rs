//! Typed asset balances.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// A quantity of one asset, typed by a marker so balances of different
/// assets cannot be merged or confused at compile time.
///
/// This mirrors the host's balance primitive: funds move exclusively via
/// [`split`](Self::split) / [`merge`](Self::merge) /
/// [`withdraw_all`](Self::withdraw_all), so once a balance is extracted from
/// an object, ownership transfers fully. The settlement core never clones a
/// balance; `Clone` exists so a host store can snapshot whole objects for
/// optimistic concurrency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""), transparent)]
pub struct Balance<A> {
    value: u64,
    #[serde(skip)]
    _asset: PhantomData<A>,
}

impl<A> Balance<A> {
    /// Mints a balance. Host primitive: inside the core, balances only ever
    /// come in through operation arguments.
    pub fn new(value: u64) -> Self {
        Self { value, _asset: PhantomData }
    }

    /// The empty balance.
    pub fn zero() -> Self {
        Self::new(0)
    }

    /// Current amount.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Whether the balance is empty.
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Splits `amount` off this balance, or returns `None` if the balance
    /// cannot cover it.
    #[must_use]
    pub fn split(&mut self, amount: u64) -> Option<Self> {
        let remaining = self.value.checked_sub(amount)?;
        self.value = remaining;
        Some(Self::new(amount))
    }

    /// Absorbs `other` into this balance.
    pub fn merge(&mut self, other: Self) {
        self.value += other.value;
    }

    /// Extracts the entire balance, leaving this one empty.
    #[must_use]
    pub fn withdraw_all(&mut self) -> Self {
        Self::new(std::mem::take(&mut self.value))
    }

    /// Destroys an empty balance.
    pub fn destroy_zero(self) {
        debug_assert_eq!(self.value, 0, "destroy_zero on non-empty balance");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Token {}

    #[test]
    fn split_moves_ownership() {
        let mut b: Balance<Token> = Balance::new(100);
        let part = b.split(40).unwrap();
        assert_eq!(part.value(), 40);
        assert_eq!(b.value(), 60);
    }

    #[test]
    fn split_rejects_overdraw() {
        let mut b: Balance<Token> = Balance::new(10);
        assert!(b.split(11).is_none());
        assert_eq!(b.value(), 10);
    }

    #[test]
    fn withdraw_all_empties() {
        let mut b: Balance<Token> = Balance::new(7);
        let all = b.withdraw_all();
        assert_eq!(all.value(), 7);
        assert!(b.is_zero());
        b.destroy_zero();
    }

    #[test]
    fn merge_accumulates() {
        let mut b: Balance<Token> = Balance::new(1);
        b.merge(Balance::new(2));
        assert_eq!(b.value(), 3);
    }
}
