//! Asset identification.

use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// Opaque, human-readable label for an asset ("WBTC", "USDC", ...).
///
/// The core never interprets the label; it is order metadata carried into
/// escrow snapshots and events. Type-level separation of balances is done
/// with marker types, not labels (see [`Balance`](crate::types::Balance)).
#[derive(Debug, Display, Clone, Eq, PartialEq, FromStr, Hash, Serialize, Deserialize)]
pub struct AssetSymbol(String);

impl AssetSymbol {
    /// Creates a new label from a string.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Borrows the label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Marker for the host's native gas asset, the denomination of all safety
/// deposits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Native {}
