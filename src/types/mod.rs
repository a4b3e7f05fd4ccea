//! Shared settlement types.

mod asset;
pub use asset::*;

mod balance;
pub use balance::*;

mod timelocks;
pub use timelocks::*;

mod merkle;
pub use merkle::*;

mod wallet;
pub use wallet::*;

mod escrow;
pub use escrow::*;

mod events;
pub use events::*;
