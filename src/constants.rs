//! Protocol constants.

/// Minimum safety deposit a resolver must post on the destination side, in
/// base units of the host's native gas asset.
pub const MIN_SAFETY_DEPOSIT: u64 = 1_000_000;

/// Delay past the last cancellation deadline after which an object becomes
/// rescuable, in milliseconds (10 hours).
///
/// Rescue destroys the object and refunds any residue, so the delay must
/// outlast every stage in which an honest withdraw or cancel could still
/// land.
pub const RESCUE_DELAY_MS: u64 = 36_000_000;

/// Sentinel value of `last_used_index` meaning no partial fill has happened
/// yet.
///
/// Legal secret indices live in `[0, parts_amount]` and `parts_amount` is
/// capped below this value, so the sentinel can never collide with a real
/// index.
pub const UNUSED_INDEX: u8 = 255;

/// Minimum byte length of a secret preimage.
pub const MIN_SECRET_LEN: usize = 32;
