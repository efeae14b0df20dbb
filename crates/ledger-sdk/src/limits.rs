//! Wire-format sizes and decoding limits.

/// Length of a raw ed25519 public key.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of the source memo and memo fields of a payment.
pub const MEMO_LEN: usize = 32;

/// Length of an ISO 4217 style currency code on the wire (zero padded).
pub const CURRENCY_CODE_LEN: usize = 4;

/// Maximum number of intermediate currencies in a payment path.
pub const MAX_PATH_LEN: usize = 5;

/// Maximum encoded size of a single operation record accepted by the decoder.
///
/// The largest body (a payment with a full path) is well under this.
pub const MAX_OPERATION_SIZE: usize = 1024;

/// Version byte prefixed to account ids in base58check addresses.
pub const VERSION_ACCOUNT_ID: u8 = 0x00;
