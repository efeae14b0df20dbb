//! XDR encoding/decoding for operation records.
//!
//! This module implements the network's binary operation format on top of
//! standard XDR primitives.

pub mod currency;
pub mod op;
pub mod primitives;

pub use currency::{decode_currency, encode_currency};
pub use op::{decode_operation, encode_operation};
pub use primitives::{Reader, Writer};
