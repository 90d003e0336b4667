//! Packs an ordered list of boolean flags into a single integer that stays
//! decodable after new flags are appended to the list.
//!
//! The integer carries a leading sentinel bit above the flag bits, so its own
//! bit length says how many flags it was encoded with. Flags added since then
//! decode to the configured [`Padding`].
//!
//! ```
//! use flagpack::FlagSet;
//!
//! #[derive(FlagSet, Debug, PartialEq)]
//! struct Features {
//!     search: bool,
//!     export: bool,
//! }
//!
//! let stored = flagpack::encode(&Features { search: true, export: false })?;
//! assert_eq!(stored, 0b101);
//!
//! #[derive(FlagSet, Debug, PartialEq)]
//! #[flags(padding = "unknown")]
//! struct FeaturesV2 {
//!     search: bool,
//!     export: bool,
//!     sharing: Option<bool>,
//! }
//!
//! let upgraded: FeaturesV2 = flagpack::decode(stored)?;
//! assert_eq!(upgraded, FeaturesV2 { search: true, export: false, sharing: None });
//! # Ok::<(), flagpack::Error>(())
//! ```

extern crate self as flagpack;

pub mod bit;
pub mod traits;
mod debug;
mod errors;
mod flags;
mod padding;
mod transcoder;
#[cfg(feature = "serde")]
mod config;

pub use bit::{determine_max_array_length, max_fields, BitReader, BitWriter, ProtectedInt};
pub use flagpack_derive::FlagSet;
pub use errors::{ConfigError, DecodeError, EncodeError, Error};
pub use flags::{FlagMap, Iter};
pub use padding::Padding;
pub use traits::{AsFlag, FlagSet};
pub use transcoder::{Transcoder, TranscoderBuilder};
#[cfg(feature = "serde")]
pub use config::TranscoderConfig;

/// Encodes a [`FlagSet`] value into a `u64` protected integer.
#[inline]
pub fn encode<F: FlagSet>(value: &F) -> Result<u64, Error> {
    transcoder::check_field_list(F::FIELDS, max_fields::<u64>())?;
    let writer = BitWriter::<u64>::new(F::FIELDS.len() as u32);
    Ok(transcoder::pack(writer, value.to_flags())?)
}

/// Decodes a `u64` protected integer into a [`FlagSet`] value, padding
/// fields the integer does not carry with `F::PADDING`.
#[inline]
pub fn decode<F: FlagSet>(protected: u64) -> Result<F, Error> {
    transcoder::check_field_list(F::FIELDS, max_fields::<u64>())?;
    let values = transcoder::unpack(protected, F::FIELDS.len(), F::PADDING)?;
    Ok(F::from_flags(&values))
}
