//! The flag list ⇄ protected integer codec.
//!
//! A protected integer is a `1` sentinel bit followed by one payload bit per
//! field, the first field in the least significant position. The sentinel
//! records how many fields were encoded, so an integer written against a
//! shorter, older field list still decodes once fields are appended; the
//! fields it does not carry get the transcoder's [`Padding`].
//!
//! ```
//! use flagpack::{Padding, Transcoder};
//!
//! let v1 = Transcoder::new(["key1", "key2", "key3"])?;
//! let stored = v1.encode([true, false, false])?;
//! assert_eq!(stored, 0b1001);
//!
//! let v2 = Transcoder::builder(["key1", "key2", "key3", "key4"])
//!     .padding(Padding::Unknown)
//!     .build()?;
//! let flags = v2.decode(stored)?;
//! assert_eq!(flags.values(), &[Some(true), Some(false), Some(false), None]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::bit::{check_capacity, determine_max_array_length, BitReader, BitWriter, ProtectedInt};
use crate::debug::{trace_decode, trace_encode, trace_rejected, trace_transcoder_built};
use crate::errors::{ConfigError, DecodeError, EncodeError};
use crate::flags::FlagMap;
use crate::padding::Padding;
use crate::traits::{AsFlag, FlagSet};

/// Encodes flag values into protected integers of type `T` and back.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Transcoder<T = u64> {
    fields: Arc<[String]>,
    padding: Padding,
    max_fields: u32,
    _repr: PhantomData<fn() -> T>,
}

/// Collects a field list and options for a [`Transcoder`].
///
/// Use this directly for storage types other than `u64`:
///
/// ```
/// use flagpack::{Transcoder, TranscoderBuilder};
///
/// let transcoder: Transcoder<i32> = TranscoderBuilder::new(["a", "b"]).build()?;
/// assert_eq!(transcoder.max_fields(), 30);
/// # Ok::<(), flagpack::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TranscoderBuilder<T = u64> {
    fields: Vec<String>,
    padding: Padding,
    max_value: Option<u128>,
    _repr: PhantomData<fn() -> T>,
}

impl<T: ProtectedInt> TranscoderBuilder<T> {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TranscoderBuilder {
            fields: fields.into_iter().map(Into::into).collect(),
            padding: Padding::default(),
            max_value: None,
            _repr: PhantomData,
        }
    }

    /// Uses the keys of a keyed structure as the field list, in iteration order.
    pub fn from_keys<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        Self::new(entries.into_iter().map(|(key, _)| key))
    }

    /// Names `len` fields by their position: `"0"`, `"1"`, ...
    pub fn positional(len: usize) -> Self {
        Self::new((0..len).map(|index| index.to_string()))
    }

    /// Field list and padding of a [`FlagSet`] type.
    pub fn for_flag_set<F: FlagSet>() -> Self {
        Self::new(F::FIELDS.iter().copied()).padding(F::PADDING)
    }

    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Largest integer the storage can hold, when narrower than `T` itself
    /// (e.g. a 32-bit column read into an `i64`).
    pub fn max_value(mut self, max_value: u128) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn build(self) -> Result<Transcoder<T>, ConfigError> {
        self.validate().map_err(|err| {
            trace_rejected("build", err.kind());
            err
        })
    }

    fn validate(self) -> Result<Transcoder<T>, ConfigError> {
        let max_value = self.max_value.unwrap_or(T::NATIVE_MAX);
        if max_value > T::NATIVE_MAX {
            return Err(ConfigError::IntegerOverflow {
                value: max_value,
                native_max: T::NATIVE_MAX,
            });
        }
        let max_fields = determine_max_array_length(max_value);
        check_field_list(&self.fields, max_fields)?;

        trace_transcoder_built(self.fields.len(), max_fields, self.padding);
        Ok(Transcoder {
            fields: self.fields.into(),
            padding: self.padding,
            max_fields,
            _repr: PhantomData,
        })
    }
}

impl Transcoder<u64> {
    /// `u64` transcoder with [`Padding::False`].
    pub fn new<I, S>(fields: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(fields).build()
    }

    pub fn builder<I, S>(fields: I) -> TranscoderBuilder<u64>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TranscoderBuilder::new(fields)
    }

    pub fn from_keys<I, K, V>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        TranscoderBuilder::from_keys(entries).build()
    }

    pub fn positional(len: usize) -> Result<Self, ConfigError> {
        TranscoderBuilder::positional(len).build()
    }

    pub fn for_flag_set<F: FlagSet>() -> Result<Self, ConfigError> {
        TranscoderBuilder::for_flag_set::<F>().build()
    }
}

impl<T: ProtectedInt> Transcoder<T> {
    /// Packs one value per field into a protected integer.
    ///
    /// The result always lies in `2^N..2^(N+1)` for `N` fields. Supplying
    /// more or fewer values than there are fields is an error.
    pub fn encode<I>(&self, values: I) -> Result<T, EncodeError>
    where
        I: IntoIterator,
        I::Item: AsFlag,
    {
        pack(BitWriter::new(self.fields.len() as u32), values)
    }

    /// Unpacks a protected integer produced against this field list or an
    /// older prefix of it.
    pub fn decode(&self, protected: T) -> Result<FlagMap, DecodeError> {
        let values = self.decode_values(protected)?;
        Ok(FlagMap::new(Arc::clone(&self.fields), values))
    }

    /// Like [`decode`](Self::decode), without the field names.
    pub fn decode_values(&self, protected: T) -> Result<Vec<Option<bool>>, DecodeError> {
        unpack(protected, self.fields.len(), self.padding)
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.fields.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Field capacity implied by the configured maximum integer value.
    pub fn max_fields(&self) -> u32 {
        self.max_fields
    }
}

/// Rejects field lists that overflow `max_fields` or repeat a name.
pub(crate) fn check_field_list<S: AsRef<str>>(fields: &[S], max_fields: u32) -> Result<(), ConfigError> {
    check_capacity(fields.len(), max_fields)?;

    let mut seen: HashSet<&str> = HashSet::with_capacity(fields.len());
    match fields.iter().map(|field| field.as_ref()).find(|field| !seen.insert(*field)) {
        Some(duplicate) => Err(ConfigError::DuplicateField(duplicate.to_string())),
        None => Ok(()),
    }
}

/// Reads at most one value past capacity, so `actual` in a length mismatch
/// is capped at `expected + 1`.
pub(crate) fn pack<T, I>(mut writer: BitWriter<T>, values: I) -> Result<T, EncodeError>
where
    T: ProtectedInt,
    I: IntoIterator,
    I::Item: AsFlag,
{
    let expected = writer.capacity() as usize;
    let mut actual = 0;
    for value in values.into_iter().take(expected + 1) {
        actual += 1;
        if actual <= expected {
            let written = writer.write(value.as_flag());
            debug_assert!(written);
        }
    }
    if actual != expected {
        let err = EncodeError::LengthMismatch { expected, actual };
        trace_rejected("encode", err.kind());
        return Err(err);
    }

    let protected = writer.finish();
    trace_encode(expected, &protected);
    Ok(protected)
}

pub(crate) fn unpack<T: ProtectedInt>(
    protected: T,
    fields: usize,
    padding: Padding,
) -> Result<Vec<Option<bool>>, DecodeError> {
    let result = BitReader::new(protected).and_then(|reader| {
        let payload_bits = reader.len() as usize;
        if payload_bits > fields {
            return Err(DecodeError::KeyArrayTooShort { payload_bits, fields });
        }

        let mut values = Vec::with_capacity(fields);
        values.extend(reader.map(Some));
        values.resize(fields, padding.fill());
        if values.len() != fields {
            return Err(DecodeError::LengthMismatch {
                expected: fields,
                actual: values.len(),
            });
        }

        trace_decode(payload_bits, fields - payload_bits, padding);
        Ok(values)
    });

    result.map_err(|err| {
        trace_rejected("decode", err.kind());
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_keys(padding: Padding) -> Transcoder {
        Transcoder::builder(["key1", "key2", "key3"]).padding(padding).build().unwrap()
    }

    #[test]
    fn first_field_is_least_significant() {
        let transcoder = three_keys(Padding::False);
        assert_eq!(transcoder.encode([false, false, false]).unwrap(), 8);
        assert_eq!(transcoder.encode([true, false, false]).unwrap(), 9);
        assert_eq!(transcoder.encode([false, false, true]).unwrap(), 12);
    }

    #[test]
    fn accepts_borrowed_and_optional_values() {
        let transcoder = three_keys(Padding::False);
        let owned = vec![true, true, false];
        assert_eq!(transcoder.encode(&owned).unwrap(), 0b1011);
        assert_eq!(transcoder.encode([Some(true), None, Some(true)]).unwrap(), 0b1101);
    }

    #[test]
    fn decode_fills_missing_fields() {
        let transcoder = Transcoder::builder(["a", "b", "c", "d"])
            .padding(Padding::True)
            .build()
            .unwrap();
        assert_eq!(
            transcoder.decode_values(0b101).unwrap(),
            vec![Some(true), Some(false), Some(true), Some(true)]
        );
    }

    #[test]
    fn max_value_narrows_capacity() {
        let transcoder: Transcoder<i64> = TranscoderBuilder::new(["a"])
            .max_value(i32::MAX as u128)
            .build()
            .unwrap();
        assert_eq!(transcoder.max_fields(), 30);
    }

    #[test]
    fn max_value_beyond_native_overflows() {
        let err = TranscoderBuilder::<u32>::new(["a"])
            .max_value(u32::MAX as u128 + 1)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::IntegerOverflow {
                value: u32::MAX as u128 + 1,
                native_max: u32::MAX as u128,
            }
        );
    }

    #[test]
    fn duplicate_fields_are_rejected() {
        let err = Transcoder::new(["a", "b", "a"]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateField("a".to_string()));
    }

    #[test]
    fn field_list_check_covers_capacity_and_names() {
        assert_eq!(check_field_list(&["a", "b"], 2), Ok(()));
        assert_eq!(
            check_field_list(&["a", "b", "c"], 2),
            Err(ConfigError::MaxLengthExceeded { fields: 3, max_fields: 2 })
        );
        assert_eq!(
            check_field_list(&["a", "b", "b"], 63),
            Err(ConfigError::DuplicateField("b".to_string()))
        );
    }

    #[test]
    fn pack_stops_reading_one_past_capacity() {
        let mut pulled = 0;
        let values = std::iter::repeat_with(|| {
            pulled += 1;
            true
        });
        let err = pack(BitWriter::<u64>::new(3), values).unwrap_err();
        assert_eq!(err, EncodeError::LengthMismatch { expected: 3, actual: 4 });
        assert_eq!(pulled, 4);
    }

    #[test]
    fn positional_fields_are_indices() {
        let transcoder = Transcoder::positional(3).unwrap();
        assert_eq!(transcoder.fields().collect::<Vec<_>>(), vec!["0", "1", "2"]);
    }

    #[test]
    fn transcoder_is_shareable() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Transcoder<u64>>();
        assert_send_sync::<Transcoder<i32>>();
    }
}
