use thiserror::Error;

/// Rejected transcoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("the maximum amount of fields that can be transcoded is {max_fields}, got {fields}")]
    MaxLengthExceeded { fields: usize, max_fields: u32 },
    #[error("maximum integer value {value} exceeds the native maximum {native_max}")]
    IntegerOverflow { value: u128, native_max: u128 },
    #[error("field '{0}' appears more than once in the key array")]
    DuplicateField(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("the source array has a different length than the output string: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("the key array does not have enough elements for the decoded integer: {payload_bits} payload bits, {fields} fields")]
    KeyArrayTooShort { payload_bits: usize, fields: usize },
    #[error("the passed string does not have enough elements for the key array: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("protected integers are never negative")]
    NegativeInteger,
}

/// Any failure of the [`FlagSet`](crate::FlagSet) entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ConfigError {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            ConfigError::MaxLengthExceeded { .. } => "max_length_exceeded",
            ConfigError::IntegerOverflow { .. } => "integer_overflow",
            ConfigError::DuplicateField(_) => "duplicate_field",
        }
    }
}

impl EncodeError {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            EncodeError::LengthMismatch { .. } => "length_mismatch",
        }
    }
}

impl DecodeError {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            DecodeError::KeyArrayTooShort { .. } => "key_array_too_short",
            DecodeError::LengthMismatch { .. } => "length_mismatch",
            DecodeError::NegativeInteger => "negative_integer",
        }
    }
}
