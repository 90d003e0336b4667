use std::fmt::{Debug, Display, Formatter};
use crate::errors::{ConfigError, DecodeError};

mod private {
    pub trait Sealed {}
}

/// A native integer type that can hold a protected integer.
///
/// The binary form of a protected integer is a `1` sentinel bit followed by
/// the payload bits, so an integer type with `BITS` bits (`BITS - 1` for
/// signed types) carries at most one payload bit fewer than that.
pub trait ProtectedInt: Copy + Eq + Ord + Debug + Display + private::Sealed {
    /// Width of the type in bits.
    const BITS: u32;
    /// Largest value of the type, widened.
    const NATIVE_MAX: u128;
    const ZERO: Self;

    fn is_negative(self) -> bool;

    /// Number of significant binary digits. Zero for zero.
    fn bit_length(self) -> u32;

    fn bit(self, index: u32) -> bool;

    fn with_bit(self, index: u32) -> Self;
}

macro_rules! impl_protected_int {
    (@common $ty:ty) => {
        const BITS: u32 = <$ty>::BITS;
        const NATIVE_MAX: u128 = <$ty>::MAX as u128;
        const ZERO: Self = 0;

        #[inline(always)]
        fn bit_length(self) -> u32 {
            Self::BITS - self.leading_zeros()
        }

        #[inline(always)]
        fn bit(self, index: u32) -> bool {
            (self >> index) & 1 == 1
        }

        #[inline(always)]
        fn with_bit(self, index: u32) -> Self {
            self | (1 << index)
        }
    };
    (unsigned: $($ty:ty),*) => {
        $(
            impl private::Sealed for $ty {}

            impl ProtectedInt for $ty {
                impl_protected_int!(@common $ty);

                #[inline(always)]
                fn is_negative(self) -> bool {
                    false
                }
            }
        )*
    };
    (signed: $($ty:ty),*) => {
        $(
            impl private::Sealed for $ty {}

            impl ProtectedInt for $ty {
                impl_protected_int!(@common $ty);

                #[inline(always)]
                fn is_negative(self) -> bool {
                    self < 0
                }
            }
        )*
    };
}

impl_protected_int!(unsigned: u8, u16, u32, u64, u128);
impl_protected_int!(signed: i8, i16, i32, i64, i128);

/// Maximum number of fields that fit in an integer column whose largest value is `max_value`.
///
/// One bit of the binary representation is reserved for the sentinel. Zero is
/// written as the single digit `0`, so it leaves room for no fields.
///
/// ```
/// use flagpack::determine_max_array_length;
///
/// assert_eq!(determine_max_array_length(u64::MAX as u128), 63);
/// assert_eq!(determine_max_array_length(i64::MAX as u128), 62);
/// assert_eq!(determine_max_array_length(i32::MAX as u128), 30);
/// assert_eq!(determine_max_array_length(0), 0);
/// ```
#[inline]
pub const fn determine_max_array_length(max_value: u128) -> u32 {
    let digits = u128::BITS - max_value.leading_zeros();
    if digits == 0 {
        0
    } else {
        digits - 1
    }
}

/// Field capacity of `T` at its native maximum.
#[inline]
pub const fn max_fields<T: ProtectedInt>() -> u32 {
    determine_max_array_length(T::NATIVE_MAX)
}

/// Appends payload bits, least significant first, then seals them with the sentinel.
pub struct BitWriter<T> {
    value: T,
    len: u32,
    capacity: u32,
}

/// Fails when `fields` does not fit under `max_fields`.
pub(crate) fn check_capacity(fields: usize, max_fields: u32) -> Result<u32, ConfigError> {
    match u32::try_from(fields) {
        Ok(fields) if fields <= max_fields => Ok(fields),
        _ => Err(ConfigError::MaxLengthExceeded { fields, max_fields }),
    }
}

impl<T: ProtectedInt> BitWriter<T> {
    /// Creates a writer for exactly `capacity` payload bits.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity, max_fields::<T>()).map(Self::new)
    }

    /// `capacity` must not exceed `max_fields::<T>()`.
    #[inline]
    pub(crate) fn new(capacity: u32) -> Self {
        debug_assert!(capacity <= max_fields::<T>());
        BitWriter {
            value: T::ZERO,
            len: 0,
            capacity,
        }
    }

    /// Appends one payload bit. Returns `false`, writing nothing, once the writer is full.
    #[inline(always)]
    pub fn write(&mut self, bit: bool) -> bool {
        if self.len >= self.capacity {
            return false;
        }
        if bit {
            self.value = self.value.with_bit(self.len);
        }
        self.len += 1;
        true
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Places the sentinel directly above the last written bit.
    #[inline]
    pub fn finish(self) -> T {
        self.value.with_bit(self.len)
    }
}

impl<T: ProtectedInt> Debug for BitWriter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut bits = String::with_capacity(self.len as usize);
        for index in (0..self.len).rev() {
            bits.push(if self.value.bit(index) { '1' } else { '0' });
        }
        write!(f, "BitWriter {{\n\tbits: [{}],\n\tcapacity: {}\n}}", bits, self.capacity)
    }
}

/// Strips the sentinel from a protected integer and yields its payload bits in field order.
pub struct BitReader<T> {
    value: T,
    len: u32,
    position: u32,
}

impl<T: ProtectedInt> BitReader<T> {
    pub fn new(protected: T) -> Result<Self, DecodeError> {
        if protected.is_negative() {
            return Err(DecodeError::NegativeInteger);
        }
        Ok(BitReader {
            value: protected,
            len: protected.bit_length().saturating_sub(1),
            position: 0,
        })
    }

    /// Number of payload bits the integer carries.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: ProtectedInt> Iterator for BitReader<T> {
    type Item = bool;

    #[inline(always)]
    fn next(&mut self) -> Option<bool> {
        if self.position >= self.len {
            return None;
        }
        let bit = self.value.bit(self.position);
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.position) as usize;
        (remaining, Some(remaining))
    }
}

impl<T: ProtectedInt> ExactSizeIterator for BitReader<T> {}

impl<T: ProtectedInt> Debug for BitReader<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BitReader {{\n\tvalue: {},\n\tpayload_bits: {},\n\tposition: {}\n}}",
            self.value, self.len, self.position
        )
    }
}
