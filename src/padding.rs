/// Value given to fields that an older, shorter protected integer does not carry.
///
/// `Unknown` keeps "never encoded" apart from an explicit `false`: those
/// fields decode to `None`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Padding {
    #[default]
    False,
    True,
    Unknown,
}

impl Padding {
    /// Decoded value of a padded field.
    #[inline]
    pub const fn fill(self) -> Option<bool> {
        match self {
            Padding::False => Some(false),
            Padding::True => Some(true),
            Padding::Unknown => None,
        }
    }
}

impl From<Option<bool>> for Padding {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(false) => Padding::False,
            Some(true) => Padding::True,
            None => Padding::Unknown,
        }
    }
}

impl From<bool> for Padding {
    fn from(value: bool) -> Self {
        Padding::from(Some(value))
    }
}
