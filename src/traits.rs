use crate::padding::Padding;

/// Boolean coercion of the values handed to `encode`. `None` is falsy.
pub trait AsFlag {
    fn as_flag(&self) -> bool;
}

impl AsFlag for bool {
    #[inline(always)]
    fn as_flag(&self) -> bool {
        *self
    }
}

impl AsFlag for Option<bool> {
    #[inline(always)]
    fn as_flag(&self) -> bool {
        self.unwrap_or(false)
    }
}

impl<T: AsFlag + ?Sized> AsFlag for &T {
    #[inline(always)]
    fn as_flag(&self) -> bool {
        (**self).as_flag()
    }
}

/// A type whose fields form an ordered flag list.
///
/// Usually derived:
///
/// ```
/// use flagpack::FlagSet;
///
/// #[derive(FlagSet)]
/// #[flags(padding = "true")]
/// struct Features {
///     dark_mode: bool,
///     beta: Option<bool>,
/// }
///
/// assert_eq!(Features::FIELDS, &["dark_mode", "beta"]);
/// ```
pub trait FlagSet: Sized {
    /// Field names, lowest payload bit first.
    const FIELDS: &'static [&'static str];
    const PADDING: Padding = Padding::False;

    /// One value per entry of `FIELDS`.
    fn to_flags(&self) -> Vec<bool>;

    /// Builds the value from one decoded entry per field of `FIELDS`.
    fn from_flags(values: &[Option<bool>]) -> Self;
}
