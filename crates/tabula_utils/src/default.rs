/// Shorthand for [`Default::default()`], handy in struct update syntax.
///
/// # Example
///
/// ```
/// use tabula_utils::default;
///
/// #[derive(Default)]
/// struct Options {
///     delimiter: u8,
///     trim: bool,
/// }
///
/// let options = Options {
///     delimiter: b';',
///     ..default()
/// };
/// assert!(!options.trim);
/// ```
#[inline(always)]
pub fn default<T: Default>() -> T {
    T::default()
}
