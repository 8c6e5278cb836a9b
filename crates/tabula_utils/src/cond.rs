//! Pick between values by a condition.
//!
//! These read better than an `if` expression when passed inline, and
//! [`first_non_empty`] covers the common "first configured value" chain.

/// Return `if_true` when `cond` holds, `if_false` otherwise.
///
/// Both values are evaluated; see [`select_with`] to evaluate only one.
///
/// ```
/// use tabula_utils::cond::select;
///
/// assert_eq!(select(true, "csv", "json"), "csv");
/// assert_eq!(select(false, 1, 2), 2);
/// ```
#[inline]
pub fn select<T>(cond: bool, if_true: T, if_false: T) -> T {
    if cond { if_true } else { if_false }
}

/// Call `if_true` when `cond` holds, `if_false` otherwise, and return the
/// result. Only the chosen closure runs.
#[inline]
pub fn select_with<T>(cond: bool, if_true: impl FnOnce() -> T, if_false: impl FnOnce() -> T) -> T {
    if cond { if_true() } else { if_false() }
}

/// Run `if_true` when `cond` holds, `if_false` otherwise.
#[inline]
pub fn select_run(cond: bool, if_true: impl FnOnce(), if_false: impl FnOnce()) {
    if cond { if_true() } else { if_false() }
}

/// Return the first value that differs from `T::default()`, or the default
/// if there is none.
///
/// ```
/// use tabula_utils::cond::first_non_empty;
///
/// assert_eq!(first_non_empty(["", "out.csv", "fallback.csv"]), "out.csv");
/// assert_eq!(first_non_empty([0, 0]), 0);
/// ```
pub fn first_non_empty<T, I>(values: I) -> T
where
    T: Default + PartialEq,
    I: IntoIterator<Item = T>,
{
    let zero = T::default();
    values.into_iter().find(|value| *value != zero).unwrap_or(zero)
}
