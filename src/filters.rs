//! Pure predicates for matching a single filter expression against one value.
//!
//! These back both the saved search interpreter and the ad-hoc column filters
//! of the review app.  The "no constraint" rules are asymmetric on purpose:
//! a trivial range expression matches everything (even a missing value), but
//! a non-trivial range expression never matches a missing value, while the
//! substring predicate treats a missing value as satisfied.

/// Determine whether `value` passes the compact range expression `filter`.
///
/// Supported forms are `N` (exact), `N-` (at least), `-N` (at most), and
/// `A-B` (inclusive both ends).  `None`, the empty string, and a lone `-`
/// impose no constraint.  Decimal expressions such as `0.01-0.1` are
/// supported.
pub fn passes_range(filter: Option<&str>, value: Option<f64>) -> bool {
    let filter = match filter {
        Some(filter) => filter.trim(),
        None => return true,
    };
    if filter.is_empty() || filter == "-" {
        return true;
    }
    // From here on the expression is non-trivial, so a missing value can
    // never satisfy it.
    let value = match value {
        Some(value) => value,
        None => return false,
    };

    match filter.split_once('-') {
        None => filter
            .parse::<f64>()
            .map(|exact| value == exact)
            .unwrap_or(false),
        Some((low, high)) => {
            let pass_low = match low.trim() {
                "" => true,
                low => match low.parse::<f64>() {
                    Ok(low) => value >= low,
                    Err(_) => false,
                },
            };
            let pass_high = match high.trim() {
                "" => true,
                high => match high.parse::<f64>() {
                    Ok(high) => value <= high,
                    Err(_) => false,
                },
            };
            pass_low && pass_high
        }
    }
}

/// Determine whether `value` contains `filter`, ignoring case.
///
/// A trivial filter matches everything; so does a missing or empty value
/// (there is nothing to reject then).
pub fn passes_contains(filter: Option<&str>, value: Option<&str>) -> bool {
    let filter = match filter {
        Some(filter) if !filter.is_empty() => filter,
        _ => return true,
    };
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => return true,
    };
    value.to_lowercase().contains(&filter.to_lowercase())
}

/// Determine whether `value` is a member of `selected`.
///
/// A missing or empty selection imposes no constraint.
pub fn passes_set<T: PartialEq>(selected: Option<&[T]>, value: &T) -> bool {
    match selected {
        Some(selected) if !selected.is_empty() => selected.contains(value),
        _ => true,
    }
}
