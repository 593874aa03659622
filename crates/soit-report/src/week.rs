//! Natural ordering of week labels.
//!
//! Week labels are free text (`"Week 3"`, `"W10"`, `"3"`), so ordering uses
//! the first run of digits in the label rather than string comparison.

/// First contiguous run of ASCII digits in the label, as an integer.
///
/// Returns `None` when the label has no digits or the run does not fit in a
/// `u64`.
pub fn week_number(label: &str) -> Option<u64> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    let rest = &label[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Sort key for a week label; labels without a usable number sort as 0.
pub fn week_sort_key(label: &str) -> u64 {
    week_number(label).unwrap_or(0)
}

/// Sorts week labels in place by [`week_sort_key`].
///
/// The sort is stable: labels with equal keys keep their relative order.
pub fn sort_weeks<S: AsRef<str>>(labels: &mut [S]) {
    labels.sort_by_key(|label| week_sort_key(label.as_ref()));
}
