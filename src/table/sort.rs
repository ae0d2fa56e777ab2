//! Client-side sorting
//!
//! Sorting is a stable merge sort over a permutation of the input.
//! Comparisons that treat absent values and NaN as equal to everything are
//! not a total order, which the standard library sorts are allowed to reject.

use super::value::{CellValue, Record};
use std::borrow::Cow;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header indicator for the active sort column
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// The active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    pub key: String,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Compare two cell values in ascending order
///
/// Absent on either side is a tie. Text on either side compares as text.
/// Two numbers compare numerically; NaN is a tie like absent.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    if a.is_absent() || b.is_absent() {
        return Ordering::Equal;
    }

    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (CellValue::Text(x), CellValue::Text(y)) => locale_compare(x, y),
        _ => locale_compare(&a.to_string(), &b.to_string()),
    }
}

/// Case-insensitive primary ordering; on a primary tie lowercase sorts
/// before uppercase at the first differing character.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if primary != Ordering::Equal {
        return primary;
    }

    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => return x.cmp(&y),
        }
    }
    a.len().cmp(&b.len())
}

/// Records in display order for `directive`
///
/// With no directive the input is returned borrowed and untouched.
pub fn sorted_records<'a>(
    data: &'a [Record],
    directive: Option<&SortDirective>,
) -> Cow<'a, [Record]> {
    let Some(directive) = directive else {
        return Cow::Borrowed(data);
    };

    let mut order: Vec<usize> = (0..data.len()).collect();
    let mut compare = |&i: &usize, &j: &usize| -> Ordering {
        let ordering = compare_values(data[i].get(&directive.key), data[j].get(&directive.key));
        match directive.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    };
    merge_sort_by(&mut order, &mut compare);

    tracing::trace!("Sorted {} records by '{}'", data.len(), directive.key);
    Cow::Owned(order.into_iter().map(|i| data[i].clone()).collect())
}

/// Stable top-down merge sort.
///
/// Takes from the right run only when it is strictly less, so ties keep
/// their input order even when the comparator is not transitive.
fn merge_sort_by<T, F>(items: &mut [T], cmp: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return;
    }

    let mid = items.len() / 2;
    merge_sort_by(&mut items[..mid], cmp);
    merge_sort_by(&mut items[mid..], cmp);

    let mut merged = Vec::with_capacity(items.len());
    let (mut i, mut j) = (0, mid);
    while i < mid && j < items.len() {
        if cmp(&items[j], &items[i]) == Ordering::Less {
            merged.push(items[j]);
            j += 1;
        } else {
            merged.push(items[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&items[i..mid]);
    merged.extend_from_slice(&items[j..]);
    items.copy_from_slice(&merged);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[Option<&str>]) -> Vec<Record> {
        values
            .iter()
            .map(|v| match v {
                Some(s) => Record::new().with("k", *s),
                None => Record::new(),
            })
            .collect()
    }

    fn keys(records: &[Record]) -> Vec<String> {
        records.iter().map(|r| r.get("k").to_string()).collect()
    }

    #[test]
    fn no_directive_borrows_input() {
        let data = rows(&[Some("b"), Some("a")]);
        let sorted = sorted_records(&data, None);
        assert!(matches!(sorted, Cow::Borrowed(_)));
        assert_eq!(keys(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn missing_key_is_a_tie() {
        let data = rows(&[Some("b"), Some("a"), None]);
        let sorted = sorted_records(&data, Some(&SortDirective::ascending("k")));
        assert_eq!(keys(&sorted), vec!["a", "b", ""]);
    }

    #[test]
    fn numbers_sort_numerically() {
        let data: Vec<Record> = [10.0, 9.0, 100.0, -1.0]
            .into_iter()
            .map(|n| Record::new().with("k", n))
            .collect();
        let sorted = sorted_records(&data, Some(&SortDirective::ascending("k")));
        assert_eq!(keys(&sorted), vec!["-1", "9", "10", "100"]);
    }

    #[test]
    fn descending_reverses_ascending_without_ties() {
        let data = rows(&[Some("delta"), Some("alpha"), Some("Charlie"), Some("bravo")]);
        let asc = sorted_records(&data, Some(&SortDirective::ascending("k")));
        let desc = sorted_records(&data, Some(&SortDirective::descending("k")));
        let mut reversed = keys(&asc);
        reversed.reverse();
        assert_eq!(keys(&asc), vec!["alpha", "bravo", "Charlie", "delta"]);
        assert_eq!(keys(&desc), reversed);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let data: Vec<Record> = [("x", 1.0), ("y", 2.0), ("z", 1.0), ("w", 2.0)]
            .into_iter()
            .map(|(id, n)| Record::new().with("id", id).with("k", n))
            .collect();
        let ids = |records: &[Record]| -> Vec<String> {
            records.iter().map(|r| r.get("id").to_string()).collect()
        };

        let asc = sorted_records(&data, Some(&SortDirective::ascending("k")));
        assert_eq!(ids(&asc), vec!["x", "z", "y", "w"]);

        let desc = sorted_records(&data, Some(&SortDirective::descending("k")));
        assert_eq!(ids(&desc), vec!["y", "w", "x", "z"]);
    }

    #[test]
    fn nan_is_a_tie_and_other_values_still_sort() {
        let data: Vec<Record> = [3.0, 1.0, 2.0, f64::NAN]
            .into_iter()
            .map(|n| Record::new().with("k", n))
            .collect();

        let asc = sorted_records(&data, Some(&SortDirective::ascending("k")));
        assert!(matches!(asc, Cow::Owned(_)));
        assert_eq!(keys(&asc), vec!["1", "2", "3", "NaN"]);

        let desc = sorted_records(&data, Some(&SortDirective::descending("k")));
        assert_eq!(keys(&desc), vec!["3", "2", "1", "NaN"]);

        assert_eq!(
            compare_values(&CellValue::Number(f64::NAN), &CellValue::Number(1.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn text_against_number_compares_as_text() {
        assert_eq!(
            compare_values(&CellValue::Number(10.0), &CellValue::Text("9".into())),
            Ordering::Less
        );
    }

    #[test]
    fn locale_compare_is_case_insensitive_first() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("A", "a"), Ordering::Greater);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        assert_eq!(locale_compare("ab", "abc"), Ordering::Less);
    }
}
