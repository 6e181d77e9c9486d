use crate::page::{PageInfo, Pager, window};
use crate::sort::{SortState, SortValue, sorted_by};

/// Case-insensitive substring filter on display names. An empty query keeps
/// every row.
pub fn search_filter<'a, T, N>(rows: &'a [T], query: &str, name: N) -> Vec<&'a T>
where
    N: Fn(&T) -> &str,
{
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| name(row).to_lowercase().contains(&needle))
        .collect()
}

/// One visible page of a table view, plus the pagination state derived from
/// the filtered total.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPage<T> {
    pub rows: Vec<T>,
    pub total: usize,
    pub info: PageInfo,
}

/// The composition every table screen performs: filter by the search query,
/// sort by the active column, then window to the current page.
pub fn view_window<T, K, N, F>(
    rows: &[T],
    query: &str,
    name: N,
    sort: &SortState<K>,
    key: F,
    pager: &Pager,
) -> ViewPage<T>
where
    T: Clone,
    K: PartialEq,
    N: Fn(&T) -> &str,
    F: Fn(&T, &K) -> SortValue,
{
    let filtered: Vec<T> = search_filter(rows, query, name)
        .into_iter()
        .cloned()
        .collect();
    let sorted = match &sort.key {
        Some(k) => sorted_by(&filtered, |row| key(row, k), sort.direction),
        None => filtered,
    };
    let total = sorted.len();
    ViewPage {
        rows: window(&sorted, pager.limit(), pager.skip()).to_vec(),
        total,
        info: pager.info(total),
    }
}

#[cfg(test)]
mod tests {
    use super::search_filter;

    #[test]
    fn filter_is_case_insensitive() {
        let names = ["Orlov", "PETROV", "sidorov"];
        let hits = search_filter(&names, "ROV", |n| n);
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn empty_query_keeps_everything() {
        let names = ["Orlov", "Petrov"];
        assert_eq!(search_filter(&names, "", |n| n).len(), 2);
    }

    #[test]
    fn no_match_yields_empty() {
        let names = ["Orlov"];
        assert!(search_filter(&names, "zzz", |n| n).is_empty());
    }
}
