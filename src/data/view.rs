use super::filter::filter_records;
use super::model::Record;
use super::sort::{sort_records, SortSpec};

/// Rows per table page.
pub const PAGE_SIZE: usize = 7;

/// Requested page of a paginated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page_size: usize,
    /// 1-based requested page, clamped by [`compute_view`].
    pub current_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self { page_size: PAGE_SIZE, current_page: 1 }
    }
}

impl PageState {
    /// A zero page size is raised to 1.
    pub fn new(page_size: usize, current_page: usize) -> Self {
        Self { page_size: page_size.max(1), current_page }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(page_size, 1)
    }
}

/// The visible slice of a table plus pager metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult<'a> {
    pub visible_rows: Vec<&'a Record>,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub clamped_page: usize,
    /// 1-based index of the first visible row, 0 when nothing matches.
    pub first_row: usize,
    /// 1-based index of the last visible row, 0 when nothing matches.
    pub last_row: usize,
}

impl ViewResult<'_> {
    pub fn has_prev(&self) -> bool {
        self.clamped_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.clamped_page < self.total_pages
    }
}

/// Number of pages needed for `count` rows, never less than one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Sort, then filter, then paginate.
///
/// Pure function of its inputs: the records are never mutated and an
/// out-of-range page is clamped into `1..=total_pages`.
pub fn compute_view<'a>(
    records: &'a [Record],
    sort: SortSpec,
    filter_term: &str,
    page: PageState,
) -> ViewResult<'a> {
    let page_size = page.page_size.max(1);
    let sorted = sort_records(records, sort);
    let filtered = filter_records(&sorted, filter_term);

    let total_filtered = filtered.len();
    let total_pages = total_pages(total_filtered, page_size);
    let clamped_page = page.current_page.clamp(1, total_pages);

    let start = ((clamped_page - 1) * page_size).min(total_filtered);
    let end = (clamped_page * page_size).min(total_filtered);
    let visible_rows = filtered[start..end].to_vec();

    let (first_row, last_row) = if total_filtered == 0 { (0, 0) } else { (start + 1, end) };

    log::trace!(
        "table view: {total_filtered} rows match {filter_term:?}, page {clamped_page}/{total_pages}"
    );

    ViewResult {
        visible_rows,
        total_filtered,
        total_pages,
        clamped_page,
        first_row,
        last_row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Field;
    use crate::data::sort::SortDirection;

    fn week() -> Vec<Record> {
        (1..=7)
            .map(|i| Record {
                day: format!("D{i}"),
                height: 28.0 + 3.0 * i as f64,
                biomass: 70.0 + 8.0 * i as f64,
                leaf_temp: 30.0,
                humidity: 60.0,
                growth_rate: 2.0,
            })
            .collect()
    }

    fn many(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record {
                day: format!("D{:03}", i),
                height: i as f64,
                biomass: 1.0,
                leaf_temp: 1.0,
                humidity: 1.0,
                growth_rate: 1.0,
            })
            .collect()
    }

    #[test]
    fn height_sort_then_search_finds_single_day() {
        let records = week();
        let sort = SortSpec::new(Field::Height, SortDirection::Ascending);
        let view = compute_view(&records, sort, "D3", PageState::default());
        assert_eq!(view.visible_rows.len(), 1);
        assert_eq!(view.visible_rows[0].day, "D3");
        assert_eq!(view.clamped_page, 1);
        assert_eq!(view.total_pages, 1);
        assert_eq!((view.first_row, view.last_row), (1, 1));
    }

    #[test]
    fn empty_input_gives_single_empty_page() {
        let view = compute_view(&[], SortSpec::default(), "", PageState::new(7, 3));
        assert!(view.visible_rows.is_empty());
        assert_eq!(view.total_filtered, 0);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.clamped_page, 1);
        assert_eq!((view.first_row, view.last_row), (0, 0));
        assert!(!view.has_prev());
        assert!(!view.has_next());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let records = many(15);
        let high = compute_view(&records, SortSpec::default(), "", PageState::new(7, 99));
        assert_eq!(high.total_pages, 3);
        assert_eq!(high.clamped_page, 3);
        assert_eq!(high.visible_rows.len(), 1);
        assert_eq!((high.first_row, high.last_row), (15, 15));

        let zero = compute_view(&records, SortSpec::default(), "", PageState::new(7, 0));
        assert_eq!(zero.clamped_page, 1);
        assert_eq!(zero.visible_rows.len(), 7);
    }

    #[test]
    fn pages_reassemble_filtered_sequence() {
        let records = many(23);
        let sort = SortSpec::new(Field::Height, SortDirection::Descending);
        let first = compute_view(&records, sort, "1", PageState::new(4, 1));

        let mut joined = Vec::new();
        for page in 1..=first.total_pages {
            let view = compute_view(&records, sort, "1", PageState::new(4, page));
            joined.extend(view.visible_rows);
        }

        let expected = filter_records(&sort_records(&records, sort), "1");
        assert_eq!(joined, expected);
        assert_eq!(joined.len(), first.total_filtered);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let records = many(3);
        let view = compute_view(&records, SortSpec::default(), "", PageState::new(0, 2));
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.visible_rows.len(), 1);
    }

    #[test]
    fn input_records_are_untouched() {
        let records = week();
        let before = records.clone();
        let sort = SortSpec::new(Field::Biomass, SortDirection::Descending);
        let _ = compute_view(&records, sort, "d", PageState::default());
        assert_eq!(records, before);
    }
}
