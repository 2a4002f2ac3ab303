use crate::data::model::{Field, PlantDataset, Record};
use crate::data::sort::SortSpec;
use crate::data::view::{compute_view, total_pages, PageState, ViewResult, PAGE_SIZE};

// ---------------------------------------------------------------------------
// Table state
// ---------------------------------------------------------------------------

/// Sort, search and page of one data table, independent of rendering.
///
/// The table engine itself is stateless; a view owns one of these and feeds
/// it to [`compute_view`] after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub sort: SortSpec,
    pub search: String,
    pub page: PageState,
    /// Record count of the last dataset seen, to detect a dataset change.
    observed_len: Option<usize>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }
}

impl TableState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            sort: SortSpec::default(),
            search: String::new(),
            page: PageState::first(page_size),
            observed_len: None,
        }
    }

    /// Header click: flip or switch the sort column and go back to page 1.
    pub fn toggle_sort(&mut self, field: Field) {
        self.sort = self.sort.toggle(field);
        self.reset_page();
    }

    /// New search term; always returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.reset_page();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page.current_page = page.max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page.current_page = self.page.current_page.saturating_add(1).min(total_pages.max(1));
    }

    pub fn prev_page(&mut self) {
        self.page.current_page = self.page.current_page.saturating_sub(1).max(1);
    }

    /// Reset to page 1 when the incoming record count changed.
    pub fn observe_len(&mut self, len: usize) {
        if self.observed_len != Some(len) {
            if self.observed_len.is_some() {
                log::debug!("table input changed to {len} rows, back to page 1");
            }
            self.observed_len = Some(len);
            self.reset_page();
        }
    }

    /// Compute the visible page for `records`.
    pub fn view<'a>(&mut self, records: &'a [Record]) -> ViewResult<'a> {
        self.observe_len(records.len());
        let view = compute_view(records, self.sort, &self.search, self.page);
        // Keep the stored page in range so "next" after a clamp behaves.
        self.page.current_page = view.clamped_page;
        view
    }

    /// Pages available for `count` filtered rows at this table's page size.
    pub fn total_pages(&self, count: usize) -> usize {
        total_pages(count, self.page.page_size)
    }

    fn reset_page(&mut self) {
        self.page.current_page = 1;
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Selected plant plus the state of its daily-data table.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub selected_plant: String,
    pub table: TableState,
}

impl DashboardState {
    /// Start on `preferred` if the dataset has it, else on the first plant.
    pub fn new(dataset: &PlantDataset, preferred: Option<&str>, page_size: usize) -> Self {
        let selected_plant = preferred
            .and_then(|id| dataset.find(id))
            .or_else(|| dataset.default_plant())
            .map(|p| p.id.clone())
            .unwrap_or_default();
        Self {
            selected_plant,
            table: TableState::with_page_size(page_size),
        }
    }

    /// Switch plants; the table keeps its sort and search but restarts at page 1.
    pub fn select_plant(&mut self, plant_id: impl Into<String>) {
        let plant_id = plant_id.into();
        if plant_id != self.selected_plant {
            self.selected_plant = plant_id;
            self.table.reset_page();
        }
    }

    /// Daily records of the selected plant (default plant if unknown).
    pub fn records<'a>(&self, dataset: &'a PlantDataset) -> &'a [Record] {
        dataset
            .find_or_default(&self.selected_plant)
            .map(|p| p.daily_data.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Plant, PlantMetrics};
    use crate::data::sort::SortDirection;

    fn records(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| Record {
                day: format!("D{i}"),
                height: i as f64,
                biomass: 1.0,
                leaf_temp: 1.0,
                humidity: 1.0,
                growth_rate: 1.0,
            })
            .collect()
    }

    #[test]
    fn sorting_and_searching_reset_page() {
        let rows = records(20);
        let mut state = TableState::default();
        state.view(&rows);
        state.set_page(3);
        state.toggle_sort(Field::Height);
        assert_eq!(state.page.current_page, 1);
        assert_eq!(state.sort, SortSpec::new(Field::Height, SortDirection::Ascending));

        state.set_page(2);
        state.set_search("D1");
        assert_eq!(state.page.current_page, 1);
    }

    #[test]
    fn changed_record_count_resets_page() {
        let mut state = TableState::default();
        let long = records(20);
        state.view(&long);
        state.set_page(3);
        assert_eq!(state.view(&long).clamped_page, 3);

        let short = records(10);
        assert_eq!(state.view(&short).clamped_page, 1);
    }

    #[test]
    fn paging_stays_in_range() {
        let rows = records(15);
        let mut state = TableState::default();
        let total = state.view(&rows).total_pages;
        assert_eq!(total, 3);
        state.prev_page();
        assert_eq!(state.page.current_page, 1);
        for _ in 0..5 {
            state.next_page(total);
        }
        assert_eq!(state.page.current_page, 3);
        assert_eq!(state.view(&rows).visible_rows.len(), 1);
    }

    #[test]
    fn next_page_from_the_largest_page_does_not_overflow() {
        let mut state = TableState::default();
        state.set_page(usize::MAX);
        state.next_page(usize::MAX);
        assert_eq!(state.page.current_page, usize::MAX);
        state.next_page(4);
        assert_eq!(state.page.current_page, 4);
    }

    #[test]
    fn dashboard_falls_back_to_first_plant() {
        let plant = |id: &str, n: usize| Plant {
            id: id.into(),
            name: id.into(),
            metrics: PlantMetrics::default(),
            daily_data: records(n),
        };
        let ds = PlantDataset::new(vec![plant("plant-1", 7), plant("plant-2", 3)]);

        let mut dash = DashboardState::new(&ds, Some("plant-7"), PAGE_SIZE);
        assert_eq!(dash.selected_plant, "plant-1");

        dash.table.set_page(2);
        dash.select_plant("plant-2");
        assert_eq!(dash.table.page.current_page, 1);
        assert_eq!(dash.records(&ds).len(), 3);

        dash.select_plant("missing");
        assert_eq!(dash.records(&ds).len(), 7);
    }
}
