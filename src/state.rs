use crate::data::model::{Decade, MovieTable};
use crate::data::query::{query, Cohort, DecadeFilter, QueryResult, RankDirection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The table is loaded once and owned here; every dropdown change re-runs
/// the query against it and replaces `result`. Nothing ever writes to the
/// table itself.
pub struct AppState {
    /// The unified movie table, immutable after load.
    pub table: MovieTable,

    /// Current dropdown selections.
    pub rank: RankDirection,
    pub cohort: Cohort,
    pub decade: DecadeFilter,

    /// Result of the query for the current selections (cached).
    pub result: QueryResult,
}

impl AppState {
    /// Build the initial state with the original dashboard defaults:
    /// best rated, males and females, all decades.
    pub fn new(table: MovieTable) -> Self {
        let rank = RankDirection::Best;
        let cohort = Cohort::Combined;
        let decade = DecadeFilter::All;
        let result = query(&table, rank, cohort, decade);
        Self {
            table,
            rank,
            cohort,
            decade,
            result,
        }
    }

    /// Re-run the query after a selection change.
    pub fn refresh(&mut self) {
        self.result = query(&self.table, self.rank, self.cohort, self.decade);
    }

    /// Options for the decade dropdown. The unknown bucket is only offered
    /// when the table actually contains unknown-decade rows.
    pub fn decade_options(&self) -> Vec<DecadeFilter> {
        let mut options = vec![DecadeFilter::All];
        options.extend(Decade::intervals().map(DecadeFilter::Only));
        if self.table.has_unknown_decade() {
            options.push(DecadeFilter::Only(Decade::Unknown));
        }
        options
    }
}
