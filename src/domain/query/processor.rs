//! Filter, sort and paginate a record set into a single result page.

use crate::domain::property::PropertyRecord;
use crate::domain::query::filter::{PropertyFilter, TextMatch};
use crate::domain::query::params::QueryParameters;
use crate::domain::query::sort::ResultSorter;

/// One page of search results. Items borrow from the scanned record set.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<'a> {
    pub items: Vec<&'a PropertyRecord>,
    /// Number of records that passed the filters, before pagination.
    pub total_count: usize,
}

impl QueryPage<'_> {
    pub fn to_owned_items(&self) -> Vec<PropertyRecord> {
        self.items.iter().map(|r| (*r).clone()).collect()
    }
}

/// Stateless search over an in-memory record set.
///
/// `process` never fails and never mutates its input, so a single processor
/// can be shared across request handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryProcessor {
    text_match: TextMatch,
}

impl QueryProcessor {
    pub fn new(text_match: TextMatch) -> Self {
        Self { text_match }
    }

    pub fn text_match(&self) -> TextMatch {
        self.text_match
    }

    pub fn process<'a>(&self, records: &'a [PropertyRecord], params: &QueryParameters) -> QueryPage<'a> {
        let filter = PropertyFilter::new(params, self.text_match);
        let mut matched: Vec<&PropertyRecord> = records.iter().filter(|r| filter.matches(r)).collect();
        let total_count = matched.len();

        ResultSorter::sort(&mut matched, &params.sort_by, params.sort_order);

        let items = matched
            .into_iter()
            .skip(params.effective_offset())
            .take(params.effective_limit())
            .collect();

        QueryPage { items, total_count }
    }
}
