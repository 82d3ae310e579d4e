//! History service: Past predictions with search and filters.

use std::sync::Arc;

use crate::domain::{HistoryRecord, ModelSelector, RiskLevel};
use crate::ports::PredictionApi;
use crate::PulmocheckError;

/// A page of history records.
#[derive(Debug, Clone, Default)]
pub struct HistoryPage {
    /// Records in service order (newest first)
    pub records: Vec<HistoryRecord>,
    /// Total predictions logged by the service
    pub total_count: usize,
    /// Rows the service returned that could not be interpreted
    pub skipped: usize,
}

/// Table filters. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Substring of the record id, or case-insensitive substring of the details
    pub search: String,
    pub model: Option<ModelSelector>,
    pub risk: Option<RiskLevel>,
}

impl HistoryFilter {
    #[must_use]
    pub fn matches(&self, record: &HistoryRecord) -> bool {
        let term = self.search.trim();
        let matches_search = term.is_empty()
            || record.id.contains(term)
            || record
                .result
                .details
                .to_lowercase()
                .contains(&term.to_lowercase());

        let matches_model = self
            .model
            .map_or(true, |m| record.result.model == m.as_str());

        let matches_risk = self
            .risk
            .map_or(true, |level| record.result.risk_level() == level);

        matches_search && matches_model && matches_risk
    }

    /// Records passing the filter, in input order.
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [HistoryRecord]) -> Vec<&'a HistoryRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Step the model filter: all → each model → all.
    pub fn cycle_model(&mut self) {
        self.model = match self.model {
            None => Some(ModelSelector::ALL[0]),
            Some(m) if m == ModelSelector::ALL[ModelSelector::ALL.len() - 1] => None,
            Some(m) => Some(m.next()),
        };
    }

    /// Step the risk filter: all → low → moderate → high → all.
    pub fn cycle_risk(&mut self) {
        self.risk = match self.risk {
            None => Some(RiskLevel::Low),
            Some(RiskLevel::Low) => Some(RiskLevel::Moderate),
            Some(RiskLevel::Moderate) => Some(RiskLevel::High),
            Some(RiskLevel::High) => None,
        };
    }
}

/// Service for loading prediction history.
pub struct HistoryService<A>
where
    A: PredictionApi,
{
    api: Arc<A>,
    limit: usize,
}

impl<A> HistoryService<A>
where
    A: PredictionApi,
{
    /// Create a history service fetching up to `limit` rows.
    pub fn new(api: Arc<A>, limit: usize) -> Self {
        Self { api, limit }
    }

    /// Fetch the most recent predictions.
    ///
    /// Rows that cannot be interpreted are skipped and counted.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub fn load(&self) -> Result<HistoryPage, PulmocheckError> {
        let raw = self.api.history(self.limit)?;

        let mut page = HistoryPage {
            total_count: raw.total_count,
            ..HistoryPage::default()
        };
        for entry in raw.predictions {
            match entry.into_record() {
                Ok(record) => page.records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping history entry: {}", e);
                    page.skipped += 1;
                }
            }
        }

        tracing::info!(
            "Loaded {} history records ({} skipped, {} total on server)",
            page.records.len(),
            page.skipped,
            page.total_count
        );
        Ok(page)
    }
}
