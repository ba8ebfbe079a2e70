use std::collections::BTreeSet;

use chrono::{DateTime, Days, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;

use super::transcription::Transcription;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Yesterday,
    Week,
    Month,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateRange {
    /// Half-open `[from, until)` bounds relative to `now`. Either side may be open.
    pub fn bounds(&self, now: DateTime<Utc>) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let start_of_today = now.date_naive().and_time(NaiveTime::MIN).and_utc();

        match self {
            DateRange::All => (None, None),
            DateRange::Today => (Some(start_of_today), None),
            DateRange::Yesterday => (
                Some(start_of_today - TimeDelta::days(1)),
                Some(start_of_today),
            ),
            DateRange::Week => (Some(start_of_today - TimeDelta::days(7)), None),
            DateRange::Month => (
                Some(
                    start_of_today
                        .checked_sub_months(Months::new(1))
                        .unwrap_or(start_of_today),
                ),
                None,
            ),
            DateRange::Custom { start, end } => {
                let from = start.map(|d| d.and_time(NaiveTime::MIN).and_utc());
                // End date is inclusive through the last millisecond of the day.
                let until = end.and_then(|d| {
                    d.checked_add_days(Days::new(1))
                        .map(|next| next.and_time(NaiveTime::MIN).and_utc())
                });
                (from, until)
            }
        }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let (from, until) = self.bounds(now);
        from.is_none_or(|f| timestamp >= f) && until.is_none_or(|u| timestamp < u)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub search: Option<String>,
    pub language: Option<String>,
    pub range: DateRange,
    pub offset: usize,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub items: Vec<Transcription>,
    pub total: usize,
    pub filtered: usize,
    pub available_languages: Vec<String>,
}

impl HistoryQuery {
    pub fn matches(&self, entry: &Transcription, now: DateTime<Utc>) -> bool {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let search_hit = search.is_none_or(|needle| {
            entry.text.to_lowercase().contains(&needle)
                || entry.file_name.to_lowercase().contains(&needle)
        });

        let language_hit = match self.language.as_deref().filter(|l| !l.is_empty()) {
            None => true,
            Some(wanted) => entry.language.as_deref() == Some(wanted),
        };

        search_hit && language_hit && self.range.contains(entry.timestamp, now)
    }

    /// Filters newest-first `entries` and slices the requested page.
    pub fn apply(&self, entries: Vec<Transcription>, now: DateTime<Utc>) -> HistoryPage {
        let total = entries.len();
        let available_languages: BTreeSet<String> =
            entries.iter().filter_map(|e| e.language.clone()).collect();

        let matching: Vec<Transcription> = entries
            .into_iter()
            .filter(|entry| self.matches(entry, now))
            .collect();
        let filtered = matching.len();

        let items = matching
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();

        HistoryPage {
            items,
            total,
            filtered,
            available_languages: available_languages.into_iter().collect(),
        }
    }
}
