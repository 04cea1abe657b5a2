use foundation::YearRange;

use crate::record::EnrichedOccurrence;

pub struct TemporalAnalysis;

impl TemporalAnalysis {
    /// Observed `[min, max]` year, ignoring records without a year.
    pub fn year_extent<'a>(
        records: impl IntoIterator<Item = &'a EnrichedOccurrence>,
    ) -> Option<YearRange> {
        YearRange::extent(records.into_iter().map(|r| r.year()))
    }

    pub fn missing_years<'a>(records: impl IntoIterator<Item = &'a EnrichedOccurrence>) -> usize {
        records.into_iter().filter(|r| r.year().is_none()).count()
    }
}
