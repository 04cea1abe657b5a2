use std::collections::{BTreeSet, HashMap};

use crate::record::EnrichedOccurrence;

pub struct Statistics;

impl Statistics {
    /// Record count per species, most frequent first. Records without a
    /// species are not counted.
    ///
    /// Equal counts keep the order in which each species first appears in
    /// `records`.
    pub fn species_counts<'a>(
        records: impl IntoIterator<Item = &'a EnrichedOccurrence>,
    ) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut slot: HashMap<&'a str, usize> = HashMap::new();
        for species in records.into_iter().filter_map(EnrichedOccurrence::species) {
            match slot.get(species) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    slot.insert(species, counts.len());
                    counts.push((species.to_string(), 1));
                }
            }
        }
        // `sort_by` is stable, which is what keeps first-appearance order on ties.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Sorted distinct species identifiers, skipping unidentified records.
    pub fn distinct_species<'a>(
        records: impl IntoIterator<Item = &'a EnrichedOccurrence>,
    ) -> Vec<String> {
        records
            .into_iter()
            .filter_map(EnrichedOccurrence::species)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
