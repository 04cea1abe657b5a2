use compute::EnrichedOccurrence;

/// A stateless view over the currently filtered records.
///
/// Renderers never see each other's output and never mutate the records.
pub trait ViewRenderer {
    type Artifact;

    fn render(&self, records: &[&EnrichedOccurrence]) -> Self::Artifact;
}
