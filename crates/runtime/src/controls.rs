use compute::{ALL_SPECIES, FilterCriteria, SpeciesSelection};
use foundation::YearRange;
use serde::{Deserialize, Serialize};

/// Initial year-slider value, applied regardless of the data extent.
pub const DEFAULT_YEARS: YearRange = YearRange::new(1801, 2024);

/// What the UI widgets may offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlSpec {
    /// `"all"` followed by the sorted distinct species.
    pub species_choices: Vec<String>,
    pub default_species: String,
    /// Slider bounds: observed `[min, max]` year.
    pub year_bounds: YearRange,
    pub default_years: YearRange,
}

impl ControlSpec {
    pub fn new(distinct_species: &[String], year_extent: Option<YearRange>) -> Self {
        let mut species_choices = Vec::with_capacity(distinct_species.len() + 1);
        species_choices.push(ALL_SPECIES.to_string());
        species_choices.extend(distinct_species.iter().cloned());
        Self {
            species_choices,
            default_species: ALL_SPECIES.to_string(),
            year_bounds: year_extent.unwrap_or(DEFAULT_YEARS),
            default_years: DEFAULT_YEARS,
        }
    }

    pub fn offers(&self, choice: &str) -> bool {
        self.species_choices.iter().any(|c| c == choice)
    }
}

/// Current values of the filter widgets plus the table page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub species: SpeciesSelection,
    pub years: YearRange,
    pub page: usize,
}

impl ControlState {
    pub fn initial(spec: &ControlSpec) -> Self {
        Self {
            species: SpeciesSelection::from(spec.default_species.as_str()),
            years: spec.default_years,
            page: 0,
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.species.clone(), self.years)
    }
}

/// A discrete UI input change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlEvent {
    SelectSpecies { species: String },
    SetYearRange { min: i32, max: i32 },
    SetPage { page: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    UnknownSpecies(String),
}

impl std::fmt::Display for ControlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlError::UnknownSpecies(s) => write!(f, "unknown species choice: {s:?}"),
        }
    }
}

impl std::error::Error for ControlError {}

impl ControlState {
    /// State after `event`, or an error leaving the caller's state untouched.
    ///
    /// Year ranges are ordered and clamped to the slider bounds. A species or
    /// year change returns the table to its first page.
    pub fn apply(&self, spec: &ControlSpec, event: &ControlEvent) -> Result<Self, ControlError> {
        let mut next = self.clone();
        match event {
            ControlEvent::SelectSpecies { species } => {
                if !spec.offers(species) {
                    return Err(ControlError::UnknownSpecies(species.clone()));
                }
                next.species = SpeciesSelection::from(species.as_str());
                next.page = 0;
            }
            ControlEvent::SetYearRange { min, max } => {
                next.years = YearRange::new(*min, *max).clamped_to(spec.year_bounds);
                next.page = 0;
            }
            ControlEvent::SetPage { page } => next.page = *page,
        }
        Ok(next)
    }
}
