use serde::{Deserialize, Serialize};

/// Closed calendar-year interval `[min, max]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn instant(year: i32) -> Self {
        Self {
            min: year,
            max: year,
        }
    }

    /// An absent year is never inside any range.
    pub fn contains(&self, year: Option<i32>) -> bool {
        match year {
            Some(y) => y >= self.min && y <= self.max,
            None => false,
        }
    }

    /// Orders the bounds and clamps both into `limits`.
    pub fn clamped_to(self, limits: YearRange) -> Self {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        Self {
            min: lo.clamp(limits.min, limits.max),
            max: hi.clamp(limits.min, limits.max),
        }
    }

    /// Smallest range covering every present year.
    pub fn extent(years: impl IntoIterator<Item = Option<i32>>) -> Option<Self> {
        let mut out: Option<YearRange> = None;
        for y in years.into_iter().flatten() {
            out = Some(match out {
                Some(r) => YearRange::new(r.min.min(y), r.max.max(y)),
                None => YearRange::instant(y),
            });
        }
        out
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.min, self.max)
    }
}

impl std::str::FromStr for YearRange {
    type Err = String;

    /// Parses `MIN:MAX`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(':')
            .ok_or_else(|| format!("expected MIN:MAX, got {s:?}"))?;
        let min = a
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid year {a:?}: {e}"))?;
        let max = b
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid year {b:?}: {e}"))?;
        Ok(YearRange::new(min, max))
    }
}
