use std::fmt;

// ---------------------------------------------------------------------------
// Decade – derived release-era bucket
// ---------------------------------------------------------------------------

/// Bucket edges for the decade intervals: `[1920, 1930), [1930, 1940), …,
/// [2010, 2021)`. The last bucket absorbs 2020 so it spans eleven years.
pub const DECADE_EDGES: [i32; 11] = [
    1920, 1930, 1940, 1950, 1960, 1970, 1980, 1990, 2000, 2010, 2021,
];

/// Release decade of a movie, derived from its year at load time.
///
/// Years outside `[1920, 2021)` (and movies with no year at all) land in
/// [`Decade::Unknown`] rather than being dropped, so the data-quality gap
/// stays visible in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Decade {
    /// A half-open interval `[start, end)` from [`DECADE_EDGES`].
    Interval { start: i32, end: i32 },
    Unknown,
}

impl Decade {
    /// Bucket a release year. Inclusive of the lower edge, exclusive of the
    /// upper one.
    pub fn from_year(year: i32) -> Self {
        DECADE_EDGES
            .windows(2)
            .find(|w| w[0] <= year && year < w[1])
            .map(|w| Decade::Interval {
                start: w[0],
                end: w[1],
            })
            .unwrap_or(Decade::Unknown)
    }

    /// The ten known intervals, oldest first.
    pub fn intervals() -> impl Iterator<Item = Decade> {
        DECADE_EDGES.windows(2).map(|w| Decade::Interval {
            start: w[0],
            end: w[1],
        })
    }
}

impl fmt::Display for Decade {
    /// Canonical bucket label, e.g. `[1950, 1960)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decade::Interval { start, end } => write!(f, "[{start}, {end})"),
            Decade::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rating breakdown – the whitelisted columns from ratings.csv
// ---------------------------------------------------------------------------

/// One `(avg_vote, votes)` pair for a demographic cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CohortRating {
    pub avg_vote: Option<f64>,
    pub votes: Option<u64>,
}

/// Age-bracket breakdown: under 18, 18–29, 30–44, 45+. Field names mirror
/// the source column prefixes (`0age`, `18age`, `30age`, `45age`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AgeBrackets {
    pub age_0: CohortRating,
    pub age_18: CohortRating,
    pub age_30: CohortRating,
    pub age_45: CohortRating,
}

/// Per-gender ratings: the all-ages aggregate plus the age brackets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenderRatings {
    pub allages: CohortRating,
    pub ages: AgeBrackets,
}

/// A named voter group (top-1000 raters, US, non-US).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VoterGroup {
    pub rating: Option<f64>,
    pub votes: Option<u64>,
}

/// Demographic rating columns retained from the ratings file. The query
/// engine only reads the male/female all-ages averages; the rest is kept so
/// the table matches the source schema.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingBreakdown {
    pub weighted_average_vote: Option<f64>,
    pub total_votes: Option<u64>,
    pub mean_vote: Option<f64>,
    pub median_vote: Option<f64>,
    pub allgenders: AgeBrackets,
    pub males: GenderRatings,
    pub females: GenderRatings,
    pub top1000_voters: VoterGroup,
    pub us_voters: VoterGroup,
    pub non_us_voters: VoterGroup,
}

// ---------------------------------------------------------------------------
// Movie – one row of the unified table
// ---------------------------------------------------------------------------

/// A single movie after the outer join of metadata and ratings. Every field
/// except the id can be absent when the row came from only one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub imdb_title_id: String,
    pub original_title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub country: Option<String>,
    /// Overall average vote across all voters (from the metadata file).
    pub avg_vote: Option<f64>,
    /// Total vote count used for the load-time threshold filter.
    pub votes: Option<u64>,
    pub ratings: RatingBreakdown,
    pub decade: Decade,
}

// ---------------------------------------------------------------------------
// MovieTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The unified table, built once at startup and never mutated afterwards.
/// Queries borrow it and produce derived views.
#[derive(Debug, Clone, Default)]
pub struct MovieTable {
    pub movies: Vec<Movie>,
}

impl MovieTable {
    pub fn new(movies: Vec<Movie>) -> Self {
        MovieTable { movies }
    }

    /// Number of movies.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Whether any row fell outside the ten known decade buckets.
    pub fn has_unknown_decade(&self) -> bool {
        self.movies.iter().any(|m| m.decade == Decade::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decade_buckets_are_half_open() {
        assert_eq!(
            Decade::from_year(1920),
            Decade::Interval { start: 1920, end: 1930 }
        );
        assert_eq!(
            Decade::from_year(1929),
            Decade::Interval { start: 1920, end: 1930 }
        );
        assert_eq!(
            Decade::from_year(1930),
            Decade::Interval { start: 1930, end: 1940 }
        );
        // The last bucket runs through 2020 inclusive.
        assert_eq!(
            Decade::from_year(2010),
            Decade::Interval { start: 2010, end: 2021 }
        );
        assert_eq!(
            Decade::from_year(2020),
            Decade::Interval { start: 2010, end: 2021 }
        );
    }

    #[test]
    fn out_of_range_years_are_unknown() {
        assert_eq!(Decade::from_year(1919), Decade::Unknown);
        assert_eq!(Decade::from_year(2021), Decade::Unknown);
        assert_eq!(Decade::from_year(1895), Decade::Unknown);
    }

    #[test]
    fn decade_labels_use_canonical_interval_form() {
        assert_eq!(Decade::from_year(1955).to_string(), "[1950, 1960)");
        assert_eq!(Decade::from_year(2015).to_string(), "[2010, 2021)");
        assert_eq!(Decade::Unknown.to_string(), "unknown");
    }

    #[test]
    fn there_are_exactly_ten_intervals() {
        let all: Vec<Decade> = Decade::intervals().collect();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0], Decade::Interval { start: 1920, end: 1930 });
        assert_eq!(all[9], Decade::Interval { start: 2010, end: 2021 });
    }
}
