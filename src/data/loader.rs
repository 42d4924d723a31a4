use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use super::model::{
    AgeBrackets, CohortRating, Decade, GenderRatings, Movie, MovieTable, RatingBreakdown,
    VoterGroup, DECADE_EDGES,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Movie metadata file, relative to the data directory.
pub const MOVIES_FILE: &str = "movies.csv";
/// Demographic ratings file, relative to the data directory.
pub const RATINGS_FILE: &str = "ratings.csv";

/// Minimum total vote count for a movie to enter the table.
pub const MIN_VOTES: u64 = 40_000;

/// Known bad cells in the source dump, keyed by title id and applied before
/// the year column is parsed. tt8206668's year cell reads "TV Movie 2019".
const YEAR_OVERRIDES: &[(&str, i32)] = &[("tt8206668", 2019)];

/// Load the unified movie table from `data_dir`.
///
/// Reads the metadata and ratings files, full-outer-joins them on the title
/// id, drops rows below [`MIN_VOTES`], and derives the decade bucket. Any
/// failure here is fatal to startup; a partially loaded table is never
/// returned.
pub fn load(data_dir: &Path) -> Result<MovieTable> {
    let movies_path = data_dir.join(MOVIES_FILE);
    let ratings_path = data_dir.join(RATINGS_FILE);

    let movies: Vec<MovieRow> = read_rows(&movies_path)
        .with_context(|| format!("reading movie metadata from {}", movies_path.display()))?;
    let ratings: Vec<RatingRow> = read_rows(&ratings_path)
        .with_context(|| format!("reading ratings from {}", ratings_path.display()))?;

    build_table(movies, ratings)
}

// ---------------------------------------------------------------------------
// Load-time error taxonomy
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("movie {id}: year {value:?} is not a number")]
    BadYear { id: String, value: String },
    #[error(
        "join of {movies} movie rows and {ratings} rating rows left no \
         movies with at least {min_votes} votes"
    )]
    EmptyTable {
        movies: usize,
        ratings: usize,
        min_votes: u64,
    },
}

// ---------------------------------------------------------------------------
// CSV row schemas
// ---------------------------------------------------------------------------

/// Columns kept from the metadata file. Year stays a raw string until the
/// override table has been consulted. Everything else in the file is
/// ignored by serde.
#[derive(Debug, Default, Deserialize)]
struct MovieRow {
    imdb_title_id: String,
    original_title: Option<String>,
    year: Option<String>,
    director: Option<String>,
    country: Option<String>,
    avg_vote: Option<f64>,
    votes: Option<u64>,
}

/// The whitelisted columns of the ratings file: overall aggregates plus
/// `(avg_vote, votes)` pairs per gender × age-bracket cohort and per voter
/// group. All other columns in the file are dropped.
#[derive(Debug, Default, Deserialize)]
struct RatingRow {
    imdb_title_id: String,
    weighted_average_vote: Option<f64>,
    total_votes: Option<u64>,
    mean_vote: Option<f64>,
    median_vote: Option<f64>,
    allgenders_0age_avg_vote: Option<f64>,
    allgenders_0age_votes: Option<u64>,
    allgenders_18age_avg_vote: Option<f64>,
    allgenders_18age_votes: Option<u64>,
    allgenders_30age_avg_vote: Option<f64>,
    allgenders_30age_votes: Option<u64>,
    allgenders_45age_avg_vote: Option<f64>,
    allgenders_45age_votes: Option<u64>,
    males_allages_avg_vote: Option<f64>,
    males_allages_votes: Option<u64>,
    males_0age_avg_vote: Option<f64>,
    males_0age_votes: Option<u64>,
    males_18age_avg_vote: Option<f64>,
    males_18age_votes: Option<u64>,
    males_30age_avg_vote: Option<f64>,
    males_30age_votes: Option<u64>,
    males_45age_avg_vote: Option<f64>,
    males_45age_votes: Option<u64>,
    females_allages_avg_vote: Option<f64>,
    females_allages_votes: Option<u64>,
    females_0age_avg_vote: Option<f64>,
    females_0age_votes: Option<u64>,
    females_18age_avg_vote: Option<f64>,
    females_18age_votes: Option<u64>,
    females_30age_avg_vote: Option<f64>,
    females_30age_votes: Option<u64>,
    females_45age_avg_vote: Option<f64>,
    females_45age_votes: Option<u64>,
    top1000_voters_rating: Option<f64>,
    top1000_voters_votes: Option<u64>,
    us_voters_rating: Option<f64>,
    us_voters_votes: Option<u64>,
    non_us_voters_rating: Option<f64>,
    non_us_voters_votes: Option<u64>,
}

impl RatingRow {
    fn into_breakdown(self) -> RatingBreakdown {
        RatingBreakdown {
            weighted_average_vote: self.weighted_average_vote,
            total_votes: self.total_votes,
            mean_vote: self.mean_vote,
            median_vote: self.median_vote,
            allgenders: AgeBrackets {
                age_0: CohortRating {
                    avg_vote: self.allgenders_0age_avg_vote,
                    votes: self.allgenders_0age_votes,
                },
                age_18: CohortRating {
                    avg_vote: self.allgenders_18age_avg_vote,
                    votes: self.allgenders_18age_votes,
                },
                age_30: CohortRating {
                    avg_vote: self.allgenders_30age_avg_vote,
                    votes: self.allgenders_30age_votes,
                },
                age_45: CohortRating {
                    avg_vote: self.allgenders_45age_avg_vote,
                    votes: self.allgenders_45age_votes,
                },
            },
            males: GenderRatings {
                allages: CohortRating {
                    avg_vote: self.males_allages_avg_vote,
                    votes: self.males_allages_votes,
                },
                ages: AgeBrackets {
                    age_0: CohortRating {
                        avg_vote: self.males_0age_avg_vote,
                        votes: self.males_0age_votes,
                    },
                    age_18: CohortRating {
                        avg_vote: self.males_18age_avg_vote,
                        votes: self.males_18age_votes,
                    },
                    age_30: CohortRating {
                        avg_vote: self.males_30age_avg_vote,
                        votes: self.males_30age_votes,
                    },
                    age_45: CohortRating {
                        avg_vote: self.males_45age_avg_vote,
                        votes: self.males_45age_votes,
                    },
                },
            },
            females: GenderRatings {
                allages: CohortRating {
                    avg_vote: self.females_allages_avg_vote,
                    votes: self.females_allages_votes,
                },
                ages: AgeBrackets {
                    age_0: CohortRating {
                        avg_vote: self.females_0age_avg_vote,
                        votes: self.females_0age_votes,
                    },
                    age_18: CohortRating {
                        avg_vote: self.females_18age_avg_vote,
                        votes: self.females_18age_votes,
                    },
                    age_30: CohortRating {
                        avg_vote: self.females_30age_avg_vote,
                        votes: self.females_30age_votes,
                    },
                    age_45: CohortRating {
                        avg_vote: self.females_45age_avg_vote,
                        votes: self.females_45age_votes,
                    },
                },
            },
            top1000_voters: VoterGroup {
                rating: self.top1000_voters_rating,
                votes: self.top1000_voters_votes,
            },
            us_voters: VoterGroup {
                rating: self.us_voters_rating,
                votes: self.us_voters_votes,
            },
            non_us_voters: VoterGroup {
                rating: self.non_us_voters_rating,
                votes: self.non_us_voters_votes,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize().enumerate() {
        let row: T = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Join + clean + derive
// ---------------------------------------------------------------------------

/// Build the unified table from the two row sets.
///
/// Full outer join on the title id: metadata rows come first in file order,
/// rating rows without a metadata counterpart follow. Rows missing a side
/// keep `None` for its columns; in particular, rating-only rows have no
/// vote count and are dropped by the threshold filter, as in the source
/// data pipeline.
fn build_table(movies: Vec<MovieRow>, ratings: Vec<RatingRow>) -> Result<MovieTable> {
    let n_movies = movies.len();
    let n_ratings = ratings.len();

    let mut index: HashMap<String, usize> = HashMap::with_capacity(n_ratings);
    let mut slots: Vec<Option<RatingRow>> = Vec::with_capacity(n_ratings);
    for (i, row) in ratings.into_iter().enumerate() {
        index.insert(row.imdb_title_id.clone(), i);
        slots.push(Some(row));
    }

    let mut joined = Vec::with_capacity(n_movies);
    for row in movies {
        let rating = index.get(&row.imdb_title_id).and_then(|&i| slots[i].take());
        joined.push(make_movie(row, rating)?);
    }
    for row in slots.into_iter().flatten() {
        let stub = MovieRow {
            imdb_title_id: row.imdb_title_id.clone(),
            ..MovieRow::default()
        };
        joined.push(make_movie(stub, Some(row))?);
    }

    let before = joined.len();
    joined.retain(|m| m.votes.is_some_and(|v| v >= MIN_VOTES));
    let table = MovieTable::new(joined);
    if table.is_empty() {
        return Err(LoadError::EmptyTable {
            movies: n_movies,
            ratings: n_ratings,
            min_votes: MIN_VOTES,
        }
        .into());
    }

    let unknown = table
        .movies
        .iter()
        .filter(|m| m.decade == Decade::Unknown)
        .count();
    if unknown > 0 {
        log::warn!(
            "{unknown} movies have a release year outside [{}, {}) and fall in the unknown decade bucket",
            DECADE_EDGES[0],
            DECADE_EDGES[DECADE_EDGES.len() - 1],
        );
    }
    log::info!(
        "loaded {} movies ({} rows dropped below {} votes)",
        table.len(),
        before - table.len(),
        MIN_VOTES,
    );

    Ok(table)
}

fn make_movie(row: MovieRow, rating: Option<RatingRow>) -> Result<Movie> {
    let year = resolve_year(&row.imdb_title_id, row.year.as_deref())?;
    Ok(Movie {
        decade: year.map(Decade::from_year).unwrap_or(Decade::Unknown),
        imdb_title_id: row.imdb_title_id,
        original_title: row.original_title,
        director: row.director,
        year,
        country: row.country,
        avg_vote: row.avg_vote,
        votes: row.votes,
        ratings: rating.map(RatingRow::into_breakdown).unwrap_or_default(),
    })
}

/// Resolve the release year for a row: the override table wins, then the
/// raw cell must parse as an integer. A missing cell is allowed and yields
/// an unknown decade.
fn resolve_year(id: &str, raw: Option<&str>) -> Result<Option<i32>> {
    if let Some(&(_, year)) = YEAR_OVERRIDES.iter().find(|(oid, _)| *oid == id) {
        log::info!("applying year override for {id}: {year}");
        return Ok(Some(year));
    }
    match raw {
        None => Ok(None),
        Some(s) => match s.trim().parse::<i32>() {
            Ok(year) => Ok(Some(year)),
            Err(_) => Err(LoadError::BadYear {
                id: id.to_string(),
                value: s.to_string(),
            }
            .into()),
        },
    }
}
