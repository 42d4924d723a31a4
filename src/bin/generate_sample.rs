//! Generate a synthetic `data/movies.csv` + `data/ratings.csv` pair for
//! trying the dashboard without the real IMDb dump. Deterministic: the same
//! seed always produces the same files.

use std::fs;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const ADJECTIVES: [&str; 10] = [
    "Silent", "Broken", "Golden", "Crimson", "Distant", "Hidden", "Midnight", "Burning",
    "Forgotten", "Electric",
];
const NOUNS: [&str; 10] = [
    "River", "Empire", "Horizon", "Garden", "Shadow", "Station", "Summer", "Letter", "City",
    "Voyage",
];
const DIRECTORS: [&str; 8] = [
    "A. Kaplan", "M. Ferreira", "J. Okafor", "L. Bianchi", "S. Lindqvist", "R. Tanaka",
    "C. Delacroix", "P. Novak",
];
const COUNTRIES: [&str; 7] = [
    "USA", "Italy", "France", "Japan", "UK", "Sweden", "India",
];
const GENRES: [&str; 5] = ["Drama", "Comedy", "Thriller", "Romance", "Adventure"];

fn clamp_vote(v: f64) -> f64 {
    v.clamp(1.0, 9.9)
}

fn main() {
    let mut rng = SimpleRng::new(42);

    fs::create_dir_all("data").expect("Failed to create data directory");

    let mut movies =
        csv::Writer::from_path("data/movies.csv").expect("Failed to create movies.csv");
    let mut ratings =
        csv::Writer::from_path("data/ratings.csv").expect("Failed to create ratings.csv");

    // The movies file carries extra columns (genre, duration) that the
    // loader is expected to ignore.
    movies
        .write_record([
            "imdb_title_id",
            "original_title",
            "year",
            "genre",
            "duration",
            "director",
            "country",
            "avg_vote",
            "votes",
        ])
        .expect("Failed to write movies header");
    ratings
        .write_record([
            "imdb_title_id",
            "weighted_average_vote",
            "total_votes",
            "mean_vote",
            "median_vote",
            "allgenders_0age_avg_vote",
            "allgenders_0age_votes",
            "allgenders_18age_avg_vote",
            "allgenders_18age_votes",
            "allgenders_30age_avg_vote",
            "allgenders_30age_votes",
            "allgenders_45age_avg_vote",
            "allgenders_45age_votes",
            "males_allages_avg_vote",
            "males_allages_votes",
            "males_0age_avg_vote",
            "males_0age_votes",
            "males_18age_avg_vote",
            "males_18age_votes",
            "males_30age_avg_vote",
            "males_30age_votes",
            "males_45age_avg_vote",
            "males_45age_votes",
            "females_allages_avg_vote",
            "females_allages_votes",
            "females_0age_avg_vote",
            "females_0age_votes",
            "females_18age_avg_vote",
            "females_18age_votes",
            "females_30age_avg_vote",
            "females_30age_votes",
            "females_45age_avg_vote",
            "females_45age_votes",
            "top1000_voters_rating",
            "top1000_voters_votes",
            "us_voters_rating",
            "us_voters_votes",
            "non_us_voters_rating",
            "non_us_voters_votes",
        ])
        .expect("Failed to write ratings header");

    let mut n_movies = 0u32;
    let mut n_ratings = 0u32;
    let mut id = 0u32;

    // 20 movies per decade, 1920 through 2020.
    for decade_start in (1920..=2010).step_by(10) {
        for slot in 0..20 {
            id += 1;
            // Plant the known malformed-year record the loader overrides.
            let title_id = if decade_start == 2010 && slot == 0 {
                "tt8206668".to_string()
            } else {
                format!("tt{id:07}")
            };
            let span: u64 = if decade_start == 2010 { 11 } else { 10 };
            let year = decade_start + rng.range(0, span) as i32;
            let title = format!("The {} {}", rng.pick(&ADJECTIVES), rng.pick(&NOUNS));
            let avg = clamp_vote(rng.gauss(6.2, 1.4));
            // Roughly one in four movies stays below the 40k vote cut.
            let votes = if rng.next_f64() < 0.25 {
                rng.range(1_000, 40_000)
            } else {
                rng.range(40_000, 900_000)
            };

            // The malformed-year row that the loader's override table fixes.
            let year_cell = if title_id == "tt8206668" {
                "TV Movie 2019".to_string()
            } else {
                year.to_string()
            };

            let duration = rng.range(70, 200).to_string();
            let avg_cell = format!("{avg:.1}");
            let votes_cell = votes.to_string();
            movies
                .write_record([
                    title_id.as_str(),
                    title.as_str(),
                    year_cell.as_str(),
                    rng.pick(&GENRES),
                    duration.as_str(),
                    rng.pick(&DIRECTORS),
                    rng.pick(&COUNTRIES),
                    avg_cell.as_str(),
                    votes_cell.as_str(),
                ])
                .expect("Failed to write movie row");
            n_movies += 1;

            // A few movies have no ratings row at all (outer-join case).
            if rng.next_f64() < 0.05 {
                continue;
            }

            let males = clamp_vote(avg + rng.gauss(0.0, 0.25));
            let females = clamp_vote(avg + rng.gauss(0.0, 0.25));
            let male_votes = votes * 6 / 10;
            let female_votes = votes - male_votes;

            let mut row: Vec<String> = vec![
                title_id.clone(),
                format!("{avg:.1}"),
                votes.to_string(),
                format!("{:.1}", clamp_vote(avg + rng.gauss(0.0, 0.1))),
                format!("{:.1}", (avg * 2.0).round() / 2.0),
            ];
            // allgenders age brackets: 0 / 18 / 30 / 45, splitting the
            // total vote count 5% / 40% / 35% / 20%.
            for share in [5u64, 40, 35, 20] {
                row.push(format!("{:.1}", clamp_vote(avg + rng.gauss(0.0, 0.3))));
                row.push((votes * share / 100).to_string());
            }
            for (gender_avg, gender_votes) in [(males, male_votes), (females, female_votes)] {
                row.push(format!("{gender_avg:.1}"));
                row.push(gender_votes.to_string());
                for share in [5u64, 40, 35, 20] {
                    row.push(format!(
                        "{:.1}",
                        clamp_vote(gender_avg + rng.gauss(0.0, 0.3))
                    ));
                    row.push((gender_votes * share / 100).to_string());
                }
            }
            // top1000 / us / non-us voter groups.
            let us_votes = votes / 3;
            for (group_avg, group_votes) in [
                (clamp_vote(avg + rng.gauss(0.0, 0.4)), 1_000u64),
                (clamp_vote(avg + rng.gauss(0.0, 0.2)), us_votes),
                (clamp_vote(avg + rng.gauss(0.0, 0.2)), votes - us_votes),
            ] {
                row.push(format!("{group_avg:.1}"));
                row.push(group_votes.to_string());
            }

            ratings
                .write_record(&row)
                .expect("Failed to write rating row");
            n_ratings += 1;
        }
    }

    // One rating-only row with no metadata counterpart.
    let mut orphan: Vec<String> = vec![
        "tt9999999".to_string(),
        "7.1".to_string(),
        "55000".to_string(),
        "7.0".to_string(),
        "7.0".to_string(),
    ];
    orphan.extend(std::iter::repeat(String::new()).take(34));
    ratings
        .write_record(&orphan)
        .expect("Failed to write orphan rating row");
    n_ratings += 1;

    movies.flush().expect("Failed to flush movies.csv");
    ratings.flush().expect("Failed to flush ratings.csv");

    println!("Wrote {n_movies} movies and {n_ratings} rating rows to data/");
}
