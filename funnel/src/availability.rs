//! Derived availability index for one cinema.
//!
//! The catalog delivers showtimes as per-hall, per-movie lists of raw ISO
//! timestamps. The funnel needs the opposite orientation: "given a date,
//! which movies play, in which halls, at which times". [`AvailabilityIndex`]
//! is that read model, rebuilt from scratch on every cinema fetch and
//! read-only afterwards.

use crate::catalog::{CinemaShowtimes, MovieRef};
use crate::types::{HallName, MovieId, ShowDate, ShowTime, split_timestamp};
use std::collections::BTreeMap;

/// One `(hall, movie, time)` triple on a specific date
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Showing {
    /// Hall the movie plays in
    pub hall: HallName,
    /// The movie
    pub movie: MovieRef,
    /// Wall-clock start time
    pub time: ShowTime,
}

/// Per-date index of everything one cinema is showing
///
/// Built fresh per cinema fetch; consumers only read. Malformed timestamps
/// in the payload are skipped rather than failing the whole index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailabilityIndex {
    by_date: BTreeMap<ShowDate, Vec<Showing>>,
}

impl AvailabilityIndex {
    /// Build the index from a per-cinema showtimes payload
    #[must_use]
    pub fn build(payload: &CinemaShowtimes) -> Self {
        let mut by_date: BTreeMap<ShowDate, Vec<Showing>> = BTreeMap::new();
        for hall in &payload.halls {
            let hall_name = HallName::new(hall.hall.clone());
            for entry in &hall.movies {
                for timestamp in &entry.times {
                    let Some((date, time)) = split_timestamp(timestamp) else {
                        tracing::debug!(%timestamp, "skipping malformed showtime");
                        continue;
                    };
                    by_date.entry(date).or_default().push(Showing {
                        hall: hall_name.clone(),
                        movie: entry.movie.clone(),
                        time,
                    });
                }
            }
        }
        Self { by_date }
    }

    /// Whether the index has no showings at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Distinct dates on or after `today`, ascending
    ///
    /// Calendar comparison, inclusive of today. The `BTreeMap` keys are
    /// already in chronological order for zero-padded dates.
    #[must_use]
    pub fn dates_from(&self, today: chrono::NaiveDate) -> Vec<ShowDate> {
        self.by_date
            .keys()
            .filter(|date| date.is_on_or_after(today))
            .cloned()
            .collect()
    }

    /// Whether any showing exists on the given date
    #[must_use]
    pub fn has_date(&self, date: &ShowDate) -> bool {
        self.by_date.contains_key(date)
    }

    /// Movies with at least one showing on the date, deduplicated by id
    ///
    /// First-seen order, which follows the payload's hall order.
    #[must_use]
    pub fn movies_on(&self, date: &ShowDate) -> Vec<MovieRef> {
        let mut seen: Vec<MovieId> = Vec::new();
        let mut movies = Vec::new();
        for showing in self.by_date.get(date).map(Vec::as_slice).unwrap_or_default() {
            if !seen.contains(&showing.movie.id) {
                seen.push(showing.movie.id);
                movies.push(showing.movie.clone());
            }
        }
        movies
    }

    /// Halls showing the movie on the date, deduplicated, first-seen order
    #[must_use]
    pub fn halls_on(&self, date: &ShowDate, movie: MovieId) -> Vec<HallName> {
        let mut halls: Vec<HallName> = Vec::new();
        for showing in self.by_date.get(date).map(Vec::as_slice).unwrap_or_default() {
            if showing.movie.id == movie && !halls.contains(&showing.hall) {
                halls.push(showing.hall.clone());
            }
        }
        halls
    }

    /// Start times for `(date, movie, hall)`, deduplicated and ascending
    ///
    /// Lexicographic sort, which is chronological for zero-padded
    /// `HH:MM:SS` strings.
    #[must_use]
    pub fn times_for(&self, date: &ShowDate, movie: MovieId, hall: &HallName) -> Vec<ShowTime> {
        let mut times: Vec<ShowTime> = Vec::new();
        for showing in self.by_date.get(date).map(Vec::as_slice).unwrap_or_default() {
            if showing.movie.id == movie && &showing.hall == hall && !times.contains(&showing.time)
            {
                times.push(showing.time.clone());
            }
        }
        times.sort_unstable();
        times
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{CinemaShowtimes, HallShowtimes, MovieShowtimes};
    use crate::types::CinemaId;

    fn movie(id: i64, title: &str) -> MovieRef {
        MovieRef {
            id: MovieId::new(id),
            title: title.to_string(),
        }
    }

    fn payload() -> CinemaShowtimes {
        CinemaShowtimes {
            cinema_id: CinemaId::new(5),
            halls: vec![
                HallShowtimes {
                    hall: "Hall 1".to_string(),
                    movies: vec![
                        MovieShowtimes {
                            movie: movie(1, "Arrival"),
                            times: vec![
                                "2025-06-01T22:00:00".to_string(),
                                "2025-06-01T19:30:00".to_string(),
                                "2025-06-02T19:30:00".to_string(),
                            ],
                        },
                        MovieShowtimes {
                            movie: movie(2, "Heat"),
                            times: vec!["2025-06-01T20:00:00".to_string()],
                        },
                    ],
                },
                HallShowtimes {
                    hall: "Hall 2".to_string(),
                    movies: vec![MovieShowtimes {
                        movie: movie(1, "Arrival"),
                        times: vec![
                            "2025-06-01T19:30:00".to_string(),
                            "2024-01-01T10:00:00".to_string(),
                        ],
                    }],
                },
            ],
        }
    }

    fn today() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn dates_are_filtered_to_today_or_later_and_sorted() {
        let index = AvailabilityIndex::build(&payload());
        let dates = index.dates_from(today());
        assert_eq!(
            dates,
            vec![ShowDate::new("2025-06-01"), ShowDate::new("2025-06-02")]
        );
    }

    #[test]
    fn today_is_inclusive() {
        let index = AvailabilityIndex::build(&payload());
        let dates = index.dates_from(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(dates.contains(&ShowDate::new("2024-01-01")));
    }

    #[test]
    fn past_only_payload_yields_single_future_date() {
        // {"2024-01-01","2099-12-31"} with today = 2025-01-01
        let showtimes = CinemaShowtimes {
            cinema_id: CinemaId::new(1),
            halls: vec![HallShowtimes {
                hall: "Main".to_string(),
                movies: vec![MovieShowtimes {
                    movie: movie(1, "Arrival"),
                    times: vec![
                        "2024-01-01T12:00:00".to_string(),
                        "2099-12-31T12:00:00".to_string(),
                    ],
                }],
            }],
        };
        let index = AvailabilityIndex::build(&showtimes);
        assert_eq!(index.dates_from(today()), vec![ShowDate::new("2099-12-31")]);
    }

    #[test]
    fn movies_are_deduplicated_across_halls() {
        let index = AvailabilityIndex::build(&payload());
        let movies = index.movies_on(&ShowDate::new("2025-06-01"));
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, MovieId::new(1));
        assert_eq!(movies[1].id, MovieId::new(2));
    }

    #[test]
    fn movie_listed_only_when_it_has_a_time_on_the_date() {
        let index = AvailabilityIndex::build(&payload());
        let movies = index.movies_on(&ShowDate::new("2025-06-02"));
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, MovieId::new(1));
    }

    #[test]
    fn halls_for_movie_on_date() {
        let index = AvailabilityIndex::build(&payload());
        let halls = index.halls_on(&ShowDate::new("2025-06-01"), MovieId::new(1));
        assert_eq!(halls, vec![HallName::new("Hall 1"), HallName::new("Hall 2")]);

        let halls = index.halls_on(&ShowDate::new("2025-06-01"), MovieId::new(2));
        assert_eq!(halls, vec![HallName::new("Hall 1")]);
    }

    #[test]
    fn times_are_deduplicated_and_ascending() {
        let index = AvailabilityIndex::build(&payload());
        let times = index.times_for(
            &ShowDate::new("2025-06-01"),
            MovieId::new(1),
            &HallName::new("Hall 1"),
        );
        assert_eq!(
            times,
            vec![ShowTime::new("19:30:00"), ShowTime::new("22:00:00")]
        );
    }

    #[test]
    fn malformed_timestamps_are_skipped() {
        let showtimes = CinemaShowtimes {
            cinema_id: CinemaId::new(1),
            halls: vec![HallShowtimes {
                hall: "Main".to_string(),
                movies: vec![MovieShowtimes {
                    movie: movie(1, "Arrival"),
                    times: vec!["garbage".to_string(), "2025-06-01T19:30:00".to_string()],
                }],
            }],
        };
        let index = AvailabilityIndex::build(&showtimes);
        assert_eq!(index.dates_from(today()).len(), 1);
    }

    #[test]
    fn empty_payload_builds_empty_index() {
        let index = AvailabilityIndex::build(&CinemaShowtimes {
            cinema_id: CinemaId::new(1),
            halls: vec![],
        });
        assert!(index.is_empty());
        assert!(index.dates_from(today()).is_empty());
    }
}
