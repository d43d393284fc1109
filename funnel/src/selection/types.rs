//! State types for the cascading selection chain.

use crate::availability::AvailabilityIndex;
use crate::catalog::{Cinema, City, Country, MovieRef};
use crate::error::ValidationError;
use crate::types::{HallName, SeatCode, ShowDate, ShowTime};

/// One level of the selection chain, in dependency order
///
/// The derived `Ord` is the chain order; "downstream of X" means
/// "greater than X".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectionField {
    /// Country level
    Country,
    /// City level
    City,
    /// Cinema level
    Cinema,
    /// Show date level
    Date,
    /// Movie level
    Movie,
    /// Hall level
    Hall,
    /// Show time level
    Time,
    /// Seat level
    Seats,
}

impl SelectionField {
    /// All levels in chain order
    pub const ALL: [Self; 8] = [
        Self::Country,
        Self::City,
        Self::Cinema,
        Self::Date,
        Self::Movie,
        Self::Hall,
        Self::Time,
        Self::Seats,
    ];
}

impl std::fmt::Display for SelectionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Country => "country",
            Self::City => "city",
            Self::Cinema => "cinema",
            Self::Date => "date",
            Self::Movie => "movie",
            Self::Hall => "hall",
            Self::Time => "time",
            Self::Seats => "seats",
        };
        f.write_str(name)
    }
}

/// The full state of the booking funnel's selection chain
///
/// Holds both the selected value and the current option list for every
/// level. The option list for a level is cleared together with the level's
/// value, so a stale list is never shown while a fresh one loads.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    /// Countries with at least one future showtime
    pub countries: Vec<Country>,
    /// Selected country
    pub country: Option<Country>,
    /// Cities with showtimes in the selected country
    pub cities: Vec<City>,
    /// Selected city
    pub city: Option<City>,
    /// Cinemas located in the selected city
    pub cinemas: Vec<Cinema>,
    /// Selected cinema
    pub cinema: Option<Cinema>,
    /// Availability index for the selected cinema
    pub index: AvailabilityIndex,
    /// Dates with showings, today or later
    pub dates: Vec<ShowDate>,
    /// Selected show date
    pub date: Option<ShowDate>,
    /// Movies showing on the selected date
    pub movies: Vec<MovieRef>,
    /// Selected movie
    pub movie: Option<MovieRef>,
    /// Whether the movie was seeded by cross-page prefill
    ///
    /// A prefilled movie survives availability recomputation and upstream
    /// edits: a visitor arriving already knowing their movie is never
    /// silently reset.
    pub movie_prefilled: bool,
    /// Halls showing the selected movie on the selected date
    pub halls: Vec<HallName>,
    /// Selected hall
    pub hall: Option<HallName>,
    /// Times for the selected hall
    pub times: Vec<ShowTime>,
    /// Selected show time
    pub time: Option<ShowTime>,
    /// Seat codes picked in the seat map
    pub seats: Vec<SeatCode>,
    /// Most recent fetch failure, surfaced inline
    pub last_error: Option<String>,
}

impl SelectionState {
    /// Create an empty selection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every field strictly downstream of `changed`
    ///
    /// The single invalidation rule for the whole chain: each downstream
    /// level loses both its selected value and its option list. A
    /// prefill-seeded movie is the one exception - its value is kept so it
    /// can be re-injected into the recomputed movie list.
    pub fn reset_downstream(&mut self, changed: SelectionField) {
        for field in SelectionField::ALL {
            if field > changed {
                self.clear_level(field);
            }
        }
    }

    fn clear_level(&mut self, field: SelectionField) {
        match field {
            SelectionField::Country => {
                self.country = None;
            }
            SelectionField::City => {
                self.city = None;
                self.cities.clear();
            }
            SelectionField::Cinema => {
                self.cinema = None;
                self.cinemas.clear();
                self.index = AvailabilityIndex::default();
            }
            SelectionField::Date => {
                self.date = None;
                self.dates.clear();
            }
            SelectionField::Movie => {
                if !self.movie_prefilled {
                    self.movie = None;
                }
                self.movies.clear();
            }
            SelectionField::Hall => {
                self.hall = None;
                self.halls.clear();
            }
            SelectionField::Time => {
                self.time = None;
                self.times.clear();
            }
            SelectionField::Seats => {
                self.seats.clear();
            }
        }
    }

    /// Whether the "continue" action is enabled
    ///
    /// Requires hall and time set and at least one seat.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        self.hall.is_some() && self.time.is_some() && !self.seats.is_empty()
    }

    /// Validate that the selection is complete enough to draft an order
    ///
    /// # Errors
    ///
    /// Returns the first missing level; no network call is made for an
    /// incomplete selection.
    pub fn validate_complete(&self) -> Result<(), ValidationError> {
        if self.cinema.is_none() {
            return Err(ValidationError::IncompleteSelection("cinema"));
        }
        if self.date.is_none() {
            return Err(ValidationError::IncompleteSelection("date"));
        }
        if self.movie.is_none() {
            return Err(ValidationError::IncompleteSelection("movie"));
        }
        if self.hall.is_none() {
            return Err(ValidationError::IncompleteSelection("hall"));
        }
        if self.time.is_none() {
            return Err(ValidationError::IncompleteSelection("time"));
        }
        if self.seats.is_empty() {
            return Err(ValidationError::NoSeats);
        }
        Ok(())
    }
}
