//! Actions for the cascading selection chain.

use super::types::SelectionField;
use crate::catalog::{Cinema, CinemaShowtimes, City, Country, MovieRef};
use crate::types::{CinemaId, HallName, MovieId, SeatCode, ShowDate, ShowTime};

/// Inputs to the selection reducer
///
/// `Select*` actions are user edits; `*Loaded` actions fold fetched
/// availability back in; `LoadFailed` surfaces a fetch error inline without
/// touching the selection itself.
#[derive(Debug, Clone)]
pub enum SelectionAction {
    /// Kick off the initial country fetch
    LoadCountries,

    /// Countries with showtimes arrived
    CountriesLoaded(Vec<Country>),

    /// The user picked a country; downstream resets, cities load
    SelectCountry(Country),

    /// Cities for the selected country arrived
    CitiesLoaded(Vec<City>),

    /// The user picked a city; downstream resets, cinemas load
    SelectCity(City),

    /// Cinemas for the selected city arrived
    CinemasLoaded(Vec<Cinema>),

    /// The user picked a cinema; downstream resets, showtimes load
    SelectCinema(Cinema),

    /// Deep link: resolve a cinema by id, then select it
    PrefillCinema(CinemaId),

    /// The cinema's showtimes payload arrived; the availability index is
    /// rebuilt and stale date/movie/hall/time selections are dropped
    ShowtimesLoaded(CinemaShowtimes),

    /// The user picked a show date
    SelectDate(ShowDate),

    /// Deep link: resolve a movie by id, then seed it as prefilled
    PrefillMovie(MovieId),

    /// Cross-page prefill: the visitor arrived already knowing the movie
    ///
    /// A seeded movie is kept and injected into recomputed movie lists even
    /// when absent from availability.
    SeedMovie(MovieRef),

    /// The user picked a movie explicitly
    SelectMovie(MovieRef),

    /// The user picked a hall
    SelectHall(HallName),

    /// The user picked a show time
    SelectTime(ShowTime),

    /// The seat map produced a fresh seat-code list
    SetSeats(Vec<SeatCode>),

    /// An availability fetch failed; surfaced inline, state left intact
    LoadFailed {
        /// The level whose fetch failed
        field: SelectionField,
        /// Human-readable failure description
        message: String,
    },
}
