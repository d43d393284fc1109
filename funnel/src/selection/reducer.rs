//! Reducer for the cascading selection chain.

use super::{SelectionAction, SelectionEnvironment, SelectionField, SelectionState};
use crate::availability::AvailabilityIndex;
use cinebook_core::{effect::Effect, reducer::Reducer};
use smallvec::{SmallVec, smallvec};

/// Reducer driving the selection chain
///
/// Every user edit transitions the chain back to the edited level: one
/// transition helper resets all strictly-downstream fields, then the effect
/// for the next level's fetch (if any) is returned. Fetched data folds back
/// in through the `*Loaded` actions, which also drop selections that are no
/// longer available.
pub struct SelectionReducer;

impl SelectionReducer {
    /// Create a new selection reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SelectionReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for SelectionReducer {
    type State = SelectionState;
    type Action = SelectionAction;
    type Environment = SelectionEnvironment;

    #[allow(clippy::too_many_lines)] // one arm per chain level
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SelectionAction::LoadCountries => {
                let catalog = env.catalog();
                smallvec![Effect::future(async move {
                    Some(match catalog.countries().await {
                        Ok(countries) => SelectionAction::CountriesLoaded(countries),
                        Err(e) => SelectionAction::LoadFailed {
                            field: SelectionField::Country,
                            message: e.to_string(),
                        },
                    })
                })]
            }

            SelectionAction::CountriesLoaded(countries) => {
                state.countries = countries;
                state.last_error = None;
                smallvec![Effect::None]
            }

            SelectionAction::SelectCountry(country) => {
                let country_id = country.id;
                state.country = Some(country);
                state.reset_downstream(SelectionField::Country);

                let catalog = env.catalog();
                smallvec![Effect::future(async move {
                    Some(match catalog.cities(country_id).await {
                        Ok(cities) => SelectionAction::CitiesLoaded(cities),
                        Err(e) => SelectionAction::LoadFailed {
                            field: SelectionField::City,
                            message: e.to_string(),
                        },
                    })
                })]
            }

            SelectionAction::CitiesLoaded(cities) => {
                state.cities = cities;
                state.last_error = None;
                smallvec![Effect::None]
            }

            SelectionAction::SelectCity(city) => {
                let city_id = city.id;
                state.city = Some(city);
                state.reset_downstream(SelectionField::City);

                let catalog = env.catalog();
                smallvec![Effect::future(async move {
                    Some(match catalog.cinemas(city_id).await {
                        Ok(cinemas) => SelectionAction::CinemasLoaded(cinemas),
                        Err(e) => SelectionAction::LoadFailed {
                            field: SelectionField::Cinema,
                            message: e.to_string(),
                        },
                    })
                })]
            }

            SelectionAction::CinemasLoaded(cinemas) => {
                state.cinemas = cinemas;
                state.last_error = None;
                smallvec![Effect::None]
            }

            SelectionAction::SelectCinema(cinema) => {
                let cinema_id = cinema.id;
                state.cinema = Some(cinema);
                state.reset_downstream(SelectionField::Cinema);

                let catalog = env.catalog();
                smallvec![Effect::future(async move {
                    Some(match catalog.cinema_showtimes(cinema_id).await {
                        Ok(showtimes) => SelectionAction::ShowtimesLoaded(showtimes),
                        Err(e) => SelectionAction::LoadFailed {
                            field: SelectionField::Date,
                            message: e.to_string(),
                        },
                    })
                })]
            }

            SelectionAction::PrefillCinema(cinema_id) => {
                let catalog = env.catalog();
                smallvec![Effect::future(async move {
                    Some(match catalog.cinema_by_id(cinema_id).await {
                        Ok(cinema) => SelectionAction::SelectCinema(cinema),
                        Err(e) => SelectionAction::LoadFailed {
                            field: SelectionField::Cinema,
                            message: e.to_string(),
                        },
                    })
                })]
            }

            SelectionAction::ShowtimesLoaded(payload) => {
                state.index = AvailabilityIndex::build(&payload);
                state.dates = state.index.dates_from(env.clock().today());
                state.last_error = None;

                // A date selected before the refetch may be gone now.
                if let Some(date) = state.date.clone() {
                    if !state.dates.contains(&date) {
                        state.date = None;
                        state.reset_downstream(SelectionField::Date);
                    }
                }
                recompute_movies(state);
                smallvec![Effect::None]
            }

            SelectionAction::SelectDate(date) => {
                state.date = Some(date);
                state.reset_downstream(SelectionField::Date);
                recompute_movies(state);
                smallvec![Effect::None]
            }

            SelectionAction::PrefillMovie(movie_id) => {
                let catalog = env.catalog();
                smallvec![Effect::future(async move {
                    Some(match catalog.movie_by_id(movie_id).await {
                        Ok(movie) => SelectionAction::SeedMovie(movie),
                        Err(e) => SelectionAction::LoadFailed {
                            field: SelectionField::Movie,
                            message: e.to_string(),
                        },
                    })
                })]
            }

            SelectionAction::SeedMovie(movie) => {
                state.movie = Some(movie);
                state.movie_prefilled = true;
                state.reset_downstream(SelectionField::Movie);
                recompute_movies(state);
                smallvec![Effect::None]
            }

            SelectionAction::SelectMovie(movie) => {
                state.movie = Some(movie);
                state.movie_prefilled = false;
                state.reset_downstream(SelectionField::Movie);
                recompute_halls(state);
                smallvec![Effect::None]
            }

            SelectionAction::SelectHall(hall) => {
                state.hall = Some(hall);
                state.reset_downstream(SelectionField::Hall);
                recompute_times(state);
                smallvec![Effect::None]
            }

            SelectionAction::SelectTime(time) => {
                state.time = Some(time);
                state.reset_downstream(SelectionField::Time);
                smallvec![Effect::None]
            }

            SelectionAction::SetSeats(seats) => {
                state.seats = seats;
                smallvec![Effect::None]
            }

            SelectionAction::LoadFailed { field, message } => {
                tracing::warn!(%field, %message, "availability fetch failed");
                state.last_error = Some(message);
                smallvec![Effect::None]
            }
        }
    }
}

/// Recompute the movie list for the selected date
///
/// Drops a selected movie that is no longer showing - unless it was seeded
/// by cross-page prefill, in which case it is kept and injected into the
/// list so the visitor is never silently reset.
fn recompute_movies(state: &mut SelectionState) {
    let Some(date) = state.date.clone() else {
        return;
    };
    state.movies = state.index.movies_on(&date);
    if let Some(movie) = state.movie.clone() {
        if !state.movies.iter().any(|m| m.id == movie.id) {
            if state.movie_prefilled {
                state.movies.insert(0, movie);
            } else {
                state.movie = None;
                state.reset_downstream(SelectionField::Movie);
            }
        }
    }
    recompute_halls(state);
}

/// Recompute the hall list for the selected `(date, movie)` pair
///
/// Drops a selected hall with no remaining showing of the movie.
fn recompute_halls(state: &mut SelectionState) {
    let (Some(date), Some(movie)) = (state.date.clone(), state.movie.clone()) else {
        return;
    };
    state.halls = state.index.halls_on(&date, movie.id);
    if let Some(hall) = state.hall.clone() {
        if state.halls.contains(&hall) {
            recompute_times(state);
        } else {
            state.hall = None;
            state.reset_downstream(SelectionField::Hall);
        }
    }
}

/// Recompute the time list for the selected `(date, movie, hall)` triple
///
/// Drops a selected time that no longer exists.
fn recompute_times(state: &mut SelectionState) {
    let (Some(date), Some(movie), Some(hall)) = (
        state.date.clone(),
        state.movie.clone(),
        state.hall.clone(),
    ) else {
        return;
    };
    state.times = state.index.times_for(&date, movie.id, &hall);
    if let Some(time) = state.time.clone() {
        if !state.times.contains(&time) {
            state.time = None;
            state.reset_downstream(SelectionField::Time);
        }
    }
}
