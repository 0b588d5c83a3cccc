//! almanac is a headless month-calendar core: navigation state, grid
//! layout, locale resolution, and keyboard handling, with no rendering
//! attached.
//!
//! # Usage
//!
//! Construct a [`CalendarController`] per widget, feed it actions or key
//! events, and render the [`MonthGrid`] it projects.
//!
//! # Example
//!
//! ```
//! use almanac::{Action, CalendarArgs, CalendarController, CalendarDate, Key};
//!
//! let start = CalendarDate::new(2024, 2, 14).expect("valid date");
//! let mut calendar = CalendarController::new(
//!     CalendarArgs::default()
//!         .locale("en-US")
//!         .initial_date(start)
//!         .on_change(|date| println!("picked {date}")),
//! );
//!
//! // Arrow keys move focus; Enter commits a selection.
//! calendar.dispatch(Action::SetFocusDate(start));
//! calendar.handle_key(Key::ArrowRight, start);
//! let grid = calendar.grid();
//! assert_eq!(grid.weekday_labels[0], "Sun");
//! assert_eq!(grid.weeks.len(), 5);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod controller;
pub mod date;
pub mod grid;
pub mod keymap;
pub mod locale;
pub mod navigation;

pub use controller::{CalendarArgs, CalendarController, ChangeHandler};
pub use date::{CalendarDate, CivilDateAdapter, DateAdapter, WeekScheme, Weekday};
pub use grid::{DayCell, MonthGrid, WeekRow};
pub use keymap::{Key, map_key};
pub use locale::{DEFAULT_LOCALE, LocaleRequest, ResolvedLocale};
pub use navigation::{Action, ActionPayload, NavigationError, NavigationState, reduce};
