//! The widget-facing controller bundling state, dispatch, and locale.
//!
//! ## Usage
//!
//! Construct one [`CalendarController`] per widget instance and pass it by
//! reference wherever grid building or key handling happens; there are no
//! ambient singletons.
use std::{num::NonZeroUsize, sync::Arc};

use derive_setters::Setters;
use lru::LruCache;
use parking_lot::Mutex;

use crate::{
    date::{CalendarDate, CivilDateAdapter, DateAdapter, WeekScheme},
    grid::{MonthGrid, build_month_grid},
    keymap::{Key, map_key},
    locale::{LocaleRequest, ResolvedLocale},
    navigation::{Action, NavigationState, reduce},
};

/// Month skeletons kept per controller; covers a year of back-and-forth
/// paging without rebuilding.
const GRID_CACHE_CAPACITY: usize = 12;

/// Callback invoked with the newly selected date.
pub type ChangeHandler = Arc<dyn Fn(CalendarDate) + Send + Sync>;

/// Configuration for [`CalendarController`].
#[derive(Clone, Setters)]
pub struct CalendarArgs {
    /// Locale preference for layout, labels, and traversal direction.
    #[setters(into)]
    pub locale: LocaleRequest,
    /// Initial selection; also anchors the first page month when valid.
    #[setters(strip_option)]
    pub initial_date: Option<CalendarDate>,
    /// Whether week rows carry locale week numbers.
    pub show_week_numbers: bool,
    /// Notified each time a date is selected.
    #[setters(skip)]
    pub on_change: Option<ChangeHandler>,
}

impl Default for CalendarArgs {
    fn default() -> Self {
        Self {
            locale: LocaleRequest::Default,
            initial_date: None,
            show_week_numbers: false,
            on_change: None,
        }
    }
}

impl CalendarArgs {
    /// Sets the selection-change handler.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(CalendarDate) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(f));
        self
    }

    /// Sets the selection-change handler from a shared callback.
    pub fn on_change_shared(mut self, f: ChangeHandler) -> Self {
        self.on_change = Some(f);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GridKey {
    page_date: CalendarDate,
    week: WeekScheme,
    right_to_left: bool,
    show_week_numbers: bool,
}

/// Owns one widget's navigation state and its derived projections.
///
/// The controller is the single writer path: every mutation goes through
/// [`CalendarController::dispatch`]. Readers take cheap value snapshots.
pub struct CalendarController<A: DateAdapter = CivilDateAdapter> {
    adapter: A,
    state: NavigationState,
    locale: ResolvedLocale,
    show_week_numbers: bool,
    on_change: Option<ChangeHandler>,
    grid_cache: Mutex<LruCache<GridKey, Arc<MonthGrid>>>,
}

impl CalendarController<CivilDateAdapter> {
    /// Creates a controller over the built-in civil date adapter.
    pub fn new(args: CalendarArgs) -> Self {
        Self::with_adapter(args, CivilDateAdapter)
    }
}

impl<A: DateAdapter> CalendarController<A> {
    /// Creates a controller over a custom date adapter.
    pub fn with_adapter(args: CalendarArgs, adapter: A) -> Self {
        let locale = ResolvedLocale::resolve(&args.locale);
        let initial = args.initial_date.filter(|date| adapter.is_valid(*date));
        let page_date = initial
            .and_then(|date| adapter.start_of_month(date))
            .or_else(|| adapter.start_of_month(CalendarDate::today()))
            .unwrap_or_else(CalendarDate::today);
        let state = NavigationState {
            selected_date: initial,
            ..NavigationState::new(page_date)
        };
        Self {
            adapter,
            state,
            locale,
            show_week_numbers: args.show_week_numbers,
            on_change: args.on_change,
            grid_cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(GRID_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            )),
        }
    }

    /// Returns a snapshot of the navigation state.
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Returns the resolved locale.
    pub fn locale(&self) -> &ResolvedLocale {
        &self.locale
    }

    /// Returns the committed selection, if any.
    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.state.selected_date
    }

    /// Applies one action; returns whether the transition was applied.
    ///
    /// Selection actions always apply, reselecting the current date
    /// included. Rejected navigation is a silent no-op by design; hosts
    /// wanting to surface blocked navigation can use the return value.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let prior = self.state;
        self.state = reduce(&self.adapter, prior, action);
        if let Action::SetSelectedDate(date) = action {
            tracing::debug!(%date, "calendar selection changed");
            if let Some(on_change) = &self.on_change {
                on_change(date);
            }
            return true;
        }
        let applied = self.state != prior;
        if !applied {
            tracing::trace!(?action, "calendar transition rejected");
        }
        applied
    }

    /// Maps a key event on `day` to an action and dispatches it.
    pub fn handle_key(&mut self, key: Key, day: CalendarDate) -> bool {
        let action = map_key(key, self.locale.right_to_left(), day);
        self.dispatch(action)
    }

    /// Returns the current month grid with fresh selection and focus flags.
    ///
    /// The date/label skeleton is memoized by the value of its inputs; the
    /// flags are recomputed on every call, so the cache can never serve
    /// stale state.
    pub fn grid(&self) -> MonthGrid {
        self.skeleton().with_state(&self.state)
    }

    /// Replaces the locale preference and drops cached projections.
    pub fn set_locale(&mut self, request: LocaleRequest) {
        self.locale = ResolvedLocale::resolve(&request);
        self.grid_cache.lock().clear();
    }

    /// Toggles week-number rows.
    pub fn set_show_week_numbers(&mut self, show_week_numbers: bool) {
        self.show_week_numbers = show_week_numbers;
    }

    fn skeleton(&self) -> Arc<MonthGrid> {
        let key = GridKey {
            page_date: self.state.page_date,
            week: self.locale.week(),
            right_to_left: self.locale.right_to_left(),
            show_week_numbers: self.show_week_numbers,
        };
        self.grid_cache
            .lock()
            .get_or_insert(key, || {
                Arc::new(build_month_grid(
                    &self.adapter,
                    key.page_date,
                    &self.locale,
                    key.show_week_numbers,
                ))
            })
            .clone()
    }
}
