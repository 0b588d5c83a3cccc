//! Month-page, focus, and selection state with its pure transition function.
//!
//! ## Usage
//!
//! [`reduce`] is the single writer path for [`NavigationState`]. Transitions
//! whose computed date is invalid are rejected wholesale: the prior state
//! comes back unchanged and no error is surfaced, so edge navigation can
//! never corrupt the page or focus date.
use thiserror::Error;

use crate::date::{CalendarDate, DateAdapter};

/// The navigation state of one calendar widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    /// First-of-month date anchoring the displayed month.
    pub page_date: CalendarDate,
    /// Day currently targeted by the keyboard, if any. May lie outside the
    /// page month while the user traverses across month edges.
    pub focus_date: Option<CalendarDate>,
    /// The user's committed choice, if any.
    pub selected_date: Option<CalendarDate>,
}

impl NavigationState {
    /// Creates a state showing the given page with no focus or selection.
    pub fn new(page_date: CalendarDate) -> Self {
        Self {
            page_date,
            focus_date: None,
            selected_date: None,
        }
    }
}

/// State transitions understood by [`reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Commits a selection and re-anchors the page to its month.
    SetSelectedDate(CalendarDate),
    /// Moves the page forward one month.
    IncrementPageMonth,
    /// Moves the page back one month.
    DecrementPageMonth,
    /// Moves the page forward one year.
    IncrementPageYear,
    /// Moves the page back one year.
    DecrementPageYear,
    /// Jumps the page to a month (1-12). `None` marks an absent payload,
    /// which is rejected; month 1 is present and valid.
    SetPageMonth(Option<u8>),
    /// Jumps the page to a year. `None` marks an absent payload.
    SetPageYear(Option<i32>),
    /// Jumps the page to the month containing the given date.
    SetPageDate(CalendarDate),
    /// Moves keyboard focus to the given day.
    SetFocusDate(CalendarDate),
    /// Moves focus forward by the given number of days.
    IncrementFocusDate(u32),
    /// Moves focus back by the given number of days.
    DecrementFocusDate(u32),
    /// Moves focus forward one month.
    IncrementFocusMonth,
    /// Moves focus back one month.
    DecrementFocusMonth,
    /// Moves focus forward one year.
    IncrementFocusYear,
    /// Moves focus back one year.
    DecrementFocusYear,
}

/// Contract violations at the action-stream boundary.
///
/// These are caller bugs, not user input conditions; hosts must treat them
/// as fatal for the dispatching code path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The action kind is not part of the navigation protocol.
    #[error("unknown action kind: {0}")]
    UnknownAction(String),
    /// The action kind requires a date payload that was not supplied.
    #[error("action {0} requires a date payload")]
    MissingDate(&'static str),
}

/// Untyped payload accompanying a wire-format action kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionPayload {
    /// Date payload for selection, page, and focus jumps.
    pub date: Option<CalendarDate>,
    /// Day count for focus steps; defaults to 1.
    pub count: Option<u32>,
    /// Month payload for `SET_PAGE_MONTH`.
    pub month: Option<u8>,
    /// Year payload for `SET_PAGE_YEAR`.
    pub year: Option<i32>,
}

impl Action {
    /// Parses an action from its wire kind and payload.
    ///
    /// This is the bridge for hosts that relay untyped command streams. An
    /// unknown kind is a programming error and fails fatally rather than
    /// degrading to a no-op. Absent month/year payloads parse to the
    /// rejected-by-the-reducer form instead of failing, matching the silent
    /// gating of those transitions.
    pub fn parse(kind: &str, payload: ActionPayload) -> Result<Self, NavigationError> {
        let date = |name| payload.date.ok_or(NavigationError::MissingDate(name));
        let count = payload.count.unwrap_or(1);
        match kind {
            "SET_SELECTED_DATE" => Ok(Action::SetSelectedDate(date("SET_SELECTED_DATE")?)),
            "INCREMENT_PAGE_MONTH" => Ok(Action::IncrementPageMonth),
            "DECREMENT_PAGE_MONTH" => Ok(Action::DecrementPageMonth),
            "INCREMENT_PAGE_YEAR" => Ok(Action::IncrementPageYear),
            "DECREMENT_PAGE_YEAR" => Ok(Action::DecrementPageYear),
            "SET_PAGE_MONTH" => Ok(Action::SetPageMonth(payload.month)),
            "SET_PAGE_YEAR" => Ok(Action::SetPageYear(payload.year)),
            "SET_PAGE_DATE" => Ok(Action::SetPageDate(date("SET_PAGE_DATE")?)),
            "SET_FOCUS_DATE" => Ok(Action::SetFocusDate(date("SET_FOCUS_DATE")?)),
            "INCREMENT_FOCUS_DATE" => Ok(Action::IncrementFocusDate(count)),
            "DECREMENT_FOCUS_DATE" => Ok(Action::DecrementFocusDate(count)),
            "INCREMENT_FOCUS_MONTH" => Ok(Action::IncrementFocusMonth),
            "DECREMENT_FOCUS_MONTH" => Ok(Action::DecrementFocusMonth),
            "INCREMENT_FOCUS_YEAR" => Ok(Action::IncrementFocusYear),
            "DECREMENT_FOCUS_YEAR" => Ok(Action::DecrementFocusYear),
            other => Err(NavigationError::UnknownAction(other.to_string())),
        }
    }
}

/// Applies one action to the state, returning the next state.
///
/// Pure: neither argument is mutated, and equal inputs always produce equal
/// outputs. Invalid computed dates reject the whole transition.
pub fn reduce<A>(adapter: &A, state: NavigationState, action: Action) -> NavigationState
where
    A: DateAdapter + ?Sized,
{
    let valid = |date: Option<CalendarDate>| date.filter(|d| adapter.is_valid(*d));
    match action {
        Action::SetSelectedDate(date) => NavigationState {
            // The caller is assumed to have validated the date.
            page_date: valid(adapter.start_of_month(date)).unwrap_or(state.page_date),
            selected_date: Some(date),
            ..state
        },
        Action::IncrementPageMonth => page_jump(state, valid(adapter.add_months(state.page_date, 1))),
        Action::DecrementPageMonth => {
            page_jump(state, valid(adapter.add_months(state.page_date, -1)))
        }
        Action::IncrementPageYear => page_jump(state, valid(adapter.add_years(state.page_date, 1))),
        Action::DecrementPageYear => page_jump(state, valid(adapter.add_years(state.page_date, -1))),
        Action::SetPageMonth(month) => match month {
            Some(month) => page_jump(state, valid(adapter.set_month(state.page_date, month))),
            None => state,
        },
        Action::SetPageYear(year) => match year {
            Some(year) => page_jump(state, valid(adapter.set_year(state.page_date, year))),
            None => state,
        },
        Action::SetPageDate(date) => {
            if !adapter.is_valid(date) {
                return state;
            }
            page_jump(state, valid(adapter.start_of_month(date)))
        }
        Action::SetFocusDate(date) => {
            if !adapter.is_valid(date) {
                return state;
            }
            NavigationState {
                focus_date: Some(date),
                ..state
            }
        }
        Action::IncrementFocusDate(days) => focus_jump(adapter, state, |adapter, focus| {
            adapter.add_days(focus, days.max(1) as i64)
        }),
        Action::DecrementFocusDate(days) => focus_jump(adapter, state, |adapter, focus| {
            adapter.add_days(focus, -(days.max(1) as i64))
        }),
        Action::IncrementFocusMonth => {
            focus_jump(adapter, state, |adapter, focus| adapter.add_months(focus, 1))
        }
        Action::DecrementFocusMonth => {
            focus_jump(adapter, state, |adapter, focus| adapter.add_months(focus, -1))
        }
        Action::IncrementFocusYear => {
            focus_jump(adapter, state, |adapter, focus| adapter.add_years(focus, 1))
        }
        Action::DecrementFocusYear => {
            focus_jump(adapter, state, |adapter, focus| adapter.add_years(focus, -1))
        }
    }
}

fn page_jump(state: NavigationState, next_page: Option<CalendarDate>) -> NavigationState {
    match next_page {
        Some(page_date) => NavigationState { page_date, ..state },
        None => state,
    }
}

/// Moves the focus date and eagerly re-pages so the visible grid always
/// contains the focused day. A failed page anchor keeps the prior page but
/// still moves focus; a failed focus move rejects the whole transition.
fn focus_jump<A, F>(adapter: &A, state: NavigationState, transform: F) -> NavigationState
where
    A: DateAdapter + ?Sized,
    F: FnOnce(&A, CalendarDate) -> Option<CalendarDate>,
{
    let Some(focus) = state.focus_date else {
        return state;
    };
    let Some(next_focus) = transform(adapter, focus).filter(|d| adapter.is_valid(*d)) else {
        return state;
    };
    let page_date = adapter
        .start_of_month(next_focus)
        .filter(|d| adapter.is_valid(*d))
        .unwrap_or(state.page_date);
    NavigationState {
        page_date,
        focus_date: Some(next_focus),
        ..state
    }
}
