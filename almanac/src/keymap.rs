//! Maps directional key input to navigation actions.
//!
//! ## Usage
//!
//! Hosts translate raw key events with [`Key::from_identifier`] and feed
//! the result through [`map_key`]; keys outside the table produce no
//! action.
use crate::{date::CalendarDate, navigation::Action};

/// Keys the calendar grid reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Up arrow: previous week.
    ArrowUp,
    /// Down arrow: next week.
    ArrowDown,
    /// Left arrow: previous day (next day under right-to-left locales).
    ArrowLeft,
    /// Right arrow: next day (previous day under right-to-left locales).
    ArrowRight,
    /// Page up: previous month.
    PageUp,
    /// Page down: previous month.
    PageDown,
    /// Home: previous year.
    Home,
    /// End: previous year.
    End,
    /// Enter: select the focused day.
    Enter,
    /// Space: select the focused day.
    Space,
}

impl Key {
    /// Parses a DOM-style key identifier; anything outside the calendar's
    /// key table yields `None`.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "PageUp" => Some(Key::PageUp),
            "PageDown" => Some(Key::PageDown),
            "Home" => Some(Key::Home),
            "End" => Some(Key::End),
            "Enter" => Some(Key::Enter),
            " " => Some(Key::Space),
            _ => None,
        }
    }
}

/// Maps a key to a reducer action.
///
/// `day` is the date of the cell the event targets, used for selection.
/// Left/right mirror under right-to-left locales; the grid's column order
/// never changes, only traversal direction does.
pub fn map_key(key: Key, right_to_left: bool, day: CalendarDate) -> Action {
    match key {
        Key::ArrowUp => Action::DecrementFocusDate(7),
        Key::ArrowDown => Action::IncrementFocusDate(7),
        Key::ArrowLeft => {
            if right_to_left {
                Action::IncrementFocusDate(1)
            } else {
                Action::DecrementFocusDate(1)
            }
        }
        Key::ArrowRight => {
            if right_to_left {
                Action::DecrementFocusDate(1)
            } else {
                Action::IncrementFocusDate(1)
            }
        }
        // PageUp and PageDown both step back one month, and Home and End
        // both step back one year. Kept as observed in the shipped widget
        // until the forward mappings are specified.
        Key::PageUp | Key::PageDown => Action::DecrementFocusMonth,
        Key::Home | Key::End => Action::DecrementFocusYear,
        Key::Enter | Key::Space => Action::SetSelectedDate(day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> CalendarDate {
        CalendarDate::new(2024, 2, 14).expect("valid test date")
    }

    #[test]
    fn test_vertical_arrows_step_a_week() {
        assert_eq!(
            map_key(Key::ArrowUp, false, day()),
            Action::DecrementFocusDate(7)
        );
        assert_eq!(
            map_key(Key::ArrowDown, false, day()),
            Action::IncrementFocusDate(7)
        );
        // Vertical traversal is unaffected by script direction.
        assert_eq!(
            map_key(Key::ArrowUp, true, day()),
            Action::DecrementFocusDate(7)
        );
    }

    #[test]
    fn test_horizontal_arrows_mirror_under_rtl() {
        assert_eq!(
            map_key(Key::ArrowRight, false, day()),
            Action::IncrementFocusDate(1)
        );
        assert_eq!(
            map_key(Key::ArrowLeft, false, day()),
            Action::DecrementFocusDate(1)
        );
        assert_eq!(
            map_key(Key::ArrowRight, true, day()),
            Action::DecrementFocusDate(1)
        );
        assert_eq!(
            map_key(Key::ArrowLeft, true, day()),
            Action::IncrementFocusDate(1)
        );
    }

    #[test]
    fn test_page_and_home_keys_share_decrements() {
        assert_eq!(
            map_key(Key::PageUp, false, day()),
            Action::DecrementFocusMonth
        );
        assert_eq!(
            map_key(Key::PageDown, false, day()),
            Action::DecrementFocusMonth
        );
        assert_eq!(map_key(Key::Home, false, day()), Action::DecrementFocusYear);
        assert_eq!(map_key(Key::End, false, day()), Action::DecrementFocusYear);
    }

    #[test]
    fn test_enter_and_space_select_the_day() {
        assert_eq!(
            map_key(Key::Enter, false, day()),
            Action::SetSelectedDate(day())
        );
        assert_eq!(
            map_key(Key::Space, true, day()),
            Action::SetSelectedDate(day())
        );
    }

    #[test]
    fn test_unlisted_identifiers_produce_no_key() {
        assert_eq!(Key::from_identifier("Escape"), None);
        assert_eq!(Key::from_identifier("a"), None);
        assert_eq!(Key::from_identifier("Tab"), None);
        assert_eq!(Key::from_identifier(" "), Some(Key::Space));
        assert_eq!(Key::from_identifier("ArrowLeft"), Some(Key::ArrowLeft));
    }
}
