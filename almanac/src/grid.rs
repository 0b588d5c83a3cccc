//! Month-grid projection: week rows, day cells, and their labels.
//!
//! ## Usage
//!
//! Build a [`MonthGrid`] from a page date and a resolved locale, then apply
//! the navigation state so selection and focus flags are current. The grid
//! is a pure projection; rebuilding it with equal inputs yields an equal
//! grid.
use crate::{
    date::{CalendarDate, DateAdapter, Weekday},
    locale::ResolvedLocale,
    navigation::NavigationState,
};

/// Number of columns in every week row.
pub const DAYS_PER_WEEK: usize = 7;

/// One day cell inside a week row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// The concrete calendar date this cell renders.
    pub date: CalendarDate,
    /// Short label, the day-of-month number.
    pub label: String,
    /// Full accessible label, e.g. `Thursday, February 1, 2024`.
    pub accessible_label: String,
    /// Whether the date belongs to the page month (padding cells render
    /// adjacent months).
    pub in_page_month: bool,
    /// Whether this date is the committed selection.
    pub is_selected: bool,
    /// Whether this date currently has keyboard focus.
    pub is_focused: bool,
    /// Whether this cell is the grid's single roving tab stop.
    pub is_focus_target: bool,
}

impl DayCell {
    /// Stable identity key derived from the date, never from grid position.
    pub fn key(&self) -> String {
        self.date.to_string()
    }
}

/// One rendered week: exactly seven consecutive days plus an optional
/// locale week number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    /// Locale-defined week number; present when week numbers are shown.
    pub week_number: Option<u32>,
    /// Accessible label naming the week's date range. Under right-to-left
    /// locales the endpoints are stated last-to-first; the cells themselves
    /// stay in chronological order.
    pub range_label: String,
    /// The seven day cells in chronological order.
    pub days: [DayCell; DAYS_PER_WEEK],
}

impl WeekRow {
    /// Stable identity key derived from the row's first date.
    pub fn key(&self) -> String {
        self.days[0].key()
    }
}

/// The render model for one month page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// Week rows covering the page month, padded to complete weeks.
    pub weeks: Vec<WeekRow>,
    /// Short weekday header labels in locale week-start order.
    pub weekday_labels: [&'static str; DAYS_PER_WEEK],
}

impl MonthGrid {
    /// Returns a copy with selection and focus flags reflecting `state`.
    ///
    /// Exactly one cell becomes the roving focus target: the focused day if
    /// visible, else the selected day if visible, else the first of the
    /// page month.
    pub fn with_state(&self, state: &NavigationState) -> MonthGrid {
        let mut grid = self.clone();
        let visible = |wanted: Option<CalendarDate>| {
            wanted.filter(|date| {
                grid.weeks
                    .iter()
                    .any(|week| week.days.iter().any(|cell| cell.date == *date))
            })
        };
        let focus_target = visible(state.focus_date)
            .or_else(|| visible(state.selected_date))
            .unwrap_or(state.page_date);
        for week in &mut grid.weeks {
            for cell in &mut week.days {
                cell.is_selected = state.selected_date == Some(cell.date);
                cell.is_focused = state.focus_date == Some(cell.date);
                cell.is_focus_target = cell.date == focus_target;
            }
        }
        grid
    }
}

/// Builds the month grid for a page date.
///
/// Leading cells pad back to the locale week start, trailing cells complete
/// the final week; all flags start cleared (see [`MonthGrid::with_state`]).
/// Script direction never reorders the columns.
pub fn build_month_grid<A>(
    adapter: &A,
    page_date: CalendarDate,
    locale: &ResolvedLocale,
    show_week_numbers: bool,
) -> MonthGrid
where
    A: DateAdapter + ?Sized,
{
    let scheme = locale.week();
    let first_day = scheme.first_day;
    let leading = adapter.day_of_week(page_date).index_from(first_day) as i64;
    let days_in_month = adapter.days_in_month(page_date) as i64;
    let end_of_month = adapter.end_of_month(page_date).unwrap_or(page_date);
    let trailing = 6 - adapter.day_of_week(end_of_month).index_from(first_day) as i64;
    let total = leading + days_in_month + trailing;

    let page_month = (page_date.year(), page_date.month());
    let page_days = page_date.civil_days();
    let cell_at = |offset: i64| {
        // Padding can step past the adapter's supported range (pages at the
        // first or last representable month); raw civil-day math keeps those
        // cells on distinct dates.
        let date = adapter
            .add_days(page_date, offset - leading)
            .unwrap_or_else(|| CalendarDate::from_civil_days(page_days + offset - leading));
        DayCell {
            date,
            label: format!("{}", date.day()),
            accessible_label: accessible_label(adapter, date),
            in_page_month: (date.year(), date.month()) == page_month,
            is_selected: false,
            is_focused: false,
            is_focus_target: false,
        }
    };

    let mut weeks = Vec::with_capacity((total / 7) as usize);
    let mut offset = 0;
    while offset < total {
        let days: [DayCell; DAYS_PER_WEEK] = std::array::from_fn(|i| cell_at(offset + i as i64));
        let week_number =
            show_week_numbers.then(|| adapter.week_number(days[0].date, scheme));
        let range_label = range_label(&days, locale.right_to_left());
        weeks.push(WeekRow {
            week_number,
            range_label,
            days,
        });
        offset += 7;
    }

    MonthGrid {
        weeks,
        weekday_labels: weekday_labels(first_day),
    }
}

/// Returns short weekday labels starting from the locale's first day.
pub fn weekday_labels(first_day: Weekday) -> [&'static str; DAYS_PER_WEEK] {
    std::array::from_fn(|i| {
        weekday_short_label(Weekday::from_monday_index(
            first_day.index_from_monday() + i as i32,
        ))
    })
}

fn range_label(days: &[DayCell; DAYS_PER_WEEK], right_to_left: bool) -> String {
    let first = full_date_label(days[0].date);
    let last = full_date_label(days[DAYS_PER_WEEK - 1].date);
    if right_to_left {
        format!("{last} - {first}")
    } else {
        format!("{first} - {last}")
    }
}

fn accessible_label<A>(adapter: &A, date: CalendarDate) -> String
where
    A: DateAdapter + ?Sized,
{
    format!(
        "{}, {}",
        weekday_name(adapter.day_of_week(date)),
        full_date_label(date)
    )
}

fn full_date_label(date: CalendarDate) -> String {
    format!(
        "{} {}, {}",
        month_name(date.month()),
        date.day(),
        date.year()
    )
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

fn weekday_short_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

fn month_name(month: u8) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{date::CivilDateAdapter, locale::LocaleRequest};

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).expect("valid test date")
    }

    fn locale(tag: &str) -> ResolvedLocale {
        ResolvedLocale::resolve(&LocaleRequest::from(tag))
    }

    fn grid(tag: &str, page: CalendarDate, week_numbers: bool) -> MonthGrid {
        build_month_grid(&CivilDateAdapter, page, &locale(tag), week_numbers)
    }

    #[test]
    fn test_leap_february_is_complete_and_padded() {
        let grid = grid("en-US", date(2024, 2, 1), false);
        assert_eq!(grid.weeks.len(), 5);

        // Sunday-start padding: four leading January days, two trailing
        // March days.
        assert_eq!(grid.weeks[0].days[0].date, date(2024, 1, 28));
        assert!(!grid.weeks[0].days[0].in_page_month);
        let last_week = grid.weeks.last().expect("grid has rows");
        assert_eq!(last_week.days[6].date, date(2024, 3, 2));
        assert!(!last_week.days[6].in_page_month);

        // Every date from the 1st to the 29th appears exactly once.
        let mut in_month: Vec<u8> = grid
            .weeks
            .iter()
            .flat_map(|week| week.days.iter())
            .filter(|cell| cell.in_page_month)
            .map(|cell| cell.date.day())
            .collect();
        in_month.sort_unstable();
        assert_eq!(in_month, (1..=29).collect::<Vec<u8>>());
    }

    #[test]
    fn test_week_start_follows_locale() {
        let grid = grid("de-DE", date(2024, 2, 1), false);
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0].days[0].date, date(2024, 1, 29));
        assert_eq!(grid.weekday_labels[0], "Mon");

        let us = super::weekday_labels(Weekday::Sunday);
        assert_eq!(us, ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    }

    #[test]
    fn test_rows_are_consecutive_weeks() {
        let grid = grid("en-US", date(2024, 2, 1), false);
        let adapter = CivilDateAdapter;
        let mut expected = grid.weeks[0].days[0].date;
        for week in &grid.weeks {
            for cell in &week.days {
                assert_eq!(cell.date, expected);
                expected = adapter.add_days(expected, 1).expect("next day exists");
            }
        }
    }

    #[test]
    fn test_week_numbers_present_only_when_requested() {
        let without = grid("de-DE", date(2024, 2, 1), false);
        assert!(without.weeks.iter().all(|week| week.week_number.is_none()));

        let with = grid("de-DE", date(2024, 2, 1), true);
        // First row starts 2024-01-29, ISO week 5.
        assert_eq!(with.weeks[0].week_number, Some(5));
        assert_eq!(with.weeks[1].week_number, Some(6));
    }

    #[test]
    fn test_rtl_flips_range_label_but_not_columns() {
        let ltr = grid("en-US", date(2024, 2, 1), false);
        let rtl = build_month_grid(
            &CivilDateAdapter,
            date(2024, 2, 1),
            &ResolvedLocale::resolve(&LocaleRequest::from(&["he-IL"][..])),
            false,
        );
        let ltr_dates: Vec<CalendarDate> = ltr
            .weeks
            .iter()
            .flat_map(|week| week.days.iter().map(|cell| cell.date))
            .collect();
        let rtl_dates: Vec<CalendarDate> = rtl
            .weeks
            .iter()
            .flat_map(|week| week.days.iter().map(|cell| cell.date))
            .collect();
        assert_eq!(ltr_dates, rtl_dates);

        assert_eq!(
            ltr.weeks[0].range_label,
            "January 28, 2024 - February 3, 2024"
        );
        assert_eq!(
            rtl.weeks[0].range_label,
            "February 3, 2024 - January 28, 2024"
        );
    }

    #[test]
    fn test_identity_keys_derive_from_dates() {
        let grid = grid("en-US", date(2024, 2, 1), false);
        assert_eq!(grid.weeks[0].key(), "2024-01-28");
        assert_eq!(grid.weeks[0].days[4].key(), "2024-02-01");
    }

    #[test]
    fn test_accessible_labels() {
        let grid = grid("en-US", date(2024, 2, 1), false);
        let first_of_month = &grid.weeks[0].days[4];
        assert_eq!(first_of_month.label, "1");
        assert_eq!(
            first_of_month.accessible_label,
            "Thursday, February 1, 2024"
        );
    }

    #[test]
    fn test_focus_target_roves() {
        let base = grid("en-US", date(2024, 2, 1), false);
        let targets = |grid: &MonthGrid| {
            grid.weeks
                .iter()
                .flat_map(|week| week.days.iter())
                .filter(|cell| cell.is_focus_target)
                .map(|cell| cell.date)
                .collect::<Vec<_>>()
        };

        // No focus or selection: the first of the month is the tab stop.
        let plain = base.with_state(&NavigationState::new(date(2024, 2, 1)));
        assert_eq!(targets(&plain), [date(2024, 2, 1)]);

        // A visible selection takes over.
        let mut state = NavigationState::new(date(2024, 2, 1));
        state.selected_date = Some(date(2024, 2, 10));
        let selected = base.with_state(&state);
        assert_eq!(targets(&selected), [date(2024, 2, 10)]);
        assert!(
            selected
                .weeks
                .iter()
                .flat_map(|week| week.days.iter())
                .any(|cell| cell.is_selected && cell.date == date(2024, 2, 10))
        );

        // A focused padding day beats the selection.
        state.focus_date = Some(date(2024, 1, 30));
        let focused = base.with_state(&state);
        assert_eq!(targets(&focused), [date(2024, 1, 30)]);

        // An off-grid focus date falls back to the selection.
        state.focus_date = Some(date(2024, 6, 15));
        let off_grid = base.with_state(&state);
        assert_eq!(targets(&off_grid), [date(2024, 2, 10)]);
    }

    #[test]
    fn test_padding_stays_distinct_at_year_range_edges() {
        // 0001-01-01 is a Monday, so Sunday-start padding reaches one day
        // before the supported range; 9999-12 pads past its end.
        let first_page = grid("en-US", date(1, 1, 1), false);
        let lead = &first_page.weeks[0].days[0];
        assert_eq!(lead.key(), "0000-12-31");
        assert!(!lead.in_page_month);

        let last_page = grid("en-US", date(9999, 12, 1), false);
        for grid in [&first_page, &last_page] {
            let dates: Vec<CalendarDate> = grid
                .weeks
                .iter()
                .flat_map(|week| week.days.iter().map(|cell| cell.date))
                .collect();
            // Strictly increasing: consecutive days, no duplicates, so the
            // date-derived keys stay unique.
            assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
        }

        let flagged = first_page.with_state(&NavigationState::new(date(1, 1, 1)));
        let targets = flagged
            .weeks
            .iter()
            .flat_map(|week| week.days.iter())
            .filter(|cell| cell.is_focus_target)
            .count();
        assert_eq!(targets, 1);
    }
}
