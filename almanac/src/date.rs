//! Calendar date values and the date arithmetic collaborator contract.
//!
//! ## Usage
//!
//! The navigation reducer and grid builder never do calendar math
//! themselves; they go through a [`DateAdapter`]. [`CivilDateAdapter`] is the
//! built-in proleptic-Gregorian implementation.
use std::{
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

/// Earliest year representable by [`CalendarDate`].
pub const MIN_YEAR: i32 = 1;
/// Latest year representable by [`CalendarDate`].
pub const MAX_YEAR: i32 = 9999;

/// Days of the week in Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Weekday {
    /// Returns this weekday's offset from Monday (0-6).
    pub fn index_from_monday(self) -> i32 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// Returns the weekday `index` days after Monday, wrapping modulo 7.
    pub fn from_monday_index(index: i32) -> Self {
        match index.rem_euclid(7) {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    /// Returns this weekday's offset (0-6) from the given first day of week.
    pub fn index_from(self, first_day: Weekday) -> u8 {
        (self.index_from_monday() - first_day.index_from_monday()).rem_euclid(7) as u8
    }
}

/// A calendar date expressed as year, month, and day.
///
/// Ordering is chronological; the `Display` form is `YYYY-MM-DD`, which also
/// serves as a stable identity key for render-model rows and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Creates a calendar date if the values form a real date within the
    /// supported year range.
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        if !(1..=12).contains(&month) {
            return None;
        }
        let max_day = days_in_month(year, month);
        if day == 0 || day > max_day {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month (1-31).
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Returns whether the stored values form a real calendar date.
    pub fn is_well_formed(&self) -> bool {
        CalendarDate::new(self.year, self.month, self.day).is_some()
    }

    /// Civil-day number of this date (1970-01-01 is day 0).
    pub(crate) fn civil_days(self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// Builds the date a civil-day number names without range gating.
    /// Month-grid padding may step a few days past the supported year range;
    /// those cells must still carry distinct dates.
    pub(crate) fn from_civil_days(days: i64) -> Self {
        let (year, month, day) = civil_from_days(days);
        Self { year, month, day }
    }

    /// Returns the current date in UTC.
    pub fn today() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let days = (duration.as_secs() / 86_400) as i64;
        let (year, month, day) = civil_from_days(days);
        CalendarDate::new(year, month, day).unwrap_or(Self {
            year: 1970,
            month: 1,
            day: 1,
        })
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Parameters for locale-dependent week numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekScheme {
    /// First day of the week.
    pub first_day: Weekday,
    /// Minimum number of days a week must have in the new year to count as
    /// that year's week 1.
    pub min_days_in_first_week: u8,
}

impl WeekScheme {
    /// ISO-8601 week numbering: Monday start, week 1 holds at least 4 days.
    pub const ISO_8601: WeekScheme = WeekScheme {
        first_day: Weekday::Monday,
        min_days_in_first_week: 4,
    };

    /// Sunday-start numbering where the week containing January 1st is
    /// week 1.
    pub const JANUARY_FIRST: WeekScheme = WeekScheme {
        first_day: Weekday::Sunday,
        min_days_in_first_week: 1,
    };
}

/// Pure calendar arithmetic used by the reducer and the grid builder.
///
/// Every transform returns `Option<CalendarDate>`; `None` is the explicit
/// invalid marker (month overflow, out-of-range year). Callers must gate on
/// validity before committing state, and no implementation may mutate its
/// input.
pub trait DateAdapter {
    /// Returns whether `date` is acceptable to this adapter.
    fn is_valid(&self, date: CalendarDate) -> bool {
        date.is_well_formed()
    }

    /// Returns the first day of `date`'s month.
    fn start_of_month(&self, date: CalendarDate) -> Option<CalendarDate> {
        CalendarDate::new(date.year(), date.month(), 1)
    }

    /// Returns the last day of `date`'s month.
    fn end_of_month(&self, date: CalendarDate) -> Option<CalendarDate> {
        CalendarDate::new(date.year(), date.month(), self.days_in_month(date))
    }

    /// Adds `days` (may be negative) to `date`.
    fn add_days(&self, date: CalendarDate, days: i64) -> Option<CalendarDate>;

    /// Adds `months` (may be negative), clamping the day to the target
    /// month's length.
    fn add_months(&self, date: CalendarDate, months: i32) -> Option<CalendarDate>;

    /// Adds `years` (may be negative), clamping February 29th to the 28th in
    /// non-leap years.
    fn add_years(&self, date: CalendarDate, years: i32) -> Option<CalendarDate>;

    /// Replaces the month, keeping year and day.
    ///
    /// The day is *not* clamped: setting January 31st to February yields an
    /// out-of-range construct and therefore `None`.
    fn set_month(&self, date: CalendarDate, month: u8) -> Option<CalendarDate>;

    /// Replaces the year, keeping month and day (February 29th maps to
    /// `None` in non-leap years).
    fn set_year(&self, date: CalendarDate, year: i32) -> Option<CalendarDate>;

    /// Returns the weekday of `date`.
    fn day_of_week(&self, date: CalendarDate) -> Weekday;

    /// Returns the number of days in `date`'s month.
    fn days_in_month(&self, date: CalendarDate) -> u8 {
        days_in_month(date.year(), date.month())
    }

    /// Returns the week number of `date` under the given scheme.
    fn week_number(&self, date: CalendarDate, scheme: WeekScheme) -> u32;
}

/// Proleptic-Gregorian [`DateAdapter`] backed by civil-day conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct CivilDateAdapter;

impl DateAdapter for CivilDateAdapter {
    fn add_days(&self, date: CalendarDate, days: i64) -> Option<CalendarDate> {
        let total = days_from_civil(date.year(), date.month(), date.day()).checked_add(days)?;
        let (year, month, day) = civil_from_days(total);
        CalendarDate::new(year, month, day)
    }

    fn add_months(&self, date: CalendarDate, months: i32) -> Option<CalendarDate> {
        let total = date.year() as i64 * 12 + (date.month() as i64 - 1) + months as i64;
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u8;
        if !(MIN_YEAR as i64..=MAX_YEAR as i64).contains(&year) {
            return None;
        }
        let year = year as i32;
        let day = date.day().min(days_in_month(year, month));
        CalendarDate::new(year, month, day)
    }

    fn add_years(&self, date: CalendarDate, years: i32) -> Option<CalendarDate> {
        let year = date.year().checked_add(years)?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        let day = date.day().min(days_in_month(year, date.month()));
        CalendarDate::new(year, date.month(), day)
    }

    fn set_month(&self, date: CalendarDate, month: u8) -> Option<CalendarDate> {
        CalendarDate::new(date.year(), month, date.day())
    }

    fn set_year(&self, date: CalendarDate, year: i32) -> Option<CalendarDate> {
        CalendarDate::new(year, date.month(), date.day())
    }

    fn day_of_week(&self, date: CalendarDate) -> Weekday {
        weekday_from_days(days_from_civil(date.year(), date.month(), date.day()))
    }

    fn week_number(&self, date: CalendarDate, scheme: WeekScheme) -> u32 {
        let min_days = scheme.min_days_in_first_week.clamp(1, 7) as i64;
        let days = days_from_civil(date.year(), date.month(), date.day());
        let week_start = days - weekday_from_days(days).index_from(scheme.first_day) as i64;
        // The week belongs to whichever year holds at least `min_days` of it.
        let (pivot_year, _, _) = civil_from_days(week_start + (7 - min_days));
        (week_start - first_week_start(pivot_year, scheme)) as u32 / 7 + 1
    }
}

/// Returns the civil-day number of the start of `year`'s week 1.
fn first_week_start(year: i32, scheme: WeekScheme) -> i64 {
    let min_days = scheme.min_days_in_first_week.clamp(1, 7) as i64;
    let jan1 = days_from_civil(year, 1, 1);
    let jan1_offset = weekday_from_days(jan1).index_from(scheme.first_day) as i64;
    if 7 - jan1_offset >= min_days {
        jan1 - jan1_offset
    } else {
        jan1 - jan1_offset + 7
    }
}

fn weekday_from_days(days: i64) -> Weekday {
    Weekday::from_monday_index((days + 3).rem_euclid(7) as i32)
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let mut y = year;
    let m = month as i32;
    let d = day as i32;
    y -= if m <= 2 { 1 } else { 0 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = m + if m > 2 { -3 } else { 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    (era * 146_097 + doe - 719_468) as i64
}

fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = mp + if mp < 10 { 3 } else { -9 };
    let year = y + if month <= 2 { 1 } else { 0 };
    (year as i32, month as u8, day as u8)
}
