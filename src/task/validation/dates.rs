//! Calendar date validation.

use super::{ValidationError, ValidationResult};
use chrono::{Datelike, Months, NaiveDate};
use mockable::Clock;

/// Rules applied by [`validate_date`].
///
/// `can_be_past` and `can_be_future` are independent switches. Turning both
/// off accepts today only.
///
/// # Examples
///
/// ```
/// use taskroster::task::validation::DateRules;
///
/// let rules = DateRules::default();
/// assert!(!rules.can_be_past);
/// assert!(rules.can_be_future);
///
/// let historical = DateRules::default().allow_past().deny_future();
/// assert!(historical.can_be_past);
/// assert!(!historical.can_be_future);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRules {
    /// Whether dates before today are accepted.
    pub can_be_past: bool,
    /// Whether dates after today are accepted.
    pub can_be_future: bool,
    /// Length of the forward horizon in years.
    pub max_years_ahead: u32,
    /// Earliest accepted calendar year.
    pub min_year: i32,
}

impl Default for DateRules {
    fn default() -> Self {
        Self {
            can_be_past: false,
            can_be_future: true,
            max_years_ahead: 10,
            min_year: 1900,
        }
    }
}

impl DateRules {
    /// Accepts dates before today.
    #[must_use]
    pub const fn allow_past(mut self) -> Self {
        self.can_be_past = true;
        self
    }

    /// Rejects dates after today.
    #[must_use]
    pub const fn deny_future(mut self) -> Self {
        self.can_be_future = false;
        self
    }

    /// Replaces the forward horizon.
    #[must_use]
    pub const fn with_max_years_ahead(mut self, years: u32) -> Self {
        self.max_years_ahead = years;
        self
    }

    /// Replaces the earliest accepted year.
    #[must_use]
    pub const fn with_min_year(mut self, year: i32) -> Self {
        self.min_year = year;
        self
    }

    /// Returns the latest date accepted when `today` is the reference day.
    #[must_use]
    pub fn horizon(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_months(Months::new(self.max_years_ahead.saturating_mul(12)))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Validates a date against `rules`, using the clock's current UTC day as
/// "today".
///
/// # Errors
///
/// See [`validate_date_on`].
pub fn validate_date(
    date: NaiveDate,
    rules: &DateRules,
    clock: &impl Clock,
) -> ValidationResult<NaiveDate> {
    validate_date_on(date, rules, clock.utc().date_naive())
}

/// Validates a date against `rules` relative to an explicit reference day.
///
/// The date is returned unchanged when it passes.
///
/// # Errors
///
/// Returns, in this order of precedence:
/// - [`ValidationError::DateInPast`] if the date precedes `today` and past
///   dates are not allowed,
/// - [`ValidationError::DateInFuture`] if the date follows `today` and
///   future dates are not allowed,
/// - [`ValidationError::DateTooFarAhead`] if the date lies beyond the
///   horizon,
/// - [`ValidationError::DateBeforeMinimumYear`] if the year is too early.
pub fn validate_date_on(
    date: NaiveDate,
    rules: &DateRules,
    today: NaiveDate,
) -> ValidationResult<NaiveDate> {
    if !rules.can_be_past && date < today {
        return Err(ValidationError::DateInPast { date, today });
    }

    if !rules.can_be_future && date > today {
        return Err(ValidationError::DateInFuture { date, today });
    }

    let limit = rules.horizon(today);
    if date > limit {
        return Err(ValidationError::DateTooFarAhead {
            date,
            limit,
            max_years: rules.max_years_ahead,
        });
    }

    if date.year() < rules.min_year {
        return Err(ValidationError::DateBeforeMinimumYear {
            date,
            min_year: rules.min_year,
        });
    }

    Ok(date)
}
