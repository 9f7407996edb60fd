//! Date and time utilities.

use std::{cell::Cell, cmp::Ordering, marker::PhantomData, ops, time::Duration};

use derive_more::{Debug, Display, Error};
use time::{format_description::well_known::Rfc3339, UtcOffset};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// Calendar year.
pub type Year = i32;

/// Length of a single calendar day.
pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Creates a new [`DateTime`] representing the current date and time.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn now() -> Self {
        let inner = time::OffsetDateTime::now_utc();
        Self {
            _of: PhantomData,
            inner: inner
                .replace_microsecond(inner.microsecond())
                .expect("infallible"),
        }
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(E::Parse)?
            .try_into()
            .map_err(E::ComponentRange)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the calendar date of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> time::Date {
        self.inner.date()
    }

    /// Returns the calendar [`Year`] of this [`DateTime`].
    #[must_use]
    pub fn year(&self) -> Year {
        self.inner.year()
    }

    /// Returns the time elapsed since the midnight of this [`DateTime`]'s
    /// calendar day.
    #[must_use]
    pub fn since_midnight(&self) -> Duration {
        let (h, m, s, micros) = self.inner.to_hms_micro();
        Duration::from_secs(
            u64::from(h) * 60 * 60 + u64::from(m) * 60 + u64::from(s),
        ) + Duration::from_micros(u64::from(micros))
    }

    /// Returns the number of whole calendar days between the dates of the
    /// provided `earlier` and this [`DateTime`].
    ///
    /// Time of day is ignored, so `23:59` and `00:01` of the next day are one
    /// calendar day apart.
    #[must_use]
    pub fn days_since<Other: ?Sized>(&self, earlier: &DateTimeOf<Other>) -> i64 {
        (self.date() - earlier.date()).whole_days()
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string into an [`DateTime`].
    Parse(time::error::Parse),

    /// Parsed [`DateTime`] has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        dt.to_offset(UtcOffset::UTC)
            .replace_microsecond(dt.microsecond())
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

impl<Of: ?Sized> ops::Add<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner + rhs,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> ops::Sub for DateTimeOf<Of> {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        (self.inner - rhs.inner)
            .try_into()
            .expect("duration overflow")
    }
}

impl<Of: ?Sized> ops::Sub<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner - rhs,
            _of: PhantomData,
        }
    }
}

/// Source of the current [`DateTime`].
pub trait Clock {
    /// Returns the current [`DateTime`].
    fn now(&self) -> DateTime;
}

/// [`Clock`] reading the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        DateTime::now()
    }
}

/// [`Clock`] whose time moves only when told to.
#[derive(Debug)]
pub struct ManualClock(Cell<DateTime>);

impl ManualClock {
    /// Creates a new [`ManualClock`] stopped at the provided [`DateTime`].
    #[must_use]
    pub fn new(at: DateTime) -> Self {
        Self(Cell::new(at))
    }

    /// Moves this [`ManualClock`] to the provided [`DateTime`].
    pub fn set(&self, at: DateTime) {
        self.0.set(at);
    }

    /// Moves this [`ManualClock`] forward by the provided [`Duration`].
    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime {
        self.0.get()
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::{Clock as _, DateTime, ManualClock};

    fn at(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    #[test]
    fn since_midnight() {
        assert_eq!(
            at("2020-01-01T00:00:00Z").since_midnight(),
            Duration::ZERO,
        );
        assert_eq!(
            at("2020-01-01T12:10:00Z").since_midnight(),
            Duration::from_secs(12 * 60 * 60 + 10 * 60),
        );
        assert_eq!(
            at("2020-01-01T23:59:59.5Z").since_midnight(),
            Duration::from_millis(86_399_500),
        );
    }

    #[test]
    fn days_since_ignores_time_of_day() {
        let start = at("2020-01-01T23:50:00Z");

        assert_eq!(at("2020-01-01T23:55:00Z").days_since(&start), 0);
        assert_eq!(at("2020-01-02T00:10:00Z").days_since(&start), 1);
        assert_eq!(at("2020-01-03T23:59:00Z").days_since(&start), 2);
        assert_eq!(at("2021-01-01T00:00:00Z").days_since(&start), 366);
    }

    #[test]
    fn normalizes_offset_to_utc() {
        let dt = at("2020-01-01T01:30:00+02:00");

        assert_eq!(dt, at("2019-12-31T23:30:00Z"));
        assert_eq!(dt.year(), 2019);
        assert_eq!(dt.to_rfc3339(), "2019-12-31T23:30:00Z");
    }

    #[test]
    fn manual_clock_moves_on_demand() {
        let clock = ManualClock::new(at("2020-01-01T12:00:00Z"));
        assert_eq!(clock.now(), at("2020-01-01T12:00:00Z"));

        clock.advance(Duration::from_secs(10 * 60));
        assert_eq!(clock.now(), at("2020-01-01T12:10:00Z"));

        clock.set(at("2021-06-01T00:00:00Z"));
        assert_eq!(clock.now().year(), 2021);
    }
}
