use chrono::{Datelike, Duration, NaiveDate};

/// A closed range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Smallest span covering every date yielded, or `None` for no dates.
    pub fn covering<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().fold(None, |span, d| match span {
            None => Some(Self::new(d, d)),
            Some(s) => Some(Self::new(s.start.min(d), s.end.max(d))),
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn midpoint(&self) -> NaiveDate {
        self.start + Duration::days(self.days() / 2)
    }

    /// Widen both sides by `fraction` of the length, by at least one day.
    pub fn padded(&self, fraction: f64) -> Self {
        let pad = ((self.days() as f64 * fraction).round() as i64).max(1);
        Self::new(self.start - Duration::days(pad), self.end + Duration::days(pad))
    }

    /// Every date within the span that falls on the given day of its month.
    pub fn month_days(&self, day: u32) -> Vec<NaiveDate> {
        let mut out = Vec::new();
        let (mut year, mut month) = (self.start.year(), self.start.month());
        loop {
            let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
                break;
            };
            if first > self.end {
                break;
            }
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                if self.contains(date) {
                    out.push(date);
                }
            }
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }
        out
    }
}

/// Maps dates onto horizontal pixel offsets.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// The leftmost visible date.
    pub start: NaiveDate,
    /// The rightmost visible date.
    pub end: NaiveDate,
    /// Pixels per day (controls horizontal scale).
    pub pixels_per_day: f32,
}

impl TimelineViewport {
    pub fn new(span: DateSpan, pixels_per_day: f32) -> Self {
        Self {
            start: span.start,
            end: span.end,
            pixels_per_day,
        }
    }

    /// Convert a date to an x-pixel offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        let days = (date - self.start).num_days() as f32;
        days * self.pixels_per_day
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.end)
    }
}
