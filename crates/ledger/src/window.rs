//! Time-window predicates for ledger queries.

use chrono::{Days, NaiveDate};

/// Relative periods offered by the dashboard filter.
const PERIOD_DAYS: [u64; 3] = [7, 30, 90];

/// A date-range or relative-period predicate over the ledger.
///
/// The window selects the entries a query returns; everything strictly before
/// its lower bound feeds the starting balance. An unbounded window has no
/// "before", so its starting balance is zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Window {
    AllTime,
    /// Entries from `today - days` (inclusive) onwards.
    LastDays(u64),
    /// Entries between `from` and `to`, both inclusive.
    Range { from: NaiveDate, to: NaiveDate },
}

impl Window {
    /// Builds a window from the dashboard's query parameters.
    ///
    /// A `period` outside {7, 30, 90} is ignored, as is a half-specified
    /// range; both fall back to all-time like the original filter UI.
    pub fn from_query(
        period: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Self {
        if let Some(period) = period {
            if let Ok(days) = period.parse::<u64>() {
                if PERIOD_DAYS.contains(&days) {
                    return Self::LastDays(days);
                }
            }
        }

        if let (Some(from), Some(to)) = (from, to) {
            let from = NaiveDate::parse_from_str(from, "%Y-%m-%d");
            let to = NaiveDate::parse_from_str(to, "%Y-%m-%d");
            if let (Ok(from), Ok(to)) = (from, to) {
                return Self::Range { from, to };
            }
        }

        Self::AllTime
    }

    /// First day inside the window, or `None` when unbounded below.
    pub fn lower_bound(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::AllTime => None,
            Self::LastDays(days) => today.checked_sub_days(Days::new(*days)),
            Self::Range { from, .. } => Some(*from),
        }
    }

    /// Last day inside the window, or `None` when unbounded above.
    pub fn upper_bound(&self) -> Option<NaiveDate> {
        match self {
            Self::AllTime | Self::LastDays(_) => None,
            Self::Range { to, .. } => Some(*to),
        }
    }
}
