//! Filter state and request shaping.
//!
//! `FilterState` owns the two parallel query objects (stat and list) and the
//! follow flag. Every mutation returns the [`Refresh`] the caller has to issue,
//! so the state itself never talks to the network.

use chrono::{DateTime, Utc};

use crate::api::{DimensionSet, QueryRequest, WILDCARD};

/// Default number of entries per list page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Default limit sent with stat queries.
pub const DEFAULT_STAT_LIMIT: u32 = 500;

/// Query that has to be (re)issued after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    None,
    Stat,
    List,
}

/// Current filters, pagination and follow mode.
#[derive(Debug, Clone)]
pub struct FilterState {
    dimensions: DimensionSet,
    stat: QueryRequest,
    list: QueryRequest,
    follow: bool,
}

impl FilterState {
    pub fn new(dimensions: DimensionSet, page_size: u32, stat_limit: u32) -> Self {
        Self {
            dimensions,
            stat: QueryRequest {
                limit: stat_limit,
                ..Default::default()
            },
            list: QueryRequest {
                limit: page_size.max(1),
                offset: Some(0),
                ..Default::default()
            },
            follow: true,
        }
    }

    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    pub fn dimensions(&self) -> DimensionSet {
        self.dimensions
    }

    pub fn stat_query(&self) -> &QueryRequest {
        &self.stat
    }

    pub fn list_query(&self) -> &QueryRequest {
        &self.list
    }

    pub fn follow(&self) -> bool {
        self.follow
    }

    pub fn page_size(&self) -> u32 {
        self.list.limit
    }

    pub fn offset(&self) -> u32 {
        self.list.offset.unwrap_or(0)
    }

    /// Zero-based page index counted back from the live tail.
    pub fn page(&self) -> u32 {
        self.offset() / self.page_size()
    }

    pub fn from(&self) -> Option<DateTime<Utc>> {
        self.stat.from_timestamp
    }

    pub fn to(&self) -> Option<DateTime<Utc>> {
        self.stat.to_timestamp
    }

    pub fn message(&self) -> Option<&str> {
        self.stat.message.as_deref()
    }

    /// Dimension filters currently applied to list queries.
    pub fn selection(&self) -> (Option<&str>, Option<&str>) {
        self.dimensions.filter_of(&self.list)
    }

    pub fn set_from(&mut self, from: Option<DateTime<Utc>>) -> Refresh {
        self.stat.from_timestamp = from;
        self.list.from_timestamp = from;
        self.filters_changed()
    }

    pub fn set_to(&mut self, to: Option<DateTime<Utc>>) -> Refresh {
        self.stat.to_timestamp = to;
        self.list.to_timestamp = to;
        self.filters_changed()
    }

    /// Sets the message substring filter. Blank input clears it.
    pub fn set_message(&mut self, message: Option<String>) -> Refresh {
        let message = message.filter(|m| !m.trim().is_empty());
        self.stat.message = message.clone();
        self.list.message = message;
        self.filters_changed()
    }

    /// Clears time range and message filters.
    pub fn clear_filters(&mut self) -> Refresh {
        for query in [&mut self.stat, &mut self.list] {
            query.from_timestamp = None;
            query.to_timestamp = None;
            query.message = None;
        }
        self.filters_changed()
    }

    fn filters_changed(&mut self) -> Refresh {
        self.list.offset = Some(0);
        Refresh::Stat
    }

    /// Enabling follow returns to the live tail; disabling issues nothing.
    pub fn set_follow(&mut self, follow: bool) -> Refresh {
        self.follow = follow;
        if follow {
            self.list.offset = Some(0);
            Refresh::Stat
        } else {
            Refresh::None
        }
    }

    pub fn toggle_follow(&mut self) -> Refresh {
        self.set_follow(!self.follow)
    }

    /// Moves one page further into the past.
    pub fn prev_page(&mut self) -> Refresh {
        self.follow = false;
        self.list.offset = Some(self.offset().saturating_add(self.page_size()));
        Refresh::List
    }

    /// Moves one page towards the present. Reaching the first page returns
    /// to follow mode instead of querying the list directly.
    pub fn next_page(&mut self) -> Refresh {
        if self.follow {
            self.follow = false;
        }
        let offset = self.offset();
        if offset <= self.page_size() {
            self.list.offset = Some(0);
            self.set_follow(true)
        } else {
            self.list.offset = Some(offset - self.page_size());
            Refresh::List
        }
    }

    /// Narrows list queries to a stat row. Wildcard values clear the filter.
    pub fn select(&mut self, primary: &str, secondary: &str) -> Refresh {
        let narrow = |value: &str| (value != WILDCARD).then(|| value.to_string());
        self.dimensions
            .apply_filter(&mut self.list, narrow(primary), narrow(secondary));
        self.list.offset = Some(0);
        Refresh::List
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(
            DimensionSet::default(),
            DEFAULT_PAGE_SIZE,
            DEFAULT_STAT_LIMIT,
        )
    }
}
