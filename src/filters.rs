//! Client-side Filtering
//!
//! Pure functions over already-fetched lists. They run on every keystroke
//! and never touch the network.

use chrono::{DateTime, Datelike, Utc};

use crate::dates::parse_timestamp;
use crate::models::{Event, Member, News};

/// Case-insensitive substring test; an empty needle matches everything
fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

/// News whose title or description contains `term`
pub fn filter_news(news: &[News], term: &str) -> Vec<News> {
    let term = term.trim().to_lowercase();
    news.iter()
        .filter(|n| contains_ci(&n.title, &term) || contains_ci(&n.description, &term))
        .cloned()
        .collect()
}

/// A pin that has not expired yet; pins without an expiry last forever
pub fn is_pin_active(news: &News, now: DateTime<Utc>) -> bool {
    news.pinned
        && match news.pinned_until.as_deref().and_then(parse_timestamp) {
            Some(until) => until > now,
            None => true,
        }
}

/// Active pins first, then newest first
pub fn sort_news(mut news: Vec<News>, now: DateTime<Utc>) -> Vec<News> {
    news.sort_by(|a, b| {
        is_pin_active(b, now)
            .cmp(&is_pin_active(a, now))
            .then_with(|| parse_timestamp(&b.date).cmp(&parse_timestamp(&a.date)))
    });
    news
}

/// Search state of the events page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQuery {
    pub text: String,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub category: Option<String>,
}

impl EventQuery {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
            && self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.category.is_none()
    }

    fn matches(&self, event: &Event, term: &str) -> bool {
        let text_ok = contains_ci(&event.name, term)
            || event
                .description
                .as_deref()
                .is_some_and(|d| contains_ci(d, term));
        if !text_ok {
            return false;
        }

        let category_ok = match &self.category {
            Some(wanted) => event
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(wanted)),
            None => true,
        };
        if !category_ok {
            return false;
        }

        if self.year.is_none() && self.month.is_none() && self.day.is_none() {
            return true;
        }
        match parse_timestamp(&event.date) {
            Some(date) => {
                self.year.map_or(true, |y| date.year() == y)
                    && self.month.map_or(true, |m| date.month() == m)
                    && self.day.map_or(true, |d| date.day() == d)
            }
            None => false,
        }
    }
}

/// Events matching text (name/description), decomposed date parts and category
pub fn filter_events(events: &[Event], query: &EventQuery) -> Vec<Event> {
    let term = query.text.trim().to_lowercase();
    events
        .iter()
        .filter(|e| query.matches(e, &term))
        .cloned()
        .collect()
}

/// Non-cancelled events dated after `now`, soonest first.
///
/// An expired registration deadline does not hide an event: it still takes
/// place and its card shows registration as closed.
pub fn upcoming_events(events: &[Event], now: DateTime<Utc>) -> Vec<Event> {
    let mut upcoming: Vec<(DateTime<Utc>, Event)> = events
        .iter()
        .filter(|e| !e.cancelled)
        .filter_map(|e| parse_timestamp(&e.date).map(|d| (d, e.clone())))
        .filter(|(date, _)| *date > now)
        .collect();
    upcoming.sort_by_key(|(date, _)| *date);
    upcoming.into_iter().map(|(_, e)| e).collect()
}

/// Distinct categories in display order
pub fn categories(events: &[Event]) -> Vec<String> {
    let mut found: Vec<String> = events
        .iter()
        .filter_map(|e| e.category.clone())
        .filter(|c| !c.trim().is_empty())
        .collect();
    found.sort_by_key(|c| c.to_lowercase());
    found.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    found
}

/// Members whose name, surname or document contains `term`
pub fn filter_members(members: &[Member], term: &str) -> Vec<Member> {
    let term = term.trim().to_lowercase();
    members
        .iter()
        .filter(|m| {
            contains_ci(&m.name, &term)
                || m.surname.as_deref().is_some_and(|s| contains_ci(s, &term))
                || m.document.as_deref().is_some_and(|d| contains_ci(d, &term))
        })
        .cloned()
        .collect()
}

/// One page of a list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based, clamped into range
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

/// Slice `items` into `per_page` chunks and return chunk `page`
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);
    let page = page.min(total_pages - 1);
    let start = page * per_page;
    let end = (start + per_page).min(items.len());
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
    }
}
