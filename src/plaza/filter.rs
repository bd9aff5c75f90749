//! # View Filter Engine
//!
//! Pure derivation of a filtered, date-sorted view over a snapshot. The
//! same snapshot and criteria always produce the same ordered output; the
//! snapshot is never mutated.
//!
//! Each criterion is an independent predicate and a record must satisfy
//! every non-`All` criterion. A criterion that refers to an attribute the
//! record does not carry (a date window over members, say) excludes that
//! record and nothing else.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::model::{date_order, Record};
use crate::store::Snapshot;

/// Categorical constraint: membership tier or ride difficulty, compared
/// case-insensitively against the record's category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Is(String),
}

impl CategoryFilter {
    /// `"all"` (or empty) means no constraint.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Is(s.to_string())
        }
    }
}

/// Distance buckets in miles: short < 20, medium 20–35, long >= 35.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeBucket {
    #[default]
    All,
    Short,
    Medium,
    Long,
}

impl RangeBucket {
    fn contains(self, value: f64) -> bool {
        match self {
            RangeBucket::All => true,
            RangeBucket::Short => value < 20.0,
            RangeBucket::Medium => (20.0..35.0).contains(&value),
            RangeBucket::Long => value >= 35.0,
        }
    }
}

impl FromStr for RangeBucket {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(RangeBucket::All),
            "short" => Ok(RangeBucket::Short),
            "medium" => Ok(RangeBucket::Medium),
            "long" => Ok(RangeBucket::Long),
            other => Err(format!("unknown distance bucket: {}", other)),
        }
    }
}

/// Date windows relative to "today": this-week is the next 7 days,
/// this-month the next 30, upcoming anything from today on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    #[default]
    All,
    ThisWeek,
    ThisMonth,
    Upcoming,
}

impl DateWindow {
    fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        let days = (date - today).num_days();
        match self {
            DateWindow::All => true,
            DateWindow::ThisWeek => (0..=7).contains(&days),
            DateWindow::ThisMonth => (0..=30).contains(&days),
            DateWindow::Upcoming => days >= 0,
        }
    }
}

impl FromStr for DateWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(DateWindow::All),
            "this-week" => Ok(DateWindow::ThisWeek),
            "this-month" => Ok(DateWindow::ThisMonth),
            "upcoming" => Ok(DateWindow::Upcoming),
            other => Err(format!("unknown date window: {}", other)),
        }
    }
}

/// A named set of optional predicates, combined by logical AND.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Criteria {
    pub category: CategoryFilter,
    pub range: RangeBucket,
    pub window: DateWindow,
    pub search: Option<String>,
}

impl Criteria {
    /// No constraints: `apply` with these criteria is the identity on any
    /// loaded snapshot.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.category == CategoryFilter::All
            && self.range == RangeBucket::All
            && self.window == DateWindow::All
            && self.search.as_deref().map_or(true, str::is_empty)
    }

    /// One-line description for headers and messages.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let CategoryFilter::Is(c) = &self.category {
            parts.push(format!("category={}", c));
        }
        match self.range {
            RangeBucket::All => {}
            RangeBucket::Short => parts.push("distance=short".to_string()),
            RangeBucket::Medium => parts.push("distance=medium".to_string()),
            RangeBucket::Long => parts.push("distance=long".to_string()),
        }
        match self.window {
            DateWindow::All => {}
            DateWindow::ThisWeek => parts.push("when=this-week".to_string()),
            DateWindow::ThisMonth => parts.push("when=this-month".to_string()),
            DateWindow::Upcoming => parts.push("when=upcoming".to_string()),
        }
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            parts.push(format!("search=\"{}\"", term));
        }
        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Does one record pass every non-`All` criterion?
pub fn matches<R: Record>(record: &R, criteria: &Criteria, today: NaiveDate) -> bool {
    if let CategoryFilter::Is(want) = &criteria.category {
        match record.category() {
            Some(have) if have.eq_ignore_ascii_case(want) => {}
            _ => return false,
        }
    }

    if criteria.range != RangeBucket::All {
        match record.magnitude() {
            Some(value) if criteria.range.contains(value) => {}
            _ => return false,
        }
    }

    if criteria.window != DateWindow::All {
        match record.date() {
            Some(date) if criteria.window.contains(date, today) => {}
            _ => return false,
        }
    }

    if let Some(term) = criteria.search.as_deref().filter(|t| !t.is_empty()) {
        let term = term.to_lowercase();
        let hit = record
            .search_text()
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
        if !hit {
            return false;
        }
    }

    true
}

/// Derive the filtered view: AND of all predicates, then a stable sort by
/// date (undated records keep their relative order after dated ones).
/// Since snapshots are normalized to date order on load, empty criteria
/// return the snapshot unchanged.
pub fn apply<'a, R: Record>(
    snapshot: &'a Snapshot<R>,
    criteria: &Criteria,
    today: NaiveDate,
) -> Vec<&'a R> {
    let mut view: Vec<&R> = snapshot
        .records()
        .iter()
        .filter(|record| matches(*record, criteria, today))
        .collect();
    view.sort_by(|a, b| date_order(a.date(), b.date()));
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{sample_ride, Member, MembershipTier, Ride};
    use crate::store::memory::StaticSource;
    use crate::store::DataStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }

    fn member(id: &str, name: &str, tier: MembershipTier) -> Member {
        Member {
            id: id.into(),
            name: name.into(),
            description: format!("{} in Ibadan", name),
            address: "Dugbe, Ibadan".into(),
            phone: "+234 803 555 0000".into(),
            website: "https://example.ng".into(),
            year_established: 1990,
            membership_level: tier,
            services: vec!["consulting".into()],
        }
    }

    fn member_snapshot() -> DataStore<Member> {
        let members = vec![
            member("m1", "Adire Textile Hub", MembershipTier::Member),
            member("m2", "Oke-Ado Motors", MembershipTier::Silver),
            member("m3", "Premier Cocoa Exports", MembershipTier::Gold),
        ];
        let mut store = DataStore::new();
        store
            .load(&StaticSource::new(
                "test",
                serde_json::to_string(&members).unwrap(),
            ))
            .unwrap();
        store
    }

    fn ride(id: &str, date: &str, distance: f64) -> Ride {
        let mut ride = sample_ride();
        ride.id = id.into();
        ride.date = date.parse().unwrap();
        ride.distance = distance;
        ride
    }

    fn ride_snapshot(rides: Vec<Ride>) -> DataStore<Ride> {
        let mut store = DataStore::new();
        store
            .load(&StaticSource::new(
                "test",
                serde_json::to_string(&rides).unwrap(),
            ))
            .unwrap();
        store
    }

    #[test]
    fn empty_criteria_is_identity() {
        let store = member_snapshot();
        let snapshot = store.snapshot().unwrap();
        let view = apply(snapshot, &Criteria::none(), today());
        let ids: Vec<&str> = view.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn filtered_view_is_an_order_preserving_subsequence() {
        let store = ride_snapshot(vec![
            ride("r1", "2026-09-02", 12.0),
            ride("r2", "2026-09-05", 28.0),
            ride("r3", "2026-09-09", 12.0),
            ride("r4", "2026-09-20", 40.0),
        ]);
        let criteria = Criteria {
            range: RangeBucket::Short,
            ..Criteria::none()
        };
        let view = apply(store.snapshot().unwrap(), &criteria, today());
        let ids: Vec<&str> = view.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
    }

    #[test]
    fn gold_tier_filter_selects_exactly_the_gold_member() {
        let store = member_snapshot();
        let criteria = Criteria {
            category: CategoryFilter::parse("gold"),
            ..Criteria::none()
        };
        let view = apply(store.snapshot().unwrap(), &criteria, today());
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Premier Cocoa Exports");
    }

    #[test]
    fn search_is_case_insensitive() {
        let store = member_snapshot();
        let upper = Criteria {
            search: Some("COCOA".into()),
            ..Criteria::none()
        };
        let lower = Criteria {
            search: Some("cocoa".into()),
            ..Criteria::none()
        };
        let today = today();
        let snapshot = store.snapshot().unwrap();
        let a: Vec<&str> = apply(snapshot, &upper, today)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        let b: Vec<&str> = apply(snapshot, &lower, today)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(a, b);
        assert_eq!(a, vec!["m3"]);
    }

    #[test]
    fn search_scans_tags_too() {
        let store = member_snapshot();
        let criteria = Criteria {
            search: Some("consult".into()),
            ..Criteria::none()
        };
        assert_eq!(apply(store.snapshot().unwrap(), &criteria, today()).len(), 3);
    }

    #[test]
    fn criterion_over_absent_attribute_excludes_only_that_record() {
        // Members carry no date, so any non-All window excludes them all;
        // it is a per-record miss, not an error.
        let store = member_snapshot();
        let criteria = Criteria {
            window: DateWindow::Upcoming,
            ..Criteria::none()
        };
        assert!(apply(store.snapshot().unwrap(), &criteria, today()).is_empty());
    }

    #[test]
    fn date_window_bounds_are_inclusive() {
        let store = ride_snapshot(vec![
            ride("past", "2026-08-30", 10.0),
            ride("today", "2026-09-01", 10.0),
            ride("day7", "2026-09-08", 10.0),
            ride("day8", "2026-09-09", 10.0),
            ride("day30", "2026-10-01", 10.0),
            ride("far", "2027-01-01", 10.0),
        ]);
        let snapshot = store.snapshot().unwrap();
        let today = today();

        let week = Criteria {
            window: DateWindow::ThisWeek,
            ..Criteria::none()
        };
        let ids: Vec<&str> = apply(snapshot, &week, today)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["today", "day7"]);

        let month = Criteria {
            window: DateWindow::ThisMonth,
            ..Criteria::none()
        };
        assert_eq!(apply(snapshot, &month, today).len(), 4);

        let upcoming = Criteria {
            window: DateWindow::Upcoming,
            ..Criteria::none()
        };
        assert_eq!(apply(snapshot, &upcoming, today).len(), 5);
    }

    #[test]
    fn distance_bucket_edges() {
        assert!(RangeBucket::Short.contains(19.9));
        assert!(!RangeBucket::Short.contains(20.0));
        assert!(RangeBucket::Medium.contains(20.0));
        assert!(!RangeBucket::Medium.contains(35.0));
        assert!(RangeBucket::Long.contains(35.0));
    }

    #[test]
    fn combined_criteria_are_anded() {
        let store = ride_snapshot(vec![
            ride("short-soon", "2026-09-03", 10.0),
            ride("short-late", "2026-10-20", 10.0),
            ride("long-soon", "2026-09-03", 50.0),
        ]);
        let criteria = Criteria {
            range: RangeBucket::Short,
            window: DateWindow::ThisWeek,
            ..Criteria::none()
        };
        let view = apply(store.snapshot().unwrap(), &criteria, today());
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "short-soon");
    }

    #[test]
    fn empty_snapshot_yields_empty_view_without_error() {
        let mut store: DataStore<Ride> = DataStore::new();
        store.install(Vec::new());
        assert!(apply(store.snapshot().unwrap(), &Criteria::none(), today()).is_empty());
    }

    #[test]
    fn describe_lists_active_criteria() {
        assert_eq!(Criteria::none().describe(), "no filters");
        let criteria = Criteria {
            category: CategoryFilter::parse("gold"),
            window: DateWindow::Upcoming,
            search: Some("cocoa".into()),
            ..Criteria::none()
        };
        assert_eq!(
            criteria.describe(),
            "category=gold, when=upcoming, search=\"cocoa\""
        );
    }
}
