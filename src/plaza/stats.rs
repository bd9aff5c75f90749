//! Aggregate statistics and availability over the rides dataset.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::model::Ride;
use crate::store::Snapshot;

/// Roll-up over one rides snapshot. Maps are sorted so listings come out
/// in a deterministic order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RideStats {
    pub by_difficulty: BTreeMap<String, usize>,
    pub total_distance: f64,
    pub average_distance: f64,
    pub total_participants: u32,
    pub total_capacity: u32,
    pub average_participation: f64,
    pub popular_features: BTreeMap<String, usize>,
}

impl RideStats {
    pub fn collect(rides: &[Ride]) -> Self {
        let mut stats = RideStats::default();
        if rides.is_empty() {
            return stats;
        }

        for ride in rides {
            *stats
                .by_difficulty
                .entry(ride.difficulty.label().to_lowercase())
                .or_insert(0) += 1;
            stats.total_distance += ride.distance;
            stats.total_participants += ride.current_participants;
            stats.total_capacity += ride.max_participants;
            for feature in &ride.features {
                *stats.popular_features.entry(feature.clone()).or_insert(0) += 1;
            }
        }

        let count = rides.len() as f64;
        stats.average_distance = stats.total_distance / count;
        stats.average_participation = f64::from(stats.total_participants) / count;
        stats
    }
}

/// How full a ride is, bucketed the way the cards badge it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Full,
    AlmostFull,
    FillingUp,
    HalfFull,
    Available,
}

impl Availability {
    pub fn of(ride: &Ride) -> Self {
        if ride.available_spots() == 0 {
            return Availability::Full;
        }
        let percent = ride.percent_full();
        if percent >= 90.0 {
            Availability::AlmostFull
        } else if percent >= 75.0 {
            Availability::FillingUp
        } else if percent >= 50.0 {
            Availability::HalfFull
        } else {
            Availability::Available
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::Full => "Full",
            Availability::AlmostFull => "Almost Full",
            Availability::FillingUp => "Filling Up",
            Availability::HalfFull => "Half Full",
            Availability::Available => "Available",
        }
    }
}

/// Per-ride availability line for the stats listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotInfo {
    pub id: String,
    pub title: String,
    pub available: u32,
    pub percent_full: f64,
    pub status: Availability,
}

pub fn availability(rides: &[Ride]) -> Vec<SpotInfo> {
    rides
        .iter()
        .map(|ride| SpotInfo {
            id: ride.id.clone(),
            title: ride.title.clone(),
            available: ride.available_spots(),
            percent_full: ride.percent_full(),
            status: Availability::of(ride),
        })
        .collect()
}

/// Textual capacity bar, e.g. `[######----]`.
pub fn capacity_bar(current: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        width
    } else {
        (current as usize * width) / max as usize
    };
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Rides within the next `days` days, in snapshot (date) order.
pub fn upcoming_within(snapshot: &Snapshot<Ride>, days: u64, today: NaiveDate) -> Vec<&Ride> {
    let cutoff = today
        .checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX);
    snapshot
        .records()
        .iter()
        .filter(|ride| ride.date >= today && ride.date <= cutoff)
        .collect()
}
