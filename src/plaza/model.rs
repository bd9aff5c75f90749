use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Membership tier for chamber members. Stored numerically in the datasets
/// (1 = Member, 2 = Silver, 3 = Gold).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MembershipTier {
    Member,
    Silver,
    Gold,
}

impl MembershipTier {
    pub fn label(&self) -> &'static str {
        match self {
            MembershipTier::Member => "Member",
            MembershipTier::Silver => "Silver",
            MembershipTier::Gold => "Gold",
        }
    }
}

impl TryFrom<u8> for MembershipTier {
    type Error = String;

    fn try_from(level: u8) -> std::result::Result<Self, Self::Error> {
        match level {
            1 => Ok(MembershipTier::Member),
            2 => Ok(MembershipTier::Silver),
            3 => Ok(MembershipTier::Gold),
            other => Err(format!("unknown membership level: {}", other)),
        }
    }
}

impl From<MembershipTier> for u8 {
    fn from(tier: MembershipTier) -> u8 {
        match tier {
            MembershipTier::Member => 1,
            MembershipTier::Silver => 2,
            MembershipTier::Gold => 3,
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ride difficulty. Datasets carry it as a string; parsing is
/// case-insensitive since filters compare lowercased values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> String {
        d.label().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A labeled summary attribute, as shown on a grid card or detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// A headed list of items on a detail view (services, requirements, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: &'static str,
    pub items: Vec<String>,
}

/// The seam between the datasets and the filter/render engines.
///
/// Every dataset type exposes the same shape: a stable unique id, a title,
/// an optional categorical tag, an optional date and magnitude for the
/// range/window filters, searchable text, and presentation fields. Criteria
/// that reference an absent attribute simply never match that record.
pub trait Record: Clone {
    fn id(&self) -> &str;

    fn title(&self) -> &str;

    /// Categorical tag matched by the category filter and shown as a badge.
    fn category(&self) -> Option<String> {
        None
    }

    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// Numeric magnitude used for range bucketing (ride distance in miles).
    fn magnitude(&self) -> Option<f64> {
        None
    }

    /// Text fields scanned by free-text search.
    fn search_text(&self) -> Vec<&str>;

    /// Free-form tag list (services, features).
    fn tags(&self) -> &[String] {
        &[]
    }

    /// Short descriptive paragraph for cards and detail views.
    fn blurb(&self) -> Option<&str> {
        None
    }

    /// Labeled summary attributes for the grid card.
    fn summary(&self) -> Vec<Field>;

    /// Compact descriptor appended to the title in list mode.
    fn subtitle(&self) -> String;

    /// Extra headed lists for the detail view.
    fn detail_sections(&self) -> Vec<Section> {
        Vec::new()
    }
}

/// Canonical ordering for snapshots and filtered views: ascending by date,
/// undated records after dated ones. Ties compare equal so stable sorts
/// preserve input order.
pub(crate) fn date_order(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A chamber-of-commerce member business.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub year_established: u16,
    pub membership_level: MembershipTier,
    #[serde(default)]
    pub services: Vec<String>,
}

impl Record for Member {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<String> {
        Some(self.membership_level.label().to_string())
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.description.as_str()];
        fields.extend(self.services.iter().map(String::as_str));
        fields
    }

    fn tags(&self) -> &[String] {
        &self.services
    }

    fn blurb(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn summary(&self) -> Vec<Field> {
        vec![
            Field::new("Address", self.address.clone()),
            Field::new("Phone", self.phone.clone()),
            Field::new("Website", domain_of(&self.website)),
            Field::new("Established", self.year_established.to_string()),
        ]
    }

    fn subtitle(&self) -> String {
        format!(
            "Est. {} • {} Member",
            self.year_established, self.membership_level
        )
    }

    fn detail_sections(&self) -> Vec<Section> {
        vec![Section {
            heading: "Services",
            items: self.services.clone(),
        }]
    }
}

/// A city attraction on the discover page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
}

impl Record for Attraction {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.address.as_str(),
        ]
    }

    fn blurb(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn summary(&self) -> Vec<Field> {
        vec![Field::new("Address", self.address.clone())]
    }

    fn subtitle(&self) -> String {
        self.address.clone()
    }
}

/// A scheduled club ride.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<String>,
    pub difficulty: Difficulty,
    pub distance: f64,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub description: String,
    pub leader: String,
    #[serde(default)]
    pub meeting_point: Option<String>,
    pub max_participants: u32,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl Ride {
    pub fn available_spots(&self) -> u32 {
        self.max_participants.saturating_sub(self.current_participants)
    }

    pub fn percent_full(&self) -> f64 {
        if self.max_participants == 0 {
            return 100.0;
        }
        f64::from(self.current_participants) / f64::from(self.max_participants) * 100.0
    }
}

impl Record for Ride {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<String> {
        Some(self.difficulty.label().to_string())
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn magnitude(&self) -> Option<f64> {
        Some(self.distance)
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.leader.as_str(),
        ];
        fields.extend(self.features.iter().map(String::as_str));
        fields
    }

    fn tags(&self) -> &[String] {
        &self.features
    }

    fn blurb(&self) -> Option<&str> {
        if self.description.is_empty() {
            None
        } else {
            Some(&self.description)
        }
    }

    fn summary(&self) -> Vec<Field> {
        let when = match &self.time {
            Some(time) => format!("{} at {}", self.date.format("%A, %B %-d, %Y"), time),
            None => self.date.format("%A, %B %-d, %Y").to_string(),
        };
        vec![
            Field::new("Date", when),
            Field::new("Distance", format!("{} miles", self.distance)),
            Field::new("Duration", self.duration.clone().unwrap_or_default()),
            Field::new("Leader", self.leader.clone()),
            Field::new("Meeting point", self.meeting_point.clone().unwrap_or_default()),
            Field::new(
                "Availability",
                format!(
                    "{} of {} spots available",
                    self.available_spots(),
                    self.max_participants
                ),
            ),
        ]
    }

    fn subtitle(&self) -> String {
        format!(
            "{} • {} mi • led by {}",
            self.date.format("%b %-d"),
            self.distance,
            self.leader
        )
    }

    fn detail_sections(&self) -> Vec<Section> {
        vec![
            Section {
                heading: "What to expect",
                items: self.features.clone(),
            },
            Section {
                heading: "Requirements",
                items: self.requirements.clone(),
            },
        ]
    }
}

/// Extracts the bare host from a URL for compact display, dropping any
/// leading `www.`. Falls back to the raw string for unparseable input.
pub(crate) fn domain_of(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let host = stripped.split('/').next().unwrap_or(stripped);
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// Canned ride for unit tests across the crate.
#[cfg(test)]
pub(crate) fn sample_ride() -> Ride {
    Ride {
        id: "ride-001".into(),
        title: "Sunrise Loop".into(),
        date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
        time: Some("7:00 AM".into()),
        difficulty: Difficulty::Beginner,
        distance: 14.0,
        duration: Some("1.5 hours".into()),
        description: "Easy spin along the river path.".into(),
        leader: "Sade Balogun".into(),
        meeting_point: Some("Agodi Gate".into()),
        max_participants: 15,
        current_participants: 4,
        features: vec!["Scenic".into(), "Cafe stop".into()],
        requirements: vec!["Helmet".into()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parses_from_level_number() {
        let json = r#"{"id":"m1","name":"A","description":"","address":"","phone":"",
            "website":"","yearEstablished":1990,"membershipLevel":3,"services":[]}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.membership_level, MembershipTier::Gold);
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let json = r#"{"id":"m1","name":"A","description":"","address":"","phone":"",
            "website":"","yearEstablished":1990,"membershipLevel":7,"services":[]}"#;
        assert!(serde_json::from_str::<Member>(json).is_err());
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("beginner".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert_eq!("ADVANCED".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert!("vertical".parse::<Difficulty>().is_err());
    }

    #[test]
    fn ride_availability_saturates() {
        let mut ride = sample_ride();
        ride.max_participants = 10;
        ride.current_participants = 12;
        assert_eq!(ride.available_spots(), 0);
    }

    #[test]
    fn domain_strips_scheme_and_www() {
        assert_eq!(domain_of("https://www.adirehub.ng/shop"), "adirehub.ng");
        assert_eq!(domain_of("http://example.com"), "example.com");
        assert_eq!(domain_of("not a url"), "not a url");
    }
}
