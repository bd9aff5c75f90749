//! Ride registration: form validation, the ledger record, and the
//! participant-count update that produces a fresh snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PlazaError, Result};
use crate::model::Ride;
use crate::store::Snapshot;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Raw sign-up form input, pre-validation.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub safety_agreement: bool,
}

/// Validate a form, collecting every problem rather than stopping at the
/// first so the user can fix them in one pass.
pub fn validate(form: &RegistrationForm) -> std::result::Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if form.name.trim().len() < 2 {
        errors.push("Please enter your full name".to_string());
    }

    if form.email.is_empty() {
        errors.push("Email address is required".to_string());
    } else if !EMAIL_RE.is_match(&form.email) {
        errors.push("Please enter a valid email address".to_string());
    }

    if !form.safety_agreement {
        errors.push("You must agree to follow safety guidelines".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Confirmed,
    Cancelled,
}

/// One confirmed (or later cancelled) sign-up, as kept in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub ride_id: String,
    pub ride_title: String,
    pub ride_date: NaiveDate,
    pub rider_name: String,
    pub rider_email: String,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(ride: &Ride, form: &RegistrationForm) -> Self {
        Self {
            id: format!("REG-{}", Uuid::new_v4()),
            ride_id: ride.id.clone(),
            ride_title: ride.title.clone(),
            ride_date: ride.date,
            rider_name: form.name.trim().to_string(),
            rider_email: form.email.clone(),
            status: RegistrationStatus::Confirmed,
            created_at: Utc::now(),
        }
    }
}

/// Register for a ride. On success returns the registration plus a new
/// snapshot with the ride's participant count bumped — the held snapshot
/// is never mutated in place.
pub fn register(
    snapshot: &Snapshot<Ride>,
    ride_id: &str,
    form: &RegistrationForm,
) -> Result<(Snapshot<Ride>, Registration)> {
    let ride = snapshot
        .get(ride_id)
        .ok_or_else(|| PlazaError::RecordNotFound(ride_id.to_string()))?;

    validate(form).map_err(|errors| PlazaError::Form(errors.join("; ")))?;

    if ride.available_spots() == 0 {
        return Err(PlazaError::Api(format!("{} is full", ride.title)));
    }

    let mut updated = ride.clone();
    updated.current_participants += 1;
    let next = snapshot.replace(updated)?;

    Ok((next, Registration::new(ride, form)))
}
