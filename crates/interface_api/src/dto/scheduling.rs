//! Scheduling DTOs
//!
//! Responses use camelCase keys and RFC 3339 timestamps in UTC.

use chrono::{DateTime, NaiveDate, Utc};
use domain_scheduling::{
    AvailabilityFilter, AvailabilityWithTherapist, DatePreset, PayerSummary, SchedulingError,
    TherapistWithPayers, TimeSegment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;

/// Query string of `GET /api/availabilities`
///
/// Filter values are mostly read as strings and parsed in
/// [`AvailabilityQuery::into_search`], so that each malformed value gets its
/// own message.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    #[validate(length(min = 1, message = "Insurance parameter is required"))]
    pub insurance: Option<String>,
    /// `today`, `tomorrow`, `this_week`, `next_week` or `pick`
    pub date_preset: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// Comma separated segments, e.g. `morning,evening`
    pub times: Option<String>,
    #[validate(range(max = 23, message = "timeStart must be an hour between 0 and 23"))]
    pub time_start: Option<u32>,
    #[validate(range(min = 1, max = 24, message = "timeEnd must be an hour between 1 and 24"))]
    pub time_end: Option<u32>,
    pub soonest: Option<String>,
    pub next_available: Option<String>,
}

impl AvailabilityQuery {
    /// Returns the payer identifier and the filter, resolving date presets
    /// against `today`
    ///
    /// # Errors
    ///
    /// `ApiError::BadRequest` for a missing payer or a malformed filter value
    pub fn into_search(self, today: NaiveDate) -> Result<(String, AvailabilityFilter), ApiError> {
        let insurance = self
            .insurance
            .filter(|i| !i.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("Insurance parameter is required".to_string()))?;

        let mut filter = AvailabilityFilter::default();

        let picked = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(date) => Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                ApiError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", date))
            })?),
            None => None,
        };

        match self.date_preset.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some("pick") => {
                let date = picked.ok_or_else(|| {
                    ApiError::BadRequest("datePreset=pick requires a date".to_string())
                })?;
                filter = filter.on_date(date);
            }
            Some(preset) => {
                let preset: DatePreset = preset.parse().map_err(bad_request)?;
                filter = filter.within(preset.days(today));
            }
            None => {
                if let Some(date) = picked {
                    filter = filter.on_date(date);
                }
            }
        }

        if let Some(times) = self.times.as_deref() {
            let segments = TimeSegment::parse_list(times).map_err(bad_request)?;
            filter = filter.in_segments(segments);
        }

        match (self.time_start, self.time_end) {
            (Some(start), Some(end)) => filter = filter.between_hours(start, end).map_err(bad_request)?,
            (None, None) => {}
            _ => {
                return Err(ApiError::BadRequest(
                    "timeStart and timeEnd must be given together".to_string(),
                ))
            }
        }

        if let Some(soonest) = self.soonest.as_deref() {
            filter = filter.soonest(parse_flag("soonest", soonest)?);
        }

        if let Some(next_available) = self.next_available.as_deref() {
            filter = filter.next_available(parse_flag("nextAvailable", next_available)?);
        }

        Ok((insurance, filter))
    }
}

fn bad_request(error: SchedulingError) -> ApiError {
    ApiError::BadRequest(error.to_string())
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" => Ok(false),
        "true" | "1" => Ok(true),
        other => Err(ApiError::BadRequest(format!(
            "Invalid {} value '{}', expected true or false",
            name, other
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerResponse {
    pub id: String,
    pub name: String,
}

impl From<PayerSummary> for PayerResponse {
    fn from(payer: PayerSummary) -> Self {
        Self {
            id: payer.id.into_inner(),
            name: payer.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapistResponse {
    pub id: String,
    pub name: String,
    pub insurance_payers: Vec<PayerResponse>,
}

impl From<TherapistWithPayers> for TherapistResponse {
    fn from(therapist: TherapistWithPayers) -> Self {
        Self {
            id: therapist.id.into_inner(),
            name: therapist.name,
            insurance_payers: therapist.insurance_payers.into_iter().map(PayerResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub id: String,
    pub therapist_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub therapist: TherapistResponse,
}

impl From<AvailabilityWithTherapist> for AvailabilityResponse {
    fn from(availability: AvailabilityWithTherapist) -> Self {
        Self {
            id: availability.id.into_inner(),
            therapist_id: availability.therapist_id.into_inner(),
            start_time: availability.slot.start(),
            end_time: availability.slot.end(),
            therapist: availability.therapist.into(),
        }
    }
}
