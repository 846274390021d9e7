//! Search DTOs for the gateway's GraphQL operations
//!
//! Two read operations are consumed: posting search (job cards) and
//! per-posting slot search (schedule cards). Both ride the same GraphQL
//! envelope; response fields are optional because the gateway omits them
//! freely.

use serde::{Deserialize, Serialize};

use crate::domain::posting::JobPosting;
use crate::domain::slot::ShiftSlot;

/// Geographic search clause
///
/// Absence of the clause means an unbounded, country-wide search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFilter {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: u32,
}

/// Parameters shared by both search operations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Optional radius-bounded search; `None` searches globally
    pub geo: Option<GeoFilter>,
}

/// GraphQL request envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub operation_name: String,
    pub variables: serde_json::Value,
    pub query: String,
}

/// GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
}

/// `searchJobCardsByLocation` response payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCardsData {
    pub search_job_cards_by_location: Option<JobCardsPage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCardsPage {
    pub next_token: Option<String>,
    #[serde(default)]
    pub job_cards: Vec<JobCardDto>,
}

/// One job card as returned by the posting search
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCardDto {
    pub job_id: Option<String>,
    pub job_title: Option<String>,
    pub employment_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub location_name: Option<String>,
}

impl From<JobCardDto> for JobPosting {
    fn from(card: JobCardDto) -> Self {
        JobPosting {
            posting_id: card.job_id.unwrap_or_default(),
            title: card.job_title,
            city: card.city,
            state: card.state,
            postal_code: card.postal_code,
            employment_type: card.employment_type,
        }
    }
}

/// `searchScheduleCards` response payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCardsData {
    pub search_schedule_cards: Option<ScheduleCardsPage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCardsPage {
    pub next_token: Option<String>,
    #[serde(default)]
    pub schedule_cards: Vec<ScheduleCardDto>,
}

/// One schedule card as returned by the slot search
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCardDto {
    pub schedule_id: Option<String>,
    pub job_id: Option<String>,
    pub labor_demand_available_count: Option<u32>,
    pub first_day_on_site: Option<String>,
    pub base_pay: Option<f64>,
    pub hours_per_week: Option<f64>,
    pub city: Option<String>,
    pub currency_code: Option<String>,
}

impl ScheduleCardDto {
    /// Converts into a domain slot bound to the posting it was fetched for
    ///
    /// The card's own `job_id` is preferred when present; the gateway has
    /// been seen omitting it on otherwise valid cards.
    pub fn into_slot(self, posting_id: &str) -> ShiftSlot {
        ShiftSlot {
            slot_id: self.schedule_id.unwrap_or_default(),
            posting_id: self
                .job_id
                .unwrap_or_else(|| posting_id.to_string()),
            open_count: self.labor_demand_available_count.unwrap_or(0),
            start_date: self.first_day_on_site,
            base_pay: self.base_pay,
            hours_per_week: self.hours_per_week,
        }
    }
}
