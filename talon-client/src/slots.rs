//! Slot search endpoint

use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::{COUNTRY, HiringClient, LOCALE};
use talon_core::domain::slot::ShiftSlot;
use talon_core::dto::search::{GraphqlRequest, ScheduleCardsData, SearchFilter};

/// Page size requested from the slot search; slots per posting are few, so
/// one page always covers them
const SLOT_PAGE_SIZE: u32 = 1000;

const SEARCH_SCHEDULE_CARDS_QUERY: &str = "\
query searchScheduleCards($searchScheduleRequest: SearchScheduleRequest!) {
  searchScheduleCards(searchScheduleRequest: $searchScheduleRequest) {
    nextToken
    scheduleCards {
      scheduleId
      jobId
      laborDemandAvailableCount
      firstDayOnSite
      basePay
      hoursPerWeek
      city
      currencyCode
    }
  }
}";

impl HiringClient {
    /// Search for the shift slots of one posting
    ///
    /// # Arguments
    /// * `posting_id` - The posting whose slots to fetch
    /// * `_filter` - Search parameters; the slot search is already scoped
    ///   to one posting, so the geo clause is not forwarded
    ///
    /// # Returns
    /// All schedule cards for the posting, converted to domain slots. Cards
    /// with a missing id come back with an empty `slot_id`.
    pub async fn search_shift_slots(
        &self,
        posting_id: &str,
        _filter: &SearchFilter,
    ) -> Result<Vec<ShiftSlot>> {
        let request = GraphqlRequest {
            operation_name: "searchScheduleCards".to_string(),
            variables: json!({
                "searchScheduleRequest": {
                    "locale": LOCALE,
                    "country": COUNTRY,
                    "pageSize": SLOT_PAGE_SIZE,
                    "jobId": posting_id,
                    "containFilters": [{ "key": "isPrivateSchedule", "val": ["false"] }],
                    "dateFilters": [{
                        "key": "firstDayOnSite",
                        "range": { "startDate": chrono::Utc::now().format("%Y-%m-%d").to_string() }
                    }],
                }
            }),
            query: SEARCH_SCHEDULE_CARDS_QUERY.to_string(),
        };

        let data: ScheduleCardsData = self.post_graphql(&request).await?;

        let cards = data
            .search_schedule_cards
            .map(|page| page.schedule_cards)
            .unwrap_or_default();

        debug!("Fetched {} schedule cards for posting {}", cards.len(), posting_id);

        Ok(cards
            .into_iter()
            .map(|card| card.into_slot(posting_id))
            .collect())
    }
}
