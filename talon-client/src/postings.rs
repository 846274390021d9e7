//! Posting search endpoint

use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::{COUNTRY, HiringClient, LOCALE};
use talon_core::domain::posting::JobPosting;
use talon_core::dto::search::{GraphqlRequest, JobCardsData, SearchFilter};

/// Page size requested from the posting search
const POSTING_PAGE_SIZE: u32 = 100;

const SEARCH_JOB_CARDS_QUERY: &str = "\
query searchJobCardsByLocation($searchJobRequest: SearchJobRequest!) {
  searchJobCardsByLocation(searchJobRequest: $searchJobRequest) {
    nextToken
    jobCards {
      jobId
      jobTitle
      employmentType
      city
      state
      postalCode
      locationName
    }
  }
}";

impl HiringClient {
    /// Search for job postings
    ///
    /// # Arguments
    /// * `filter` - Search parameters; a `None` geo clause searches the
    ///   whole country
    ///
    /// # Returns
    /// All job cards on the first result page, converted to domain postings.
    /// Cards with a missing id come back with an empty `posting_id` and are
    /// left for the caller to skip.
    pub async fn search_job_postings(&self, filter: &SearchFilter) -> Result<Vec<JobPosting>> {
        let mut search_request = json!({
            "locale": LOCALE,
            "country": COUNTRY,
            "pageSize": POSTING_PAGE_SIZE,
            "dateFilters": [{
                "key": "firstDayOnSite",
                "range": { "startDate": chrono::Utc::now().format("%Y-%m-%d").to_string() }
            }],
        });

        if let Some(geo) = &filter.geo {
            search_request["geoQueryClause"] = json!({
                "lat": geo.lat,
                "lng": geo.lng,
                "unit": "km",
                "distance": geo.radius_km,
            });
            debug!(
                "Searching postings within {}km of ({}, {})",
                geo.radius_km, geo.lat, geo.lng
            );
        } else {
            debug!("Searching postings with no geographic constraint");
        }

        let request = GraphqlRequest {
            operation_name: "searchJobCardsByLocation".to_string(),
            variables: json!({ "searchJobRequest": search_request }),
            query: SEARCH_JOB_CARDS_QUERY.to_string(),
        };

        let data: JobCardsData = self.post_graphql(&request).await?;

        let cards = data
            .search_job_cards_by_location
            .map(|page| page.job_cards)
            .unwrap_or_default();

        debug!("Fetched {} job cards", cards.len());

        Ok(cards.into_iter().map(JobPosting::from).collect())
    }
}
