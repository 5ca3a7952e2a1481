use crate::domain::models::{SeasonCalendar, StandingsTable};
use crate::infrastructure::error::InfraError;
use crate::infrastructure::feed_mapper::{decode_calendar, decode_standings};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEndpoints {
    pub calendar: Url,
    pub standings: Url,
}

#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch_calendar(&self) -> Result<SeasonCalendar, InfraError>;

    async fn fetch_standings(&self) -> Result<StandingsTable, InfraError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFeedClient {
    client: Client,
    endpoints: FeedEndpoints,
}

impl ReqwestFeedClient {
    pub fn new(endpoints: FeedEndpoints) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    fn feed_http_error(feed: &str, status: reqwest::StatusCode, body: &str) -> InfraError {
        let message = if body.trim().is_empty() {
            format!("{feed} feed error: http {}", status.as_u16())
        } else {
            format!("{feed} feed error: http {}; body={body}", status.as_u16())
        };
        InfraError::Feed(message)
    }

    async fn get_body(&self, feed: &str, endpoint: &Url) -> Result<String, InfraError> {
        let response = self
            .client
            .get(endpoint.clone())
            .send()
            .await
            .map_err(|error| InfraError::Feed(format!("network error while fetching {feed} feed: {error}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| InfraError::Feed(format!("failed reading {feed} feed response: {error}")))?;

        if !status.is_success() {
            return Err(Self::feed_http_error(feed, status, &body));
        }
        Ok(body)
    }
}

#[async_trait]
impl FeedClient for ReqwestFeedClient {
    async fn fetch_calendar(&self) -> Result<SeasonCalendar, InfraError> {
        let body = self.get_body("calendar", &self.endpoints.calendar).await?;
        decode_calendar(&body)
    }

    async fn fetch_standings(&self) -> Result<StandingsTable, InfraError> {
        let body = self.get_body("standings", &self.endpoints.standings).await?;
        decode_standings(&body)
    }
}
