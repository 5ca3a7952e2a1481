use crate::application::view_state::{RaceCard, StandingRow, StandingsPanel};
use crate::domain::models::CountdownState;
use crate::domain::session_schedule::{next_session_for_round, pick_next_round};
use crate::domain::time_parser::DisplayZone;
use crate::infrastructure::app_log::AppLogger;
use crate::infrastructure::feed_client::FeedClient;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarOutcome {
    Unavailable,
    SeasonFinished,
    NextRace {
        card: RaceCard,
        countdown: CountdownState,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub calendar: CalendarOutcome,
    pub standings: StandingsPanel,
    pub refreshed_at: DateTime<Utc>,
}

pub struct RefreshService<C>
where
    C: FeedClient,
{
    feed_client: Arc<C>,
    zone: DisplayZone,
    logger: Option<Arc<AppLogger>>,
}

impl<C> RefreshService<C>
where
    C: FeedClient,
{
    pub fn new(feed_client: Arc<C>, zone: DisplayZone) -> Self {
        Self {
            feed_client,
            zone,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<AppLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub async fn refresh(&self, now: DateTime<Utc>) -> RefreshOutcome {
        let calendar = self.load_calendar(now).await;
        let standings = self.load_standings().await;
        RefreshOutcome {
            calendar,
            standings,
            refreshed_at: now,
        }
    }

    pub async fn load_calendar(&self, now: DateTime<Utc>) -> CalendarOutcome {
        let calendar = match self.feed_client.fetch_calendar().await {
            Ok(calendar) => calendar,
            Err(error) => {
                self.log_error("calendar_feed", &error.to_string());
                return CalendarOutcome::Unavailable;
            }
        };

        if calendar.rounds.is_empty() {
            self.log_error("calendar_feed", "calendar feed returned no rounds");
            return CalendarOutcome::Unavailable;
        }

        let Some(round) = pick_next_round(&calendar.rounds, now) else {
            self.log_info(
                "calendar_feed",
                &format!("season {} has no upcoming race", calendar.season),
            );
            return CalendarOutcome::SeasonFinished;
        };

        let countdown = next_session_for_round(round, now);
        self.log_info(
            "calendar_feed",
            &format!("next round={} name={}", round.round, round.name),
        );

        CalendarOutcome::NextRace {
            card: RaceCard::from_round(round, &self.zone),
            countdown,
        }
    }

    pub async fn load_standings(&self) -> StandingsPanel {
        match self.feed_client.fetch_standings().await {
            Ok(table) if !table.drivers.is_empty() => {
                self.log_info(
                    "standings_feed",
                    &format!("loaded drivers={}", table.drivers.len()),
                );
                StandingsPanel::Table(table.drivers.iter().map(StandingRow::from_driver).collect())
            }
            Ok(_) => {
                self.log_error("standings_feed", "standings feed returned no drivers");
                StandingsPanel::Unavailable
            }
            Err(error) => {
                self.log_error("standings_feed", &error.to_string());
                StandingsPanel::Unavailable
            }
        }
    }

    fn log_info(&self, event: &str, message: &str) {
        if let Some(logger) = &self.logger {
            logger.info(event, message);
        }
    }

    fn log_error(&self, event: &str, message: &str) {
        if let Some(logger) = &self.logger {
            logger.error(event, message);
        }
    }
}
