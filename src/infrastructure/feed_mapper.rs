use crate::domain::models::{
    DriverStanding, Round, SeasonCalendar, SessionTimes, StandingsTable, WeekendFormat,
};
use crate::domain::time_parser::parse_optional_utc;
use crate::infrastructure::error::InfraError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SessionTimesPayload {
    #[serde(default, alias = "FP1", alias = "Fp1")]
    pub fp1: Option<String>,
    #[serde(default, alias = "FP2", alias = "Fp2")]
    pub fp2: Option<String>,
    #[serde(default, alias = "FP3", alias = "Fp3")]
    pub fp3: Option<String>,
    #[serde(default, alias = "Qualifying")]
    pub qualifying: Option<String>,
    #[serde(default, alias = "Sprint")]
    pub sprint: Option<String>,
    #[serde(default, alias = "Race")]
    pub race: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RoundPayload {
    #[serde(default, alias = "Round")]
    pub round: Option<u32>,
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "Circuit")]
    pub circuit: Option<String>,
    #[serde(default, alias = "Country")]
    pub country: Option<String>,
    #[serde(default, alias = "Date")]
    pub date: Option<String>,
    #[serde(default, alias = "Sessions")]
    pub sessions: Option<SessionTimesPayload>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CalendarPayload {
    #[serde(default, alias = "Season")]
    pub season: Option<serde_json::Value>,
    #[serde(default, alias = "Rounds")]
    pub rounds: Option<Vec<RoundPayload>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DriverPayload {
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StandingsPayload {
    #[serde(default)]
    pub season: Option<serde_json::Value>,
    #[serde(default, alias = "lastUpdated")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub drivers: Option<Vec<DriverPayload>>,
}

pub fn decode_calendar(body: &str) -> Result<SeasonCalendar, InfraError> {
    let payload: CalendarPayload = serde_json::from_str(body)
        .map_err(|error| InfraError::Feed(format!("invalid calendar payload: {error}")))?;
    Ok(map_calendar(payload))
}

pub fn decode_standings(body: &str) -> Result<StandingsTable, InfraError> {
    let payload: StandingsPayload = serde_json::from_str(body)
        .map_err(|error| InfraError::Feed(format!("invalid standings payload: {error}")))?;
    Ok(map_standings(payload))
}

pub fn map_calendar(payload: CalendarPayload) -> SeasonCalendar {
    SeasonCalendar {
        season: payload
            .season
            .as_ref()
            .and_then(season_text)
            .unwrap_or_default(),
        rounds: payload
            .rounds
            .unwrap_or_default()
            .into_iter()
            .map(map_round)
            .collect(),
    }
}

pub fn map_round(payload: RoundPayload) -> Round {
    let sessions = payload.sessions.unwrap_or_default();
    let format = WeekendFormat::from_sprint_field(sessions.sprint.as_deref());

    Round {
        round: payload.round.unwrap_or_default(),
        name: trimmed(payload.name),
        circuit: trimmed(payload.circuit),
        country: trimmed(payload.country),
        date: trimmed(payload.date),
        format,
        times: SessionTimes {
            fp1: parse_optional_utc(sessions.fp1.as_deref()),
            fp2: parse_optional_utc(sessions.fp2.as_deref()),
            fp3: parse_optional_utc(sessions.fp3.as_deref()),
            qualifying: parse_optional_utc(sessions.qualifying.as_deref()),
            sprint: parse_optional_utc(sessions.sprint.as_deref()),
            race: parse_optional_utc(sessions.race.as_deref()),
        },
    }
}

pub fn map_standings(payload: StandingsPayload) -> StandingsTable {
    let drivers = payload
        .drivers
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, driver)| DriverStanding {
            position: driver
                .position
                .unwrap_or_else(|| u32::try_from(index + 1).unwrap_or(u32::MAX)),
            driver: trimmed(driver.driver),
            points: driver.points.unwrap_or_default(),
            team: trimmed(driver.team),
        })
        .collect();

    StandingsTable {
        season: payload.season.as_ref().and_then(season_number),
        last_updated: payload
            .last_updated
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
        drivers,
    }
}

fn season_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.trim().to_string()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn season_number(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|text| text.trim().to_string()).unwrap_or_default()
}
