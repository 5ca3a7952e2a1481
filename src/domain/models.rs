use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionField {
    Fp1,
    Fp2,
    Fp3,
    Qualifying,
    Sprint,
    Race,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SessionTimes {
    pub fp1: Option<DateTime<Utc>>,
    pub fp2: Option<DateTime<Utc>>,
    pub fp3: Option<DateTime<Utc>>,
    pub qualifying: Option<DateTime<Utc>>,
    pub sprint: Option<DateTime<Utc>>,
    pub race: Option<DateTime<Utc>>,
}

impl SessionTimes {
    pub fn get(&self, field: SessionField) -> Option<DateTime<Utc>> {
        match field {
            SessionField::Fp1 => self.fp1,
            SessionField::Fp2 => self.fp2,
            SessionField::Fp3 => self.fp3,
            SessionField::Qualifying => self.qualifying,
            SessionField::Sprint => self.sprint,
            SessionField::Race => self.race,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekendFormat {
    #[default]
    Standard,
    Sprint,
}

impl WeekendFormat {
    // any non-blank sprint value counts, parseable or not
    pub fn from_sprint_field(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if !value.is_empty() => Self::Sprint,
            _ => Self::Standard,
        }
    }

    pub fn is_sprint(self) -> bool {
        matches!(self, Self::Sprint)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub name: String,
    pub instant: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(name: impl Into<String>, instant: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            instant,
        }
    }
}

pub type SessionList = Vec<Session>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CountdownState {
    Target {
        name: String,
        instant: DateTime<Utc>,
    },
    NoSessionsRemain,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Round {
    pub round: u32,
    pub name: String,
    pub circuit: String,
    pub country: String,
    pub date: String,
    pub format: WeekendFormat,
    pub times: SessionTimes,
}

impl Round {
    pub fn location(&self) -> String {
        format!("{}, {}", self.circuit, self.country)
    }

    pub fn race_instant(&self) -> Option<DateTime<Utc>> {
        self.times.race
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SeasonCalendar {
    pub season: String,
    pub rounds: Vec<Round>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverStanding {
    pub position: u32,
    pub driver: String,
    pub points: f64,
    pub team: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StandingsTable {
    pub season: Option<u32>,
    pub last_updated: Option<String>,
    pub drivers: Vec<DriverStanding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprint_flag_follows_raw_feed_value() {
        assert_eq!(WeekendFormat::from_sprint_field(None), WeekendFormat::Standard);
        assert_eq!(
            WeekendFormat::from_sprint_field(Some("   ")),
            WeekendFormat::Standard
        );
        assert_eq!(
            WeekendFormat::from_sprint_field(Some("20250503T1600Z")),
            WeekendFormat::Sprint
        );
        assert!(WeekendFormat::from_sprint_field(Some("not-a-date")).is_sprint());
    }

    #[test]
    fn location_joins_circuit_and_country() {
        let round = Round {
            round: 6,
            name: "Miami Grand Prix".to_string(),
            circuit: "Miami International Autodrome".to_string(),
            country: "USA".to_string(),
            date: "2025-05-04".to_string(),
            format: WeekendFormat::Sprint,
            times: SessionTimes::default(),
        };

        assert_eq!(round.location(), "Miami International Autodrome, USA");
        assert!(round.race_instant().is_none());
    }
}
