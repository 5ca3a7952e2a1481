use crate::domain::models::{DriverStanding, Round, SessionField, WeekendFormat};
use crate::domain::time_parser::DisplayZone;
use chrono::{DateTime, Utc};

pub const SCHEDULE_UNAVAILABLE_TEXT: &str = "Schedule unavailable";
pub const STANDINGS_UNAVAILABLE_TEXT: &str = "Standings unavailable";
const LOADING_TEXT: &str = "Loading…";

type CardRow = (&'static str, SessionField);

const SPRINT_CARD_ROWS: [CardRow; 4] = [
    ("Practice 1", SessionField::Fp1),
    ("Sprint Qualifying", SessionField::Qualifying),
    ("Sprint", SessionField::Sprint),
    ("Qualifying", SessionField::Qualifying),
];

const STANDARD_CARD_ROWS: [CardRow; 5] = [
    ("Practice 1", SessionField::Fp1),
    ("Practice 2", SessionField::Fp2),
    ("Practice 3", SessionField::Fp3),
    ("Qualifying", SessionField::Qualifying),
    ("Sprint", SessionField::Sprint),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub label: String,
    pub local_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceCard {
    pub round: u32,
    pub name: String,
    pub location: String,
    pub race_time: String,
    pub format: WeekendFormat,
    pub rows: Vec<SessionRow>,
}

impl RaceCard {
    pub fn from_round(round: &Round, zone: &DisplayZone) -> Self {
        let layout: &[CardRow] = match round.format {
            WeekendFormat::Sprint => &SPRINT_CARD_ROWS,
            WeekendFormat::Standard => &STANDARD_CARD_ROWS,
        };

        Self {
            round: round.round,
            name: round.name.clone(),
            location: round.location(),
            race_time: zone.format_optional(round.times.race),
            format: round.format,
            rows: layout
                .iter()
                .map(|(label, field)| SessionRow {
                    label: (*label).to_string(),
                    local_time: zone.format_optional(round.times.get(*field)),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CalendarPanel {
    #[default]
    Loading,
    Unavailable,
    SeasonFinished,
    Race(RaceCard),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandingRow {
    pub label: String,
    pub points: f64,
    pub team: String,
}

impl StandingRow {
    pub fn from_driver(driver: &DriverStanding) -> Self {
        Self {
            label: format!("{}. {}", driver.position, driver.driver),
            points: driver.points,
            team: driver.team.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum StandingsPanel {
    #[default]
    Loading,
    Unavailable,
    Table(Vec<StandingRow>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub title: String,
    pub calendar: CalendarPanel,
    pub countdown_text: String,
    pub standings: StandingsPanel,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub zone: DisplayZone,
}

impl ViewState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("== {} ==", self.title)];

        match &self.calendar {
            CalendarPanel::Loading => lines.push(LOADING_TEXT.to_string()),
            CalendarPanel::Unavailable => {
                lines.push(SCHEDULE_UNAVAILABLE_TEXT.to_string());
                lines.push(format!("{:<18} —", "Race"));
            }
            CalendarPanel::SeasonFinished => lines.push("No upcoming Grand Prix".to_string()),
            CalendarPanel::Race(card) => {
                lines.push(format!("Round {} · {}", card.round, card.name));
                lines.push(card.location.clone());
                lines.push(format!("{:<18} {}", "Race", card.race_time));
                for row in &card.rows {
                    lines.push(format!("{:<18} {}", row.label, row.local_time));
                }
            }
        }

        if !self.countdown_text.is_empty() {
            lines.push(String::new());
            lines.push(self.countdown_text.clone());
        }

        lines.push(String::new());
        lines.push("Driver standings".to_string());
        match &self.standings {
            StandingsPanel::Loading => lines.push(LOADING_TEXT.to_string()),
            StandingsPanel::Unavailable => lines.push(STANDINGS_UNAVAILABLE_TEXT.to_string()),
            StandingsPanel::Table(rows) => {
                for row in rows {
                    let team = if row.team.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", row.team)
                    };
                    lines.push(format!(
                        "{:<24} {:>6} pts{team}",
                        row.label,
                        format_points(row.points)
                    ));
                }
            }
        }

        if let Some(refreshed) = self.last_refreshed {
            lines.push(String::new());
            lines.push(format!("Updated {}", self.zone.format(refreshed)));
        }

        lines
    }
}

fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        format!("{points}")
    }
}
