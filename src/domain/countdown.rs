use crate::domain::models::CountdownState;
use chrono::{DateTime, Duration, Utc};

pub const SEASON_FINISHED_TEXT: &str = "Season finished";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownDriver {
    name: String,
    target: DateTime<Utc>,
    finished: bool,
}

impl CountdownDriver {
    pub fn new(name: impl Into<String>, target: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            target,
            finished: false,
        }
    }

    pub fn from_state(state: &CountdownState) -> Option<Self> {
        match state {
            CountdownState::Target { name, instant } => Some(Self::new(name.clone(), *instant)),
            CountdownState::NoSessionsRemain => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pending_text(&self) -> String {
        format!("{} starts in …", self.name)
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<String> {
        if self.finished {
            return None;
        }

        let remaining = self.target - now;
        if remaining <= Duration::zero() {
            self.finished = true;
            return Some(format!("{} is starting now!", self.name));
        }

        Some(format!("{} starts in {}", self.name, format_remaining(remaining)))
    }
}

pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

pub fn countdown_text(state: &CountdownState, now: DateTime<Utc>) -> String {
    match CountdownDriver::from_state(state) {
        Some(mut driver) => driver
            .tick(now)
            .unwrap_or_else(|| driver.pending_text()),
        None => SEASON_FINISHED_TEXT.to_string(),
    }
}
