use crate::domain::models::{
    CountdownState, Round, Session, SessionField, SessionList, SessionTimes, WeekendFormat,
};
use chrono::{DateTime, Utc};

pub type Candidate = (&'static str, SessionField);

// Sprint Qualifying reads the main qualifying time: the feed has no
// separate field for it.
pub const SPRINT_WEEKEND: [Candidate; 5] = [
    ("Practice 1", SessionField::Fp1),
    ("Sprint Qualifying", SessionField::Qualifying),
    ("Sprint", SessionField::Sprint),
    ("Qualifying", SessionField::Qualifying),
    ("Race", SessionField::Race),
];

pub const STANDARD_WEEKEND: [Candidate; 5] = [
    ("Practice 1", SessionField::Fp1),
    ("Practice 2", SessionField::Fp2),
    ("Practice 3", SessionField::Fp3),
    ("Qualifying", SessionField::Qualifying),
    ("Race", SessionField::Race),
];

pub fn candidates(format: WeekendFormat) -> &'static [Candidate] {
    match format {
        WeekendFormat::Sprint => &SPRINT_WEEKEND,
        WeekendFormat::Standard => &STANDARD_WEEKEND,
    }
}

pub fn build_session_list(times: &SessionTimes, format: WeekendFormat) -> SessionList {
    candidates(format)
        .iter()
        .map(|(name, field)| Session::new(*name, times.get(*field)))
        .collect()
}

pub fn select_next_session(sessions: &[Session], now: DateTime<Utc>) -> CountdownState {
    sessions
        .iter()
        .find_map(|session| {
            session
                .instant
                .filter(|instant| *instant > now)
                .map(|instant| CountdownState::Target {
                    name: session.name.clone(),
                    instant,
                })
        })
        .unwrap_or(CountdownState::NoSessionsRemain)
}

pub fn next_session_for_round(round: &Round, now: DateTime<Utc>) -> CountdownState {
    select_next_session(&build_session_list(&round.times, round.format), now)
}

pub fn pick_next_round(rounds: &[Round], now: DateTime<Utc>) -> Option<&Round> {
    rounds
        .iter()
        .filter_map(|round| round.race_instant().map(|race| (race, round)))
        .filter(|(race, _)| *race > now)
        .min_by_key(|(race, _)| *race)
        .map(|(_, round)| round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw)
            .expect("valid datetime")
            .with_timezone(&Utc)
    }

    fn target(name: &str, raw: &str) -> CountdownState {
        CountdownState::Target {
            name: name.to_string(),
            instant: utc(raw),
        }
    }

    fn sprint_times() -> SessionTimes {
        SessionTimes {
            fp1: Some(utc("2025-05-02T16:30:00Z")),
            fp2: None,
            fp3: None,
            qualifying: Some(utc("2025-05-03T20:00:00Z")),
            sprint: Some(utc("2025-05-03T16:00:00Z")),
            race: Some(utc("2025-05-04T20:00:00Z")),
        }
    }

    fn round(number: u32, race: Option<&str>) -> Round {
        Round {
            round: number,
            name: format!("Round {number}"),
            circuit: "Circuit".to_string(),
            country: "Country".to_string(),
            date: String::new(),
            format: WeekendFormat::Standard,
            times: SessionTimes {
                race: race.map(utc),
                ..SessionTimes::default()
            },
        }
    }

    #[test]
    fn sprint_list_reuses_qualifying_instant() {
        let sessions = build_session_list(&sprint_times(), WeekendFormat::Sprint);
        let names: Vec<&str> = sessions.iter().map(|session| session.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["Practice 1", "Sprint Qualifying", "Sprint", "Qualifying", "Race"]
        );
        assert_eq!(sessions[1].instant, sessions[3].instant);
    }

    #[test]
    fn standard_list_uses_practice_sessions() {
        let times = SessionTimes {
            fp2: Some(utc("2025-03-14T05:00:00Z")),
            ..SessionTimes::default()
        };
        let sessions = build_session_list(&times, WeekendFormat::Standard);
        let names: Vec<&str> = sessions.iter().map(|session| session.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["Practice 1", "Practice 2", "Practice 3", "Qualifying", "Race"]
        );
        assert_eq!(sessions[1].instant, times.fp2);
        assert!(sessions[0].instant.is_none());
    }

    #[test]
    fn sprint_weekend_advances_in_table_order() {
        let sessions: SessionList = vec![
            Session::new("Practice 1", Some(utc("2025-05-02T16:30:00Z"))),
            Session::new("Sprint Qualifying", Some(utc("2025-05-02T20:30:00Z"))),
            Session::new("Sprint", Some(utc("2025-05-03T16:00:00Z"))),
            Session::new("Qualifying", Some(utc("2025-05-03T20:00:00Z"))),
            Session::new("Race", Some(utc("2025-05-04T20:00:00Z"))),
        ];

        let mut now = utc("2025-05-01T00:00:00Z");
        let mut seen = Vec::new();
        loop {
            match select_next_session(&sessions, now) {
                CountdownState::Target { name, instant } => {
                    seen.push(name);
                    now = instant;
                }
                CountdownState::NoSessionsRemain => break,
            }
        }

        assert_eq!(
            seen,
            vec!["Practice 1", "Sprint Qualifying", "Sprint", "Qualifying", "Race"]
        );
    }

    #[test]
    fn feed_built_sprint_weekend_picks_sprint_qualifying_for_shared_instant() {
        let times = sprint_times();
        let round = Round {
            format: WeekendFormat::Sprint,
            times,
            ..round(6, None)
        };

        assert_eq!(
            next_session_for_round(&round, utc("2025-05-02T18:00:00Z")),
            target("Sprint Qualifying", "2025-05-03T20:00:00Z")
        );
        assert_eq!(
            next_session_for_round(&round, utc("2025-05-03T20:00:00Z")),
            target("Race", "2025-05-04T20:00:00Z")
        );
    }

    #[test]
    fn equal_instant_is_not_upcoming() {
        let sessions = vec![Session::new("Race", Some(utc("2025-03-16T04:00:00Z")))];
        assert_eq!(
            select_next_session(&sessions, utc("2025-03-16T04:00:00Z")),
            CountdownState::NoSessionsRemain
        );
    }

    #[test]
    fn missing_instants_are_skipped() {
        let sessions = vec![
            Session::new("Practice 1", None),
            Session::new("Practice 2", None),
            Session::new("Qualifying", Some(utc("2025-03-15T05:00:00Z"))),
        ];
        assert_eq!(
            select_next_session(&sessions, utc("2025-03-01T00:00:00Z")),
            target("Qualifying", "2025-03-15T05:00:00Z")
        );
    }

    #[test]
    fn list_order_wins_over_instant_order() {
        let sessions = vec![
            Session::new("Practice 1", Some(utc("2025-03-15T05:00:00Z"))),
            Session::new("Practice 2", Some(utc("2025-03-14T05:00:00Z"))),
        ];
        assert_eq!(
            select_next_session(&sessions, utc("2025-03-01T00:00:00Z")),
            target("Practice 1", "2025-03-15T05:00:00Z")
        );
    }

    #[test]
    fn empty_list_is_finished() {
        assert_eq!(
            select_next_session(&[], utc("2025-03-01T00:00:00Z")),
            CountdownState::NoSessionsRemain
        );
    }

    #[test]
    fn next_round_is_earliest_future_race() {
        let rounds = vec![
            round(1, Some("2025-03-16T04:00:00Z")),
            round(3, Some("2025-04-06T05:00:00Z")),
            round(2, Some("2025-03-23T07:00:00Z")),
            round(4, None),
        ];

        let picked = pick_next_round(&rounds, utc("2025-03-17T00:00:00Z")).expect("future race");
        assert_eq!(picked.round, 2);
        assert!(pick_next_round(&rounds, utc("2025-12-31T00:00:00Z")).is_none());
    }

    proptest! {
        #[test]
        fn all_past_sessions_are_finished(offsets in proptest::collection::vec(0i64..1_000_000, 0..5)) {
            let now = utc("2025-06-01T00:00:00Z");
            let sessions: SessionList = offsets
                .iter()
                .enumerate()
                .map(|(index, offset)| {
                    Session::new(format!("Session {index}"), Some(now - Duration::seconds(*offset)))
                })
                .collect();

            prop_assert_eq!(select_next_session(&sessions, now), CountdownState::NoSessionsRemain);
        }

        #[test]
        fn selection_is_strictly_in_future(offsets in proptest::collection::vec(-1_000i64..1_000, 5)) {
            let now = utc("2025-06-01T00:00:00Z");
            let sessions: SessionList = offsets
                .iter()
                .zip(STANDARD_WEEKEND.iter())
                .map(|(offset, (name, _))| Session::new(*name, Some(now + Duration::minutes(*offset))))
                .collect();

            match select_next_session(&sessions, now) {
                CountdownState::Target { name, instant } => {
                    prop_assert!(instant > now);
                    let index = sessions.iter().position(|session| session.name == name).expect("listed");
                    prop_assert!(sessions[..index].iter().all(|session| session.instant.expect("set") <= now));
                }
                CountdownState::NoSessionsRemain => {
                    prop_assert!(sessions.iter().all(|session| session.instant.expect("set") <= now));
                }
            }
        }
    }
}
