use crate::application::refresh::{CalendarOutcome, RefreshOutcome, RefreshService};
use crate::application::view_state::{CalendarPanel, StandingsPanel, ViewState};
use crate::domain::countdown::{CountdownDriver, SEASON_FINISHED_TEXT, countdown_text};
use crate::domain::models::CountdownState;
use crate::domain::time_parser::DisplayZone;
use crate::infrastructure::app_log::AppLogger;
use crate::infrastructure::feed_client::FeedClient;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

pub type NowProvider = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    Calendar {
        outcome: CalendarOutcome,
        refreshed_at: DateTime<Utc>,
    },
    Standings(StandingsPanel),
    Countdown {
        generation: u64,
        text: String,
    },
}

pub trait ViewRenderer: Send {
    fn render(&mut self, view: &ViewState);
}

#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl ViewRenderer for TerminalRenderer {
    fn render(&mut self, view: &ViewState) {
        let mut stdout = std::io::stdout().lock();
        // clear screen, cursor home
        let _ = write!(stdout, "\x1b[2J\x1b[H");
        for line in view.render_lines() {
            let _ = writeln!(stdout, "{line}");
        }
        let _ = stdout.flush();
    }
}

pub struct Dashboard<R>
where
    R: ViewRenderer,
{
    view: ViewState,
    renderer: R,
    updates_tx: UnboundedSender<ViewUpdate>,
    now_provider: NowProvider,
    countdown_tick: Duration,
    countdown_task: Option<JoinHandle<()>>,
    generation: u64,
    logger: Option<Arc<AppLogger>>,
}

impl<R> Dashboard<R>
where
    R: ViewRenderer,
{
    pub fn new(view: ViewState, renderer: R, updates_tx: UnboundedSender<ViewUpdate>) -> Self {
        Self {
            view,
            renderer,
            updates_tx,
            now_provider: Arc::new(Utc::now),
            countdown_tick: COUNTDOWN_TICK,
            countdown_task: None,
            generation: 0,
            logger: None,
        }
    }

    pub fn with_now_provider(mut self, now_provider: NowProvider) -> Self {
        self.now_provider = now_provider;
        self
    }

    pub fn with_countdown_tick(mut self, countdown_tick: Duration) -> Self {
        self.countdown_tick = countdown_tick;
        self
    }

    pub fn with_logger(mut self, logger: Arc<AppLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub async fn run<S>(mut self, mut updates: UnboundedReceiver<ViewUpdate>, shutdown: S) -> ViewState
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        self.renderer.render(&self.view);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                update = updates.recv() => match update {
                    Some(update) => self.apply(update),
                    None => break,
                },
            }
        }

        self.stop_countdown();
        self.view
    }

    pub fn apply(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::Calendar {
                outcome,
                refreshed_at,
            } => {
                self.view.last_refreshed = Some(refreshed_at);
                self.apply_calendar(outcome);
            }
            ViewUpdate::Standings(panel) => self.view.standings = panel,
            ViewUpdate::Countdown { generation, text } => {
                if generation != self.generation {
                    return;
                }
                self.view.countdown_text = text;
            }
        }
        self.renderer.render(&self.view);
    }

    fn apply_calendar(&mut self, outcome: CalendarOutcome) {
        match outcome {
            // the running countdown keeps its last selection
            CalendarOutcome::Unavailable => self.view.calendar = CalendarPanel::Unavailable,
            CalendarOutcome::SeasonFinished => {
                self.view.calendar = CalendarPanel::SeasonFinished;
                self.restart_countdown(CountdownState::NoSessionsRemain);
            }
            CalendarOutcome::NextRace { card, countdown } => {
                self.view.calendar = CalendarPanel::Race(card);
                self.restart_countdown(countdown);
            }
        }
    }

    fn restart_countdown(&mut self, state: CountdownState) {
        self.stop_countdown();

        let Some(driver) = CountdownDriver::from_state(&state) else {
            self.view.countdown_text = SEASON_FINISHED_TEXT.to_string();
            return;
        };

        self.view.countdown_text = driver.pending_text();
        self.countdown_task = Some(spawn_countdown_task(
            driver,
            self.generation,
            self.updates_tx.clone(),
            Arc::clone(&self.now_provider),
            self.countdown_tick,
            self.logger.clone(),
        ));
    }

    fn stop_countdown(&mut self) {
        if let Some(task) = self.countdown_task.take() {
            task.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }
}

fn spawn_countdown_task(
    mut driver: CountdownDriver,
    generation: u64,
    updates_tx: UnboundedSender<ViewUpdate>,
    now_provider: NowProvider,
    tick: Duration,
    logger: Option<Arc<AppLogger>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let Some(text) = driver.tick(now_provider()) else {
                break;
            };
            if updates_tx
                .send(ViewUpdate::Countdown { generation, text })
                .is_err()
            {
                break;
            }
            if driver.is_finished() {
                if let Some(logger) = &logger {
                    logger.info("countdown", &format!("{} started", driver.name()));
                }
                break;
            }
        }
    })
}

pub fn spawn_refresh_task<C>(
    service: Arc<RefreshService<C>>,
    updates_tx: UnboundedSender<ViewUpdate>,
    now_provider: NowProvider,
    period: Duration,
) -> JoinHandle<()>
where
    C: FeedClient + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let outcome = service.refresh(now_provider()).await;
            let calendar = ViewUpdate::Calendar {
                outcome: outcome.calendar,
                refreshed_at: outcome.refreshed_at,
            };
            if updates_tx.send(calendar).is_err() {
                break;
            }
            if updates_tx
                .send(ViewUpdate::Standings(outcome.standings))
                .is_err()
            {
                break;
            }
        }
    })
}

pub fn snapshot_view(
    title: &str,
    zone: DisplayZone,
    outcome: RefreshOutcome,
    now: DateTime<Utc>,
) -> ViewState {
    let (calendar, countdown_text) = match outcome.calendar {
        CalendarOutcome::Unavailable => (CalendarPanel::Unavailable, String::new()),
        CalendarOutcome::SeasonFinished => (
            CalendarPanel::SeasonFinished,
            SEASON_FINISHED_TEXT.to_string(),
        ),
        CalendarOutcome::NextRace { card, countdown } => {
            (CalendarPanel::Race(card), countdown_text(&countdown, now))
        }
    };

    ViewState {
        title: title.to_string(),
        calendar,
        countdown_text,
        standings: outcome.standings,
        last_refreshed: Some(outcome.refreshed_at),
        zone,
    }
}
