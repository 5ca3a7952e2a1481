pub mod application;
pub mod domain;
pub mod infrastructure;

use application::bootstrap::bootstrap_workspace;
use application::dashboard::{
    Dashboard, NowProvider, REFRESH_INTERVAL, TerminalRenderer, snapshot_view, spawn_refresh_task,
};
use application::refresh::RefreshService;
use application::view_state::ViewState;
use chrono::Utc;
use infrastructure::app_log::AppLogger;
use infrastructure::error::InfraError;
use infrastructure::feed_client::ReqwestFeedClient;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub root: Option<PathBuf>,
    pub timezone: Option<String>,
    pub once: bool,
}

pub fn run(options: RunOptions) -> Result<(), InfraError> {
    let workspace_root = match options.root {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let bootstrap = bootstrap_workspace(&workspace_root)?;
    let zone = bootstrap.config.display_zone(options.timezone.as_deref())?;
    let logger = Arc::new(AppLogger::new(&bootstrap.logs_dir));
    logger.info(
        "startup",
        &format!(
            "root={} once={}",
            bootstrap.workspace_root.display(),
            options.once
        ),
    );

    let client = Arc::new(ReqwestFeedClient::new(bootstrap.config.feed_endpoints()));
    let service = Arc::new(RefreshService::new(client, zone).with_logger(Arc::clone(&logger)));
    let title = bootstrap.config.app_name.clone();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    if options.once {
        let now = Utc::now();
        let outcome = runtime.block_on(service.refresh(now));
        for line in snapshot_view(&title, zone, outcome, now).render_lines() {
            println!("{line}");
        }
        return Ok(());
    }

    runtime.block_on(async move {
        let now_provider: NowProvider = Arc::new(Utc::now);
        let (updates_tx, updates_rx) = tokio::sync::mpsc::unbounded_channel();
        let refresh_task = spawn_refresh_task(
            service,
            updates_tx.clone(),
            Arc::clone(&now_provider),
            REFRESH_INTERVAL,
        );

        let dashboard = Dashboard::new(
            ViewState::new(title).with_zone(zone),
            TerminalRenderer,
            updates_tx,
        )
        .with_now_provider(now_provider)
        .with_logger(Arc::clone(&logger));
        let shutdown = async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                logger.error("shutdown", &error.to_string());
            }
        };
        dashboard.run(updates_rx, shutdown).await;

        refresh_task.abort();
        logger.info("shutdown", "stopped");
    });

    Ok(())
}
