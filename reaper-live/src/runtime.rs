use std::future::Future;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use live_state::{refresh_into, EventRouter, LiveSession, RegionSnapshot};
use osc_listener::{InboundEvent, OscListener};
use region_table::{RegionEntry, RegionFetcher};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::Config;
use crate::dashboard::{Dashboard, Render};

/// Run the dashboard until Ctrl-C, or perform a one-shot region dump
pub async fn run(config: Config) -> Result<()> {
    let fetcher =
        RegionFetcher::new(&config.fetch_config()).context("Invalid web interface address")?;

    if config.dump_regions {
        return dump_regions(&fetcher).await;
    }

    let session = LiveSession::new();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let listener = OscListener::bind(&config.listener_config(), event_tx)
        .await
        .context("Failed to start OSC listener")?;
    info!("Listening for OSC on {}", listener.local_addr());

    let refresh_task = spawn_region_refresh(fetcher, session.regions.clone(), config.refresh_interval);

    let router = EventRouter::new(session.clone());
    let mut dashboard = Dashboard::stdout();
    dashboard
        .render(&session.playback.snapshot())
        .context("Failed to draw dashboard")?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let result = run_session(event_rx, &router, &mut dashboard, shutdown).await;

    refresh_task.abort();
    listener.shutdown().await;

    let applied = result.context("Failed to draw dashboard")?;
    info!("Session ended after {} applied events", applied);
    Ok(())
}

/// Apply events until the channel closes or `shutdown` resolves.
///
/// The renderer runs after every event that matched a route. Decode errors
/// are logged and the loop continues. Returns the number of applied events.
pub async fn run_session<R, F>(
    mut events: mpsc::UnboundedReceiver<InboundEvent>,
    router: &EventRouter,
    renderer: &mut R,
    shutdown: F,
) -> io::Result<usize>
where
    R: Render,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut applied = 0;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
            received = events.recv() => {
                let Some(event) = received else {
                    break;
                };

                match router.handle(&event) {
                    Ok(Some(_)) => {
                        applied += 1;
                        renderer.render(&router.session().playback.snapshot())?;
                    }
                    Ok(None) => {}
                    Err(e) => error!("Rejected OSC message: {}", e),
                }
            }
        }
    }

    Ok(applied)
}

/// Fetch the region table now and, with an interval, keep refreshing it
fn spawn_region_refresh(
    fetcher: RegionFetcher,
    snapshot: RegionSnapshot,
    interval: Option<Duration>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        // Failures are logged inside and the previous table stays installed
        let _ = refresh_into(&fetcher, &snapshot).await;

        let Some(period) = interval else {
            return;
        };

        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let _ = refresh_into(&fetcher, &snapshot).await;
        }
    })
}

#[derive(Serialize)]
struct RegionRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(flatten)]
    entry: &'a RegionEntry,
}

async fn dump_regions(fetcher: &RegionFetcher) -> Result<()> {
    let regions = fetcher
        .refresh()
        .await
        .with_context(|| format!("Failed to fetch regions from {}", fetcher.endpoint()))?;

    let rows: Vec<RegionRow<'_>> = regions
        .ordered()
        .into_iter()
        .map(|(name, entry)| RegionRow { name, entry })
        .collect();

    let json = serde_json::to_string_pretty(&rows).context("Failed to serialize regions")?;
    println!("{}", json);
    Ok(())
}
