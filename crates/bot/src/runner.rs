use anyhow::Result;
use dua_intake::IntakeService;
use std::time::Duration;

use crate::telegram::{TelegramClient, Update};
use crate::updates::route;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Long-poll `getUpdates` and feed every update through the service, one at
/// a time and in arrival order, until Ctrl-C.
pub async fn run(mut service: IntakeService<TelegramClient>, poll_timeout_secs: u64) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut offset: Option<i64> = None;
    let mut backoff = INITIAL_BACKOFF;
    log::info!("Polling for updates");

    loop {
        let polled = tokio::select! {
            _ = &mut shutdown => break,
            polled = service.transport().get_updates(offset, poll_timeout_secs) => polled,
        };

        let updates = match polled {
            Ok(updates) => {
                backoff = INITIAL_BACKOFF;
                updates
            }
            Err(err) => {
                log::warn!("getUpdates failed: {err}; retrying in {backoff:?}");
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(backoff) => {}
                }
                backoff = (backoff * 2).min(MAX_BACKOFF);
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            process(&mut service, &update).await;
        }
    }

    log::info!("Shutting down");
    Ok(())
}

async fn process(service: &mut IntakeService<TelegramClient>, update: &Update) {
    let Some(routed) = route(update) else {
        log::debug!("Skipping update {}", update.update_id);
        return;
    };

    if let Some(callback_id) = &routed.callback_id {
        if let Err(err) = service.transport().answer_callback(callback_id).await {
            log::warn!("Failed to answer callback query: {err}");
        }
    }

    if let Some(event) = routed.event {
        let outcome = service.handle(routed.identity, event).await;
        log::debug!(
            "Update {} for {} left conversation in {}",
            update.update_id,
            routed.identity,
            outcome.state
        );
    }
}
