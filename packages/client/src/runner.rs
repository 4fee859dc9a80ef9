//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    domain::{failed_attempts_after, should_attempt_reconnect},
    error::ClientError,
    session::{SessionContext, run_client_session},
    ui::spawn_input_reader,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the drawing client with reconnection logic
///
/// The pen and the local canvas are kept across reconnects. No backlog is
/// requested after reconnecting. Every lost connection gets a fresh series of
/// attempts.
pub async fn run_client(url: String) -> Result<(), ClientError> {
    let context = SessionContext::new(spawn_input_reader());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            url,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, context.clone()).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If connection ended normally (user exit), don't reconnect
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("{}", e);
                reconnect_count = failed_attempts_after(&e, reconnect_count);

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Giving up after {} attempt(s). Exiting.",
                        reconnect_count
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
