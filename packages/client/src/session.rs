//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tegaki_shared::{protocol::WireEvent, time::get_timestamp};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    canvas::Canvas,
    command::{execute_command, parse_command},
    error::ClientError,
    formatter::EventFormatter,
    pen::Pen,
    ui::redisplay_prompt,
};

/// Local state that survives reconnects
#[derive(Clone)]
pub struct SessionContext {
    /// Prompt lines from the input reader
    pub input: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
    pub pen: Arc<Mutex<Pen>>,
    pub canvas: Arc<Mutex<Canvas>>,
}

impl SessionContext {
    pub fn new(input: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            input: Arc::new(Mutex::new(input)),
            pen: Arc::new(Mutex::new(Pen::new())),
            canvas: Arc::new(Mutex::new(Canvas::new())),
        }
    }
}

/// Render one relayed frame and apply it to the canvas. Returns the text to print.
pub async fn apply_remote_frame(canvas: &Mutex<Canvas>, text: &str, received_at: i64) -> String {
    match WireEvent::from_json(text) {
        Ok(event) => {
            let formatted = match &event {
                WireEvent::Draw(segment) => {
                    EventFormatter::format_remote_draw(segment, received_at)
                }
                WireEvent::Clear => EventFormatter::format_remote_clear(received_at),
            };
            canvas.lock().await.apply(&event);
            formatted
        }
        Err(e) => {
            tracing::debug!("Unrecognized frame: {}", e);
            EventFormatter::format_raw_frame(text)
        }
    }
}

/// Run one WebSocket client session
///
/// Returns `Ok(())` when the user ends the session, `ConnectionLost` when an
/// established connection drops, and another error when the handshake fails.
pub async fn run_client_session(url: &str, context: SessionContext) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Url(e) => {
            tracing::error!("Invalid URL: {}", e);
            ClientError::InvalidUrl(url.to_string())
        }
        e => ClientError::ConnectionError(e.to_string()),
    })?;

    tracing::info!("Connected to drawing relay!");
    println!("\nConnected. Type 'help' for commands. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to apply frames relayed from other clients
    let canvas_for_read = context.canvas.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted =
                        apply_remote_frame(&canvas_for_read, text.as_str(), get_timestamp()).await;
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", EventFormatter::format_binary_frame(data.len()));
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to execute typed commands and send the resulting events
    let mut write_task = tokio::spawn(async move {
        let mut input = context.input.lock().await;

        while let Some(line) = input.recv().await {
            let outcome = match parse_command(&line) {
                Ok(command) => {
                    let mut pen = context.pen.lock().await;
                    let mut canvas = context.canvas.lock().await;
                    execute_command(command, &mut pen, &mut canvas, get_timestamp())
                }
                Err(e) => Err(e),
            };

            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };

            for event in &outcome.outbound {
                let json = match event.to_json() {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!("Failed to serialize event: {}", e);
                        continue;
                    }
                };

                if let Err(e) = write.send(Message::Text(json.into())).await {
                    tracing::warn!("Failed to send event: {}", e);
                    return true;
                }
            }

            print!("{}", outcome.output);
        }

        // Input closed (Ctrl+C / Ctrl+D): close the connection politely
        write.send(Message::Close(None)).await.ok();
        false
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut read_task => {
            write_task.abort();
            Err(ClientError::ConnectionLost)
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                Err(ClientError::ConnectionLost)
            } else {
                Ok(())
            }
        }
    }
}
