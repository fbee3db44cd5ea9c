//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use url::form_urlencoded;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};
use yubin_server::infrastructure::dto::websocket::OutboundMessage;
use yubin_shared::time::now_millis;

use crate::error::ClientError;

use super::{
    formatter::{MessageFormatter, parse_input_line},
    ui::{PROMPT, redisplay_prompt},
};

/// Append the credential to `url` as a percent-encoded `token` query parameter.
fn session_url(url: &str, token: &str) -> String {
    let mut query_string = form_urlencoded::Serializer::new(String::new());
    query_string.append_pair("token", token);
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, query_string.finish())
}

/// Run the WebSocket client session
///
/// Returns `Ok(())` when the user ends input, and an error when the
/// connection is rejected or lost.
pub async fn run_client_session(url: &str, token: &str) -> Result<(), ClientError> {
    let url = session_url(url, token);

    let (ws_stream, _response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(tungstenite::Error::Http(response)) if response.status().as_u16() == 401 => {
            return Err(ClientError::Unauthorized);
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to relay server!");
    println!("\nType '<to>: <message>' and press Enter to send. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<OutboundMessage>(&text) {
                        Ok(delivered) => {
                            MessageFormatter::format_delivered(&delivered, now_millis())
                        }
                        // If parsing fails, display as raw text
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn typed lines into frames
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let msg = match parse_input_line(&line) {
                Ok(msg) => msg,
                Err(e) => {
                    print!("{}", MessageFormatter::format_input_error(&e));
                    redisplay_prompt();
                    continue;
                }
            };

            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }

            print!(
                "{}",
                MessageFormatter::format_sent_confirmation(&msg.to, now_millis())
            );
            redisplay_prompt();
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    let lost = tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            read_result.unwrap_or(false)
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or(false)
        }
    };

    if lost {
        return Err(ClientError::ConnectionError("Connection lost".to_string()));
    }

    Ok(())
}
