mod api;
mod notifications;
mod requests;

use std::collections::{HashMap, HashSet};

use anyhow::{Context as _, Result};
use hot_assists::AssistConfig;
use hot_db::{File, LineIndex};
use hot_ide::{Analysis, Cancelled};
use lsp_types::notification::Notification as _;
use text_size::{TextRange, TextSize};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub struct Server {
    connection: lsp_server::Connection,
    io_threads: Option<lsp_server::IoThreads>,
    runtime: tokio::runtime::Runtime,
    analysis: Analysis,
    files: HashMap<lsp_types::Uri, File>,
    /// Requests of the current batch the client asked to cancel.
    cancelled: HashSet<lsp_server::RequestId>,
    shutdown_requested: bool,
}

impl Server {
    fn server_capabilities() -> lsp_types::ServerCapabilities {
        lsp_types::ServerCapabilities {
            position_encoding: Some(lsp_types::PositionEncodingKind::UTF8),
            diagnostic_provider: Some(lsp_types::DiagnosticServerCapabilities::Options(
                lsp_types::DiagnosticOptions {
                    identifier: Some(env!("CARGO_PKG_NAME").to_string()),
                    ..Default::default()
                },
            )),
            text_document_sync: Some(lsp_types::TextDocumentSyncCapability::Kind(
                lsp_types::TextDocumentSyncKind::FULL,
            )),
            code_action_provider: Some(lsp_types::CodeActionProviderCapability::Options(
                lsp_types::CodeActionOptions {
                    code_action_kinds: Some(vec![lsp_types::CodeActionKind::REFACTOR_REWRITE]),
                    ..Default::default()
                },
            )),
            ..lsp_types::ServerCapabilities::default()
        }
    }

    /// Connects over stdin/stdout and runs the initialize handshake.
    pub fn new() -> Result<Self> {
        let (connection, io_threads) = lsp_server::Connection::stdio();
        Self::with_connection(connection, Some(io_threads))
    }

    pub fn with_connection(
        connection: lsp_server::Connection,
        io_threads: Option<lsp_server::IoThreads>,
    ) -> Result<Self> {
        let (initialize_id, initialize_params) = match connection.initialize_start() {
            Ok(it) => it,
            Err(protocol_error) => {
                if protocol_error.channel_is_disconnected()
                    && let Some(io_threads) = io_threads
                {
                    io_threads.join()?;
                }
                return Err(protocol_error.into());
            }
        };

        let config = match initialization_options(&initialize_params) {
            Ok(config) => config,
            Err(error) => {
                let response = lsp_server::Response::new_err(
                    initialize_id,
                    lsp_server::ErrorCode::InvalidParams as i32,
                    error.to_string(),
                );
                connection.sender.send(response.into())?;
                return Err(error);
            }
        };

        let initialize_data = serde_json::json!({
            "capabilities": Self::server_capabilities(),
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
        });

        if let Err(protocol_error) = connection.initialize_finish(initialize_id, initialize_data) {
            if protocol_error.channel_is_disconnected()
                && let Some(io_threads) = io_threads
            {
                io_threads.join()?;
            }
            return Err(protocol_error.into());
        }
        info!(?config, "initialized");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .context("failed to start the async runtime")?;

        Ok(Self {
            connection,
            io_threads,
            runtime,
            analysis: Analysis::new(config),
            files: HashMap::default(),
            cancelled: HashSet::default(),
            shutdown_requested: false,
        })
    }

    fn file(&self, uri: &lsp_types::Uri) -> Result<File> {
        self.files.get(uri).copied().with_context(|| format!("unknown document `{}`", uri.as_str()))
    }

    fn respond(&mut self, response: lsp_server::Response) {
        if let Err(error) = self.connection.sender.send(response.into()) {
            warn!(%error, "failed to send response");
        }
    }

    /// A token for `id`, already cancelled if the client asked for that.
    fn cancellation_token(&self, id: &lsp_server::RequestId) -> CancellationToken {
        let token = CancellationToken::new();
        if self.cancelled.contains(id) {
            token.cancel();
        }
        token
    }

    pub fn run(mut self) -> Result<()> {
        let receiver = self.connection.receiver.clone();

        'messages: while let Some(batch) = next_batch(&receiver) {
            self.cancelled = batch.iter().filter_map(cancelled_request).collect();

            for message in batch {
                match message {
                    lsp_server::Message::Request(request) => api::request(&mut self, request),
                    lsp_server::Message::Response(_response) => {}
                    lsp_server::Message::Notification(notification)
                        if notification.method == lsp_types::notification::Exit::METHOD =>
                    {
                        if !self.shutdown_requested {
                            warn!("exit without shutdown");
                        }
                        break 'messages;
                    }
                    lsp_server::Message::Notification(notification) => {
                        api::notification(&mut self, notification)
                    }
                }
            }
        }

        info!("exiting");
        let Self { connection, io_threads, .. } = self;
        drop(connection);
        match io_threads {
            Some(io_threads) => io_threads.join().map_err(Into::into),
            None => Ok(()),
        }
    }
}

/// Blocks for one message, then takes whatever else is already queued.
fn next_batch(
    receiver: &crossbeam_channel::Receiver<lsp_server::Message>,
) -> Option<Vec<lsp_server::Message>> {
    let first = receiver.recv().ok()?;
    Some(std::iter::once(first).chain(receiver.try_iter()).collect())
}

fn cancelled_request(message: &lsp_server::Message) -> Option<lsp_server::RequestId> {
    let lsp_server::Message::Notification(notification) = message else {
        return None;
    };
    if notification.method != lsp_types::notification::Cancel::METHOD {
        return None;
    }

    let params: lsp_types::CancelParams = from_json("$/cancelRequest", &notification.params)
        .inspect_err(|error| warn!(%error, "ignoring cancellation"))
        .ok()?;
    Some(match params.id {
        lsp_types::NumberOrString::Number(id) => id.into(),
        lsp_types::NumberOrString::String(id) => id.into(),
    })
}

fn initialization_options(params: &serde_json::Value) -> Result<AssistConfig> {
    match params.get("initializationOptions") {
        None | Some(serde_json::Value::Null) => Ok(AssistConfig::default()),
        Some(options) => from_json("initializationOptions", options),
    }
}

fn from_json<T: serde::de::DeserializeOwned>(
    what: &'static str,
    json: &serde_json::Value,
) -> Result<T> {
    serde_json::from_value(json.clone())
        .map_err(|e| anyhow::format_err!("Failed to deserialize {what}: {e}; {json}"))
}

fn result_to_response<R>(
    id: lsp_server::RequestId,
    result: Result<R::Result>,
) -> lsp_server::Response
where
    R: lsp_types::request::Request,
    R::Params: serde::de::DeserializeOwned,
    R::Result: serde::Serialize,
{
    match result {
        Ok(resp) => lsp_server::Response::new_ok(id, &resp),
        Err(error) if error.is::<Cancelled>() => lsp_server::Response::new_err(
            id,
            lsp_server::ErrorCode::RequestCanceled as i32,
            error.to_string(),
        ),
        Err(error) => lsp_server::Response::new_err(id, -32603, error.to_string()),
    }
}

fn to_offset(line_index: &LineIndex, position: lsp_types::Position) -> Result<TextSize> {
    let line_range = line_index
        .line(position.line)
        .with_context(|| format!("line {} is out of range", position.line))?;
    let col = TextSize::from(position.character);
    Ok(line_range.start() + col.min(line_range.len()))
}

fn to_text_range(line_index: &LineIndex, range: lsp_types::Range) -> Result<TextRange> {
    let start = to_offset(line_index, range.start)?;
    let end = to_offset(line_index, range.end)?;
    anyhow::ensure!(start <= end, "range ends before it starts");
    Ok(TextRange::new(start, end))
}

fn to_lsp_range(line_index: &LineIndex, range: TextRange) -> lsp_types::Range {
    let start = line_index.line_col(range.start());
    let end = line_index.line_col(range.end());

    lsp_types::Range {
        start: lsp_types::Position::new(start.line, start.col),
        end: lsp_types::Position::new(end.line, end.col),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_round_trip() {
        let line_index = LineIndex::new("using A;\r\nclass B { }\n");
        let range = lsp_types::Range {
            start: lsp_types::Position::new(1, 0),
            end: lsp_types::Position::new(1, 5),
        };

        let text_range = to_text_range(&line_index, range).unwrap();
        assert_eq!(text_range, TextRange::new(10.into(), 15.into()));
        assert_eq!(to_lsp_range(&line_index, text_range), range);
    }

    #[test]
    fn column_past_the_line_is_clamped() {
        let line_index = LineIndex::new("using A;\nusing B;");
        let offset = to_offset(&line_index, lsp_types::Position::new(1, 80)).unwrap();
        assert_eq!(offset, TextSize::from(17));
        assert!(to_offset(&line_index, lsp_types::Position::new(7, 0)).is_err());
    }

    #[test]
    fn config_from_initialization_options() {
        let params = serde_json::json!({ "capabilities": {} });
        assert_eq!(initialization_options(&params).unwrap(), AssistConfig::default());

        let params = serde_json::json!({ "initializationOptions": { "newline": "crlf" } });
        let config = initialization_options(&params).unwrap();
        assert_eq!(config.newline, hot_assists::NewlineStyle::Crlf);

        let params = serde_json::json!({ "initializationOptions": { "newLine": "crlf" } });
        assert!(initialization_options(&params).is_err());
    }

    #[test]
    fn cancellation_ids() {
        let message = lsp_server::Message::Notification(lsp_server::Notification::new(
            "$/cancelRequest".to_owned(),
            serde_json::json!({ "id": 3 }),
        ));
        assert_eq!(cancelled_request(&message), Some(lsp_server::RequestId::from(3)));

        let message = lsp_server::Message::Notification(lsp_server::Notification::new(
            "$/cancelRequest".to_owned(),
            serde_json::json!({ "id": "three" }),
        ));
        let id = lsp_server::RequestId::from("three".to_owned());
        assert_eq!(cancelled_request(&message), Some(id));
    }
}
