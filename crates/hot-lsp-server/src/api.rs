use std::collections::HashMap;
use std::collections::hash_map::Entry;

use anyhow::{Context as _, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::notifications::NotificationDispatcher;
use super::requests::RequestDispatcher;
use super::{Server, from_json, to_lsp_range, to_text_range};

pub(crate) fn request(server: &mut Server, request: lsp_server::Request) {
    if server.shutdown_requested {
        server.respond(lsp_server::Response::new_err(
            request.id,
            lsp_server::ErrorCode::InvalidRequest as i32,
            "shutdown already requested".to_owned(),
        ));
        return;
    }

    RequestDispatcher::new(request, server)
        .on::<lsp_types::request::Shutdown>(handle_shutdown)
        .on::<lsp_types::request::CodeActionRequest>(handle_code_action)
        .on::<lsp_types::request::DocumentDiagnosticRequest>(handle_document_diagnostic)
        .finish();
}

fn handle_shutdown(server: &mut Server, (): (), _cancel: &CancellationToken) -> Result<()> {
    info!("shutdown requested");
    server.shutdown_requested = true;
    Ok(())
}

fn handle_code_action(
    server: &mut Server,
    params: lsp_types::CodeActionParams,
    cancel: &CancellationToken,
) -> Result<Option<lsp_types::CodeActionResponse>> {
    let uri = params.text_document.uri;
    let file = server.file(&uri)?;
    let line_index = file.line_index(server.analysis.db());
    let range = to_text_range(line_index, params.range)?;

    let analysis = &server.analysis;
    let runtime = &server.runtime;
    let assists = runtime.block_on(analysis.code_actions(file, range, cancel))?;

    let mut actions = Vec::with_capacity(assists.len());
    for assist in assists {
        let Some(edit) = runtime.block_on(analysis.resolve_edit(file, range, assist.edit, cancel))?
        else {
            continue;
        };

        let text_edit = lsp_types::TextEdit {
            range: to_lsp_range(line_index, edit.range),
            new_text: edit.new_text,
        };
        let workspace_edit = lsp_types::WorkspaceEdit {
            changes: Some(HashMap::from([(uri.clone(), vec![text_edit])])),
            ..lsp_types::WorkspaceEdit::default()
        };

        actions.push(lsp_types::CodeActionOrCommand::CodeAction(lsp_types::CodeAction {
            title: assist.title,
            kind: Some(lsp_types::CodeActionKind::REFACTOR_REWRITE),
            edit: Some(workspace_edit),
            data: Some(serde_json::to_value(assist.edit)?),
            ..lsp_types::CodeAction::default()
        }));
    }

    debug!(uri = uri.as_str(), count = actions.len(), "code actions");
    Ok(Some(actions))
}

#[expect(clippy::needless_pass_by_value)]
fn handle_document_diagnostic(
    server: &mut Server,
    params: lsp_types::DocumentDiagnosticParams,
    _cancel: &CancellationToken,
) -> Result<lsp_types::DocumentDiagnosticReportResult> {
    let file = server.file(&params.text_document.uri)?;
    let line_index = file.line_index(server.analysis.db());

    let diagnostics = server
        .analysis
        .diagnostics(file)
        .iter()
        .map(|diagnostic| {
            lsp_types::Diagnostic::new(
                to_lsp_range(line_index, diagnostic.range()),
                Some(lsp_types::DiagnosticSeverity::ERROR),
                None,
                Some("hot".to_string()),
                diagnostic.message().to_string(),
                None,
                None,
            )
        })
        .collect();

    Ok(lsp_types::DocumentDiagnosticReport::Full(lsp_types::RelatedFullDocumentDiagnosticReport {
        related_documents: None,
        full_document_diagnostic_report: lsp_types::FullDocumentDiagnosticReport {
            result_id: None,
            items: diagnostics,
        },
    })
    .into())
}

pub(crate) fn notification(server: &mut Server, notification: lsp_server::Notification) {
    NotificationDispatcher::new(notification, server)
        .on::<lsp_types::notification::DidOpenTextDocument>(handle_did_open_text_document)
        .on::<lsp_types::notification::DidChangeTextDocument>(handle_did_change_text_document)
        .on::<lsp_types::notification::DidCloseTextDocument>(handle_did_close_text_document)
        .on::<lsp_types::notification::DidChangeConfiguration>(handle_did_change_configuration)
        .finish();
}

fn handle_did_open_text_document(
    server: &mut Server,
    params: lsp_types::DidOpenTextDocumentParams,
) -> Result<()> {
    let lsp_types::TextDocumentItem { uri, language_id: _, version: _, text } =
        params.text_document;

    match server.files.entry(uri) {
        Entry::Occupied(occupied) => {
            let file = *occupied.get();
            server.analysis.set_text(file, text);
        }
        Entry::Vacant(vacant) => {
            let path = vacant.key().path().as_str().to_owned();
            vacant.insert(server.analysis.add_file(path, text));
        }
    }

    Ok(())
}

fn handle_did_change_text_document(
    server: &mut Server,
    params: lsp_types::DidChangeTextDocumentParams,
) -> Result<()> {
    let file = server.file(&params.text_document.uri)?;
    let change = params.content_changes.into_iter().next_back().context("no content change")?;
    server.analysis.set_text(file, change.text);
    Ok(())
}

#[expect(clippy::needless_pass_by_value)]
fn handle_did_close_text_document(
    server: &mut Server,
    params: lsp_types::DidCloseTextDocumentParams,
) -> Result<()> {
    server.files.remove(&params.text_document.uri);
    Ok(())
}

#[expect(clippy::needless_pass_by_value)]
fn handle_did_change_configuration(
    server: &mut Server,
    params: lsp_types::DidChangeConfigurationParams,
) -> Result<()> {
    if params.settings.is_null() {
        return Ok(());
    }
    let config = from_json("workspace/didChangeConfiguration", &params.settings)?;
    info!(?config, "configuration changed");
    server.analysis.set_config(config);
    Ok(())
}
