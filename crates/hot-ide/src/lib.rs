//! The boundary between assists and whoever owns the documents.

mod analysis;
mod text_edit;

use std::future::Future;

use hot_assists::{Assist, AssistConfig, AssistEdit};
use hot_yellow::SyntaxTree;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use crate::analysis::Analysis;
pub use crate::text_edit::TextEdit;
pub use hot_db::File;
pub use hot_yellow::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request was cancelled")]
pub struct Cancelled;

/// Document storage the assists read from.
pub trait Host {
    type Document;

    /// The current tree of `document`, or `None` if it is unknown.
    fn syntax_tree(&self, document: &Self::Document) -> impl Future<Output = Option<SyntaxTree>>;
}

/// Where the user asked for assists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<D> {
    pub document: D,
    pub range: TextRange,
}

/// Assists available for `invocation`; empty when the document has no tree.
pub async fn compute_actions<H: Host>(
    host: &H,
    config: &AssistConfig,
    invocation: &Invocation<H::Document>,
    cancel: &CancellationToken,
) -> Result<Vec<Assist>, Cancelled> {
    let Some(tree) = syntax_tree(host, &invocation.document, cancel).await? else {
        return Ok(Vec::new());
    };

    let assists = hot_assists::assists(config, &tree, invocation.range);
    debug!(range = ?invocation.range, count = assists.len(), "computed assists");
    Ok(assists)
}

/// The tree after applying `edit`; `None` when the document has no tree.
///
/// The host decides whether to persist the result.
pub async fn apply<H: Host>(
    host: &H,
    config: &AssistConfig,
    invocation: &Invocation<H::Document>,
    edit: AssistEdit,
    cancel: &CancellationToken,
) -> Result<Option<SyntaxTree>, Cancelled> {
    let Some(tree) = syntax_tree(host, &invocation.document, cancel).await? else {
        return Ok(None);
    };

    Ok(Some(hot_assists::apply(config, &tree, invocation.range, edit)))
}

async fn syntax_tree<H: Host>(
    host: &H,
    document: &H::Document,
    cancel: &CancellationToken,
) -> Result<Option<SyntaxTree>, Cancelled> {
    if cancel.is_cancelled() {
        return Err(Cancelled);
    }

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Cancelled),
        tree = host.syntax_tree(document) => Ok(tree),
    }
}
