use hot_assists::{Assist, AssistConfig, AssistEdit};
use hot_db::{Diagnostic, File, RootDatabase, check_file};
use hot_yellow::{SyntaxTree, TextRange};
use salsa::Setter as _;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{Cancelled, Host, Invocation, TextEdit};

/// Documents plus the settings used to compute assists over them.
#[derive(Default)]
pub struct Analysis {
    db: RootDatabase,
    config: AssistConfig,
}

impl Analysis {
    pub fn new(config: AssistConfig) -> Self {
        Self { db: RootDatabase::default(), config }
    }

    pub fn db(&self) -> &RootDatabase {
        &self.db
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AssistConfig) {
        self.config = config;
    }

    pub fn add_file(&self, path: impl Into<camino::Utf8PathBuf>, text: String) -> File {
        File::new(&self.db, path.into(), text)
    }

    pub fn set_text(&mut self, file: File, text: String) {
        file.set_text(&mut self.db).to(text);
    }

    pub fn text(&self, file: File) -> &str {
        file.text(&self.db)
    }

    pub fn diagnostics(&self, file: File) -> &[Diagnostic] {
        check_file(&self.db, file)
    }

    pub async fn code_actions(
        &self,
        file: File,
        range: TextRange,
        cancel: &CancellationToken,
    ) -> Result<Vec<Assist>, Cancelled> {
        crate::compute_actions(self, &self.config, &Invocation { document: file, range }, cancel)
            .await
    }

    /// The text edit `edit` would make, without touching the stored text.
    pub async fn resolve_edit(
        &self,
        file: File,
        range: TextRange,
        edit: AssistEdit,
        cancel: &CancellationToken,
    ) -> Result<Option<TextEdit>, Cancelled> {
        let invocation = Invocation { document: file, range };
        let Some(tree) = crate::apply(self, &self.config, &invocation, edit, cancel).await? else {
            return Ok(None);
        };

        let text_edit = TextEdit::diff(self.text(file), &tree.text());
        debug!(id = edit.id(), edit = ?text_edit, "resolved edit");
        Ok(text_edit)
    }

    /// Applies `edit` and stores the new text.
    pub async fn apply_action(
        &mut self,
        file: File,
        range: TextRange,
        edit: AssistEdit,
        cancel: &CancellationToken,
    ) -> Result<Option<TextEdit>, Cancelled> {
        let text_edit = self.resolve_edit(file, range, edit, cancel).await?;
        if let Some(text_edit) = &text_edit {
            let mut text = self.text(file).to_owned();
            text_edit.apply(&mut text);
            self.set_text(file, text);
        }
        Ok(text_edit)
    }
}

impl Host for Analysis {
    type Document = File;

    async fn syntax_tree(&self, file: &File) -> Option<SyntaxTree> {
        Some(file.syntax_tree(&self.db))
    }
}
