pub use hot_errors::Diagnostic;
use hot_parse::Parse;
use hot_yellow::SyntaxTree;
pub use line_index::LineIndex;

/// A source document known to the database.
#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: camino::Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }

    #[salsa::tracked(returns(ref))]
    pub fn parse(self, db: &dyn salsa::Database) -> Parse {
        hot_parse::parse(self.text(db))
    }

    pub fn syntax_tree(self, db: &dyn salsa::Database) -> SyntaxTree {
        self.parse(db).tree().clone()
    }
}

#[salsa::tracked(returns(ref), no_eq)]
pub fn check_file(db: &dyn salsa::Database, file: File) -> Vec<Diagnostic> {
    file.parse(db).errors().to_owned()
}

#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {}

#[cfg(test)]
mod tests {
    use salsa::Setter as _;

    use super::*;

    #[test]
    fn reparses_after_text_change() {
        let mut db = RootDatabase::default();
        let file = File::new(&db, "A.cs".into(), "class A { }".to_owned());
        assert!(check_file(&db, file).is_empty());

        file.set_text(&mut db).to("class A {".to_owned());
        let expected = Diagnostic::error("expected `}`", hot_errors::TextRange::empty(9.into()));
        assert_eq!(check_file(&db, file), &[expected]);
        assert_eq!(file.syntax_tree(&db).text(), "class A {");
    }

    #[test]
    fn line_index_follows_text() {
        let db = RootDatabase::default();
        let file = File::new(&db, "A.cs".into(), "using A;\r\nusing B;\r\n".to_owned());
        let line_col = file.line_index(&db).line_col(10.into());
        assert_eq!((line_col.line, line_col.col), (1, 0));
    }
}
