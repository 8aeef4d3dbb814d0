mod grammar;
mod parser;

pub use hot_errors::Diagnostic;
use hot_yellow::SyntaxTree;

/// A lossless tree together with the errors found while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    tree: SyntaxTree,
    errors: Vec<Diagnostic>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn into_tree(self) -> SyntaxTree {
        self.tree
    }
}

/// Parses a whole source file. Never fails; malformed input ends up in `ERROR` nodes.
pub fn parse(text: &str) -> Parse {
    let mut p = parser::Parser::new(text);
    grammar::items::compilation_unit(&mut p);
    let (tree, errors) = p.build_tree();
    Parse { tree, errors }
}
