use crate::SyntaxKind::*;
use crate::{SyntaxKind, SyntaxNode, SyntaxToken};

pub trait AstNode {
    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($($name:ident => $kind:ident),* $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn cast(syntax: SyntaxNode) -> Option<Self> {
                (syntax.kind() == $kind).then_some(Self(syntax))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    )*};
}

ast_node! {
    CompilationUnit => COMPILATION_UNIT,
    NamespaceDecl => NAMESPACE_DECL,
    UsingDirective => USING_DIRECTIVE,
    NameEquals => NAME_EQUALS,
    Path => PATH,
    ClassDecl => CLASS_DECL,
    StructDecl => STRUCT_DECL,
    InterfaceDecl => INTERFACE_DECL,
    EnumDecl => ENUM_DECL,
}

fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn children<N: AstNode>(parent: &SyntaxNode) -> impl Iterator<Item = N> + use<N> {
    parent.children().filter_map(N::cast)
}

fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent.child_tokens().find(|token| token.kind() == kind)
}

/// Nodes that own a list of using directives.
pub trait HasUsings: AstNode {
    fn usings(&self) -> impl Iterator<Item = UsingDirective> {
        children(self.syntax())
    }
}

impl HasUsings for CompilationUnit {}
impl HasUsings for NamespaceDecl {}

pub trait HasName: AstNode {
    fn name(&self) -> Option<SyntaxToken> {
        token(self.syntax(), NAME)
    }
}

/// Declarations carrying a modifier list directly before their keyword.
pub trait HasModifiers: AstNode {
    /// The keyword that ends the modifier list.
    fn keyword(&self) -> Option<SyntaxToken>;

    /// All modifier tokens, in source order.
    fn modifiers(&self) -> Vec<SyntaxToken> {
        self.syntax()
            .child_tokens()
            .take_while(|token| !is_decl_keyword(token.kind()))
            .filter(|token| token.kind().is_modifier())
            .collect()
    }

    /// `public`, `protected`, `internal` and `private` tokens, in source order.
    fn main_modifiers(&self) -> Vec<SyntaxToken> {
        self.modifiers()
            .into_iter()
            .filter(|token| token.kind().is_accessibility_modifier())
            .collect()
    }
}

fn is_decl_keyword(kind: SyntaxKind) -> bool {
    matches!(kind, CLASS_KW | STRUCT_KW | INTERFACE_KW | ENUM_KW | RECORD_KW)
}

impl CompilationUnit {
    pub fn members(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.children().filter(|node| node.kind() != USING_DIRECTIVE)
    }
}

impl NamespaceDecl {
    pub fn path(&self) -> Option<Path> {
        child(&self.0)
    }

    /// `namespace A.B;` rather than a braced body.
    pub fn is_file_scoped(&self) -> bool {
        token(&self.0, L_BRACE).is_none()
    }

    pub fn namespaces(&self) -> impl Iterator<Item = Self> + use<> {
        children(&self.0)
    }
}

impl UsingDirective {
    pub fn global_token(&self) -> Option<SyntaxToken> {
        token(&self.0, GLOBAL_KW)
    }

    pub fn static_token(&self) -> Option<SyntaxToken> {
        token(&self.0, STATIC_KW)
    }

    pub fn alias(&self) -> Option<NameEquals> {
        child(&self.0)
    }

    pub fn path(&self) -> Option<Path> {
        child(&self.0)
    }

    /// Leftmost identifier of the imported name; the alias and a `global::` qualifier are skipped.
    pub fn top_level_segment(&self) -> Option<String> {
        self.path()?.segments().next()
    }
}

impl NameEquals {
    /// The alias being introduced.
    pub fn name(&self) -> Option<SyntaxToken> {
        self.0.tokens().find(|token| token.kind() == NAME)
    }
}

impl Path {
    /// Identifiers of a dotted name, without type arguments or a `global::` prefix.
    pub fn segments(&self) -> impl Iterator<Item = String> + use<> {
        let tokens: Vec<_> = self.0.child_tokens().collect();
        let skip = match tokens.as_slice() {
            [head, colons, ..] if colons.kind() == COLON2 && head.text_trimmed() == "global" => 2,
            _ => 0,
        };
        tokens
            .into_iter()
            .skip(skip)
            .filter(|token| token.kind() == NAME)
            .map(|token| token.text_trimmed().to_owned())
    }
}

impl HasName for ClassDecl {}
impl HasName for StructDecl {}
impl HasName for InterfaceDecl {}
impl HasName for EnumDecl {}

impl HasModifiers for ClassDecl {
    fn keyword(&self) -> Option<SyntaxToken> {
        token(&self.0, CLASS_KW)
    }
}

impl HasModifiers for StructDecl {
    fn keyword(&self) -> Option<SyntaxToken> {
        token(&self.0, STRUCT_KW)
    }
}

impl HasModifiers for InterfaceDecl {
    fn keyword(&self) -> Option<SyntaxToken> {
        token(&self.0, INTERFACE_KW)
    }
}

impl HasModifiers for EnumDecl {
    fn keyword(&self) -> Option<SyntaxToken> {
        token(&self.0, ENUM_KW)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDecl {
    Class(ClassDecl),
    Struct(StructDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
}

impl AstNode for TypeDecl {
    fn cast(syntax: SyntaxNode) -> Option<Self> {
        match syntax.kind() {
            CLASS_DECL => Some(Self::Class(ClassDecl(syntax))),
            STRUCT_DECL => Some(Self::Struct(StructDecl(syntax))),
            INTERFACE_DECL => Some(Self::Interface(InterfaceDecl(syntax))),
            ENUM_DECL => Some(Self::Enum(EnumDecl(syntax))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Class(it) => it.syntax(),
            Self::Struct(it) => it.syntax(),
            Self::Interface(it) => it.syntax(),
            Self::Enum(it) => it.syntax(),
        }
    }
}

impl HasName for TypeDecl {}

impl HasModifiers for TypeDecl {
    fn keyword(&self) -> Option<SyntaxToken> {
        match self {
            Self::Class(it) => it.keyword(),
            Self::Struct(it) => it.keyword(),
            Self::Interface(it) => it.keyword(),
            Self::Enum(it) => it.keyword(),
        }
    }
}

impl TypeDecl {
    /// The enclosing type declaration, if this one is nested.
    pub fn containing_type(&self) -> Option<Self> {
        self.syntax().parent().and_then(Self::cast)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Class(_) => "class",
            Self::Struct(_) => "struct",
            Self::Interface(_) => "interface",
            Self::Enum(_) => "enum",
        }
    }
}
