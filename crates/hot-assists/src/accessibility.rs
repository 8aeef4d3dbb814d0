use std::fmt;

use hot_yellow::SyntaxKind::{self, *};
use hot_yellow::ast::HasModifiers;
use serde::{Deserialize, Serialize};

/// Accessibility a type declaration can be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accessibility {
    Public,
    Protected,
    Internal,
    Private,
    ProtectedInternal,
}

impl Accessibility {
    /// Every target, in the order actions are offered.
    pub const ALL: [Self; 5] =
        [Self::Public, Self::Protected, Self::Internal, Self::Private, Self::ProtectedInternal];

    /// Keyword tokens spelling this accessibility, in source order.
    pub fn keywords(self) -> &'static [(SyntaxKind, &'static str)] {
        match self {
            Self::Public => &[(PUBLIC_KW, "public")],
            Self::Protected => &[(PROTECTED_KW, "protected")],
            Self::Internal => &[(INTERNAL_KW, "internal")],
            Self::Private => &[(PRIVATE_KW, "private")],
            Self::ProtectedInternal => &[(PROTECTED_KW, "protected"), (INTERNAL_KW, "internal")],
        }
    }

    fn from_keyword(kind: SyntaxKind) -> Option<Self> {
        let it = match kind {
            PUBLIC_KW => Self::Public,
            PROTECTED_KW => Self::Protected,
            INTERNAL_KW => Self::Internal,
            PRIVATE_KW => Self::Private,
            _ => return None,
        };
        Some(it)
    }

    /// Title-case name used in action titles.
    pub fn title(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Protected => "Protected",
            Self::Internal => "Internal",
            Self::Private => "Private",
            Self::ProtectedInternal => "Protected Internal",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, text)) in self.keywords().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(text)?;
        }
        Ok(())
    }
}

/// Normalized reading of a modifier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityState {
    Known(Accessibility),
    /// Keyword combination that does not spell any single accessibility, e.g. `public private`.
    Malformed,
}

/// What the accessibility keywords of one declaration look like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierSummary {
    pub count: usize,
    pub public: bool,
    pub protected: bool,
    pub internal: bool,
    pub private: bool,
}

impl ModifierSummary {
    /// Summarizes a run of modifier kinds; `None` when no accessibility keyword is present.
    pub fn new(modifiers: impl IntoIterator<Item = SyntaxKind>) -> Option<Self> {
        let mut summary = Self::default();
        for kind in modifiers {
            let Some(accessibility) = Accessibility::from_keyword(kind) else {
                continue;
            };
            summary.count += 1;
            match accessibility {
                Accessibility::Public => summary.public = true,
                Accessibility::Protected => summary.protected = true,
                Accessibility::Internal => summary.internal = true,
                Accessibility::Private => summary.private = true,
                Accessibility::ProtectedInternal => {}
            }
        }
        (summary.count > 0).then_some(summary)
    }

    pub fn of(decl: &impl HasModifiers) -> Option<Self> {
        Self::new(decl.main_modifiers().iter().map(|token| token.kind()))
    }

    pub fn is_protected_internal(&self) -> bool {
        self.protected && self.internal
    }

    fn expected_count(&self) -> usize {
        if self.is_protected_internal() { 2 } else { 1 }
    }

    /// More accessibility keywords than the combination needs.
    pub fn is_redundant(&self) -> bool {
        self.count > self.expected_count()
    }

    pub fn has(&self, accessibility: Accessibility) -> bool {
        match accessibility {
            Accessibility::Public => self.public,
            Accessibility::Protected => self.protected,
            Accessibility::Internal => self.internal,
            Accessibility::Private => self.private,
            Accessibility::ProtectedInternal => self.is_protected_internal(),
        }
    }

    pub fn state(&self) -> AccessibilityState {
        let known = match (self.count, self.public, self.protected, self.internal, self.private) {
            (2, _, true, true, _) => Accessibility::ProtectedInternal,
            (1, true, ..) => Accessibility::Public,
            (1, _, true, ..) => Accessibility::Protected,
            (1, _, _, true, _) => Accessibility::Internal,
            (1, .., true) => Accessibility::Private,
            _ => return AccessibilityState::Malformed,
        };
        AccessibilityState::Known(known)
    }
}
