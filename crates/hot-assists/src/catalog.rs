use crate::accessibility::{Accessibility, ModifierSummary};

const REDUNDANT_SUFFIX: &str = " (Remove redundant modifiers)";
const ONLY_SUFFIX: &str = " (only)";

/// One offerable accessibility change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub target: Accessibility,
    pub title: String,
}

/// Every target worth offering for `summary`, in [`Accessibility::ALL`] order.
pub fn transitions(summary: &ModifierSummary) -> Vec<Transition> {
    Accessibility::ALL
        .into_iter()
        .filter(|&target| is_offered(summary, target))
        .map(|target| Transition { target, title: title(summary, target) })
        .collect()
}

fn is_offered(summary: &ModifierSummary, target: Accessibility) -> bool {
    let several = summary.count > 1;
    match target {
        Accessibility::Public => several || !summary.public,
        Accessibility::Protected => several || !summary.protected || summary.internal,
        Accessibility::Internal => several || !summary.internal || summary.protected,
        Accessibility::Private => several || !summary.private,
        Accessibility::ProtectedInternal => summary.count > 2 || !summary.is_protected_internal(),
    }
}

fn title(summary: &ModifierSummary, target: Accessibility) -> String {
    let mut title = format!("To {}", target.title());
    if summary.is_redundant() {
        title.push_str(REDUNDANT_SUFFIX);
    } else if summary.is_protected_internal()
        && matches!(target, Accessibility::Protected | Accessibility::Internal)
    {
        title.push_str(ONLY_SUFFIX);
    }
    title
}

#[cfg(test)]
mod tests {
    use expect_test::{Expect, expect};
    use hot_yellow::SyntaxKind::{self, *};

    use super::*;

    fn check(modifiers: &[SyntaxKind], expect: Expect) {
        let summary = ModifierSummary::new(modifiers.iter().copied()).unwrap();
        let titles: Vec<_> =
            transitions(&summary).into_iter().map(|transition| transition.title).collect();
        expect.assert_eq(&titles.join("\n"));
    }

    #[test]
    fn from_public() {
        check(
            &[PUBLIC_KW],
            expect![[r#"
                To Protected
                To Internal
                To Private
                To Protected Internal"#]],
        );
    }

    #[test]
    fn from_protected() {
        check(
            &[PROTECTED_KW],
            expect![[r#"
                To Public
                To Internal
                To Private
                To Protected Internal"#]],
        );
    }

    #[test]
    fn from_internal() {
        check(
            &[INTERNAL_KW],
            expect![[r#"
                To Public
                To Protected
                To Private
                To Protected Internal"#]],
        );
    }

    #[test]
    fn from_private() {
        check(
            &[PRIVATE_KW],
            expect![[r#"
                To Public
                To Protected
                To Internal
                To Protected Internal"#]],
        );
    }

    #[test]
    fn from_protected_internal() {
        check(
            &[PROTECTED_KW, INTERNAL_KW],
            expect![[r#"
                To Public
                To Protected (only)
                To Internal (only)
                To Private"#]],
        );
    }

    #[test]
    fn from_public_private() {
        check(
            &[PUBLIC_KW, PRIVATE_KW],
            expect![[r#"
                To Public (Remove redundant modifiers)
                To Protected (Remove redundant modifiers)
                To Internal (Remove redundant modifiers)
                To Private (Remove redundant modifiers)
                To Protected Internal (Remove redundant modifiers)"#]],
        );
    }

    #[test]
    fn from_redundant_protected_internal() {
        check(
            &[PROTECTED_KW, INTERNAL_KW, PUBLIC_KW],
            expect![[r#"
                To Public (Remove redundant modifiers)
                To Protected (Remove redundant modifiers)
                To Internal (Remove redundant modifiers)
                To Private (Remove redundant modifiers)
                To Protected Internal (Remove redundant modifiers)"#]],
        );
    }

    #[test]
    fn repeated_keyword() {
        check(
            &[INTERNAL_KW, INTERNAL_KW],
            expect![[r#"
                To Public (Remove redundant modifiers)
                To Protected (Remove redundant modifiers)
                To Internal (Remove redundant modifiers)
                To Private (Remove redundant modifiers)
                To Protected Internal (Remove redundant modifiers)"#]],
        );
    }

    #[test]
    fn current_state_is_never_offered_without_redundancy() {
        let single = [
            Accessibility::Public,
            Accessibility::Protected,
            Accessibility::Internal,
            Accessibility::Private,
        ];
        for target in single {
            let kinds: Vec<_> = target.keywords().iter().map(|&(kind, _)| kind).collect();
            let summary = ModifierSummary::new(kinds).unwrap();
            assert!(transitions(&summary).iter().all(|transition| transition.target != target));
        }

        let summary = ModifierSummary::new([INTERNAL_KW, PROTECTED_KW]).unwrap();
        assert!(
            transitions(&summary)
                .iter()
                .all(|transition| transition.target != Accessibility::ProtectedInternal)
        );
    }
}
