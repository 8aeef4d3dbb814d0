use expect_test::{Expect, expect};
use hot_yellow::{SyntaxTree, TextRange, TextSize};

use crate::{AssistConfig, NewlineStyle, apply, assists};

const CURSOR_MARKER: &str = "$0";

fn extract_offset(text: &str) -> (TextSize, String) {
    let cursor_pos = text.find(CURSOR_MARKER).expect("Cursor marker not found");
    let mut new_text = String::with_capacity(text.len() - CURSOR_MARKER.len());
    new_text.push_str(&text[..cursor_pos]);
    new_text.push_str(&text[cursor_pos + CURSOR_MARKER.len()..]);
    (TextSize::from(cursor_pos as u32), new_text)
}

fn parse(text: &str) -> SyntaxTree {
    hot_parse::parse(text).into_tree()
}

#[track_caller]
fn check_titles(fixture: &str, expect: Expect) {
    let (offset, text) = extract_offset(fixture);
    let tree = parse(&text);
    let titles: Vec<_> = assists(&AssistConfig::default(), &tree, TextRange::empty(offset))
        .into_iter()
        .map(|assist| assist.title)
        .collect();
    expect.assert_eq(&titles.join("\n"));
}

#[track_caller]
fn check_with(config: &AssistConfig, fixture: &str, title: &str, after: &str) {
    let (offset, text) = extract_offset(fixture);
    let tree = parse(&text);
    let range = TextRange::empty(offset);

    let available = assists(config, &tree, range);
    let Some(assist) = available.iter().find(|assist| assist.title == title) else {
        let titles: Vec<_> = available.iter().map(|assist| assist.title.as_str()).collect();
        panic!("no assist titled {title:?}, available: {titles:#?}");
    };

    let edited = apply(config, &tree, range, assist.edit);
    assert_eq!(edited.text(), after);
}

#[track_caller]
fn check(fixture: &str, title: &str, after: &str) {
    check_with(&AssistConfig::default(), fixture, title, after);
}

#[track_caller]
fn check_not_applicable(fixture: &str) {
    check_titles(fixture, expect![[""]]);
}

#[test]
fn titles_for_public_class() {
    check_titles(
        "$0public class Class1\n{\n}",
        expect![[r#"
            To Protected
            To Internal
            To Private
            To Protected Internal"#]],
    );
}

#[test]
fn titles_for_protected_internal_class() {
    check_titles(
        "protected internal class $0Class1\n{\n}",
        expect![[r#"
            To Public
            To Protected (only)
            To Internal (only)
            To Private"#]],
    );
}

#[test]
fn public_to_each_target() {
    check("$0public class Class1\n{\n}", "To Protected", "protected class Class1\n{\n}");
    check("$0public class Class1\n{\n}", "To Internal", "internal class Class1\n{\n}");
    check("$0public class Class1\n{\n}", "To Private", "private class Class1\n{\n}");
    check(
        "$0public class Class1\n{\n}",
        "To Protected Internal",
        "protected internal class Class1\n{\n}",
    );
}

#[test]
fn protected_internal_to_single_keyword() {
    check("$0protected internal class Class1\n{\n}", "To Public", "public class Class1\n{\n}");
    check(
        "$0protected internal class Class1\n{\n}",
        "To Protected (only)",
        "protected class Class1\n{\n}",
    );
    check(
        "$0internal protected class Class1\n{\n}",
        "To Internal (only)",
        "internal class Class1\n{\n}",
    );
}

#[test]
fn removes_redundant_modifiers() {
    check(
        "$0public private class Class1\n{\n}",
        "To Public (Remove redundant modifiers)",
        "public class Class1\n{\n}",
    );
    check(
        "$0public /* x */ private sealed class Class1 { }",
        "To Private (Remove redundant modifiers)",
        "private /* x */ sealed class Class1 { }",
    );
    check(
        "$0private public internal class Class1 { }",
        "To Protected Internal (Remove redundant modifiers)",
        "protected internal class Class1 { }",
    );
}

#[test]
fn keeps_other_modifiers() {
    check(
        "$0public static class Class1\n{\n}",
        "To Internal",
        "internal static class Class1\n{\n}",
    );
    check(
        "static $0public partial class Class1 { }",
        "To Private",
        "static private partial class Class1 { }",
    );
}

#[test]
fn keeps_custom_spacing_and_comments() {
    check("public class $0Class1 { }", "To Internal", "internal class Class1 { }");
    check("public   class   Class1$0 { }", "To Internal", "internal   class   Class1 { }");
    check(
        "/* lead */ public /* mid */ static class $0A\r\n{\r\n}\r\n",
        "To Protected Internal",
        "/* lead */ protected internal /* mid */ static class A\r\n{\r\n}\r\n",
    );
    check(
        "[Serializable]\n    public class $0A { }",
        "To Internal",
        "[Serializable]\n    internal class A { }",
    );
}

const NESTED: &str = "public class OuterClass\n{\n    private class InnerClass\n    {\n    }\n}";

#[test]
fn outer_class_leaves_inner_alone() {
    let fixture = format!("$0{NESTED}");
    check(
        &fixture,
        "To Internal",
        "internal class OuterClass\n{\n    private class InnerClass\n    {\n    }\n}",
    );
}

#[test]
fn inner_class_leaves_outer_alone() {
    let fixture = NESTED.replacen("private", "$0private", 1);
    assert_eq!(fixture.find(CURSOR_MARKER), Some(30));
    check(
        &fixture,
        "To Internal",
        "public class OuterClass\n{\n    internal class InnerClass\n    {\n    }\n}",
    );
    check(
        &fixture,
        "To Protected Internal",
        "public class OuterClass\n{\n    protected internal class InnerClass\n    {\n    }\n}",
    );
}

#[test]
fn cursor_in_leading_trivia_of_inner_class() {
    let crlf = NESTED.replace('\n', "\r\n");
    let fixture = format!("{}$0{}", &crlf[..30], &crlf[30..]);
    check(
        &fixture,
        "To Internal",
        "public class OuterClass\r\n{\r\n    internal class InnerClass\r\n    {\r\n    }\r\n}",
    );
}

#[test]
fn nested_class_keeps_other_modifiers_for_direct_targets() {
    let fixture = NESTED.replacen("private", "$0private protected", 1);
    let title = "To Internal (Remove redundant modifiers)";

    check(
        &fixture,
        title,
        "public class OuterClass\n{\n    internal protected class InnerClass\n    {\n    }\n}",
    );

    let collapse = AssistConfig { nested_class_direct_targets: Vec::new(), ..Default::default() };
    check_with(
        &collapse,
        &fixture,
        title,
        "public class OuterClass\n{\n    internal class InnerClass\n    {\n    }\n}",
    );
}

#[test]
fn direct_targets_only_apply_to_nested_classes() {
    check(
        "$0private protected class Class1 { }",
        "To Internal (Remove redundant modifiers)",
        "internal class Class1 { }",
    );
    check(
        "class Outer { $0private protected struct Inner { } }",
        "To Private (Remove redundant modifiers)",
        "class Outer { private struct Inner { } }",
    );
}

#[test]
fn other_declaration_kinds() {
    check("$0public struct S;", "To Internal", "internal struct S;");
    check("$0internal interface I { }", "To Public", "public interface I { }");
    check("$0private enum E { A, B }", "To Public", "public enum E { A, B }");
}

#[test]
fn nested_struct_in_struct() {
    check(
        "struct Outer { $0public struct Inner { } }",
        "To Private",
        "struct Outer { private struct Inner { } }",
    );
}

#[test]
fn not_applicable() {
    check_not_applicable("$0class Class1 { }");
    check_not_applicable("static $0partial class Class1 { }");
    check_not_applicable("public class Class1 { void M() { $0 } }");
    check_not_applicable("public class Class1 { public int $0X; }");
    check_not_applicable("[Obso$0lete] public class Class1 { }");
    check_not_applicable("namespace $0N { public class A { } }");
    check_not_applicable("$0");
}

#[test]
fn records_are_not_offered() {
    check_not_applicable("$0public record R(int X);");
    check_not_applicable("public record struct $0P { }");
    check(
        "public record R { $0private class C { } }",
        "To Internal",
        "public record R { internal class C { } }",
    );
}

#[test]
fn disabled_by_config() {
    let config = AssistConfig { change_accessibility: false, ..AssistConfig::default() };
    let tree = parse("public class A { }");
    assert!(assists(&config, &tree, TextRange::empty(0.into())).is_empty());
}

#[test]
fn separates_using_groups() {
    check(
        "$0using System;\nusing Microsoft;\n\nclass Class1\n{\n}",
        "Add newline betweeen using groups",
        "using System;\n\nusing Microsoft;\n\nclass Class1\n{\n}",
    );
    check(
        "using System;\nusing System.Text;\nusing Microsoft;\n\nclass Class1\n{\n}$0",
        "Add newline betweeen using groups",
        "using System;\nusing System.Text;\n\nusing Microsoft;\n\nclass Class1\n{\n}",
    );
}

#[test]
fn separates_every_boundary_at_once() {
    check(
        "$0using A;\nusing B;\nusing B.C;\nusing D;\n",
        "Add newline betweeen using groups",
        "using A;\n\nusing B;\nusing B.C;\n\nusing D;\n",
    );
}

#[test]
fn same_top_level_segment_is_one_group() {
    check_not_applicable("$0using System;\nusing System.Text;\n");
    check_not_applicable("$0using IO = System.IO;\nusing System;\nusing global::System.Linq;\n");
    check_not_applicable("$0using static System.Math;\nglobal using System.Text;\n");
}

#[test]
fn already_separated() {
    check_not_applicable("$0using A;\n\nusing B;\n");
    check_not_applicable("$0using A;\n   \t\n  using B;\n");
    check_not_applicable("$0using A; // a\r\n\r\nusing B;\r\n");
}

#[test]
fn comment_lines_do_not_separate() {
    check(
        "$0using A;\n// b\nusing B;\n",
        "Add newline betweeen using groups",
        "using A;\n\n// b\nusing B;\n",
    );
}

#[test]
fn keeps_crlf() {
    check(
        "$0using A;\r\nusing B;\r\n",
        "Add newline betweeen using groups",
        "using A;\r\n\r\nusing B;\r\n",
    );
}

#[test]
fn configured_newline_wins() {
    let config = AssistConfig { newline: NewlineStyle::Crlf, ..AssistConfig::default() };
    check_with(
        &config,
        "$0using A;\nusing B;\n",
        "Add newline betweeen using groups",
        "using A;\n\r\nusing B;\n",
    );
}

#[test]
fn directives_on_one_line() {
    let config = AssistConfig { newline: NewlineStyle::Lf, ..AssistConfig::default() };
    check_with(
        &config,
        "$0using A; using B;",
        "Add newline betweeen using groups",
        "using A; \n\nusing B;",
    );
}

#[test]
fn namespace_using_lists_are_scanned_separately() {
    check(
        "using A;\n\nnamespace N\n{\n    using B;\n    using C;\n}\n$0",
        "Add newline betweeen using groups",
        "using A;\n\nnamespace N\n{\n    using B;\n\n    using C;\n}\n",
    );
    check(
        "using A;\nnamespace N;\nusing A;\nusing C;\n$0",
        "Add newline betweeen using groups",
        "using A;\nnamespace N;\nusing A;\n\nusing C;\n",
    );
}

#[test]
fn separating_is_idempotent() {
    let fixtures = [
        "using System;\nusing Microsoft;\n\nclass Class1{}",
        "using A; using B; using C;",
        "using A;\n// b\nusing B;\nnamespace N { using C; using D; }",
    ];
    for text in fixtures {
        let tree = parse(text);
        let config = AssistConfig::default();
        let range = TextRange::empty(0.into());
        let edited = apply(&config, &tree, range, crate::AssistEdit::SeparateUsingGroups);

        let reparsed = parse(&edited.text());
        assert_eq!(reparsed.text(), edited.text());
        assert!(
            assists(&config, &reparsed, range)
                .iter()
                .all(|assist| assist.id != "separate_using_groups"),
            "still offered after applying to {text:?}: {:?}",
            edited.text()
        );
    }
}

#[test]
fn actions_are_ordered() {
    check_titles(
        "using A;\nusing B;\n$0public class C { }",
        expect![[r#"
            To Protected
            To Internal
            To Private
            To Protected Internal
            Add newline betweeen using groups"#]],
    );
}

#[test]
fn apply_without_declaration_is_a_no_op() {
    let tree = parse("using A;\n\nclass C { }");
    let edit = crate::AssistEdit::ChangeAccessibility { target: crate::Accessibility::Public };
    let edited = apply(&AssistConfig::default(), &tree, TextRange::empty(0.into()), edit);
    assert_eq!(edited, tree);

    let edit = crate::AssistEdit::SeparateUsingGroups;
    let edited = apply(&AssistConfig::default(), &tree, TextRange::empty(0.into()), edit);
    assert_eq!(edited, tree);
}
