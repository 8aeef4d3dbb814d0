use hot_yellow::{TextRange, TextSize};

/// Replacement of one range of the old text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub new_text: String,
}

impl TextEdit {
    /// The smallest single edit turning `old` into `new`, or `None` if they are equal.
    pub fn diff(old: &str, new: &str) -> Option<Self> {
        if old == new {
            return None;
        }

        let mut prefix = old.bytes().zip(new.bytes()).take_while(|(a, b)| a == b).count();
        while !old.is_char_boundary(prefix) {
            prefix -= 1;
        }

        let max_suffix = old.len().min(new.len()) - prefix;
        let mut suffix = old
            .bytes()
            .rev()
            .zip(new.bytes().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();
        while !old.is_char_boundary(old.len() - suffix) {
            suffix -= 1;
        }

        let range = TextRange::new(to_size(prefix), to_size(old.len() - suffix));
        Some(Self { range, new_text: new[prefix..new.len() - suffix].to_owned() })
    }

    pub fn apply(&self, text: &mut String) {
        text.replace_range(std::ops::Range::<usize>::from(self.range), &self.new_text);
    }
}

fn to_size(offset: usize) -> TextSize {
    TextSize::try_from(offset).unwrap_or_else(|_| TextSize::from(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn check(old: &str, new: &str, range: (u32, u32), new_text: &str) {
        let edit = TextEdit::diff(old, new).unwrap();
        assert_eq!(edit.range, TextRange::new(range.0.into(), range.1.into()));
        assert_eq!(edit.new_text, new_text);

        let mut text = old.to_owned();
        edit.apply(&mut text);
        assert_eq!(text, new);
    }

    #[test]
    fn replaces_only_the_changed_keyword() {
        check("public class A { }", "internal class A { }", (0, 6), "internal");
        check("  public private class A", "  public class A", (9, 17), "");
    }

    #[test]
    fn inserted_newline() {
        check("using A;\nusing B;\n", "using A;\n\nusing B;\n", (9, 9), "\n");
    }

    #[test]
    fn stays_on_char_boundaries() {
        check("/* é */ public", "/* è */ public", (3, 5), "è");
    }

    #[test]
    fn equal_texts() {
        assert_eq!(TextEdit::diff("class A { }", "class A { }"), None);
    }
}
