//! Presentation rules applied to incoming names before they reach the domain.
//!
//! Category names are title-cased word by word so "home improvement" and
//! "HOME improvement" land on the same record. Tag names are kept verbatim.

use crate::domain::EntityKind;

/// Upper-case the first character of each space-separated word and
/// lower-case the rest. Runs of spaces are preserved.
pub(crate) fn title_case(raw: &str) -> String {
    raw.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Apply the collection's formatting rule to a raw name.
pub(crate) fn format_name(kind: EntityKind, raw: String) -> String {
    match kind {
        EntityKind::Category => title_case(&raw),
        EntityKind::Tag => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("home improvement", "Home Improvement")]
    #[case("ELECTRONICS", "Electronics")]
    #[case("sci-fi books", "Sci-fi Books")]
    #[case("a  b", "A  B")]
    #[case("élan vital", "Élan Vital")]
    fn title_cases_each_word(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(title_case(raw), expected);
    }

    #[rstest]
    fn tags_pass_through() {
        assert_eq!(format_name(EntityKind::Tag, "node.JS".into()), "node.JS");
    }

    #[rstest]
    fn categories_are_title_cased() {
        assert_eq!(format_name(EntityKind::Category, "books".into()), "Books");
    }
}
