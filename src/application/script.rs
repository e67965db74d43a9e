//! Edit scripts: an ordered list of rewrites stored as TOML.
//!
//! ```toml
//! [[edit]]
//! op = "rename"
//! from = "b"
//! to = "strong"
//!
//! [[edit]]
//! op = "add-tag"
//! word = "cat"
//! tag = "em"
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single rewrite request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Edit {
    Rename { from: String, to: String },
    BoldRow { row: usize },
    Remove { tag: String },
    AddTag { word: String, tag: String },
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Rename { from, to } => write!(f, "rename <{}> to <{}>", from, to),
            Edit::BoldRow { row } => write!(f, "bold row {}", row),
            Edit::Remove { tag } => write!(f, "remove <{}>", tag),
            Edit::AddTag { word, tag } => write!(f, "add <{}> around {:?}", tag, word),
        }
    }
}

/// Edits applied in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScript {
    #[serde(default, rename = "edit")]
    pub edits: Vec<Edit>,
}

impl EditScript {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_script_with_all_ops_when_parsing_then_edits_in_order() {
        let script = EditScript::parse(
            r#"
[[edit]]
op = "rename"
from = "b"
to = "strong"

[[edit]]
op = "bold-row"
row = 2

[[edit]]
op = "remove"
tag = "ul"

[[edit]]
op = "add-tag"
word = "cat"
tag = "em"
"#,
        )
        .unwrap();

        assert_eq!(
            script.edits,
            vec![
                Edit::Rename {
                    from: "b".into(),
                    to: "strong".into()
                },
                Edit::BoldRow { row: 2 },
                Edit::Remove { tag: "ul".into() },
                Edit::AddTag {
                    word: "cat".into(),
                    tag: "em".into()
                },
            ]
        );
    }

    #[test]
    fn given_empty_script_when_parsing_then_no_edits() {
        assert!(EditScript::parse("").unwrap().edits.is_empty());
    }

    #[test]
    fn given_unknown_op_when_parsing_then_errors() {
        assert!(EditScript::parse("[[edit]]\nop = \"explode\"\n").is_err());
    }

    #[test]
    fn given_edit_when_displaying_then_readable() {
        assert_eq!(Edit::BoldRow { row: 3 }.to_string(), "bold row 3");
        assert_eq!(
            Edit::Remove { tag: "ol".into() }.to_string(),
            "remove <ol>"
        );
    }
}
