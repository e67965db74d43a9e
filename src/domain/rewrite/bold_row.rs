use tracing::{debug, instrument};

use crate::domain::arena::{DomTree, TagNode};
use crate::domain::builder::is_tag_name;
use crate::domain::vocabulary::Vocabulary;

/// Wrap the contents of every cell of the `row`-th row (1-based) in a bold tag.
///
/// Rows are counted along the child-then-sibling walk, so each table counts
/// its own rows. The bold node becomes the cell's first child and adopts the
/// cell's former first child. Row 0, a row past the end or a bold tag that
/// is not a valid tag name is a no-op. Returns the number of cells wrapped.
#[instrument(level = "debug", skip(tree, vocab))]
pub fn bold_row(tree: &mut DomTree, row: usize, vocab: &Vocabulary) -> usize {
    if row == 0 || !is_tag_name(&vocab.bold_tag) {
        return 0;
    }
    let mut wrapped = 0;
    let mut pending = vec![(tree.root(), 0usize)];

    while let Some((id, entry_count)) = pending.pop() {
        let label = &tree.node(id).label;
        let count = if *label == vocab.row_tag {
            entry_count + 1
        } else {
            entry_count
        };

        if count == row && *label == vocab.cell_tag {
            if let Some(content) = tree.node(id).first_child {
                let bold = tree.alloc(TagNode {
                    label: vocab.bold_tag.clone(),
                    first_child: Some(content),
                    next_sibling: None,
                });
                tree.node_mut(id).first_child = Some(bold);
                wrapped += 1;
            }
        }

        let node = tree.node(id);
        if let Some(next) = node.next_sibling {
            pending.push((next, count));
        }
        if let Some(child) = node.first_child {
            pending.push((child, count));
        }
    }

    debug!("wrapped {} cell(s) of row {}", wrapped, row);
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "<html>\n<body>\n<table>\n<tr>\n<td>\na1\n</td>\n<td>\na2\n</td>\n</tr>\n<tr>\n<td>\nb1\n</td>\n<td>\nb2\n</td>\n</tr>\n</table>\n</body>\n</html>\n";

    #[test]
    fn given_two_rows_when_bolding_first_then_only_first_row_wrapped() {
        let mut tree = DomTree::parse(TABLE).unwrap();
        assert_eq!(bold_row(&mut tree, 1, &Vocabulary::default()), 2);
        let html = tree.to_string();
        assert!(html.contains("<td>\n<b>\na1\n</b>\n</td>"));
        assert!(html.contains("<td>\n<b>\na2\n</b>\n</td>"));
        assert!(html.contains("<td>\nb1\n</td>"));
        assert!(html.contains("<td>\nb2\n</td>"));
    }

    #[test]
    fn given_two_rows_when_bolding_second_then_only_second_row_wrapped() {
        let mut tree = DomTree::parse(TABLE).unwrap();
        assert_eq!(bold_row(&mut tree, 2, &Vocabulary::default()), 2);
        let html = tree.to_string();
        assert!(html.contains("<td>\na1\n</td>"));
        assert!(html.contains("<td>\n<b>\nb2\n</b>\n</td>"));
    }

    #[test]
    fn given_out_of_range_row_when_bolding_then_unchanged() {
        let mut tree = DomTree::parse(TABLE).unwrap();
        assert_eq!(bold_row(&mut tree, 3, &Vocabulary::default()), 0);
        assert_eq!(bold_row(&mut tree, 0, &Vocabulary::default()), 0);
        assert_eq!(tree.to_string(), TABLE);
    }

    #[test]
    fn given_bold_tag_with_space_when_bolding_then_unchanged() {
        let mut tree = DomTree::parse(TABLE).unwrap();
        let vocab = Vocabulary {
            bold_tag: "b x".into(),
            ..Vocabulary::default()
        };
        assert_eq!(bold_row(&mut tree, 1, &vocab), 0);
        assert_eq!(tree.to_string(), TABLE);
    }

    #[test]
    fn given_two_tables_when_bolding_then_rows_counted_per_table() {
        let doc = "<html>\n<table>\n<tr>\n<td>\nx\n</td>\n</tr>\n</table>\n<table>\n<tr>\n<td>\ny\n</td>\n</tr>\n</table>\n</html>\n";
        let mut tree = DomTree::parse(doc).unwrap();
        assert_eq!(bold_row(&mut tree, 1, &Vocabulary::default()), 2);
        assert_eq!(tree.count_tags("b"), 2);
    }

    #[test]
    fn given_cell_with_several_children_when_bolding_then_first_child_adopted() {
        let doc = "<html>\n<tr>\n<td>\none\ntwo\n</td>\n</tr>\n</html>\n";
        let mut tree = DomTree::parse(doc).unwrap();
        bold_row(&mut tree, 1, &Vocabulary::default());
        assert_eq!(
            tree.to_string(),
            "<html>\n<tr>\n<td>\n<b>\none\ntwo\n</b>\n</td>\n</tr>\n</html>\n"
        );
    }
}
