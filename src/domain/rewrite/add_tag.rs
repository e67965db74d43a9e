use tracing::{debug, instrument, trace};

use crate::domain::arena::{DomTree, Link, NodeId, TagNode};
use crate::domain::builder::is_tag_name;
use crate::domain::error::DomainResult;
use crate::domain::vocabulary::Vocabulary;
use crate::domain::word::{WordMatcher, WordSplit};

/// Wrap every whole-word occurrence of `word` in text nodes with a `tag` node.
///
/// Matching is case-insensitive and takes one trailing punctuation mark
/// along. A text node that is exactly the word is itself moved under the new
/// tag; otherwise the text is split into leading text, the wrapped word and
/// trailing text. Existing `tag` elements are not descended into.
/// Empty `word`, or a `tag` that is not a valid tag name, is a no-op.
/// Returns the number of wrapped words.
#[instrument(level = "debug", skip(tree, vocab))]
pub fn add_tag(tree: &mut DomTree, word: &str, tag: &str, vocab: &Vocabulary) -> DomainResult<usize> {
    if word.is_empty() || !is_tag_name(tag) {
        debug!("add_tag {:?} around {:?} skipped", tag, word);
        return Ok(0);
    }
    let matcher = WordMatcher::new(word, &vocab.punctuation)?;
    let root = tree.root();
    let wrapped = wrap_in_chain(tree, Link::Child(root), &matcher, tag);
    debug!("wrapped {} occurrence(s) of {:?} in <{}>", wrapped, word, tag);
    Ok(wrapped)
}

fn wrap_in_chain(tree: &mut DomTree, start: Link, matcher: &WordMatcher, tag: &str) -> usize {
    let mut wrapped = 0;
    let mut link = start;

    while let Some(id) = tree.slot(link) {
        let node = tree.node(id);
        if node.is_leaf() {
            if let Some(split) = matcher.split(&node.label) {
                let wrapper = wrap_leaf(tree, link, id, split, tag);
                wrapped += 1;
                // Trailing text, if any, follows the wrapper and is scanned next
                link = Link::Sibling(wrapper);
                continue;
            }
        } else if node.label != tag {
            wrapped += wrap_in_chain(tree, Link::Child(id), matcher, tag);
        }
        link = Link::Sibling(id);
    }
    wrapped
}

/// Replace the leaf at `link` by `[before] <tag>matched</tag> [after]`.
///
/// Returns the id of the new tag node.
fn wrap_leaf(tree: &mut DomTree, link: Link, leaf: NodeId, split: WordSplit, tag: &str) -> NodeId {
    let next = tree.node(leaf).next_sibling;
    trace!("splitting {:?}", split);

    if split.is_whole() {
        tree.node_mut(leaf).next_sibling = None;
        let wrapper = tree.alloc(TagNode {
            label: tag.to_string(),
            first_child: Some(leaf),
            next_sibling: next,
        });
        tree.set_slot(link, Some(wrapper));
        return wrapper;
    }

    let WordSplit {
        before,
        matched,
        after,
    } = split;

    let tail = if after.is_empty() {
        next
    } else {
        Some(tree.alloc(TagNode {
            label: after,
            first_child: None,
            next_sibling: next,
        }))
    };
    let word = tree.alloc(TagNode::new(matched));
    let wrapper = tree.alloc(TagNode {
        label: tag.to_string(),
        first_child: Some(word),
        next_sibling: tail,
    });
    let head = if before.is_empty() {
        wrapper
    } else {
        tree.alloc(TagNode {
            label: before,
            first_child: None,
            next_sibling: Some(wrapper),
        })
    };

    tree.set_slot(link, Some(head));
    tree.discard(leaf);
    wrapper
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn wrap(doc: &str, word: &str, tag: &str) -> (usize, String) {
        let mut tree = DomTree::parse(doc).unwrap();
        let wrapped = add_tag(&mut tree, word, tag, &Vocabulary::default()).unwrap();
        (wrapped, tree.to_string())
    }

    fn in_p(text: &str) -> String {
        format!("<html>\n<p>\n{}\n</p>\n</html>\n", text)
    }

    #[rstest]
    #[case::whole("cat", "<em>\ncat\n</em>")]
    #[case::whole_capitalized("Cat", "<em>\nCat\n</em>")]
    #[case::whole_punctuated("cat.", "<em>\ncat.\n</em>")]
    #[case::prefix("cat sat", "<em>\ncat\n</em>\n sat")]
    #[case::suffix("the cat", "the \n<em>\ncat\n</em>")]
    #[case::suffix_punctuated("the cat?", "the \n<em>\ncat?\n</em>")]
    #[case::middle("the cat sat", "the \n<em>\ncat\n</em>\n sat")]
    #[case::middle_punctuated("the cat, sat", "the \n<em>\ncat,\n</em>\n sat")]
    fn given_word_in_text_when_adding_tag_then_split_as_expected(
        #[case] text: &str,
        #[case] expected: &str,
    ) {
        let (wrapped, html) = wrap(&in_p(text), "cat", "em");
        assert_eq!(wrapped, 1);
        assert_eq!(html, in_p(expected));
    }

    #[test]
    fn given_multiple_occurrences_when_adding_tag_then_each_wrapped() {
        let (wrapped, html) = wrap(&in_p("cat and cat and CAT"), "cat", "em");
        assert_eq!(wrapped, 3);
        assert_eq!(
            html,
            in_p("<em>\ncat\n</em>\n and \n<em>\ncat\n</em>\n and \n<em>\nCAT\n</em>")
        );
    }

    #[test]
    fn given_word_inside_longer_word_when_adding_tag_then_unchanged() {
        let doc = in_p("concatenate the cats");
        let (wrapped, html) = wrap(&doc, "cat", "em");
        assert_eq!(wrapped, 0);
        assert_eq!(html, doc);
    }

    #[test]
    fn given_existing_tag_around_word_when_adding_same_tag_then_not_rewrapped() {
        let doc = in_p("<em>\ncat\n</em>");
        let (wrapped, html) = wrap(&doc, "cat", "em");
        assert_eq!(wrapped, 0);
        assert_eq!(html, doc);
    }

    #[test]
    fn given_add_tag_applied_twice_when_serializing_then_stable() {
        let mut tree = DomTree::parse(&in_p("the cat sat on a cat")).unwrap();
        let vocab = Vocabulary::default();
        assert_eq!(add_tag(&mut tree, "cat", "b", &vocab).unwrap(), 2);
        let once = tree.to_string();
        assert_eq!(add_tag(&mut tree, "cat", "b", &vocab).unwrap(), 0);
        assert_eq!(tree.to_string(), once);
    }

    #[test]
    fn given_word_in_sibling_texts_when_adding_tag_then_following_siblings_kept() {
        let (wrapped, html) = wrap(
            "<html>\n<body>\ncat\n<p>\nmy cat\n</p>\nend\n</body>\n</html>\n",
            "cat",
            "b",
        );
        assert_eq!(wrapped, 2);
        assert_eq!(
            html,
            "<html>\n<body>\n<b>\ncat\n</b>\n<p>\nmy \n<b>\ncat\n</b>\n</p>\nend\n</body>\n</html>\n"
        );
    }

    #[test]
    fn given_empty_arguments_when_adding_tag_then_noop() {
        let doc = in_p("cat");
        assert_eq!(wrap(&doc, "", "em"), (0, doc.clone()));
        assert_eq!(wrap(&doc, "cat", ""), (0, doc.clone()));
    }

    #[rstest]
    #[case("e m")]
    #[case("em/")]
    #[case("<em>")]
    fn given_tag_outside_line_syntax_when_adding_tag_then_noop(#[case] tag: &str) {
        let doc = in_p("the cat");
        assert_eq!(wrap(&doc, "cat", tag), (0, doc.clone()));
    }

    #[rstest]
    #[case::adjacent("the cat cat", "the \n<em>\ncat\n</em>\n \n<em>\ncat\n</em>")]
    #[case::trailing_space("the cat ", "the \n<em>\ncat\n</em>\n ")]
    fn given_whitespace_fragment_when_adding_tag_then_kept_as_text(
        #[case] text: &str,
        #[case] expected: &str,
    ) {
        let (_, html) = wrap(&in_p(text), "cat", "em");
        assert_eq!(html, in_p(expected));
        assert_eq!(DomTree::parse(&html).unwrap().to_string(), html);
    }
}
