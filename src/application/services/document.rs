//! Document service
//!
//! Loads line-oriented documents into trees, runs edits on them and writes
//! the result back.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::script::{Edit, EditScript};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::rewrite;
use crate::domain::{DomTree, TreeBuilder, Vocabulary};
use crate::infrastructure::traits::FileSystem;

/// Result of one applied edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub edit: Edit,
    /// Nodes renamed, wrapped or removed by the edit
    pub affected: usize,
}

/// Shape summary of a document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub nodes: usize,
    pub tags: usize,
    pub texts: usize,
    pub depth: usize,
    pub rows: usize,
}

/// Service for loading, rewriting and saving documents.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
    vocabulary: Vocabulary,
    builder: TreeBuilder,
}

impl DocumentService {
    /// Create a new document service.
    pub fn new(fs: Arc<dyn FileSystem>, vocabulary: Vocabulary) -> Self {
        Self {
            fs,
            vocabulary,
            builder: TreeBuilder::new(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Build a tree from document text; `origin` names the source in errors.
    pub fn parse(&self, content: &str, origin: &Path) -> ApplicationResult<DomTree> {
        self.builder
            .build(content.lines())
            .map_err(|source| ApplicationError::Document {
                path: origin.to_path_buf(),
                source,
            })
    }

    /// Read and build the document at `path`.
    pub fn load(&self, path: &Path) -> ApplicationResult<DomTree> {
        debug!("load: path={}", path.display());
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read document", path)?;
        self.parse(&content, path)
    }

    /// Run a single edit against `tree`.
    pub fn apply(&self, tree: &mut DomTree, edit: &Edit) -> ApplicationResult<EditOutcome> {
        let vocab = &self.vocabulary;
        let affected = match edit {
            Edit::Rename { from, to } => rewrite::rename(tree, from, to),
            Edit::BoldRow { row } => rewrite::bold_row(tree, *row, vocab),
            Edit::Remove { tag } => rewrite::remove_tag(tree, tag, vocab),
            Edit::AddTag { word, tag } => rewrite::add_tag(tree, word, tag, vocab)?,
        };
        info!("{}: {} node(s) affected", edit, affected);
        Ok(EditOutcome {
            edit: edit.clone(),
            affected,
        })
    }

    /// Run edits in order; stops at the first failing edit.
    pub fn apply_all(&self, tree: &mut DomTree, edits: &[Edit]) -> ApplicationResult<Vec<EditOutcome>> {
        edits.iter().map(|edit| self.apply(tree, edit)).collect()
    }

    /// Read and parse an edit script.
    pub fn load_script(&self, path: &Path) -> ApplicationResult<EditScript> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read edit script", path)?;
        let script = EditScript::parse(&content).map_err(|e| ApplicationError::Script {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("load_script: {} edit(s) from {}", script.edits.len(), path.display());
        Ok(script)
    }

    /// Serialize and atomically write `tree` to `path`.
    pub fn save(&self, tree: &DomTree, path: &Path) -> ApplicationResult<()> {
        debug!("save: path={}", path.display());
        self.fs
            .replace(path, &tree.to_string())
            .with_path_context("write document", path)
    }

    pub fn stats(&self, tree: &DomTree) -> DocumentStats {
        let (tags, texts) = tree.preorder().fold((0, 0), |(tags, texts), (_, node)| {
            if node.is_leaf() {
                (tags, texts + 1)
            } else {
                (tags + 1, texts)
            }
        });
        DocumentStats {
            nodes: tree.len(),
            tags,
            texts,
            depth: tree.depth(),
            rows: tree.count_tags(&self.vocabulary.row_tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// In-memory filesystem keyed by path.
    #[derive(Default)]
    struct MemoryFileSystem {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl MemoryFileSystem {
        fn with_file(path: &str, content: &str) -> Self {
            let fs = Self::default();
            fs.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), content.to_string());
            fs
        }

        fn content(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn write(&self, path: &Path, content: &str) -> io::Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.exists(path)
        }

        fn replace(&self, path: &Path, content: &str) -> io::Result<()> {
            self.write(path, content)
        }
    }

    const DOC: &str = "<html>\n<body>\n<ul>\n<li>\nthe cat\n</li>\n</ul>\n<table>\n<tr>\n<td>\nx\n</td>\n</tr>\n</table>\n</body>\n</html>\n";

    fn service(fs: MemoryFileSystem) -> (Arc<MemoryFileSystem>, DocumentService) {
        let fs = Arc::new(fs);
        let service = DocumentService::new(fs.clone(), Vocabulary::default());
        (fs, service)
    }

    #[test]
    fn given_edits_when_applying_all_then_run_in_order_and_saved() {
        let (fs, service) = service(MemoryFileSystem::with_file("doc.html", DOC));
        let mut tree = service.load(Path::new("doc.html")).unwrap();

        let outcomes = service
            .apply_all(
                &mut tree,
                &[
                    Edit::Remove { tag: "ul".into() },
                    Edit::AddTag {
                        word: "cat".into(),
                        tag: "em".into(),
                    },
                    Edit::BoldRow { row: 1 },
                    Edit::Rename {
                        from: "em".into(),
                        to: "i".into(),
                    },
                ],
            )
            .unwrap();
        let affected: Vec<_> = outcomes.iter().map(|o| o.affected).collect();
        assert_eq!(affected, vec![1, 1, 1, 1]);

        service.save(&tree, Path::new("doc.html")).unwrap();
        assert_eq!(
            fs.content("doc.html").unwrap(),
            "<html>\n<body>\n<p>\nthe \n<i>\ncat\n</i>\n</p>\n<table>\n<tr>\n<td>\n<b>\nx\n</b>\n</td>\n</tr>\n</table>\n</body>\n</html>\n"
        );
    }

    #[test]
    fn given_missing_file_when_loading_then_operation_failed() {
        let (_, service) = service(MemoryFileSystem::default());
        let err = service.load(Path::new("missing.html")).unwrap_err();
        assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    }

    #[test]
    fn given_malformed_file_when_loading_then_document_error_names_path() {
        let (_, service) = service(MemoryFileSystem::with_file("bad.html", "<html>\n<body>\n"));
        let err = service.load(Path::new("bad.html")).unwrap_err();
        assert!(matches!(err, ApplicationError::Document { .. }));
        assert!(err.to_string().contains("bad.html"));
    }

    #[test]
    fn given_invalid_script_when_loading_then_script_error() {
        let (_, service) = service(MemoryFileSystem::with_file("edits.toml", "[[edit]]\nop = 1\n"));
        let err = service.load_script(Path::new("edits.toml")).unwrap_err();
        assert!(matches!(err, ApplicationError::Script { .. }));
    }

    #[test]
    fn given_document_when_collecting_stats_then_counts_match() {
        let (_, service) = service(MemoryFileSystem::default());
        let tree = service.parse(DOC, Path::new("-")).unwrap();
        let stats = service.stats(&tree);
        assert_eq!(
            stats,
            DocumentStats {
                nodes: 9,
                tags: 7,
                texts: 2,
                depth: 6,
                rows: 1,
            }
        );
    }
}
