//! Breadth-first note discovery
//!
//! Walks the note graph from a root note in strict FIFO order, building an
//! export tree bounded by two depth thresholds: `content_depth` (how deep
//! full bodies are included) and `title_depth` (how deep links are followed
//! at all). Content is attached in a second pass after the tree shape is
//! final, so frontier decisions never trigger body reads.

use std::collections::{BTreeSet, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::model::{ExportNode, ExportTree};
use crate::vault::source::NoteSource;

#[derive(Debug, Error)]
pub enum TraverseError {
    /// The root reference resolved to nothing. The only fatal resolution
    /// failure; every other unresolved reference just lands in the
    /// missing list.
    #[error("root note not found: {0}")]
    RootNotFound(String),

    /// A note resolved during discovery but its body could not be read
    /// during hydration.
    #[error("failed to read note body: {path}")]
    Body {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Node under construction. Children are arena indices until assembly.
struct Slot<H> {
    handle: H,
    id: String,
    title: String,
    depth: usize,
    include_content: bool,
    content: Option<String>,
    last_modified: DateTime<Utc>,
    children: Vec<usize>,
}

/// BFS traversal engine over any NoteSource.
pub struct BfsTraversal<'a, S: NoteSource> {
    source: &'a S,
    content_depth: usize,
    title_depth: usize,
}

impl<'a, S: NoteSource> BfsTraversal<'a, S> {
    /// Callers are expected to pass `title_depth >= content_depth`; the
    /// engine itself applies each threshold independently.
    pub fn new(source: &'a S, content_depth: usize, title_depth: usize) -> Self {
        Self {
            source,
            content_depth,
            title_depth,
        }
    }

    /// Discover the subgraph reachable from `root_name` and return it as a
    /// tree plus the unresolved reference names. All traversal state is
    /// per-call, so one engine value is safely reusable.
    pub fn traverse(&self, root_name: &str) -> Result<ExportTree, TraverseError> {
        let root_handle = self
            .source
            .resolve(root_name)
            .ok_or_else(|| TraverseError::RootNotFound(root_name.to_string()))?;

        let mut arena: Vec<Slot<S::Handle>> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut missing: BTreeSet<String> = BTreeSet::new();
        let mut queue: VecDeque<usize> = VecDeque::new();

        let root_id = self.source.id(&root_handle);
        visited.insert(root_id.clone());
        let root_idx = self.push_slot(&mut arena, root_handle, root_id, 0);
        queue.push_back(root_idx);

        while let Some(idx) = queue.pop_front() {
            let depth = arena[idx].depth;

            // Title-depth frontier: nodes at or beyond it stay leaves even
            // when they have outgoing references.
            if depth >= self.title_depth {
                continue;
            }

            let links = self.source.outgoing_links(&arena[idx].handle);
            for link in links {
                match self.source.resolve(&link) {
                    Some(handle) => {
                        let id = self.source.id(&handle);
                        if visited.contains(&id) {
                            // Cycle/diamond suppression: the note already
                            // has its one node in the tree.
                            continue;
                        }
                        visited.insert(id.clone());
                        let child_idx = self.push_slot(&mut arena, handle, id, depth + 1);
                        arena[idx].children.push(child_idx);
                        queue.push_back(child_idx);
                    }
                    None => {
                        missing.insert(link);
                    }
                }
            }
        }

        self.hydrate(&mut arena, root_idx)?;

        Ok(ExportTree {
            root: assemble(arena),
            missing_notes: missing.into_iter().collect(),
        })
    }

    fn push_slot(
        &self,
        arena: &mut Vec<Slot<S::Handle>>,
        handle: S::Handle,
        id: String,
        depth: usize,
    ) -> usize {
        let slot = Slot {
            title: self.source.title(&handle),
            last_modified: self.source.last_modified(&handle),
            id,
            depth,
            include_content: depth <= self.content_depth,
            content: None,
            children: Vec::new(),
            handle,
        };
        arena.push(slot);
        arena.len() - 1
    }

    /// Second pass: attach bodies in pre-order, only where the node shows
    /// content.
    fn hydrate(
        &self,
        arena: &mut Vec<Slot<S::Handle>>,
        idx: usize,
    ) -> Result<(), TraverseError> {
        if arena[idx].include_content {
            let body = self
                .source
                .read_body(&arena[idx].handle)
                .map_err(|source| TraverseError::Body {
                    path: arena[idx].id.clone(),
                    source,
                })?;
            arena[idx].content = Some(body);
        }

        let children = arena[idx].children.clone();
        for child in children {
            self.hydrate(arena, child)?;
        }
        Ok(())
    }
}

/// Convert the arena into an owned tree. BFS appends children after their
/// parent, so building in reverse index order sees every child before its
/// parent.
fn assemble<H>(arena: Vec<Slot<H>>) -> ExportNode {
    let len = arena.len();
    let mut slots: Vec<Option<Slot<H>>> = arena.into_iter().map(Some).collect();
    let mut built: Vec<Option<ExportNode>> = (0..len).map(|_| None).collect();

    for idx in (0..len).rev() {
        let slot = slots[idx].take().expect("each slot assembled once");
        let children = slot
            .children
            .iter()
            .map(|&child| built[child].take().expect("children precede parents"))
            .collect();

        let mut node = ExportNode::new(
            slot.id,
            slot.title,
            slot.depth,
            slot.include_content,
            slot.last_modified,
        );
        node.content = slot.content;
        node.children = children;
        built[idx] = Some(node);
    }

    built[0].take().expect("arena holds at least the root")
}
