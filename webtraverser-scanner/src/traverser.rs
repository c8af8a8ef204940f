//! Bounded depth-first traversal of a site's links.
//!
//! Visit order is pre-order: a page is fetched and recorded before any of its
//! children. The edge from a parent to a child is recorded once the child's
//! whole subtree is done, so sibling edges appear in completion order.
//!
//! Links are filtered against the visited set when they are reached, which
//! means a page is only ever linked from the first parent that discovers it.
//! The resulting graph is an out-tree, never a general DAG.

use crate::fetcher::PageFetcher;
use crate::graph::{EdgeKind, GraphNode, NodeId, WebGraph};
use crate::resolver::resolve;
use crate::visited::VisitedSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Called with `(depth, url)` right before a page is fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

pub struct Traverser<F> {
    fetcher: F,
    max_depth: usize,
    progress_callback: Option<ProgressCallback>,
}

/// A visited page whose links are still being walked.
struct Frame {
    node: NodeId,
    parent: Option<NodeId>,
    depth: usize,
    links: std::vec::IntoIter<String>,
}

/// State owned by a single call to [`Traverser::run`].
struct Run {
    visited: VisitedSet,
    graph: WebGraph,
}

impl<F: PageFetcher> Traverser<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            max_depth: DEFAULT_MAX_DEPTH,
            progress_callback: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Traverse from `seed` and return the resulting graph.
    ///
    /// Relative links on every page are resolved against `seed`, not against
    /// the page they were found on. Fetch failures prune that branch and are
    /// logged; they never abort the run.
    pub async fn run(&self, seed: &str) -> WebGraph {
        info!("Starting traversal of {} (max depth {})", seed, self.max_depth);

        let mut run = Run {
            visited: VisitedSet::new(),
            graph: WebGraph::new(),
        };
        let mut stack: Vec<Frame> = Vec::new();

        if let Some(root) = self.visit(&mut run, seed.to_string(), 0, None).await {
            stack.push(root);
        }

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };

            match frame.links.next() {
                Some(raw) => {
                    let parent = frame.node;
                    let depth = frame.depth + 1;

                    let Some(link) = resolve(seed, &raw) else {
                        debug!("Skipping empty link on {:?}", parent);
                        continue;
                    };
                    if run.visited.contains(&link) {
                        debug!("Skipping already visited {}", link);
                        continue;
                    }

                    if let Some(child) = self.visit(&mut run, link, depth, Some(parent)).await {
                        stack.push(child);
                    }
                }
                None => {
                    if let Some(done) = stack.pop()
                        && let Some(parent) = done.parent
                    {
                        run.graph.add_edge(parent, done.node, EdgeKind::Anchor);
                    }
                }
            }
        }

        info!(
            "Traversal complete. Visited {} pages, {} links",
            run.graph.node_count(),
            run.graph.edge_count()
        );
        run.graph
    }

    /// Fetch `url` and record its node. `None` means no node was created:
    /// too deep, already visited, or the fetch failed.
    async fn visit(
        &self,
        run: &mut Run,
        url: String,
        depth: usize,
        parent: Option<NodeId>,
    ) -> Option<Frame> {
        if depth >= self.max_depth || run.visited.contains(&url) {
            return None;
        }

        if let Some(ref callback) = self.progress_callback {
            callback(depth, url.clone());
        }
        info!(depth, "Visiting {}", url);

        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                // Not marked as visited: a later reference may try again.
                warn!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };

        if !run.visited.mark(&url) {
            return None;
        }

        let node = run.graph.add_node(GraphNode::new(url, &page.title, depth));
        Some(Frame {
            node,
            parent,
            depth,
            links: page.links.into_iter(),
        })
    }
}
