pub mod error;
pub mod fetcher;
pub mod graph;
pub mod resolver;
pub mod traverser;
pub mod visited;

pub use error::{FetchError, ScanError};
pub use fetcher::{HttpFetcher, Page, PageFetcher};
pub use graph::{EdgeKind, GraphEdge, GraphNode, NodeId, WebGraph};
pub use resolver::resolve;
pub use traverser::{ProgressCallback, Traverser};
pub use visited::VisitedSet;
