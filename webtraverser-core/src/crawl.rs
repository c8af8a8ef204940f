use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;
use webtraverser_scanner::fetcher::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use webtraverser_scanner::traverser::DEFAULT_MAX_DEPTH;
use webtraverser_scanner::{HttpFetcher, ScanError, Traverser, WebGraph};

/// Options for configuring a traversal
#[derive(Debug, Clone)]
pub struct TraverseOptions {
    pub url: String,
    pub user_agent: String,
    pub max_depth: usize,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl TraverseOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting traversal progress, one message per visited URL
pub type TraverseProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Indent `url` by one tab per level of `depth`.
pub fn format_visit(depth: usize, url: &str) -> String {
    format!("{}{}", "\t".repeat(depth), url)
}

/// Run a traversal over HTTP with the given options.
///
/// Only a bad seed URL or an unusable HTTP client fail the whole run; page
/// fetch errors are logged and skipped.
pub async fn execute_traversal(
    options: TraverseOptions,
    progress_callback: Option<TraverseProgressCallback>,
) -> Result<WebGraph, ScanError> {
    let TraverseOptions {
        url,
        user_agent,
        max_depth,
        timeout_secs,
        show_progress_bars,
    } = options;

    Url::parse(&url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;

    let fetcher = HttpFetcher::with_options(&user_agent, timeout_secs)?;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Starting traversal...");
        Some(pb)
    } else {
        None
    };

    let visited_count = Arc::new(AtomicUsize::new(0));

    let pb_clone = progress_bar.clone();
    let count_clone = visited_count.clone();
    let traverser = Traverser::new(fetcher)
        .with_max_depth(max_depth)
        .with_progress_callback(Arc::new(move |depth: usize, url: String| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            let line = format_visit(depth, &url);

            if let Some(ref pb) = pb_clone {
                pb.println(&line);
                pb.set_message(format!("Traversing... {} URLs requested", count));
                pb.tick();
            }
            if let Some(ref callback) = progress_callback {
                callback(line);
            }
        }));

    let graph = traverser.run(&url).await;

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Traversal complete! {} pages, {} links",
            graph.node_count(),
            graph.edge_count()
        ));
    }

    Ok(graph)
}

/// One-line summary of a finished traversal.
pub fn generate_traversal_summary(graph: &WebGraph) -> String {
    let deepest = graph.nodes().map(|(_, node)| node.depth).max();
    match deepest {
        Some(depth) => format!(
            "Visited {} pages, {} links (deepest level {})",
            graph.node_count(),
            graph.edge_count(),
            depth
        ),
        None => "Visited 0 pages, 0 links".to_string(),
    }
}
