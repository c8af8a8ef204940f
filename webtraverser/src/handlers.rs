use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use url::Url;
use webtraverser_core::crawl::{TraverseOptions, execute_traversal, generate_traversal_summary};
use webtraverser_core::output::{OutputTarget, write_output};
use webtraverser_core::render::Renderer;

/// Everything a run needs, read from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub options: TraverseOptions,
    pub target: OutputTarget,
    pub renderer: Renderer,
    pub quiet: bool,
    pub verbose: bool,
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line.contains("://") {
        return Url::parse(line).ok().map(|_| line.to_string());
    }

    let with_scheme = format!("http://{}", line);
    Url::parse(&with_scheme).ok().map(|_| with_scheme)
}

pub fn options_from_matches(matches: &ArgMatches) -> Result<RunConfig> {
    let raw_url = matches
        .get_one::<String>("url")
        .ok_or_else(|| anyhow!("--url is required"))?;
    let url = parse_url_line(raw_url).ok_or_else(|| anyhow!("Invalid URL '{}'", raw_url))?;

    let user_agent = matches
        .get_one::<String>("user-agent")
        .cloned()
        .unwrap_or_else(|| "webtraverser".to_string());
    let max_depth = matches.get_one::<usize>("max-depth").copied().unwrap_or(10);
    let timeout_secs = matches.get_one::<u64>("timeout").copied().unwrap_or(10);
    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or(webtraverser_core::output::DEFAULT_OUTPUT);
    let renderer = matches
        .get_one::<String>("renderer")
        .map(String::as_str)
        .unwrap_or(webtraverser_core::render::DEFAULT_RENDERER);
    let quiet = matches.get_flag("quiet");
    let verbose = matches.get_flag("verbose");

    Ok(RunConfig {
        options: TraverseOptions {
            url,
            user_agent,
            max_depth,
            timeout_secs,
            show_progress_bars: !quiet,
        },
        target: OutputTarget::from_path(output),
        renderer: Renderer::svg(renderer),
        quiet,
        verbose,
    })
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr; stdout may carry the graph.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let config = options_from_matches(matches)?;
    init_tracing(config.verbose);

    if !config.quiet {
        eprintln!(
            "{} Traversing {} (max depth {})",
            "→".blue(),
            config.options.url.bright_white(),
            config.options.max_depth
        );
    }

    let graph = execute_traversal(config.options.clone(), None)
        .await
        .context("Traversal failed")?;

    write_output(&graph, &config.target, &config.renderer)
        .await
        .context("Failed to create output")?;

    if !config.quiet {
        eprintln!("{} {}", "✓".green().bold(), generate_traversal_summary(&graph));
        if let Some(path) = config.target.path() {
            eprintln!(
                "{} Output: {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
    }

    Ok(())
}
