// Tests for output target selection, rendering and writing

use webtraverser_core::OutputError;
use webtraverser_core::dot::to_dot;
use webtraverser_core::output::{OutputTarget, render_output, write_output};
use webtraverser_core::render::Renderer;
use webtraverser_scanner::graph::GraphSnapshot;
use webtraverser_scanner::{EdgeKind, GraphNode, WebGraph};
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_graph() -> WebGraph {
    let mut graph = WebGraph::new();
    let home = graph.add_node(GraphNode::new("http://example.com", "Home", 0));
    let about = graph.add_node(GraphNode::new("http://example.com/about", "About", 1));
    graph.add_edge(home, about, EdgeKind::Anchor);
    graph
}

// ============================================================================
// Target Selection Tests
// ============================================================================

#[test]
fn test_target_stdout_marker() {
    assert_eq!(OutputTarget::from_path("-"), OutputTarget::Stdout);
    assert_eq!(OutputTarget::from_path("  -  "), OutputTarget::Stdout);
}

#[test]
fn test_target_svg_case_insensitive() {
    assert_eq!(
        OutputTarget::from_path("graph.SVG"),
        OutputTarget::Svg(PathBuf::from("graph.SVG"))
    );
}

#[test]
fn test_target_dot() {
    assert_eq!(
        OutputTarget::from_path(" out/graph.dot "),
        OutputTarget::Dot(PathBuf::from("out/graph.dot"))
    );
}

#[test]
fn test_target_json() {
    assert_eq!(
        OutputTarget::from_path("graph.json"),
        OutputTarget::Json(PathBuf::from("graph.json"))
    );
}

#[test]
fn test_target_unrecognized() {
    let target = OutputTarget::from_path("graph.png");
    assert_eq!(target, OutputTarget::Unrecognized("graph.png".to_string()));
    assert!(target.path().is_none());
}

// ============================================================================
// Rendering Tests
// ============================================================================

#[tokio::test]
async fn test_missing_renderer_is_invocation_error() {
    let renderer = Renderer::svg("webtraverser-no-such-renderer");
    let result = renderer.render("digraph web {}").await;

    assert!(matches!(result, Err(OutputError::RenderInvocation { .. })));
}

#[cfg(unix)]
#[tokio::test]
async fn test_renderer_receives_description_on_stdin() {
    let renderer = Renderer::new("cat", Vec::<String>::new());
    let description = to_dot(&sample_graph());

    let bytes = renderer.render(&description).await.unwrap();
    assert_eq!(bytes, description.as_bytes());
}

#[cfg(unix)]
#[tokio::test]
async fn test_failing_renderer_reports_stderr() {
    let renderer = Renderer::new("sh", ["-c", "cat > /dev/null; echo boom >&2; exit 3"]);
    let result = renderer.render("digraph web {}").await;

    match result {
        Err(OutputError::RendererFailed { stderr, status, .. }) => {
            assert_eq!(stderr, "boom");
            assert_eq!(status.code(), Some(3));
        }
        other => panic!("expected RendererFailed, got {:?}", other),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_svg_target_goes_through_renderer() {
    let renderer = Renderer::new("sh", ["-c", "cat > /dev/null; printf '<svg/>'"]);
    let target = OutputTarget::Svg(PathBuf::from("graph.svg"));

    let bytes = render_output(&sample_graph(), &target, &renderer)
        .await
        .unwrap();
    assert_eq!(bytes, b"<svg/>");
}

#[tokio::test]
async fn test_dot_target_skips_renderer() {
    let renderer = Renderer::svg("webtraverser-no-such-renderer");
    let target = OutputTarget::Dot(PathBuf::from("graph.dot"));

    let bytes = render_output(&sample_graph(), &target, &renderer)
        .await
        .unwrap();
    assert_eq!(bytes, to_dot(&sample_graph()).into_bytes());
}

// ============================================================================
// Writing Tests
// ============================================================================

#[tokio::test]
async fn test_write_dot_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.dot");
    let target = OutputTarget::Dot(path.clone());

    write_output(&sample_graph(), &target, &Renderer::default())
        .await
        .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, to_dot(&sample_graph()));
}

#[tokio::test]
async fn test_write_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.dot");
    std::fs::write(&path, "old contents").unwrap();

    write_output(
        &sample_graph(),
        &OutputTarget::Dot(path.clone()),
        &Renderer::default(),
    )
    .await
    .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("digraph web {"));
}

#[tokio::test]
async fn test_write_json_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.json");

    write_output(
        &sample_graph(),
        &OutputTarget::Json(path.clone()),
        &Renderer::default(),
    )
    .await
    .unwrap();

    let snapshot: GraphSnapshot =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(snapshot.nodes.len(), 2);
    assert_eq!(snapshot.nodes[1].url, "http://example.com/about");
    assert_eq!(snapshot.nodes[1].depth, 1);
    assert_eq!(snapshot.edges.len(), 1);
    assert_eq!(snapshot.edges[0].label, "a");
}

#[tokio::test]
async fn test_write_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("graph.dot");

    let result = write_output(
        &sample_graph(),
        &OutputTarget::Dot(path.clone()),
        &Renderer::default(),
    )
    .await;

    match result {
        Err(OutputError::OutputWrite { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected OutputWrite, got {:?}", other),
    }
}
