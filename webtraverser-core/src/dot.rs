//! Graphviz description of a [`WebGraph`].

use webtraverser_scanner::{NodeId, WebGraph};

pub const GRAPH_NAME: &str = "web";

/// Global attributes written at the top of every description.
pub const GRAPH_ATTRIBUTES: &[(&str, &str)] = &[("layout", "twopi"), ("ranksep", "5")];

const TAB: &str = "\t";

/// Render `graph` as a `digraph`: attributes, then nodes, then edges, each in
/// insertion order.
pub fn to_dot(graph: &WebGraph) -> String {
    let mut out = String::new();
    out.push_str(&format!("digraph {} {{\n", GRAPH_NAME));

    for (key, value) in GRAPH_ATTRIBUTES {
        out.push_str(&format!("{}{}={}\n", TAB, key, value));
    }

    for (id, node) in graph.nodes() {
        out.push_str(&format!(
            "{}{}[label=<{}<br/><font point-size=\"10\">{}</font>>]\n",
            TAB,
            node_name(id),
            escape_label(&node.title),
            escape_label(&node.url)
        ));
    }

    for (parent, child, edge) in graph.edges() {
        out.push_str(&format!(
            "{}{} -> {} [ label=\"{}\" ]\n",
            TAB,
            node_name(parent),
            node_name(child),
            edge.kind.selector()
        ));
    }

    out.push_str("}\n");
    out
}

pub fn node_name(id: NodeId) -> String {
    format!("n{}", id.index())
}

/// Escape text for use inside an HTML-like label.
pub fn escape_label(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
