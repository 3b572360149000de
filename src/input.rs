use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use petgraph::graph::UnGraph;

/// Errors of the edge-list reader.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 'u,v', got {content:?}")]
    Format { line: usize, content: String },

    #[error("line {line}: {token:?} is not a vertex index")]
    Vertex { line: usize, token: String },

    #[error("line {line}: vertex {vertex} exceeds the limit of {} vertices", MAX_VERTICES)]
    TooManyVertices { line: usize, vertex: usize },
}

/// Largest vertex count the reader accepts; every index below the largest one gets a node.
pub const MAX_VERTICES: usize = 1 << 24;

/// Reads a graph from a file.
///
/// Undirected graph input:
/// - one line, one edge in format "u,v",
/// - vertices are numbered from 0 up to |V|-1, the largest index seen fixes |V|,
///   which may not exceed [`MAX_VERTICES`],
/// - empty lines and lines starting with `#` are skipped.
///
/// Parallel edges are kept. Edge ids follow the line order, so the i-th edge of the input
/// is edge `i` of the returned graph.
///
/// Example input:
/// ```text
/// # two triangles glued along 0,1
/// 0,1
/// 0,2
/// 1,2
/// 0,3
/// 1,3
/// ```
pub fn from_file(path: impl AsRef<Path>) -> Result<UnGraph<u32, String>, ParseError> {
    let file = File::open(path)?;
    parse_graph_from_custom_format(BufReader::new(file))
}

/// This is equivalent to [`from_file`], but takes string as an input.
pub fn from_str(input: &str) -> Result<UnGraph<u32, String>, ParseError> {
    parse_graph_from_custom_format(BufReader::new(Cursor::new(input)))
}

fn parse_vertex(token: &str, line: usize) -> Result<usize, ParseError> {
    let vertex: usize = token.trim().parse().map_err(|_| ParseError::Vertex {
        line,
        token: token.to_string(),
    })?;
    if vertex >= MAX_VERTICES {
        return Err(ParseError::TooManyVertices { line, vertex });
    }
    Ok(vertex)
}

fn parse_graph_from_custom_format<R: BufRead>(reader: R) -> Result<UnGraph<u32, String>, ParseError> {
    let mut edges = Vec::new();
    let mut vertex_count = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((u, v)) = line.split_once(',') else {
            return Err(ParseError::Format {
                line: i + 1,
                content: line.to_string(),
            });
        };
        let (u, v) = (parse_vertex(u, i + 1)?, parse_vertex(v, i + 1)?);
        vertex_count = vertex_count.max(u + 1).max(v + 1);
        edges.push((u, v));
    }

    let mut graph = UnGraph::<u32, String>::new_undirected();
    let nodes: Vec<_> = (0..vertex_count).map(|i| graph.add_node(i as u32)).collect();
    graph.extend_with_edges(
        edges
            .iter()
            .map(|&(u, v)| (nodes[u], nodes[v], String::from("REAL"))),
    );

    Ok(graph)
}
