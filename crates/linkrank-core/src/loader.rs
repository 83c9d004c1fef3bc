//! Text edge-list loader.
//!
//! # Format
//!
//! One directed edge per line, written as two unsigned integers separated
//! by spaces or tabs (the layout used by SNAP datasets):
//!
//! ```text
//! # Directed graph: web-Example.txt
//! # FromNodeId	ToNodeId
//! 0	1
//! 0	2
//! ```
//!
//! Blank lines and lines starting with `#` or `%` are ignored. Anything
//! else that is not exactly two integers is a
//! [`RankError::MalformedEdgeList`] carrying the 1-based line number; the
//! loader never returns a partial list.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument};

use crate::edges::{Edge, EdgeList, NodeId};
use crate::error::RankError;

/// Load an edge list from a file on disk.
///
/// # Errors
///
/// Returns [`RankError::Io`] if the file cannot be opened or read and
/// [`RankError::MalformedEdgeList`] on the first unparsable line.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_path(path: &Path) -> Result<EdgeList, RankError> {
    let file = File::open(path).map_err(|source| RankError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    read_edges(BufReader::new(file)).map_err(|err| match err {
        RankError::Io { source, .. } => RankError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse an edge list from any buffered reader.
///
/// I/O failures are reported as [`RankError::Io`] with an empty path;
/// [`load_path`] fills the path in.
///
/// # Errors
///
/// See [`load_path`].
pub fn read_edges<R: BufRead>(reader: R) -> Result<EdgeList, RankError> {
    let mut edges = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| RankError::Io {
            path: std::path::PathBuf::new(),
            source,
        })?;
        if let Some(edge) = parse_line(&line, idx + 1)? {
            edges.push(edge);
        }
    }

    let list = EdgeList::from_pairs(edges);
    debug!(
        nodes = list.node_count,
        edges = list.edge_count,
        min = list.min_node_id,
        max = list.max_node_id,
        "edge list loaded"
    );
    Ok(list)
}

/// Parse a single line. Returns `Ok(None)` for comments and blank lines.
///
/// # Errors
///
/// Returns [`RankError::MalformedEdgeList`] for any other line that is not
/// exactly two unsigned integers.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Edge>, RankError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
        return Ok(None);
    }

    let mut fields = trimmed.split_whitespace();
    let source = parse_id(fields.next(), "source", line_no)?;
    let destination = parse_id(fields.next(), "destination", line_no)?;

    if let Some(extra) = fields.next() {
        return Err(RankError::MalformedEdgeList {
            line: line_no,
            reason: format!("unexpected trailing field {extra:?}"),
        });
    }

    Ok(Some(Edge::new(source, destination)))
}

fn parse_id(field: Option<&str>, role: &str, line_no: usize) -> Result<NodeId, RankError> {
    let raw = field.ok_or_else(|| RankError::MalformedEdgeList {
        line: line_no,
        reason: format!("missing {role} id"),
    })?;

    raw.parse::<NodeId>()
        .map_err(|e| RankError::MalformedEdgeList {
            line: line_no,
            reason: format!("invalid {role} id {raw:?}: {e}"),
        })
}
