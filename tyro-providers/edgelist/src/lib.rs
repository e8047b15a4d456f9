//! Edge-list provider implementing [`GraphSource`].
//!
//! Reads SNAP-style edge lists: one edge per line, endpoints separated by
//! whitespace or commas, `#` and `%` starting comments. Extra columns such
//! as weights are ignored. Vertices are created in first-seen order.

mod errors;

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{debug, instrument};
use tyro_core::{Graph, GraphSource, GraphSourceError, VertexId};

pub use crate::errors::EdgeListError;

/// Graph parsed from an edge list.
#[derive(Debug, Clone)]
pub struct EdgeListSource {
    name: String,
    graph: Graph,
}

impl EdgeListSource {
    /// Parses an edge list from `reader`.
    ///
    /// Self-loops and repeated edges are skipped.
    ///
    /// # Errors
    /// Returns [`EdgeListError::Io`] when reading fails,
    /// [`EdgeListError::Malformed`] for a data line with fewer than two
    /// endpoints and [`EdgeListError::Empty`] when no edge survives.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use tyro_providers_edgelist::EdgeListSource;
    ///
    /// let source = EdgeListSource::try_from_reader("demo", Cursor::new("a b\nb,c\n"))?;
    /// assert_eq!(source.graph().vertex_count(), 3);
    /// assert_eq!(source.graph().edge_count(), 2);
    /// # Ok::<(), tyro_providers_edgelist::EdgeListError>(())
    /// ```
    #[instrument(name = "edgelist.parse", skip_all, err)]
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, EdgeListError> {
        let mut builder = LabelledGraph::default();
        let mut skipped = 0_usize;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let Some((left, right)) = endpoints(&line, index + 1)? else {
                continue;
            };
            if !builder.insert(left, right) {
                skipped += 1;
            }
        }
        if builder.graph.edge_count() == 0 {
            return Err(EdgeListError::Empty);
        }
        debug!(
            vertices = builder.graph.vertex_count(),
            edges = builder.graph.edge_count(),
            skipped,
            "edge list parsed"
        );
        Ok(Self {
            name: name.into(),
            graph: builder.graph,
        })
    }

    /// Parses the edge list stored at `path`, named after the file stem.
    ///
    /// # Errors
    /// See [`Self::try_from_reader`].
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, EdgeListError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned());
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Returns the parsed graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

impl GraphSource for EdgeListSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_graph(&self) -> Result<Graph, GraphSourceError> {
        Ok(self.graph.clone())
    }
}

/// Splits a data line into its two endpoint labels.
///
/// Returns `Ok(None)` for blank and comment lines.
fn endpoints(line: &str, number: usize) -> Result<Option<(&str, &str)>, EdgeListError> {
    let data = line
        .split(['#', '%'])
        .next()
        .unwrap_or_default()
        .trim();
    if data.is_empty() {
        return Ok(None);
    }
    let mut tokens = data
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());
    match (tokens.next(), tokens.next()) {
        (Some(left), Some(right)) => Ok(Some((left, right))),
        _ => Err(EdgeListError::Malformed {
            line: number,
            content: data.to_owned(),
        }),
    }
}

#[derive(Default)]
struct LabelledGraph {
    graph: Graph,
    ids: HashMap<String, VertexId>,
}

impl LabelledGraph {
    fn vertex(&mut self, label: &str) -> VertexId {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = self.graph.add_vertex(label);
        self.ids.insert(label.to_owned(), id);
        id
    }

    /// Returns `false` when the edge was skipped as a self-loop or repeat.
    ///
    /// Endpoints are registered even when the edge is skipped.
    fn insert(&mut self, left: &str, right: &str) -> bool {
        let left = self.vertex(left);
        let right = self.vertex(right);
        self.graph.add_edge(left, right).is_ok()
    }
}
