use tracing::debug;

use crate::error::{PathError, Result};
use crate::graph::{Graph, TraversalDirection};
use crate::traversal::{find_path, Engine};

/// A path query with its 1-based sequence id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: usize,
    pub from: String,
    pub to: String,
}

impl Query {
    /// Number `(from, to)` pairs in arrival order, starting at 1.
    pub fn numbered<I, S>(pairs: I) -> Vec<Query>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (from, to))| Query {
                id: i + 1,
                from: from.into(),
                to: to.into(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub engine: Engine,
    pub direction: TraversalDirection,
}

/// An intermediate user on a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub email: String,
    pub created: String,
}

/// A resolved shortest route between two users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub hops: u64,
    /// Intermediate users only, source side first.
    pub path: Vec<PathEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Found { hops: u64 },
    UnknownVertex,
    NoPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub id: usize,
    pub from: String,
    pub to: String,
    pub path: Vec<PathEntry>,
    pub status: QueryStatus,
}

/// Resolve both endpoints and find one shortest route between them.
pub fn resolve(graph: &Graph, from: &str, to: &str, options: QueryOptions) -> Result<Route> {
    let start = graph
        .lookup(from)
        .ok_or_else(|| PathError::UnknownVertex(from.to_string()))?;
    let target = graph
        .lookup(to)
        .ok_or_else(|| PathError::UnknownVertex(to.to_string()))?;

    let found = find_path(graph, options.engine, start, target, options.direction).ok_or_else(
        || PathError::NoPath {
            from: from.to_string(),
            to: to.to_string(),
        },
    )?;

    let path = found
        .intermediates()
        .iter()
        .filter_map(|&id| graph.vertex(id))
        .map(|v| PathEntry {
            email: v.email.clone(),
            created: v.created.clone(),
        })
        .collect();

    Ok(Route {
        hops: found.hops,
        path,
    })
}

/// Answer a single query. Path errors are logged and produce an empty path.
pub fn run_query(graph: &Graph, query: &Query, options: QueryOptions) -> QueryResult {
    let (path, status) = match resolve(graph, &query.from, &query.to, options) {
        Ok(route) => (route.path, QueryStatus::Found { hops: route.hops }),
        Err(err) => {
            debug!(id = query.id, error = %err, "query has no path");
            let status = match err {
                PathError::UnknownVertex(_) => QueryStatus::UnknownVertex,
                PathError::NoPath { .. } => QueryStatus::NoPath,
            };
            (Vec::new(), status)
        }
    };

    QueryResult {
        id: query.id,
        from: query.from.clone(),
        to: query.to.clone(),
        path,
        status,
    }
}

/// Answer every query in order. The output has exactly one result per query.
pub fn run_queries(graph: &Graph, queries: &[Query], options: QueryOptions) -> Vec<QueryResult> {
    queries
        .iter()
        .map(|q| run_query(graph, q, options))
        .collect()
}

/// Outcome counts over a batch of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuerySummary {
    pub total: usize,
    pub found: usize,
    pub unknown_vertex: usize,
    pub no_path: usize,
}

impl QuerySummary {
    pub fn from_results(results: &[QueryResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for r in results {
            match r.status {
                QueryStatus::Found { .. } => summary.found += 1,
                QueryStatus::UnknownVertex => summary.unknown_vertex += 1,
                QueryStatus::NoPath => summary.no_path += 1,
            }
        }
        summary
    }
}
