//! subpath-core: subscriber graph and shortest-path engine.
//!
//! Builds a directed graph from user records (an edge runs from a user to
//! each of their subscribers) and answers minimum-hop path queries between
//! users, reporting the intermediate users on one shortest path.
//! No file or process I/O; the `subpath` CLI wraps this crate.

mod error;
mod graph;
mod query;
mod traversal;
mod user;

pub use error::{PathError, Result};
pub use graph::{Graph, LoadStats, TraversalDirection, Vertex, VertexId};
pub use query::{
    resolve, run_queries, run_query, PathEntry, Query, QueryOptions, QueryResult, QueryStatus,
    QuerySummary, Route,
};
pub use traversal::{dijkstra, find_path, shortest_path, Engine, Path, UNIT_COST};
pub use user::{SubscriberRef, UserRecord};
