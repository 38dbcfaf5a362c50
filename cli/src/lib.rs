//! subpath: command-line driver for subpath-core.
//!
//! Loads the query CSV and the user JSON, builds the subscriber graph,
//! answers every query and writes the results as JSON. Fatal input and
//! output errors abort the run; per-query errors only empty that query's
//! path.

use std::time::Instant;

use subpath_core::{run_queries, Graph, Query, QueryOptions, QueryResult, QuerySummary, UserRecord};
use tracing::info;

pub mod config;
pub mod error;
pub mod load;
pub mod output;

pub use config::Config;
pub use error::{Error, Result};

/// Build the graph from `users` and answer `queries` in order.
pub fn process(users: &[UserRecord], queries: &[Query], options: QueryOptions) -> Vec<QueryResult> {
    let start = Instant::now();
    let (graph, stats) = Graph::from_users(users);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        dangling_subscribers = stats.dangling_subscribers,
        duplicate_users = stats.duplicate_users,
        load_time_ms = start.elapsed().as_secs_f64() * 1000.0,
        "graph built"
    );

    let start = Instant::now();
    let results = run_queries(&graph, queries, options);
    let summary = QuerySummary::from_results(&results);
    info!(
        total = summary.total,
        found = summary.found,
        unknown_vertex = summary.unknown_vertex,
        no_path = summary.no_path,
        query_time_ms = start.elapsed().as_secs_f64() * 1000.0,
        "queries answered"
    );

    results
}

/// Full pipeline: read inputs, answer queries, write results.
pub fn run(config: &Config) -> Result<QuerySummary> {
    let queries = load::load_queries(&config.queries)?;
    let users = load::load_users(&config.users)?;
    info!(
        queries = queries.len(),
        users = users.len(),
        "inputs loaded"
    );

    let results = process(&users, &queries, config.query_options());
    output::save_results(&config.output, &output::to_records(&results))?;
    info!(output = %config.output.display(), "results written");

    Ok(QuerySummary::from_results(&results))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERS: &str = r#"[
        {"Nick": "ann", "Email": "a@x", "Created_at": "2020-01-01", "Subscribers": [{"Email": "b@x", "Created_at": "2021-02-02"}]},
        {"Nick": "bob", "Email": "b@x", "Created_at": "2021-01-01", "Subscribers": [{"Email": "c@x", "Created_at": "2022-03-03"}, {"Email": "gone@x", "Created_at": "1999"}]},
        {"Nick": "cat", "Email": "c@x", "Created_at": "2022-01-01", "Subscribers": null}
    ]"#;

    const QUERIES: &str = "a@x,c@x\nc@x,a@x\na@x,a@x\na@x,ghost@x\n";

    fn pipeline(options: QueryOptions) -> serde_json::Value {
        let users = load::read_users(USERS.as_bytes(), "users").unwrap();
        let queries = load::read_queries(QUERIES.as_bytes(), "queries").unwrap();
        let results = process(&users, &queries, options);
        let mut buf = Vec::new();
        output::write_results(&mut buf, &output::to_records(&results)).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_pipeline_outgoing() {
        let value = pipeline(QueryOptions::default());
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row["id"], i + 1);
        }
        assert_eq!(rows[0]["from"], "a@x");
        assert_eq!(rows[0]["to"], "c@x");
        assert_eq!(rows[0]["path"][0]["email"], "b@x");
        // The intermediate user's own timestamp, not the one in a@x's list
        assert_eq!(rows[0]["path"][0]["created_at"], "2021-01-01");
        assert!(rows[1].get("path").is_none());
        assert!(rows[2].get("path").is_none());
        assert!(rows[3].get("path").is_none());
    }

    #[test]
    fn test_pipeline_incoming() {
        let options = QueryOptions {
            direction: subpath_core::TraversalDirection::Incoming,
            ..QueryOptions::default()
        };
        let value = pipeline(options);
        assert!(value[0].get("path").is_none());
        assert_eq!(value[1]["path"][0]["email"], "b@x");
    }

    #[test]
    fn test_pipeline_idempotent() {
        assert_eq!(
            pipeline(QueryOptions::default()),
            pipeline(QueryOptions::default())
        );
    }

    #[test]
    fn test_run_missing_input() {
        let config = Config {
            users: "/nonexistent/users.json".into(),
            queries: "/nonexistent/input.csv".into(),
            output: "/nonexistent/out.json".into(),
            engine: config::EngineArg::Bfs,
            direction: config::DirectionArg::Outgoing,
        };
        assert!(matches!(run(&config), Err(Error::InputUnreadable { .. })));
    }
}
