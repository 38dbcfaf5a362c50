use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use subpath_core::{Engine, QueryOptions, TraversalDirection};

/// Run configuration. Every flag can also be set through a `SUBPATH_*`
/// environment variable; an explicit flag wins.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Shortest subscription chains between users")]
pub struct Config {
    /// JSON array of users with their subscribers.
    #[arg(long, env = "SUBPATH_USERS", default_value = "users.json")]
    pub users: PathBuf,

    /// CSV of `from,to` email pairs, no header.
    #[arg(long, env = "SUBPATH_QUERIES", default_value = "input.csv")]
    pub queries: PathBuf,

    /// Where to write the JSON results. `-` writes to stdout.
    #[arg(short, long, env = "SUBPATH_OUTPUT", default_value = "result1.json")]
    pub output: PathBuf,

    /// Shortest-path algorithm.
    #[arg(long, env = "SUBPATH_ENGINE", value_enum, default_value_t = EngineArg::Bfs)]
    pub engine: EngineArg,

    /// `outgoing` follows user -> subscriber edges from `from` to `to`;
    /// `incoming` walks them backwards.
    #[arg(long, env = "SUBPATH_DIRECTION", value_enum, default_value_t = DirectionArg::Outgoing)]
    pub direction: DirectionArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    Bfs,
    Dijkstra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    #[value(alias = "out")]
    Outgoing,
    #[value(alias = "in")]
    Incoming,
}

impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Bfs => Engine::Bfs,
            EngineArg::Dijkstra => Engine::Dijkstra,
        }
    }
}

impl From<DirectionArg> for TraversalDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Outgoing => TraversalDirection::Outgoing,
            DirectionArg::Incoming => TraversalDirection::Incoming,
        }
    }
}

impl Config {
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            engine: self.engine.into(),
            direction: self.direction.into(),
        }
    }
}
