use std::collections::HashMap;

use tracing::debug;

use crate::user::UserRecord;

/// Index into the vertex arena. Stable for the lifetime of a `Graph`.
pub type VertexId = usize;

/// Metadata about a vertex (one user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub email: String,
    pub created: String,
}

/// Traversal direction for path queries.
///
/// `Outgoing` follows `user -> subscriber` edges. `Incoming` walks them
/// backwards, i.e. from a subscriber to the users it is subscribed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalDirection {
    #[default]
    Outgoing,
    Incoming,
}

/// Counters collected while building a graph from user records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub users: usize,
    pub duplicate_users: usize,
    pub edges: usize,
    pub dangling_subscribers: usize,
}

/// In-memory subscriber graph: vertex arena + email index + adjacency lists.
///
/// Edges are stored in both directions. `outgoing[a]` lists the subscribers
/// of `a`, `incoming[b]` lists the users `b` is subscribed to. Both keep
/// insertion order, so neighbor iteration is deterministic for a given input.
#[derive(Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    email_index: HashMap<String, VertexId>,
    outgoing: Vec<Vec<VertexId>>,
    incoming: Vec<Vec<VertexId>>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            email_index: HashMap::with_capacity(vertex_count),
            outgoing: Vec::with_capacity(vertex_count),
            incoming: Vec::with_capacity(vertex_count),
            edge_count: 0,
        }
    }

    /// Intern an email, returning its vertex handle.
    ///
    /// Idempotent on email. `created` is only recorded the first time an
    /// email is seen.
    pub fn intern(&mut self, email: &str, created: &str) -> VertexId {
        if let Some(&id) = self.email_index.get(email) {
            return id;
        }
        let id = self.vertices.len();
        self.vertices.push(Vertex {
            email: email.to_string(),
            created: created.to_string(),
        });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.email_index.insert(email.to_string(), id);
        id
    }

    /// Intern a user row. Unlike `intern`, a repeated email overwrites the
    /// stored timestamp (last row wins).
    pub fn register_user(&mut self, email: &str, created: &str) -> VertexId {
        let id = self.intern(email, created);
        let vertex = &mut self.vertices[id];
        if vertex.created != created {
            vertex.created = created.to_string();
        }
        id
    }

    /// Look up a vertex by email.
    pub fn lookup(&self, email: &str) -> Option<VertexId> {
        self.email_index.get(email).copied()
    }

    /// Get vertex metadata.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn contains(&self, id: VertexId) -> bool {
        id < self.vertices.len()
    }

    /// Add a directed unit-cost edge `parent -> child`.
    ///
    /// Returns false (and stores nothing) if either handle is unknown.
    pub fn add_edge(&mut self, parent: VertexId, child: VertexId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        self.outgoing[parent].push(child);
        self.incoming[child].push(parent);
        self.edge_count += 1;
        true
    }

    /// Build a graph from user rows.
    ///
    /// Every user is registered first so subscriber references can point
    /// forward in the list. A subscriber whose email is not itself a user has
    /// no metadata and its edge is dropped.
    pub fn from_users<'a, I>(users: I) -> (Self, LoadStats)
    where
        I: IntoIterator<Item = &'a UserRecord>,
        I::IntoIter: Clone,
    {
        let users = users.into_iter();
        let mut graph = Self::with_capacity(users.size_hint().0);
        let mut stats = LoadStats::default();

        for user in users.clone() {
            stats.users += 1;
            if graph.lookup(&user.email).is_some() {
                stats.duplicate_users += 1;
                debug!(email = %user.email, "duplicate user row, keeping last timestamp");
            }
            graph.register_user(&user.email, &user.created_at);
        }

        for user in users {
            // Registered in the first pass.
            let Some(parent) = graph.lookup(&user.email) else {
                continue;
            };
            for sub in &user.subscribers {
                match graph.lookup(&sub.email) {
                    Some(child) => {
                        graph.add_edge(parent, child);
                        stats.edges += 1;
                    }
                    None => {
                        stats.dangling_subscribers += 1;
                        debug!(
                            user = %user.email,
                            subscriber = %sub.email,
                            "dropping edge to subscriber that is not a known user"
                        );
                    }
                }
            }
        }

        (graph, stats)
    }

    /// Subscribers of `id` (targets of outgoing edges).
    pub fn neighbors_out(&self, id: VertexId) -> &[VertexId] {
        self.outgoing.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Users that `id` is subscribed to (sources of incoming edges).
    pub fn neighbors_in(&self, id: VertexId) -> &[VertexId] {
        self.incoming.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Neighbors of `id` when walking in `direction`.
    pub fn neighbors(&self, id: VertexId, direction: TraversalDirection) -> &[VertexId] {
        match direction {
            TraversalDirection::Outgoing => self.neighbors_out(id),
            TraversalDirection::Incoming => self.neighbors_in(id),
        }
    }

    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let strings: usize = self
            .vertices
            .iter()
            .map(|v| v.email.capacity() * 2 + v.created.capacity())
            .sum();
        let vertices_mem = self.vertices.len() * size_of::<Vertex>() + strings;
        let index_mem =
            self.email_index.len() * (size_of::<String>() + size_of::<VertexId>() + 8);
        let lists = self.outgoing.len() + self.incoming.len();
        let adjacency_mem = lists * size_of::<Vec<VertexId>>()
            + self.edge_count * 2 * size_of::<VertexId>();

        vertices_mem + index_mem + adjacency_mem
    }
}
