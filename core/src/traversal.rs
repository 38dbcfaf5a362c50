use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::graph::{Graph, TraversalDirection, VertexId};

/// Cost of every edge. Path cost equals hop count.
pub const UNIT_COST: u64 = 1;

/// Sentinel for "not reached yet".
const INFINITY: u64 = u64::MAX;

/// Shortest-path algorithm used to answer a query.
///
/// With unit edge costs both produce the same hop count. Which of several
/// equally short paths is returned may differ between them, but is
/// deterministic for a given graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Engine {
    /// Breadth-first search, O(V + E).
    #[default]
    Bfs,
    /// Dijkstra with a binary min-heap, O((V + E) log V).
    Dijkstra,
}

/// One shortest path, endpoints included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub hops: u64,
}

impl Path {
    /// Vertices strictly between the endpoints, in traversal order.
    pub fn intermediates(&self) -> &[VertexId] {
        match self.vertices.len() {
            0..=2 => &[],
            n => &self.vertices[1..n - 1],
        }
    }
}

/// Run `engine` from `start` to `target`. See [`shortest_path`] and
/// [`dijkstra`].
pub fn find_path(
    graph: &Graph,
    engine: Engine,
    start: VertexId,
    target: VertexId,
    direction: TraversalDirection,
) -> Option<Path> {
    match engine {
        Engine::Bfs => shortest_path(graph, start, target, direction),
        Engine::Dijkstra => dijkstra(graph, start, target, direction),
    }
}

/// Shortest path from `start` to `target` using BFS.
///
/// Each vertex is marked when first discovered and stores its parent, so the
/// search stops as soon as `target` is discovered. Returns None if either
/// vertex is not in the graph or `target` is unreachable.
pub fn shortest_path(
    graph: &Graph,
    start: VertexId,
    target: VertexId,
    direction: TraversalDirection,
) -> Option<Path> {
    if !graph.contains(start) || !graph.contains(target) {
        return None;
    }

    if start == target {
        return Some(Path {
            vertices: vec![start],
            hops: 0,
        });
    }

    let mut parent: Vec<Option<VertexId>> = vec![None; graph.node_count()];
    let mut seen = vec![false; graph.node_count()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();

    seen[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &next in graph.neighbors(current, direction) {
            if seen[next] {
                continue;
            }
            seen[next] = true;
            parent[next] = Some(current);

            if next == target {
                return Some(reconstruct_path(&parent, start, target));
            }

            queue.push_back(next);
        }
    }

    None
}

/// Shortest path from `start` to `target` using Dijkstra's algorithm.
///
/// Heap entries are `(cost, vertex)`; stale entries are skipped when popped.
/// A vertex is finalized on its first pop and never revisited, and the search
/// stops once `target` is finalized. Costs that would overflow are treated as
/// infinite and never relax a neighbor.
pub fn dijkstra(
    graph: &Graph,
    start: VertexId,
    target: VertexId,
    direction: TraversalDirection,
) -> Option<Path> {
    if !graph.contains(start) || !graph.contains(target) {
        return None;
    }

    let n = graph.node_count();
    let mut cost = vec![INFINITY; n];
    let mut parent: Vec<Option<VertexId>> = vec![None; n];
    let mut finalized = vec![false; n];
    let mut heap: BinaryHeap<Reverse<(u64, VertexId)>> = BinaryHeap::new();

    cost[start] = 0;
    heap.push(Reverse((0, start)));

    while let Some(Reverse((c, current))) = heap.pop() {
        if finalized[current] {
            continue;
        }
        finalized[current] = true;

        if current == target {
            let mut path = reconstruct_path(&parent, start, target);
            path.hops = c;
            return Some(path);
        }

        for &next in graph.neighbors(current, direction) {
            if finalized[next] {
                continue;
            }
            let Some(tentative) = relax_cost(c, UNIT_COST) else {
                continue;
            };
            if tentative < cost[next] {
                cost[next] = tentative;
                parent[next] = Some(current);
                heap.push(Reverse((tentative, next)));
            }
        }
    }

    None
}

/// `cost + edge`, or None when the sum would overflow or reach the
/// infinity sentinel.
fn relax_cost(cost: u64, edge: u64) -> Option<u64> {
    cost.checked_add(edge).filter(|&c| c < INFINITY)
}

/// Walk parent pointers from `target` back to `start`, then reverse.
fn reconstruct_path(parent: &[Option<VertexId>], start: VertexId, target: VertexId) -> Path {
    let mut vertices = vec![target];
    let mut current = target;

    while current != start {
        match parent[current] {
            Some(p) => {
                vertices.push(p);
                current = p;
            }
            // Only reachable vertices are reconstructed, so the chain always
            // ends at `start`.
            None => break,
        }
    }

    vertices.reverse();
    let hops = (vertices.len() - 1) as u64;
    Path { vertices, hops }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRecord;

    fn email(i: usize) -> String {
        format!("u{}@x", i)
    }

    fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::with_capacity(n);
        for i in 0..n {
            g.intern(&email(i), &format!("t{}", i));
        }
        for &(a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    fn make_chain(n: usize) -> Graph {
        let edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        graph_from_edges(n, &edges)
    }

    fn make_cycle(n: usize) -> Graph {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        graph_from_edges(n, &edges)
    }

    fn both_engines() -> [Engine; 2] {
        [Engine::Bfs, Engine::Dijkstra]
    }

    /// Deterministic pseudo-random graph (same LCG as the bench generators).
    fn make_random(n: usize, edges: usize, seed: u64) -> Graph {
        let mut state = seed;
        let mut next = |max: usize| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((state >> 33) % max as u64) as usize
        };
        let pairs: Vec<_> = (0..edges).map(|_| (next(n), next(n))).collect();
        graph_from_edges(n, &pairs)
    }

    /// Reference hop counts from `start` via exhaustive BFS.
    fn all_distances(g: &Graph, start: VertexId) -> Vec<Option<u64>> {
        let mut dist = vec![None; g.node_count()];
        dist[start] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            let d = dist[u].unwrap();
            for &v in g.neighbors_out(u) {
                if dist[v].is_none() {
                    dist[v] = Some(d + 1);
                    queue.push_back(v);
                }
            }
        }
        dist
    }

    fn assert_valid_walk(g: &Graph, path: &Path) {
        for pair in path.vertices.windows(2) {
            assert!(
                g.neighbors_out(pair[0]).contains(&pair[1]),
                "{} -> {} is not an edge",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_shortest_path_chain() {
        let g = make_chain(5);
        for engine in both_engines() {
            let path = find_path(&g, engine, 0, 4, TraversalDirection::Outgoing).unwrap();
            assert_eq!(path.vertices, vec![0, 1, 2, 3, 4]);
            assert_eq!(path.hops, 4);
            assert_eq!(path.intermediates(), &[1, 2, 3]);
        }
    }

    #[test]
    fn test_shortest_path_self() {
        let g = make_chain(3);
        for engine in both_engines() {
            let path = find_path(&g, engine, 1, 1, TraversalDirection::Outgoing).unwrap();
            assert_eq!(path.vertices, vec![1]);
            assert_eq!(path.hops, 0);
            assert!(path.intermediates().is_empty());
        }
    }

    #[test]
    fn test_shortest_path_direct_edge() {
        let g = make_chain(2);
        for engine in both_engines() {
            let path = find_path(&g, engine, 0, 1, TraversalDirection::Outgoing).unwrap();
            assert_eq!(path.hops, 1);
            assert!(path.intermediates().is_empty());
        }
    }

    #[test]
    fn test_shortest_path_respects_direction() {
        let g = make_chain(3);
        for engine in both_engines() {
            assert!(find_path(&g, engine, 2, 0, TraversalDirection::Outgoing).is_none());
            let back = find_path(&g, engine, 2, 0, TraversalDirection::Incoming).unwrap();
            assert_eq!(back.vertices, vec![2, 1, 0]);
        }
    }

    #[test]
    fn test_shortest_path_no_path() {
        let g = graph_from_edges(3, &[(0, 1)]);
        for engine in both_engines() {
            assert!(find_path(&g, engine, 0, 2, TraversalDirection::Outgoing).is_none());
        }
    }

    #[test]
    fn test_shortest_path_unknown_vertex() {
        let g = make_chain(3);
        for engine in both_engines() {
            assert!(find_path(&g, engine, 0, 99, TraversalDirection::Outgoing).is_none());
            assert!(find_path(&g, engine, 99, 0, TraversalDirection::Outgoing).is_none());
        }
    }

    #[test]
    fn test_shortest_path_empty_graph() {
        let g = Graph::new();
        for engine in both_engines() {
            assert!(find_path(&g, engine, 0, 0, TraversalDirection::Outgoing).is_none());
        }
    }

    #[test]
    fn test_shortcut_preferred() {
        // 0->1->2->3 plus 0->3
        let g = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3), (0, 3)]);
        for engine in both_engines() {
            let path = find_path(&g, engine, 0, 3, TraversalDirection::Outgoing).unwrap();
            assert_eq!(path.vertices, vec![0, 3]);
        }
    }

    #[test]
    fn test_shortest_path_cycle() {
        let g = make_cycle(6);
        for engine in both_engines() {
            let path = find_path(&g, engine, 4, 1, TraversalDirection::Outgoing).unwrap();
            assert_eq!(path.vertices, vec![4, 5, 0, 1]);
        }
    }

    #[test]
    fn test_self_loop_and_parallel_edges() {
        let g = graph_from_edges(3, &[(0, 0), (0, 1), (0, 1), (1, 2), (1, 2)]);
        for engine in both_engines() {
            let path = find_path(&g, engine, 0, 2, TraversalDirection::Outgoing).unwrap();
            assert_eq!(path.vertices, vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_deterministic_tie_break() {
        // Two equal routes: 0->1->3 and 0->2->3
        let g = graph_from_edges(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        for engine in both_engines() {
            let first = find_path(&g, engine, 0, 3, TraversalDirection::Outgoing).unwrap();
            let second = find_path(&g, engine, 0, 3, TraversalDirection::Outgoing).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.hops, 2);
        }
    }

    #[test]
    fn test_engines_agree_on_random_graphs() {
        for seed in [1u64, 7, 42, 1234] {
            let g = make_random(60, 150, seed);
            for start in 0..g.node_count() {
                let expected = all_distances(&g, start);
                for target in 0..g.node_count() {
                    let bfs = shortest_path(&g, start, target, TraversalDirection::Outgoing);
                    let dij = dijkstra(&g, start, target, TraversalDirection::Outgoing);
                    assert_eq!(bfs.as_ref().map(|p| p.hops), expected[target]);
                    assert_eq!(dij.as_ref().map(|p| p.hops), expected[target]);
                    for path in bfs.iter().chain(dij.iter()) {
                        assert_eq!(path.vertices.first(), Some(&start));
                        assert_eq!(path.vertices.last(), Some(&target));
                        assert_eq!(path.vertices.len() as u64, path.hops + 1);
                        assert_valid_walk(&g, path);
                    }
                }
            }
        }
    }

    #[test]
    fn test_relax_cost_overflow_is_infinite() {
        assert_eq!(relax_cost(3, UNIT_COST), Some(4));
        assert_eq!(relax_cost(u64::MAX - 1, UNIT_COST), None);
        assert_eq!(relax_cost(u64::MAX, UNIT_COST), None);
    }

    #[test]
    fn test_intermediates_from_users() {
        let users = vec![
            UserRecord::new("a", "2020").with_subscriber("b"),
            UserRecord::new("b", "2021").with_subscriber("c"),
            UserRecord::new("c", "2022"),
        ];
        let (g, _) = Graph::from_users(&users);
        let a = g.lookup("a").unwrap();
        let c = g.lookup("c").unwrap();
        let path = shortest_path(&g, a, c, TraversalDirection::Outgoing).unwrap();
        let emails: Vec<_> = path
            .intermediates()
            .iter()
            .map(|&id| g.vertex(id).unwrap().email.as_str())
            .collect();
        assert_eq!(emails, vec!["b"]);
    }

    #[test]
    fn test_long_chain_no_recursion() {
        let g = make_chain(100_000);
        let path = dijkstra(&g, 0, 99_999, TraversalDirection::Outgoing).unwrap();
        assert_eq!(path.hops, 99_999);
        assert_eq!(path.intermediates().len(), 99_998);
    }
}
