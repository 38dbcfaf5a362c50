use std::time::Instant;

use subpath_core::{find_path, Engine, Graph, TraversalDirection, UserRecord};

const QUERY_COUNT: u64 = 200;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let user_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: subpath-bench [mode] [user_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  chain       One long subscription chain (deepest paths)");
        println!("  tree        Fan-out tree, every user has 3 subscribers");
        println!("  scalefree   Preferential attachment (celebrity hubs)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random subscriptions");
        println!();
        println!("Default user_count: 200000");
        return;
    }

    if user_count < 2 {
        eprintln!("user_count must be at least 2");
        return;
    }

    println!("subpath-bench");
    println!("=============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Vec<UserRecord>)> = match mode {
        "chain" => vec![("Chain", gen_chain)],
        "tree" => vec![("Fan-out tree", gen_tree)],
        "scalefree" => vec![("Scale-free", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "all" => vec![
            ("Chain", gen_chain as fn(u64) -> Vec<UserRecord>),
            ("Fan-out tree", gen_tree),
            ("Scale-free", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, user_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Vec<UserRecord>, user_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} users", user_count);

    let t = Instant::now();
    let users = generator(user_count);
    let gen_time = t.elapsed();

    let t = Instant::now();
    let (graph, stats) = Graph::from_users(&users);
    let build_time = t.elapsed();
    println!(
        "Generated in {:.2}s, built in {:.2}s: {} users, {} edges ({} dropped), ~{:.0}MB",
        gen_time.as_secs_f64(),
        build_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        stats.dangling_subscribers,
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let mut rng = FastRng::new(2024);
    let n = graph.node_count() as u64;
    let pairs: Vec<(usize, usize)> = (0..QUERY_COUNT)
        .map(|i| {
            if i == 0 {
                (0, (n - 1) as usize)
            } else {
                (rng.next(n) as usize, rng.next(n) as usize)
            }
        })
        .collect();

    println!();
    println!(
        "{:>10} {:>8} {:>10} {:>10} {:>10}",
        "engine", "found", "avg hops", "max hops", "time"
    );
    println!("{:->10} {:->8} {:->10} {:->10} {:->10}", "", "", "", "", "");

    for (label, engine) in [("bfs", Engine::Bfs), ("dijkstra", Engine::Dijkstra)] {
        let t = Instant::now();
        let mut found = 0u64;
        let mut total_hops = 0u64;
        let mut max_hops = 0u64;
        for &(from, to) in &pairs {
            if let Some(path) = find_path(&graph, engine, from, to, TraversalDirection::Outgoing) {
                found += 1;
                total_hops += path.hops;
                max_hops = max_hops.max(path.hops);
            }
        }
        let elapsed = t.elapsed();
        let avg = if found > 0 {
            total_hops as f64 / found as f64
        } else {
            0.0
        };
        println!(
            "{:>10} {:>8} {:>10.2} {:>10} {:>8.1}ms",
            label,
            found,
            avg,
            max_hops,
            elapsed.as_secs_f64() * 1000.0
        );
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, O(users + subscriptions)
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn email(i: u64) -> String {
    format!("user{}@bench.local", i)
}

/// Turn per-user subscriber index lists into user records.
fn to_users(subscribers: Vec<Vec<u64>>) -> Vec<UserRecord> {
    subscribers
        .into_iter()
        .enumerate()
        .map(|(i, subs)| {
            let created = format!("2020-01-01T00:00:{:02}Z", i % 60);
            subs.into_iter()
                .fold(UserRecord::new(email(i as u64), created), |user, s| {
                    user.with_subscriber(email(s))
                })
        })
        .collect()
}

/// A single chain user0 -> user1 -> ... -> userN.
fn gen_chain(user_count: u64) -> Vec<UserRecord> {
    let subs: Vec<Vec<u64>> = (0..user_count)
        .map(|i| if i + 1 < user_count { vec![i + 1] } else { Vec::new() })
        .collect();
    to_users(subs)
}

/// Fan-out tree: each user has 3 subscribers, breadth-first numbering.
fn gen_tree(user_count: u64) -> Vec<UserRecord> {
    let branching = 3u64;
    let subs: Vec<Vec<u64>> = (0..user_count)
        .map(|i| {
            (1..=branching)
                .map(|k| i * branching + k)
                .filter(|&c| c < user_count)
                .collect()
        })
        .collect();
    to_users(subs)
}

/// Scale-free via edge-list sampling.
///
/// Each new user subscribes to existing users picked from the edge endpoint
/// list, so popular users keep gaining subscribers.
fn gen_scale_free(user_count: u64) -> Vec<UserRecord> {
    let edges_per_user = 5u64;
    let mut rng = FastRng::new(12345);
    let mut subs: Vec<Vec<u64>> = vec![Vec::new(); user_count as usize];
    let mut endpoints: Vec<u64> = Vec::with_capacity((user_count * edges_per_user * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(user_count);
    for i in 0..seed {
        for j in 0..seed {
            if i != j {
                subs[i as usize].push(j);
                endpoints.push(i);
                endpoints.push(j);
            }
        }
    }

    for new_user in seed..user_count {
        for _ in 0..edges_per_user.min(new_user) {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_user {
                // The celebrity gains the new user as a subscriber, and the
                // new user follows back half the time.
                subs[target as usize].push(new_user);
                if rng.next(2) == 0 {
                    subs[new_user as usize].push(target);
                }
                endpoints.push(new_user);
                endpoints.push(target);
            }
        }
    }

    to_users(subs)
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
fn gen_small_world(user_count: u64) -> Vec<UserRecord> {
    let k = 5u64;
    let p = 0.05f64;
    let mut rng = FastRng::new(67890);
    let mut subs: Vec<Vec<u64>> = vec![Vec::new(); user_count as usize];

    for i in 0..user_count {
        for j in 1..=k {
            let neighbor = (i + j) % user_count;
            let target = if rng.next_f64() < p {
                let rewired = rng.next(user_count);
                if rewired != i { rewired } else { neighbor }
            } else {
                neighbor
            };
            subs[i as usize].push(target);
        }
    }

    to_users(subs)
}

/// Erdos-Renyi: uniform random subscriptions, ~5 per user.
fn gen_random(user_count: u64) -> Vec<UserRecord> {
    let mut rng = FastRng::new(54321);
    let mut subs: Vec<Vec<u64>> = vec![Vec::new(); user_count as usize];

    for _ in 0..user_count * 5 {
        let from = rng.next(user_count);
        let to = rng.next(user_count);
        if from != to {
            subs[from as usize].push(to);
        }
    }

    to_users(subs)
}
