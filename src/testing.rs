//! Brute-force reference implementations for tests

use itertools::Itertools;
use rand::Rng;

use crate::{
    gens::{GraphGenerator, Gnp, NumNodesGen},
    prelude::*,
    repr::ZERO_SHIFT,
};

/// Creates a random `G(n,p)` bond graph
pub(crate) fn random_bond_graph<R: Rng>(rng: &mut R, n: NumNodes, p: f64) -> BondGraph {
    let edges = Gnp::new().nodes(n).prob(p).generate(rng);
    BondGraph::from_edges(n, edges).unwrap()
}

/// Floyd-Warshall over all node pairs
pub(crate) fn all_pairs_distances(graph: &BondGraph) -> Vec<Vec<Option<Distance>>> {
    let n = graph.len();
    let mut dist = vec![vec![None; n]; n];

    for u in graph.vertices() {
        dist[u as usize][u as usize] = Some(0);
        for v in graph.neighbors_of(u) {
            dist[u as usize][v as usize] = Some(1);
        }
    }

    for k in 0..n {
        for i in 0..n {
            let Some(dik) = dist[i][k] else {
                continue;
            };
            for j in 0..n {
                if let Some(dkj) = dist[k][j] {
                    let through_k = dik + dkj;
                    if dist[i][j].is_none_or(|d| d > through_k) {
                        dist[i][j] = Some(through_k);
                    }
                }
            }
        }
    }

    dist
}

/// Enumerates every simple cycle (each once, in canonical orientation) by DFS from its smallest
/// node and keeps those without shortcut, sorted by size and node sequence.
pub(crate) fn brute_force_sp_rings(graph: &BondGraph, max_size: Option<usize>) -> Vec<Vec<Node>> {
    let dist = all_pairs_distances(graph);
    let max_size = max_size.unwrap_or(graph.len());

    let mut cycles = Vec::new();
    for start in graph.vertices() {
        let mut path = vec![start];
        extend_path(graph, &mut path, max_size, &mut cycles);
    }

    let mut rings = cycles
        .into_iter()
        .filter(|cycle| {
            let k = cycle.len();
            (0..k).tuple_combinations().all(|(i, j)| {
                let along = (j - i).min(k - (j - i)) as Distance;
                dist[cycle[i] as usize][cycle[j] as usize] == Some(along)
            })
        })
        .filter(|cycle| graph.closed_walk_shift(cycle) == Some(ZERO_SHIFT))
        .collect_vec();

    rings.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    rings
}

fn extend_path(
    graph: &BondGraph,
    path: &mut Vec<Node>,
    max_size: usize,
    cycles: &mut Vec<Vec<Node>>,
) {
    let start = path[0];
    let last = path[path.len() - 1];

    for v in graph.neighbors_of(last) {
        if v == start && path.len() >= 3 && path[1] < last {
            cycles.push(path.clone());
        }

        if v > start && !path.contains(&v) && path.len() < max_size {
            path.push(v);
            extend_path(graph, path, max_size, cycles);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brute_force_on_known_graphs() {
        let graph = BondGraph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();
        assert_eq!(brute_force_sp_rings(&graph, None), vec![vec![0, 1, 2], vec![0, 2, 3]]);

        let graph = BondGraph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap();
        assert_eq!(brute_force_sp_rings(&graph, None), vec![vec![0, 1, 2, 3, 4]]);
        assert!(brute_force_sp_rings(&graph, Some(4)).is_empty());

        let dist = all_pairs_distances(&graph);
        assert_eq!(dist[0][2], Some(2));
        assert_eq!(dist[1][4], Some(2));
    }
}
