//! Node centrality scores (unweighted).

use std::collections::VecDeque;

use petgraph::graph::UnGraph;

use crate::adjacency;

/// Supported centrality measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CentralityMeasure {
    Eigenvector,
    Betweenness,
    Closeness,
}

impl CentralityMeasure {
    /// Score every node with this measure.
    pub fn compute<N>(self, graph: &UnGraph<N, f64>) -> Vec<f64> {
        match self {
            CentralityMeasure::Eigenvector => eigenvector(graph),
            CentralityMeasure::Betweenness => betweenness(graph),
            CentralityMeasure::Closeness => closeness(graph),
        }
    }
}

const EIGEN_MAX_ITERATIONS: usize = 1000;
const EIGEN_TOLERANCE: f64 = 1e-10;

/// Eigenvector centrality scaled so the largest score is 1.
///
/// Power iteration on `A + I`: same eigenvectors as `A`, but the dominant
/// eigenvalue is strictly largest in magnitude, so bipartite graphs converge.
/// A graph without edges scores every node 1.
pub fn eigenvector<N>(graph: &UnGraph<N, f64>) -> Vec<f64> {
    let n = graph.node_count();
    let adj = adjacency(graph);
    if adj.iter().all(|row| row.is_empty()) {
        return vec![1.0; n];
    }

    let mut scores: Vec<f64> = adj.iter().map(|row| row.len() as f64 + 1.0).collect();
    for _ in 0..EIGEN_MAX_ITERATIONS {
        let mut next = scores.clone();
        for (i, row) in adj.iter().enumerate() {
            for &(j, _) in row {
                next[i] += scores[j];
            }
        }

        let max = next.iter().copied().fold(0.0, f64::max);
        if max > 0.0 {
            next.iter_mut().for_each(|v| *v /= max);
        }

        let delta = next
            .iter()
            .zip(&scores)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        scores = next;
        if delta < EIGEN_TOLERANCE {
            break;
        }
    }
    scores
}

/// Single-source BFS: distances, shortest-path counts, predecessors, visit order.
fn bfs(adj: &[Vec<(usize, f64)>], source: usize) -> (Vec<i64>, Vec<f64>, Vec<Vec<usize>>, Vec<usize>) {
    let n = adj.len();
    let mut dist = vec![-1i64; n];
    let mut sigma = vec![0.0; n];
    let mut preds = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);
    let mut queue = VecDeque::new();

    dist[source] = 0;
    sigma[source] = 1.0;
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        for &(w, _) in &adj[v] {
            if w == v {
                continue;
            }
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                preds[w].push(v);
            }
        }
    }

    (dist, sigma, preds, order)
}

/// Betweenness centrality (Brandes), counting each unordered pair once.
pub fn betweenness<N>(graph: &UnGraph<N, f64>) -> Vec<f64> {
    let adj = adjacency(graph);
    let n = adj.len();
    let mut scores = vec![0.0; n];

    for source in 0..n {
        let (_, sigma, preds, order) = bfs(&adj, source);
        let mut delta = vec![0.0; n];
        for &w in order.iter().rev() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                scores[w] += delta[w];
            }
        }
    }

    scores.iter_mut().for_each(|s| *s /= 2.0);
    scores
}

/// Closeness centrality: reachable node count over total distance to them.
///
/// Nodes that reach nothing score 0.
pub fn closeness<N>(graph: &UnGraph<N, f64>) -> Vec<f64> {
    let adj = adjacency(graph);
    (0..adj.len())
        .map(|source| {
            let (dist, ..) = bfs(&adj, source);
            let (reached, total) = dist
                .iter()
                .filter(|&&d| d > 0)
                .fold((0usize, 0i64), |(count, sum), &d| (count + 1, sum + d));
            if total == 0 {
                0.0
            } else {
                reached as f64 / total as f64
            }
        })
        .collect()
}
