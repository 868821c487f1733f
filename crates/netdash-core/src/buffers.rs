//! Derived per-edge buffers: endpoint coordinates and weight ranks.
//!
//! Both are built once from a static graph and are index-aligned with
//! `NetworkGraph::edges`.

use crate::{CoreError, CoreResult, NetworkGraph};

/// Endpoint coordinates for a single edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl EdgeSegment {
    /// The `(x0, x1, gap, y0, y1, gap)` row, `None` being the line break.
    pub fn sextuple(&self) -> [Option<f64>; 6] {
        [
            Some(self.x0),
            Some(self.x1),
            None,
            Some(self.y0),
            Some(self.y1),
            None,
        ]
    }
}

/// Polyline coordinates for many edges drawn as one trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
}

impl Polyline {
    /// Number of segments in the polyline.
    pub fn segment_count(&self) -> usize {
        self.x.len() / 3
    }
}

/// One [`EdgeSegment`] per edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeCoordBuffer {
    segments: Vec<EdgeSegment>,
}

impl EdgeCoordBuffer {
    /// Build from a laid-out graph in a single pass over the edges.
    pub fn from_graph(graph: &NetworkGraph) -> CoreResult<Self> {
        let by_id = graph.index_by_id();
        let positions = graph.positions()?;

        let segments = graph
            .edges
            .iter()
            .enumerate()
            .map(|(index, edge)| {
                let lookup = |id| {
                    by_id
                        .get(&id)
                        .map(|&i| positions[i])
                        .ok_or(CoreError::DanglingEdge { index, node: id })
                };
                let (x0, y0) = lookup(edge.source)?;
                let (x1, y1) = lookup(edge.target)?;
                Ok(EdgeSegment { x0, x1, y0, y1 })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self { segments })
    }

    /// All segments in edge order.
    pub fn segments(&self) -> &[EdgeSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Polyline over every edge.
    pub fn polyline(&self) -> Polyline {
        self.polyline_where(|_| true)
    }

    /// Polyline over the edges whose index passes `keep`, in buffer order.
    pub fn polyline_where(&self, mut keep: impl FnMut(usize) -> bool) -> Polyline {
        let mut line = Polyline::default();
        for (index, segment) in self.segments.iter().enumerate() {
            if !keep(index) {
                continue;
            }
            let row = segment.sextuple();
            line.x.extend_from_slice(&row[..3]);
            line.y.extend_from_slice(&row[3..]);
        }
        line
    }
}

/// Rank-percentile of each edge weight, in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeRanks {
    values: Vec<f64>,
}

impl EdgeRanks {
    /// Rank-transform weights (ties share their average rank) and divide by
    /// the largest rank.
    pub fn from_weights(weights: &[f64]) -> Self {
        if weights.is_empty() {
            return Self::default();
        }

        let mut order: Vec<usize> = (0..weights.len()).collect();
        order.sort_by(|&a, &b| weights[a].total_cmp(&weights[b]));

        let mut ranks = vec![0.0; weights.len()];
        let mut start = 0;
        while start < order.len() {
            let mut end = start + 1;
            while end < order.len() && weights[order[end]] == weights[order[start]] {
                end += 1;
            }
            // 1-based ranks start+1..=end share their mean.
            let average = (start + 1 + end) as f64 / 2.0;
            for &idx in &order[start..end] {
                ranks[idx] = average;
            }
            start = end;
        }

        let max = ranks.iter().copied().fold(f64::MIN, f64::max);
        Self {
            values: ranks.into_iter().map(|r| r / max).collect(),
        }
    }

    /// Use precomputed percentiles as-is.
    pub fn from_percentiles(values: Vec<f64>) -> CoreResult<Self> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(CoreError::InvalidRank { index, value });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether edge `index` survives `threshold` (strictly greater).
    pub fn keeps(&self, index: usize, threshold: f64) -> bool {
        self.values.get(index).is_some_and(|&rank| rank > threshold)
    }

    /// Indices of edges that survive `threshold`, ascending.
    pub fn kept(&self, threshold: f64) -> Vec<usize> {
        (0..self.values.len())
            .filter(|&i| self.keeps(i, threshold))
            .collect()
    }
}
