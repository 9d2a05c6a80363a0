use fxhash::FxHashSet;
use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use super::*;

/// How an enumeration answers its distance queries
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum DistanceStrategy {
    /// Precompute a [`DistanceTable`] up to `⌊max_size / 2⌋` before searching.
    /// Best for whole-graph enumerations.
    #[default]
    Table,
    /// Run a bounded BFS per query ([`LazyDistances`]).
    /// Best for a few roots in a large network.
    Lazy,
}

/// Configurable enumeration of shortest-path rings.
///
/// By default, all rings of any size through every bond are enumerated in parallel.
///
/// # Examples
/// ```
/// use ringstats::{prelude::*, algo::*};
///
/// let graph = BondGraph::from_edges(
///     6,
///     [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)],
/// ).unwrap();
///
/// let rings = RingEnumerator::new().max_size(Some(8)).enumerate(&graph).unwrap();
/// assert_eq!(rings.len(), 2);
///
/// let histogram = RingEnumerator::new().parallel(false).statistics(&graph).unwrap();
/// assert_eq!(histogram[3], 2);
///
/// let through_4 = RingEnumerator::new().find(&graph, 4).unwrap();
/// assert_eq!(through_4[0].nodes(), &[3, 4, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct RingEnumerator {
    max_size: Option<usize>,
    roots: Option<Vec<RingRoot>>,
    parallel: bool,
    strategy: DistanceStrategy,
    cancel: Option<CancelToken>,
}

impl Default for RingEnumerator {
    fn default() -> Self {
        Self {
            max_size: None,
            roots: None,
            parallel: true,
            strategy: DistanceStrategy::default(),
            cancel: None,
        }
    }
}

impl RingEnumerator {
    /// Creates an enumerator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Only rings with at most `max_size` nodes are reported (`None` for no limit)
    pub fn max_size(mut self, max_size: Option<usize>) -> Self {
        self.max_size = max_size;
        self
    }

    /// Restricts the enumeration to rings through the given nodes and bonds
    pub fn roots<I, R>(mut self, roots: I) -> Self
    where
        R: Into<RingRoot>,
        I: IntoIterator<Item = R>,
    {
        self.roots = Some(roots.into_iter().map(Into::into).collect());
        self
    }

    /// Distributes roots over the rayon thread pool if *true*
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Selects how distances are computed
    pub fn distance_strategy(mut self, strategy: DistanceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Aborts the enumeration with [`RingError::Cancelled`] once `token` is cancelled
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Largest distance any query of this enumeration needs
    fn distance_bound(&self) -> Option<Distance> {
        required_distance(self.max_size)
    }

    /// Enumerates all SP rings through the configured roots.
    ///
    /// # Errors
    /// - [`RingError::InvalidRootNode`] / [`RingError::InvalidRootEdge`] for roots outside the
    ///   graph,
    /// - [`RingError::Cancelled`] if the token was cancelled before the enumeration finished.
    pub fn enumerate(&self, graph: &BondGraph) -> Result<RingSet, RingError> {
        match self.strategy {
            DistanceStrategy::Table => {
                let table = DistanceTable::new(graph, self.distance_bound());
                self.enumerate_with(graph, &table)
            }
            DistanceStrategy::Lazy => {
                let lazy = LazyDistances::new(graph).with_cutoff(self.distance_bound());
                self.enumerate_with(graph, &lazy)
            }
        }
    }

    /// Like [`RingEnumerator::enumerate`], but reuses a caller-provided oracle.
    /// If `oracle` does not cover `⌊max_size / 2⌋` hops, a [`LazyDistances`] is used instead.
    ///
    /// # Errors
    /// See [`RingEnumerator::enumerate`].
    #[instrument(skip_all, fields(nodes = graph.number_of_nodes(), max_size = ?self.max_size))]
    pub fn enumerate_with<O>(&self, graph: &BondGraph, oracle: &O) -> Result<RingSet, RingError>
    where
        O: DistanceOracle,
    {
        if !oracle.covers(self.distance_bound()) {
            warn!(
                cutoff = ?oracle.cutoff(),
                "distance oracle does not cover the ring size; falling back to lazy distances"
            );
            let lazy = LazyDistances::new(graph).with_cutoff(self.distance_bound());
            return self.enumerate_with(graph, &lazy);
        }

        let finder = RingFinder::new(graph, oracle)
            .max_size(self.max_size)
            .cancel_token(self.cancel.as_ref());

        let edges = self.root_edges(graph, &finder)?;
        debug!(root_edges = edges.len(), parallel = self.parallel, "enumerating rings");

        let found = if self.parallel {
            edges
                .par_iter()
                .try_fold(FxHashSet::default, |mut acc, &Edge(a, b)| {
                    finder.search(a, b, &mut |ring| {
                        acc.insert(ring);
                    })?;
                    Ok(acc)
                })
                .try_reduce(FxHashSet::default, |mut a, mut b| {
                    if a.len() < b.len() {
                        std::mem::swap(&mut a, &mut b);
                    }
                    a.extend(b);
                    Ok(a)
                })?
        } else {
            let mut acc = FxHashSet::default();
            for &Edge(a, b) in &edges {
                finder.search(a, b, &mut |ring| {
                    acc.insert(ring);
                })?;
            }
            acc
        };

        let rings: RingSet = found.into_iter().collect();
        debug!(rings = rings.len(), "enumerated shortest-path rings");

        Ok(rings)
    }

    /// Counts the SP rings per size.
    ///
    /// # Errors
    /// See [`RingEnumerator::enumerate`].
    pub fn statistics(&self, graph: &BondGraph) -> Result<RingHistogram, RingError> {
        Ok(self.enumerate(graph)?.histogram())
    }

    /// Returns all SP rings through a single root, ignoring the configured roots.
    ///
    /// # Errors
    /// See [`RingEnumerator::enumerate`].
    pub fn find<R>(&self, graph: &BondGraph, root: R) -> Result<Vec<Ring>, RingError>
    where
        R: Into<RingRoot>,
    {
        let single = Self {
            roots: Some(vec![root.into()]),
            ..self.clone()
        };
        Ok(single.enumerate(graph)?.into_vec())
    }

    /// Normalised, deduplicated root edges of the configured roots
    fn root_edges<O>(
        &self,
        graph: &BondGraph,
        finder: &RingFinder<'_, O>,
    ) -> Result<Vec<Edge>, RingError>
    where
        O: DistanceOracle + ?Sized,
    {
        let Some(roots) = &self.roots else {
            return Ok(graph.edges(true).collect());
        };

        let mut edges = Vec::new();
        for root in roots {
            match *root {
                RingRoot::Node(u) => {
                    finder.validate_node(u)?;
                    edges.extend(graph.edges_of(u, false).map(|e| e.normalized()));
                }
                RingRoot::Edge(edge) => {
                    finder.validate_edge(edge)?;
                    edges.push(edge.normalized());
                }
            }
        }

        edges.sort_unstable();
        edges.dedup();
        Ok(edges)
    }
}
