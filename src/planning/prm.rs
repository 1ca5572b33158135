// MIT License
//
// Copyright (c) 2024 Erik Holum
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Probabilistic roadmap construction and queries.
//!
//! A [Prm] samples collision free milestones in a rectangular region and
//! connects every pair whose distance lies within the edge length bounds and
//! whose connecting segment is free. Searches connect the literal start and
//! goal to the roadmap in a temporary overlay, so the roadmap itself is never
//! modified by a query.
//!
//! Edge construction compares every new milestone against every existing one.
//! This is fine for hundreds to a few thousand milestones but does not scale
//! much further without a spatial index.
use crate::error::{PlanningError, Result};
use crate::graph::{Edge, Graph};
use crate::math::{Distance, Vec2};
use crate::planning::search::{self, SearchStrategy};
use crate::space::ConfigurationSpace;
use crate::view::DrawOptions;
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Sampling gives up after this many rejected samples per requested milestone.
pub const DEFAULT_MAX_ATTEMPTS_PER_MILESTONE: usize = 1000;

/// A collision free configuration in the roadmap.
///
/// Milestones synthesized for a query's start and goal use the ids just past
/// the roadmap's own milestones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milestone {
    pub id: usize,
    pub position: Vec2,
}

/// Result of a roadmap search.
///
/// Empty when no path exists, so check [`Path::is_empty`] before indexing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    milestones: Vec<Milestone>,

    // Weight of the edge between milestone i and i + 1
    weights: Vec<f64>,
}

impl Path {
    #[must_use]
    pub fn empty() -> Self {
        Path::default()
    }

    fn from_milestones(milestones: Vec<Milestone>) -> Self {
        let weights = milestones
            .windows(2)
            .map(|w| w[0].position.distance(&w[1].position))
            .collect();
        Path {
            milestones,
            weights,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    /// Number of milestones along the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    /// Number of edges along the path.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Total weight of the traversed edges.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.weights.iter().sum()
    }

    #[must_use]
    pub fn positions(&self) -> Vec<Vec2> {
        self.milestones.iter().map(|m| m.position).collect()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Milestone> {
        self.milestones.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Milestone> {
        self.milestones.last()
    }
}

/// Roadmap growth parameters.
///
/// The defaults are those of the two-arm demo: 2000 milestones in a 200 by 200
/// square centered on the origin, connected when 8 to 12 units apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrmConfig {
    pub num_milestones: usize,
    pub min_corner: Vec2,
    pub max_corner: Vec2,
    pub min_edge_len: f64,
    pub max_edge_len: f64,
}

impl Default for PrmConfig {
    fn default() -> Self {
        PrmConfig {
            num_milestones: 2000,
            min_corner: Vec2::new(-100.0, -100.0),
            max_corner: Vec2::new(100.0, 100.0),
            min_edge_len: 8.0,
            max_edge_len: 12.0,
        }
    }
}

impl PrmConfig {
    /// Checks the parameters before any sampling happens.
    ///
    /// # Errors
    ///
    /// If no milestones are requested.
    /// If the corners do not span a non-empty rectangle.
    /// If the edge length range is empty, negative, or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.num_milestones == 0 {
            return Err(PlanningError::NoMilestones);
        }
        validate_bounds(self.min_corner, self.max_corner)?;
        validate_edge_lengths(self.min_edge_len, self.max_edge_len)
    }
}

fn validate_bounds(min: Vec2, max: Vec2) -> Result<()> {
    let valid = min.is_finite()
        && max.is_finite()
        && min
            .coords()
            .iter()
            .zip(max.coords())
            .all(|(lo, hi)| lo < hi && (hi - lo).is_finite());
    if valid {
        Ok(())
    } else {
        Err(PlanningError::InvalidBounds { min, max })
    }
}

fn validate_edge_lengths(min: f64, max: f64) -> Result<()> {
    if min.is_finite() && max.is_finite() && min >= 0.0 && min <= max {
        Ok(())
    } else {
        Err(PlanningError::InvalidEdgeLengths { min, max })
    }
}

/// Plain data describing the roadmap, for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadmapSnapshot {
    pub milestones: Vec<Vec2>,
    pub edges: Vec<(Vec2, Vec2)>,
}

/// Probabilistic roadmap.
///
/// Sampling draws from the owned random number generator, seed it to reproduce
/// a roadmap.
#[derive(Debug)]
pub struct Prm<R = StdRng> {
    roadmap: Graph<Vec2>,
    rng: R,
    max_attempts_per_milestone: usize,
}

impl Prm<StdRng> {
    /// Construct an empty roadmap sampling from an entropy seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Construct an empty roadmap with a reproducible generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Prm<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Prm<R> {
    /// Construct an empty roadmap sampling from the provided generator.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Prm {
            roadmap: Graph::new(),
            rng,
            max_attempts_per_milestone: DEFAULT_MAX_ATTEMPTS_PER_MILESTONE,
        }
    }

    /// Bound the sampling effort of [`Prm::grow`], at least one attempt per milestone.
    #[must_use]
    pub fn with_max_attempts_per_milestone(mut self, attempts: usize) -> Self {
        self.max_attempts_per_milestone = attempts.max(1);
        self
    }

    #[must_use]
    pub fn roadmap(&self) -> &Graph<Vec2> {
        &self.roadmap
    }

    #[must_use]
    pub fn milestone_count(&self) -> usize {
        self.roadmap.size()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.roadmap.edge_count()
    }

    #[must_use]
    pub fn milestone(&self, id: usize) -> Option<Milestone> {
        self.roadmap
            .value(id)
            .map(|&position| Milestone { id, position })
    }

    /// All milestones in the order they were sampled.
    pub fn milestones(&self) -> impl Iterator<Item = Milestone> + '_ {
        self.roadmap
            .values()
            .enumerate()
            .map(|(id, &position)| Milestone { id, position })
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        self.roadmap.edges()
    }

    /// Neighbors of a milestone and the weights of the connecting edges.
    pub fn neighbors(&self, id: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.roadmap.neighbors(id)
    }

    /// Plain data for rendering the roadmap, layers disabled in `options` are left empty.
    #[must_use]
    pub fn snapshot(&self, options: &DrawOptions) -> RoadmapSnapshot {
        let milestones = if options.milestones {
            self.roadmap.values().copied().collect()
        } else {
            Vec::new()
        };
        let edges = if options.edges {
            self.roadmap
                .edges()
                .iter()
                .filter_map(|e| Some((*self.roadmap.value(e.a)?, *self.roadmap.value(e.b)?)))
                .collect()
        } else {
            Vec::new()
        };
        RoadmapSnapshot { milestones, edges }
    }

    /// Searches the roadmap with the specified strategy.
    ///
    /// The start and goal are connected to every milestone within the edge
    /// length bounds whose connecting segment is valid, and to each other.
    /// Returns an empty path if either is invalid, the bounds are invalid, or
    /// the goal cannot be reached.
    pub fn search<S>(
        &self,
        strategy: SearchStrategy,
        start: Vec2,
        goal: Vec2,
        min_edge_len: f64,
        max_edge_len: f64,
        space: &S,
    ) -> Path
    where
        S: ConfigurationSpace + ?Sized,
    {
        if let Err(e) = validate_edge_lengths(min_edge_len, max_edge_len) {
            warn!("{strategy} search rejected: {e}");
            return Path::empty();
        }
        if !space.is_valid(&start) || !space.is_valid(&goal) {
            warn!("{strategy} search from {start} to {goal} rejected: endpoint in collision");
            return Path::empty();
        }

        if start.distance(&goal) <= f64::EPSILON {
            return Path::from_milestones(vec![Milestone {
                id: self.roadmap.size(),
                position: start,
            }]);
        }

        let overlay = Overlay::new(
            &self.roadmap,
            start,
            goal,
            min_edge_len,
            max_edge_len,
            space,
        );

        let result = search::search(
            strategy,
            overlay.start_id(),
            overlay.goal_id(),
            |node| overlay.neighbors(node),
            |node| overlay.position(node).distance(&goal),
        );

        match result {
            Some(ids) => {
                let milestones = ids.into_iter().map(|id| overlay.milestone(id)).collect();
                let path = Path::from_milestones(milestones);
                debug!(
                    "{strategy} found {} milestones with cost {:.3}",
                    path.len(),
                    path.cost()
                );
                path
            }
            None => {
                warn!("{strategy} found no path from {start} to {goal}");
                Path::empty()
            }
        }
    }

    /// Depth first search, the first path found in milestone insertion order.
    pub fn dfs<S>(
        &self,
        start: Vec2,
        goal: Vec2,
        min_edge_len: f64,
        max_edge_len: f64,
        space: &S,
    ) -> Path
    where
        S: ConfigurationSpace + ?Sized,
    {
        self.search(SearchStrategy::DepthFirst, start, goal, min_edge_len, max_edge_len, space)
    }

    /// Breadth first search, a path with the fewest edges.
    pub fn bfs<S>(
        &self,
        start: Vec2,
        goal: Vec2,
        min_edge_len: f64,
        max_edge_len: f64,
        space: &S,
    ) -> Path
    where
        S: ConfigurationSpace + ?Sized,
    {
        self.search(SearchStrategy::BreadthFirst, start, goal, min_edge_len, max_edge_len, space)
    }

    /// Uniform cost search, a minimum cost path.
    pub fn ucs<S>(
        &self,
        start: Vec2,
        goal: Vec2,
        min_edge_len: f64,
        max_edge_len: f64,
        space: &S,
    ) -> Path
    where
        S: ConfigurationSpace + ?Sized,
    {
        self.search(SearchStrategy::UniformCost, start, goal, min_edge_len, max_edge_len, space)
    }

    /// A* with the straight line distance to the goal as heuristic, a minimum cost path.
    pub fn a_star<S>(
        &self,
        start: Vec2,
        goal: Vec2,
        min_edge_len: f64,
        max_edge_len: f64,
        space: &S,
    ) -> Path
    where
        S: ConfigurationSpace + ?Sized,
    {
        self.search(SearchStrategy::AStar, start, goal, min_edge_len, max_edge_len, space)
    }

    /// A* with the heuristic scaled by `weight`.
    ///
    /// With a weight above 1 the path is no longer guaranteed to have minimum cost.
    #[allow(clippy::too_many_arguments)]
    pub fn weighted_a_star<S>(
        &self,
        start: Vec2,
        goal: Vec2,
        min_edge_len: f64,
        max_edge_len: f64,
        space: &S,
        weight: f64,
    ) -> Path
    where
        S: ConfigurationSpace + ?Sized,
    {
        self.search(
            SearchStrategy::WeightedAStar(weight),
            start,
            goal,
            min_edge_len,
            max_edge_len,
            space,
        )
    }
}

impl<R: Rng> Prm<R> {
    /// Grows the roadmap by `num_milestones` milestones and connects them.
    ///
    /// Samples are drawn uniformly from `[min_corner, max_corner)` and kept when
    /// `space` reports them valid. Each new milestone is then connected to every
    /// milestone, old or new, whose distance lies in `[min_edge_len, max_edge_len]`
    /// and whose connecting segment is valid.
    ///
    /// Returns the total number of edges in the roadmap.
    ///
    /// # Errors
    ///
    /// If no milestones are requested, the corners are degenerate, or the edge
    /// length range is invalid. The roadmap is left untouched.
    /// If sampling exceeds its attempt budget before enough valid samples are
    /// found. The milestones accepted so far are kept and connected.
    pub fn grow<S>(
        &mut self,
        num_milestones: usize,
        min_corner: Vec2,
        max_corner: Vec2,
        min_edge_len: f64,
        max_edge_len: f64,
        space: &S,
    ) -> Result<usize>
    where
        S: ConfigurationSpace + ?Sized,
    {
        let config = PrmConfig {
            num_milestones,
            min_corner,
            max_corner,
            min_edge_len,
            max_edge_len,
        };
        self.grow_with(&config, space)
    }

    /// Grows the roadmap with the parameters in `config`, see [`Prm::grow`].
    ///
    /// # Errors
    ///
    /// See [`Prm::grow`].
    pub fn grow_with<S>(&mut self, config: &PrmConfig, space: &S) -> Result<usize>
    where
        S: ConfigurationSpace + ?Sized,
    {
        if let Err(e) = config.validate() {
            warn!("Roadmap growth rejected: {e}");
            return Err(e);
        }

        let first_new = self.roadmap.size();
        let sampled = self.sample_milestones(config, space);
        self.connect_from(first_new, config.min_edge_len, config.max_edge_len, space)?;

        info!(
            "# milestones : {} # edges : {}",
            self.roadmap.size(),
            self.roadmap.edge_count()
        );
        sampled.map(|()| self.roadmap.edge_count())
    }

    // Adds valid samples until enough are accepted or the attempt budget runs out
    fn sample_milestones<S>(&mut self, config: &PrmConfig, space: &S) -> Result<()>
    where
        S: ConfigurationSpace + ?Sized,
    {
        let (min, max) = (config.min_corner, config.max_corner);
        let budget = config
            .num_milestones
            .saturating_mul(self.max_attempts_per_milestone);
        let mut accepted = 0;
        let mut attempts = 0;

        while accepted < config.num_milestones {
            if attempts >= budget {
                let e = PlanningError::SamplingExhausted {
                    requested: config.num_milestones,
                    accepted,
                    attempts,
                };
                warn!("{e}");
                return Err(e);
            }
            attempts += 1;

            let sample = Vec2::new(
                self.rng.gen_range(min.x()..max.x()),
                self.rng.gen_range(min.y()..max.y()),
            );
            if space.is_valid(&sample) {
                self.roadmap.add_node(sample);
                accepted += 1;
            } else {
                trace!("Rejected sample {sample}");
            }
        }

        debug!("Accepted {accepted} milestones in {attempts} attempts");
        Ok(())
    }
}

impl<R> Prm<R> {
    // Connects every milestone from `first_new` onwards to all milestones before it
    fn connect_from<S>(
        &mut self,
        first_new: usize,
        min_edge_len: f64,
        max_edge_len: f64,
        space: &S,
    ) -> Result<()>
    where
        S: ConfigurationSpace + ?Sized,
    {
        for j in first_new..self.roadmap.size() {
            for i in 0..j {
                let (Some(&a), Some(&b)) = (self.roadmap.value(i), self.roadmap.value(j)) else {
                    continue;
                };
                let distance = a.distance(&b);
                if (min_edge_len..=max_edge_len).contains(&distance)
                    && space.is_segment_valid(&a, &b)
                {
                    self.roadmap.add_edge(i, j)?;
                }
            }
        }
        Ok(())
    }
}

/// The roadmap plus a query's start and goal, without modifying the roadmap.
struct Overlay<'a> {
    roadmap: &'a Graph<Vec2>,
    start: Vec2,
    goal: Vec2,

    // Edges touching the start or goal, for both of their ends, in insertion order.
    extra: HashMap<usize, Vec<(usize, f64)>>,
}

impl<'a> Overlay<'a> {
    fn new<S>(
        roadmap: &'a Graph<Vec2>,
        start: Vec2,
        goal: Vec2,
        min_edge_len: f64,
        max_edge_len: f64,
        space: &S,
    ) -> Self
    where
        S: ConfigurationSpace + ?Sized,
    {
        let mut overlay = Overlay {
            roadmap,
            start,
            goal,
            extra: HashMap::new(),
        };
        let (start_id, goal_id) = (overlay.start_id(), overlay.goal_id());

        for (id, point) in [(goal_id, goal), (start_id, start)] {
            for (i, distance) in roadmap.nodes_within(&point, min_edge_len, max_edge_len) {
                let clear = roadmap
                    .value(i)
                    .is_some_and(|milestone| space.is_segment_valid(&point, milestone));
                if clear {
                    overlay.link(id, i, distance);
                }
            }
        }

        let distance = start.distance(&goal);
        if (min_edge_len..=max_edge_len).contains(&distance)
            && space.is_segment_valid(&start, &goal)
        {
            overlay.link(start_id, goal_id, distance);
        }

        debug!(
            "Connected start to {} and goal to {} milestones",
            overlay.extra.get(&start_id).map_or(0, Vec::len),
            overlay.extra.get(&goal_id).map_or(0, Vec::len)
        );
        overlay
    }

    fn start_id(&self) -> usize {
        self.roadmap.size()
    }

    fn goal_id(&self) -> usize {
        self.roadmap.size() + 1
    }

    fn link(&mut self, a: usize, b: usize, weight: f64) {
        self.extra.entry(a).or_default().push((b, weight));
        self.extra.entry(b).or_default().push((a, weight));
    }

    fn position(&self, node: usize) -> Vec2 {
        if node == self.start_id() {
            self.start
        } else if node == self.goal_id() {
            self.goal
        } else {
            self.roadmap.value(node).copied().unwrap_or(self.start)
        }
    }

    fn milestone(&self, id: usize) -> Milestone {
        Milestone {
            id,
            position: self.position(id),
        }
    }

    // Roadmap edges first, then those added for this query
    fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.roadmap
            .neighbors(node)
            .chain(self.extra.get(&node).into_iter().flatten().copied())
    }
}

//
// Unit tests
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{Obstacle, PositionConfigurationSpace};

    fn free_space() -> PositionConfigurationSpace {
        PositionConfigurationSpace::new(vec![])
    }

    #[test]
    fn test_grow_rejects_bad_input() {
        let cs = free_space();
        let mut prm = Prm::seeded(1);
        let (min, max) = (Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));

        assert_eq!(
            prm.grow(0, min, max, 1.0, 2.0, &cs),
            Err(PlanningError::NoMilestones)
        );
        assert_eq!(
            prm.grow(10, max, min, 1.0, 2.0, &cs),
            Err(PlanningError::InvalidBounds { min: max, max: min })
        );
        assert!(matches!(
            prm.grow(10, Vec2::new(0.0, -10.0), Vec2::new(0.0, 10.0), 1.0, 2.0, &cs),
            Err(PlanningError::InvalidBounds { .. })
        ));

        // Finite corners whose span overflows
        let (huge_min, huge_max) = (Vec2::new(-1e308, -1e308), Vec2::new(1e308, 1e308));
        assert_eq!(
            prm.grow(3, huge_min, huge_max, 0.0, 1.0, &cs),
            Err(PlanningError::InvalidBounds {
                min: huge_min,
                max: huge_max
            })
        );
        assert_eq!(
            prm.grow(10, min, max, 3.0, 2.0, &cs),
            Err(PlanningError::InvalidEdgeLengths { min: 3.0, max: 2.0 })
        );
        assert!(matches!(
            prm.grow(10, min, max, -1.0, 2.0, &cs),
            Err(PlanningError::InvalidEdgeLengths { .. })
        ));

        // Nothing was added
        assert_eq!(prm.milestone_count(), 0);
        assert_eq!(prm.edge_count(), 0);
    }

    #[test]
    fn test_grow_stops_when_sampling_stalls() {
        let blocked = |_: &Vec2| false;
        let mut prm = Prm::seeded(1).with_max_attempts_per_milestone(10);
        let result = prm.grow(
            5,
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            0.0,
            1.0,
            &blocked,
        );
        assert_eq!(
            result,
            Err(PlanningError::SamplingExhausted {
                requested: 5,
                accepted: 0,
                attempts: 50
            })
        );
        assert_eq!(prm.milestone_count(), 0);
    }

    #[test]
    fn test_grow_respects_space_and_edge_bounds() {
        let cs = PositionConfigurationSpace::new(vec![Obstacle::circle(Vec2::zeros(), 10.0)]);
        let mut prm = Prm::seeded(42);
        let edges = prm
            .grow(
                300,
                Vec2::new(-30.0, -30.0),
                Vec2::new(30.0, 30.0),
                3.0,
                8.0,
                &cs,
            )
            .unwrap();

        assert_eq!(prm.milestone_count(), 300);
        assert_eq!(prm.edge_count(), edges);
        assert!(edges > 0);

        for m in prm.milestones() {
            assert!(cs.is_valid(&m.position));
            assert!(m.position.x() >= -30.0 && m.position.x() < 30.0);
            assert!(m.position.y() >= -30.0 && m.position.y() < 30.0);
        }
        for e in prm.edges() {
            let a = prm.milestone(e.a).unwrap().position;
            let b = prm.milestone(e.b).unwrap().position;
            assert!((3.0..=8.0).contains(&e.weight));
            assert_eq!(e.weight, a.distance(&b));
            assert!(cs.is_segment_valid(&a, &b));
        }
    }

    #[test]
    fn test_repeated_growth_accumulates() {
        let cs = free_space();
        let mut prm = Prm::seeded(3);
        let (min, max) = (Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0));

        let first = prm.grow(50, min, max, 1.0, 4.0, &cs).unwrap();
        let second = prm.grow(50, min, max, 1.0, 4.0, &cs).unwrap();
        assert_eq!(prm.milestone_count(), 100);
        assert!(second >= first);
        assert_eq!(second, prm.edge_count());

        // New milestones are connected to old ones as well
        let crossing = prm.edges().iter().any(|e| e.a < 50 && e.b >= 50);
        assert!(crossing);
    }

    #[test]
    fn test_seeded_growth_is_reproducible() {
        let cs = free_space();
        let mut a = Prm::seeded(11);
        let mut b = Prm::seeded(11);
        let (min, max) = (Vec2::new(-5.0, -5.0), Vec2::new(5.0, 5.0));
        a.grow(40, min, max, 0.5, 2.0, &cs).unwrap();
        b.grow(40, min, max, 0.5, 2.0, &cs).unwrap();

        let options = DrawOptions::default();
        assert_eq!(a.snapshot(&options), b.snapshot(&options));
    }

    #[test]
    fn test_snapshot_layers() {
        let cs = free_space();
        let mut prm = Prm::seeded(5);
        prm.grow(30, Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0), 0.0, 2.0, &cs)
            .unwrap();

        let full = prm.snapshot(&DrawOptions::default());
        assert_eq!(full.milestones.len(), 30);
        assert_eq!(full.edges.len(), prm.edge_count());

        let options = DrawOptions {
            milestones: false,
            ..DrawOptions::default()
        };
        let partial = prm.snapshot(&options);
        assert!(partial.milestones.is_empty());
        assert_eq!(partial.edges.len(), prm.edge_count());

        assert_eq!(prm.snapshot(&DrawOptions::none()), RoadmapSnapshot::default());
    }

    #[test]
    fn test_search_on_empty_roadmap() {
        let cs = free_space();
        let prm = Prm::seeded(1);

        // Too far apart to connect directly
        let path = prm.a_star(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0), 8.0, 12.0, &cs);
        assert!(path.is_empty());
        assert_eq!(path.cost(), 0.0);
        assert!(path.first().is_none());

        // Close enough to connect directly
        let path = prm.bfs(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 8.0, 12.0, &cs);
        assert_eq!(path.len(), 2);
        assert_eq!(path.milestones()[0].id, 0);
        assert_eq!(path.milestones()[1].id, 1);
        assert_eq!(path.weights(), &[10.0]);
    }

    #[test]
    fn test_search_rejects_invalid_endpoints() {
        let cs = PositionConfigurationSpace::new(vec![Obstacle::circle(Vec2::zeros(), 2.0)]);
        let mut prm = Prm::seeded(9);
        prm.grow(200, Vec2::new(-20.0, -20.0), Vec2::new(20.0, 20.0), 1.0, 6.0, &cs)
            .unwrap();

        let path = prm.ucs(Vec2::new(0.0, 0.0), Vec2::new(15.0, 15.0), 1.0, 6.0, &cs);
        assert!(path.is_empty());

        let path = prm.ucs(Vec2::new(15.0, 15.0), Vec2::new(-15.0, -15.0), 6.0, 1.0, &cs);
        assert!(path.is_empty());
    }

    #[test]
    fn test_search_start_is_goal() {
        let cs = free_space();
        let prm = Prm::seeded(1);
        let p = Vec2::new(3.0, 4.0);
        let path = prm.dfs(p, p, 8.0, 12.0, &cs);
        assert_eq!(path.positions(), vec![p]);
        assert_eq!(path.edge_count(), 0);
    }

    #[test]
    fn test_search_does_not_modify_roadmap() {
        let cs = free_space();
        let mut prm = Prm::seeded(21);
        prm.grow(300, Vec2::new(0.0, 0.0), Vec2::new(30.0, 30.0), 2.0, 6.0, &cs)
            .unwrap();
        let (milestones, edges) = (prm.milestone_count(), prm.edge_count());

        let path = prm.a_star(Vec2::new(1.0, 1.0), Vec2::new(29.0, 29.0), 2.0, 6.0, &cs);
        assert!(!path.is_empty());
        assert_eq!(prm.milestone_count(), milestones);
        assert_eq!(prm.edge_count(), edges);

        // Start and goal use ids past the roadmap
        assert_eq!(path.first().unwrap().id, milestones);
        assert_eq!(path.last().unwrap().id, milestones + 1);
    }
}
