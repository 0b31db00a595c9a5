// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable search state: the three-valued labelling of the cube.

pub mod statistics;

pub use statistics::{Pruner, PrunerCounters};

use crate::geometry::{Vertex, VertexSet};
use crate::trail::{Trail, TrailRestore};

/// Status of one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Status {
    #[default]
    Undecided = 0,
    Feasible = 1,
    Infeasible = 2,
}

impl Status {
    fn from_trail(value: u64) -> Self {
        match value {
            0 => Status::Undecided,
            1 => Status::Feasible,
            2 => Status::Infeasible,
            _ => panic!("corrupt trail entry: status {}", value),
        }
    }

    pub fn is_decided(self) -> bool {
        self != Status::Undecided
    }
}

/// A labelling of every vertex of the n-cube as Feasible, Infeasible or
/// Undecided.
///
/// Within one branch of the search a status only ever moves away from
/// Undecided; [`PartialObject::set`] records each move on the trail so that
/// backtracking can undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialObject {
    dimension: usize,
    statuses: Vec<Status>,
    undecided: usize,
}

impl PartialObject {
    /// Everything Undecided.
    pub fn new(dimension: usize) -> Self {
        let count = 1 << dimension;
        Self {
            dimension,
            statuses: vec![Status::Undecided; count],
            undecided: count,
        }
    }

    /// Fully decided object whose Feasible vertices are `feasible`.
    pub fn from_feasible(feasible: &VertexSet) -> Self {
        let mut object = Self::new(feasible.dimension());
        for status in object.statuses.iter_mut() {
            *status = Status::Infeasible;
        }
        for v in feasible.iter() {
            object.statuses[v.index()] = Status::Feasible;
        }
        object.undecided = 0;
        object
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn vertex_count(&self) -> usize {
        self.statuses.len()
    }

    pub fn status(&self, v: Vertex) -> Status {
        self.statuses[v.index()]
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    pub fn is_feasible(&self, v: Vertex) -> bool {
        self.status(v) == Status::Feasible
    }

    pub fn is_infeasible(&self, v: Vertex) -> bool {
        self.status(v) == Status::Infeasible
    }

    pub fn is_undecided(&self, v: Vertex) -> bool {
        self.status(v) == Status::Undecided
    }

    /// Decide an Undecided vertex, recording the change on the trail.
    ///
    /// # Panics
    ///
    /// Panics if `v` is already decided or `status` is Undecided; both would
    /// break monotonicity.
    pub fn set(&mut self, trail: &mut Trail, v: Vertex, status: Status) {
        let old = self.statuses[v.index()];
        assert!(
            old == Status::Undecided && status != Status::Undecided,
            "non-monotone status change at {}: {:?} -> {:?}",
            v,
            old,
            status
        );
        trail.record_change(v.index(), old as u64);
        self.statuses[v.index()] = status;
        self.undecided -= 1;
    }

    /// Decide a vertex outside of any search, without trailing.
    ///
    /// Used while building seeds and embeddings.
    pub(crate) fn assign(&mut self, v: Vertex, status: Status) {
        let slot = &mut self.statuses[v.index()];
        match (slot.is_decided(), status.is_decided()) {
            (false, true) => self.undecided -= 1,
            (true, false) => self.undecided += 1,
            _ => {}
        }
        *slot = status;
    }

    pub fn undecided_count(&self) -> usize {
        self.undecided
    }

    pub fn decided_count(&self) -> usize {
        self.statuses.len() - self.undecided
    }

    /// No Undecided vertex remains.
    pub fn is_complete(&self) -> bool {
        self.undecided == 0
    }

    /// The Undecided vertex with the smallest index.
    pub fn first_undecided(&self) -> Option<Vertex> {
        self.statuses
            .iter()
            .position(|&s| s == Status::Undecided)
            .map(|i| Vertex::new(i as u32))
    }

    pub fn vertices_with(&self, status: Status) -> impl Iterator<Item = Vertex> + '_ {
        self.statuses
            .iter()
            .enumerate()
            .filter(move |(_, &s)| s == status)
            .map(|(i, _)| Vertex::new(i as u32))
    }

    pub fn decided_vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_decided())
            .map(|(i, _)| Vertex::new(i as u32))
    }

    /// The Feasible vertices, as reported for outputs.
    pub fn feasible_set(&self) -> VertexSet {
        VertexSet::from_sorted(self.dimension, self.vertices_with(Status::Feasible).collect())
    }

    /// Number of Infeasible neighbors of `v`: its degree.
    pub fn infeasible_degree(&self, v: Vertex) -> usize {
        v.neighbors(self.dimension)
            .filter(|&u| self.is_infeasible(u))
            .count()
    }

    /// The sub-object on the facet where `coordinate` equals `value`.
    ///
    /// The fixed coordinate is dropped, so the result has dimension one less
    /// and its own antipodal map is the antipode within the facet.
    pub fn restrict(&self, coordinate: usize, value: bool) -> PartialObject {
        assert!(coordinate < self.dimension, "no coordinate {}", coordinate);
        let mut sub = PartialObject::new(self.dimension - 1);
        for index in 0..sub.vertex_count() {
            let u = Vertex::new(index as u32);
            let status = self.status(u.insert_coordinate(coordinate, value));
            sub.assign(u, status);
        }
        sub
    }

    /// Whether any pair of antipodal vertices could still both be Feasible.
    pub fn admits_antipodal_pair(&self) -> bool {
        let half = (self.vertex_count() / 2) as u32;
        (0..half).map(Vertex::new).any(|v| {
            !self.is_infeasible(v) && !self.is_infeasible(v.antipodal(self.dimension))
        })
    }
}

impl TrailRestore for PartialObject {
    fn restore(&mut self, id: usize, old_value: u64) {
        let old = Status::from_trail(old_value);
        let slot = &mut self.statuses[id];
        match (slot.is_decided(), old.is_decided()) {
            (true, false) => self.undecided += 1,
            (false, true) => self.undecided -= 1,
            _ => {}
        }
        *slot = old;
    }
}
