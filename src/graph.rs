// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, BTreeSet};

use crate::ev::{BooleanEncodedValue, ConfigError, DecimalEncodedValue, Direction, Registry};

/// Minimal in-memory edge store: a set of edges between nodes,
/// each with a fixed-width record of encoded values.
///
/// Records of all edges live in a single arena, so that accessors obtained
/// from the [Registry] can operate on them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    words: usize,
    flags: Vec<u32>,
    edges: Vec<(i64, i64)>,
    adjacency: BTreeMap<i64, Vec<usize>>,
}

impl Graph {
    /// Creates an empty graph with records of the registry's width.
    /// Fails if the registry was not built.
    pub fn new(registry: &Registry) -> Result<Self, ConfigError> {
        if !registry.is_built() {
            return Err(ConfigError::NotBuilt);
        }
        Ok(Self {
            words: registry.words_per_record(),
            flags: Vec::default(),
            edges: Vec::default(),
            adjacency: BTreeMap::default(),
        })
    }

    /// Returns the number of edges in the graph.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Adds an edge between two nodes with a zeroed record, returning its id.
    ///
    /// Edges have a direction: "forward" values describe travel from `from` to `to`.
    pub fn add_edge(&mut self, from: i64, to: i64) -> usize {
        let id = self.edges.len();
        self.edges.push((from, to));
        self.flags.resize(self.flags.len() + self.words, 0);

        self.adjacency.entry(from).or_default().push(id);
        if from != to {
            self.adjacency.entry(to).or_default().push(id);
        }
        id
    }

    /// Returns the (from, to) nodes of an edge.
    pub fn endpoints(&self, edge: usize) -> (i64, i64) {
        self.edges[edge]
    }

    pub fn get_flags(&self, edge: usize) -> &[u32] {
        assert!(edge < self.edges.len(), "edge {edge} out of bounds");
        &self.flags[edge * self.words..(edge + 1) * self.words]
    }

    pub fn get_flags_mut(&mut self, edge: usize) -> &mut [u32] {
        assert!(edge < self.edges.len(), "edge {edge} out of bounds");
        &mut self.flags[edge * self.words..(edge + 1) * self.words]
    }

    /// Returns a read view over an edge's record.
    pub fn edge(&self, edge: usize) -> EdgeRef<'_> {
        EdgeRef {
            flags: self.get_flags(edge),
        }
    }

    /// Returns a write view over an edge's record.
    pub fn edge_mut(&mut self, edge: usize) -> EdgeMut<'_> {
        EdgeMut {
            flags: self.get_flags_mut(edge),
        }
    }

    /// Returns nodes reachable from `node` over a single edge,
    /// considering the per-direction access stored in `access`.
    ///
    /// An edge is followed forward from its `from` node, and backward from its `to` node.
    pub fn neighbors(&self, node: i64, access: &BooleanEncodedValue) -> BTreeSet<i64> {
        self.adjacency
            .get(&node)
            .map(|ids| ids.as_slice())
            .unwrap_or_default()
            .iter()
            .flat_map(|&id| {
                let (from, to) = self.edges[id];
                let flags = self.get_flags(id);
                let forward = from == node && access.get_bool(Direction::Forward, flags);
                let backward = to == node && access.get_bool(Direction::Backward, flags);
                [forward.then_some(to), backward.then_some(from)]
            })
            .flatten()
            .collect()
    }

    /// Returns mutable records of all edges, in edge id order.
    ///
    /// The records are disjoint and may be handed out to different threads.
    /// A graph with zero-width records yields no records.
    pub fn records_mut(&mut self) -> std::slice::ChunksExactMut<'_, u32> {
        self.flags.chunks_exact_mut(self.words.max(1))
    }
}

/// Read access to a single edge record of a [Graph].
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'a> {
    flags: &'a [u32],
}

impl<'a> EdgeRef<'a> {
    pub fn flags(&self) -> &'a [u32] {
        self.flags
    }

    pub fn get_bool(&self, enc: &BooleanEncodedValue) -> bool {
        enc.get_bool(Direction::Forward, self.flags)
    }

    pub fn get_reverse_bool(&self, enc: &BooleanEncodedValue) -> bool {
        enc.get_bool(Direction::Backward, self.flags)
    }

    pub fn get_decimal(&self, enc: &DecimalEncodedValue) -> f64 {
        enc.get_decimal(Direction::Forward, self.flags)
    }

    pub fn get_reverse_decimal(&self, enc: &DecimalEncodedValue) -> f64 {
        enc.get_decimal(Direction::Backward, self.flags)
    }
}

/// Write access to a single edge record of a [Graph]. Setters can be chained.
#[derive(Debug)]
pub struct EdgeMut<'a> {
    flags: &'a mut [u32],
}

impl<'a> EdgeMut<'a> {
    /// Sets the forward and backward values of a boolean.
    pub fn set_bool(
        &mut self,
        enc: &BooleanEncodedValue,
        forward: bool,
        backward: bool,
    ) -> &mut Self {
        enc.set_bool(Direction::Forward, self.flags, forward);
        enc.set_bool(Direction::Backward, self.flags, backward);
        self
    }

    /// Sets the forward value of a decimal. For shared values, this sets both directions.
    pub fn set_decimal(&mut self, enc: &DecimalEncodedValue, value: f64) -> &mut Self {
        enc.set_decimal(Direction::Forward, self.flags, value);
        self
    }

    pub fn set_reverse_decimal(&mut self, enc: &DecimalEncodedValue, value: f64) -> &mut Self {
        enc.set_decimal(Direction::Backward, self.flags, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ev::EncodedValue;

    struct Encs {
        registry: Registry,
        foot_access: BooleanEncodedValue,
        foot_speed: DecimalEncodedValue,
        car_access: BooleanEncodedValue,
        car_speed: DecimalEncodedValue,
    }

    fn encs() -> Encs {
        let mut registry = Registry::new();
        registry
            .add(EncodedValue::boolean("foot_access", true))
            .unwrap()
            .add(EncodedValue::decimal("foot_average_speed", 4, 1.0, false))
            .unwrap()
            .add(EncodedValue::decimal("foot_priority", 4, 0.1, false))
            .unwrap()
            .add(EncodedValue::boolean("bike_access", true))
            .unwrap()
            .add(EncodedValue::decimal("bike_average_speed", 4, 2.0, false))
            .unwrap()
            .add(EncodedValue::boolean("car_access", true))
            .unwrap()
            .add(EncodedValue::decimal("car_average_speed", 5, 5.0, false))
            .unwrap();
        registry.build().unwrap();

        Encs {
            foot_access: registry.boolean("foot_access").unwrap(),
            foot_speed: registry.decimal("foot_average_speed").unwrap(),
            car_access: registry.boolean("car_access").unwrap(),
            car_speed: registry.decimal("car_average_speed").unwrap(),
            registry,
        }
    }

    #[test]
    fn combined() {
        let e = encs();
        let mut g = Graph::new(&e.registry).unwrap();
        let id = g.add_edge(0, 1);
        g.edge_mut(id)
            .set_decimal(&e.foot_speed, 10.0)
            .set_bool(&e.foot_access, true, true);
        g.edge_mut(id)
            .set_decimal(&e.car_speed, 100.0)
            .set_bool(&e.car_access, true, false);

        let edge = g.edge(id);
        assert_eq!(edge.get_decimal(&e.foot_speed), 10.0);
        assert!(edge.get_bool(&e.foot_access));
        assert!(edge.get_reverse_bool(&e.foot_access));

        assert_eq!(edge.get_decimal(&e.car_speed), 100.0);
        assert!(edge.get_bool(&e.car_access));
        assert!(!edge.get_reverse_bool(&e.car_access));

        let mut raw = e.registry.create_flags().unwrap();
        e.foot_speed.set_decimal(Direction::Forward, &mut raw, 10.0);
        e.foot_access.set_bool(Direction::Forward, &mut raw, true);
        e.foot_access.set_bool(Direction::Backward, &mut raw, true);
        assert_eq!(e.car_speed.get_decimal(Direction::Forward, &raw), 0.0);
    }

    #[test]
    fn neighbors() {
        let e = encs();
        let mut g = Graph::new(&e.registry).unwrap();

        for (from, to, speed) in [(0, 1, 10.0), (0, 2, 5.0), (1, 3, 10.0)] {
            let id = g.add_edge(from, to);
            g.edge_mut(id)
                .set_decimal(&e.foot_speed, speed)
                .set_bool(&e.foot_access, true, true);
        }

        assert_eq!(g.neighbors(0, &e.foot_access), BTreeSet::from([1, 2]));
        assert_eq!(g.neighbors(1, &e.foot_access), BTreeSet::from([0, 3]));
        assert_eq!(g.neighbors(2, &e.foot_access), BTreeSet::from([0]));
        assert!(g.neighbors(42, &e.foot_access).is_empty());
    }

    #[test]
    fn neighbors_follow_direction() {
        let e = encs();
        let mut g = Graph::new(&e.registry).unwrap();
        let id = g.add_edge(0, 1);
        g.edge_mut(id).set_bool(&e.car_access, true, false);
        let id = g.add_edge(2, 0);
        g.edge_mut(id).set_bool(&e.car_access, false, true);
        let id = g.add_edge(0, 0);
        g.edge_mut(id).set_bool(&e.car_access, true, true);

        assert_eq!(g.neighbors(0, &e.car_access), BTreeSet::from([0, 1, 2]));
        assert!(g.neighbors(1, &e.car_access).is_empty());
        assert!(g.neighbors(2, &e.car_access).is_empty());
        assert!(g.neighbors(0, &e.foot_access).is_empty());
    }

    #[test]
    fn max_speed_rounding() {
        let mut registry = Registry::new();
        registry
            .add(EncodedValue::decimal("foot_speed", 4, 2.0, true))
            .unwrap();
        registry.build().unwrap();
        let speed = registry.decimal("foot_speed").unwrap();

        let mut g = Graph::new(&registry).unwrap();
        let id = g.add_edge(0, 1);
        g.edge_mut(id).set_decimal(&speed, 15.0);

        // 15 can't be stored with a factor of 2 and reads back as 16,
        // so the maximum speed of such a value must be 16.
        assert_eq!(g.edge(id).get_decimal(&speed), 16.0);
        assert_eq!(g.edge(id).get_reverse_decimal(&speed), 0.0);
        assert_eq!(speed.next_storable_value(15.0), 16.0);
    }

    #[test]
    fn unbuilt_registry() {
        let mut registry = Registry::new();
        registry
            .add(EncodedValue::boolean("foot_access", true))
            .unwrap();
        assert_eq!(Graph::new(&registry), Err(ConfigError::NotBuilt));

        registry.build().unwrap();
        assert!(Graph::new(&registry).unwrap().is_empty());
    }

    #[test]
    fn records_are_independent() {
        let e = encs();
        let mut g = Graph::new(&e.registry).unwrap();
        let a = g.add_edge(0, 1);
        let b = g.add_edge(1, 2);

        g.edge_mut(a).set_decimal(&e.car_speed, 50.0);
        assert_eq!(g.edge(b).get_decimal(&e.car_speed), 0.0);
        assert_eq!(g.endpoints(b), (1, 2));
        assert_eq!(g.len(), 2);
        assert_eq!(g.get_flags(a).len(), e.registry.words_per_record());
    }

    #[test]
    fn concurrent_writes() {
        let e = encs();
        let mut g = Graph::new(&e.registry).unwrap();
        for i in 0..64 {
            g.add_edge(i, i + 1);
        }

        let mut records: Vec<&mut [u32]> = g.records_mut().collect();
        assert_eq!(records.len(), 64);

        std::thread::scope(|s| {
            for (i, chunk) in records.chunks_mut(16).enumerate() {
                let speed = &e.car_speed;
                s.spawn(move || {
                    for record in chunk.iter_mut() {
                        speed.set_decimal(Direction::Forward, record, 5.0 * (i + 1) as f64);
                    }
                });
            }
        });

        for id in 0..64 {
            let expected = 5.0 * (id / 16 + 1) as f64;
            assert_eq!(g.edge(id).get_decimal(&e.car_speed), expected);
        }
    }
}
