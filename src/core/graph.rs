
use super::{
    coordinate::GenomicCoordinate,
    event::{Composition, Event, EventId, NodeId, Polarity, RecordFields, Side},
    node::{MergeOutcome, MergeSkip, Node},
    svtype::EventType,
};
use crate::{error::SvfuseError, utils::util::Result};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Counters scoped to a single consolidation run.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    next_node_serial: u64,
    merged_events: usize,
}

impl RunContext {
    fn next_serial(&mut self) -> u64 {
        let serial = self.next_node_serial;
        self.next_node_serial += 1;
        serial
    }

    pub fn nodes_created(&self) -> u64 {
        self.next_node_serial
    }

    /// Number of events absorbed by redundancy elimination so far.
    pub fn merged_events(&self) -> usize {
        self.merged_events
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMergeSummary {
    pub merged: usize,
    pub skipped: usize,
}

/// Inputs for synthesizing a complex event out of already finalized components.
#[derive(Debug, Clone)]
pub struct ComplexSpec {
    pub c1: GenomicCoordinate,
    pub c2: GenomicCoordinate,
    pub event_type: EventType,
    pub components: Vec<EventId>,
    pub polarity: Polarity,
    pub hosting_node: Option<NodeId>,
    pub insertion_point: Option<GenomicCoordinate>,
}

/// Arena holding every event and node of a run.
///
/// Events and nodes refer to each other through [`EventId`] / [`NodeId`] handles; a node
/// owns the list of events it clusters while an event only records which node each of its
/// endpoints currently belongs to.
#[derive(Debug, Default)]
pub struct BreakpointGraph {
    events: Vec<Event>,
    nodes: Vec<Node>,
    context: RunContext,
}

impl BreakpointGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn add_event(&mut self, event: Event) -> EventId {
        let id = EventId(self.events.len());
        self.events.push(event);
        id
    }

    pub fn event(&self, id: EventId) -> &Event {
        &self.events[id.0]
    }

    pub fn event_mut(&mut self, id: EventId) -> &mut Event {
        &mut self.events[id.0]
    }

    pub fn event_ids(&self) -> impl Iterator<Item = EventId> {
        (0..self.events.len()).map(EventId)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn n_events(&self) -> usize {
        self.events.len()
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn create_node(&mut self, coord: GenomicCoordinate) -> NodeId {
        let serial = self.context.next_serial();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(coord, serial));
        id
    }

    /// Nodes that have not been absorbed, in (start, serial) order.
    pub fn live_nodes_sorted(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| !self.nodes[id.0].is_absorbed())
            .collect();
        ids.sort_by(|a, b| self.nodes[a.0].cmp(&self.nodes[b.0]));
        ids
    }

    /// Links `side` of `event` to `node`, replacing any earlier link on that side.
    pub fn assign_event(&mut self, node: NodeId, event: EventId, side: Side) {
        let previous = self.events[event.0].node(side);
        self.events[event.0].set_node(side, Some(node));
        if let Some(previous) = previous.filter(|&p| p != node) {
            let still_linked = self.events[event.0].nodes().contains(&Some(previous));
            if !still_linked {
                self.nodes[previous.0].remove_event(event);
            }
        }
        self.nodes[node.0].add_event(event);
    }

    /// Detaches `event` from every node it is linked to.
    pub fn detach_event(&mut self, event: EventId) {
        for side in [Side::First, Side::Second] {
            if let Some(node) = self.events[event.0].node(side) {
                self.nodes[node.0].remove_event(event);
                self.events[event.0].set_node(side, None);
            }
        }
    }

    /// Creates one node per distinct endpoint coordinate and links every event to them.
    pub fn cluster_events(&mut self) {
        let mut by_coord: BTreeMap<GenomicCoordinate, NodeId> = BTreeMap::new();
        for event in 0..self.events.len() {
            let event = EventId(event);
            for side in [Side::First, Side::Second] {
                let coord = self.events[event.0].coordinate(side).clone();
                let node = match by_coord.get(&coord) {
                    Some(&node) => node,
                    None => {
                        let node = self.create_node(coord.clone());
                        by_coord.insert(coord, node);
                        node
                    }
                };
                self.assign_event(node, event, side);
            }
        }
        log::debug!(
            "Clustered {} events into {} nodes",
            self.events.len(),
            by_coord.len()
        );
    }

    /// Absorbs `source` into `target`.
    ///
    /// Requires both nodes on the same chromosome and either `target.end <= source.start` or a
    /// source holding at most one event. A refused merge mutates nothing.
    pub fn merge_nodes(&mut self, target: NodeId, source: NodeId) -> MergeOutcome {
        if target == source
            || self.nodes[target.0].is_absorbed()
            || self.nodes[source.0].is_absorbed()
        {
            return MergeOutcome::Skipped(MergeSkip::Retired);
        }

        let (t, s) = (&self.nodes[target.0], &self.nodes[source.0]);
        if !t.start.on_same_chromosome(&s.start) {
            return MergeOutcome::Skipped(MergeSkip::DifferentChromosome {
                target: t.start.chr.clone(),
                source: s.start.chr.clone(),
            });
        }
        if t.end > s.start && s.events.len() > 1 {
            return MergeOutcome::Skipped(MergeSkip::OverlappingMultiEvent {
                source_events: s.events.len(),
            });
        }

        let source_end = s.end.clone();
        let moved = s.events.clone();
        let t = &mut self.nodes[target.0];
        if source_end > t.end {
            t.end = source_end;
        }
        for &event in &moved {
            self.nodes[target.0].add_event(event);
            for side in [Side::First, Side::Second] {
                if self.events[event.0].node(side) == Some(source) {
                    self.events[event.0].set_node(side, Some(target));
                }
            }
        }
        self.nodes[source.0].mark_absorbed();
        MergeOutcome::Merged
    }

    /// Sweeps live nodes per chromosome and absorbs each node whose start lies closer than
    /// `max_distance` to the end of the node currently being grown.
    pub fn merge_adjacent_nodes(&mut self, max_distance: u64) -> NodeMergeSummary {
        let mut summary = NodeMergeSummary::default();
        let mut current: Option<NodeId> = None;
        for next in self.live_nodes_sorted() {
            let Some(cur) = current else {
                current = Some(next);
                continue;
            };
            let next_start = &self.nodes[next.0].start;
            let close = !next_start.is_unresolved()
                && self.nodes[cur.0]
                    .end
                    .distance_to(next_start)
                    .is_some_and(|d| d < max_distance);
            if !close {
                current = Some(next);
                continue;
            }
            match self.merge_nodes(cur, next) {
                MergeOutcome::Merged => summary.merged += 1,
                MergeOutcome::Skipped(reason) => {
                    log::debug!(
                        "Skipped merge of {} into {}: {}",
                        self.nodes[next.0],
                        self.nodes[cur.0],
                        reason
                    );
                    summary.skipped += 1;
                    current = Some(next);
                }
            }
        }
        summary
    }

    fn other_node_checked(&self, node: NodeId, event: EventId, partner: EventId) -> Result<NodeId> {
        self.events[event.0].other_node(node).ok_or_else(|| {
            SvfuseError::InvariantViolation {
                first: self.events[event.0].to_string(),
                second: self.events[partner.0].to_string(),
                reason: format!(
                    "{} is expected to link {} on exactly one side and another node on the other (links: {:?})",
                    self.events[event.0].id(),
                    self.nodes[node.0],
                    self.events[event.0].nodes()
                ),
            }
        })
    }

    fn is_redundant_pair(
        &self,
        node: NodeId,
        a: EventId,
        b: EventId,
        max_distance: u64,
    ) -> Result<bool> {
        let other_a = self.other_node_checked(node, a, b)?;
        let other_b = self.other_node_checked(node, b, a)?;
        let close = self.nodes[other_a.0]
            .start
            .distance_to(&self.nodes[other_b.0].start)
            .is_some_and(|d| d < max_distance);
        Ok(close && self.events[a.0].same_type(&self.events[b.0]))
    }

    fn absorb_event(&mut self, keep: EventId, drop: EventId) {
        let dropped = &self.events[drop.0];
        let drop_id = dropped.record.id.clone();
        let drop_callers = dropped.callers.clone();
        let drop_calls = dropped.calls;
        let drop_quality = dropped.record.quality();

        let kept = &mut self.events[keep.0];
        kept.record.id = format!("{}-{}", kept.record.id, drop_id);
        kept.add_callers(&drop_callers);
        kept.increase_calls(drop_calls);
        let quality = kept.record.quality().max(drop_quality);
        kept.record.set_quality(quality);
    }

    /// Collapses events on `node` that describe the same edge.
    ///
    /// Two events are redundant when they share a type and their far-end nodes start closer
    /// than `max_distance` on the same chromosome. Events are scanned pairwise in insertion
    /// order: the earlier event keeps the evidence and an absorbed event takes no further part
    /// in the pass, so ties go to the first pair scanned. Absorbed events leave both of their
    /// nodes. Returns the number of events removed.
    ///
    /// The node holding unresolved mates is skipped: every event on it also sits on a
    /// resolved node, where its pairs are compared.
    pub fn eliminate_redundant_events(&mut self, node: NodeId, max_distance: u64) -> Result<usize> {
        if self.nodes[node.0].start.is_unresolved() {
            log::trace!("Skipping redundancy pass on {}", self.nodes[node.0]);
            return Ok(0);
        }
        let members = self.nodes[node.0].events.clone();
        let mut absorbed: HashSet<EventId> = HashSet::new();
        let mut removal_order: Vec<EventId> = Vec::new();

        for (i, &a) in members.iter().enumerate() {
            if absorbed.contains(&a) {
                continue;
            }
            for &b in &members[i + 1..] {
                if absorbed.contains(&b) {
                    continue;
                }
                if self.is_redundant_pair(node, a, b, max_distance)? {
                    log::trace!(
                        "Redundant events: {} absorbs {}",
                        self.events[a.0],
                        self.events[b.0]
                    );
                    self.absorb_event(a, b);
                    absorbed.insert(b);
                    removal_order.push(b);
                    self.context.merged_events += 1;
                }
            }
        }

        for &event in &removal_order {
            self.detach_event(event);
        }
        Ok(removal_order.len())
    }

    /// The deletion edge, if any, linking `node` to exactly `other`.
    pub fn has_deletion_to(&self, node: NodeId, other: NodeId) -> Option<EventId> {
        self.nodes[node.0].events.iter().copied().find(|&e| {
            let event = &self.events[e.0];
            event.event_type == EventType::DELETION && event.other_node(node) == Some(other)
        })
    }

    /// Builds a complex event from `spec.components` and, if a hosting node is given, links
    /// both of its endpoints to that node.
    pub fn add_complex_event(&mut self, spec: ComplexSpec) -> Result<EventId> {
        let Some(&first) = spec.components.first() else {
            return Err(SvfuseError::EmptyComposition);
        };

        let separator = spec.polarity.separator();
        let id = spec
            .components
            .iter()
            .map(|&c| self.events[c.0].id())
            .collect::<Vec<_>>()
            .join(separator);

        let quality = spec
            .components
            .iter()
            .map(|&c| self.events[c.0].record.quality())
            .sum::<f64>()
            / spec.components.len() as f64;

        let mut callers = BTreeSet::new();
        let mut calls = 0;
        for &c in &spec.components {
            callers.extend(self.events[c.0].callers.iter().copied());
            calls += self.events[c.0].calls;
        }

        let head = &self.events[first.0].record;
        let mut record = RecordFields {
            id,
            ref_allele: head.ref_allele.clone(),
            alt: spec.event_type.alt_tag().to_string(),
            qual: String::new(),
            filter: head.filter.clone(),
            info: String::new(),
        };
        record.set_quality(quality);

        let mut event = Event::new(spec.c1, spec.c2, spec.event_type).with_record(record);
        event.callers = callers;
        event.calls = calls;
        event.composition = Some(Composition {
            components: spec.components,
            polarity: spec.polarity,
            insertion_point: spec.insertion_point,
        });

        let id = self.add_event(event);
        if let Some(host) = spec.hosting_node {
            self.assign_event(host, id, Side::First);
            self.assign_event(host, id, Side::Second);
        }
        Ok(id)
    }

    /// Events still held by live nodes, each once, in output order.
    pub fn surviving_events(&self) -> Vec<EventId> {
        let mut seen: HashSet<EventId> = HashSet::new();
        let mut out = Vec::new();
        for node in self.live_nodes_sorted() {
            for &event in &self.nodes[node.0].events {
                if seen.insert(event) {
                    out.push(event);
                }
            }
        }
        out.sort_by(|a, b| {
            self.events[a.0]
                .c1()
                .cmp(self.events[b.0].c1())
                .then_with(|| a.cmp(b))
        });
        out
    }
}
