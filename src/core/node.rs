use super::{coordinate::GenomicCoordinate, event::EventId};
use std::{cmp::Ordering, collections::HashSet, fmt};

/// A cluster of breakpoint endpoints believed to sit at the same physical location.
///
/// Nodes order by start coordinate and then by their creation serial, so two distinct
/// nodes never compare equal even when they start at the same position.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) start: GenomicCoordinate,
    pub(crate) end: GenomicCoordinate,
    pub(crate) events: Vec<EventId>,
    members: HashSet<EventId>,
    serial: u64,
    absorbed: bool,
}

impl Node {
    pub(crate) fn new(coord: GenomicCoordinate, serial: u64) -> Self {
        Self {
            start: coord.clone(),
            end: coord,
            events: Vec::new(),
            members: HashSet::new(),
            serial,
            absorbed: false,
        }
    }

    pub fn start(&self) -> &GenomicCoordinate {
        &self.start
    }

    pub fn end(&self) -> &GenomicCoordinate {
        &self.end
    }

    pub fn events(&self) -> &[EventId] {
        &self.events
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// True once this node has been merged into another one.
    pub fn is_absorbed(&self) -> bool {
        self.absorbed
    }

    pub(crate) fn mark_absorbed(&mut self) {
        self.absorbed = true;
    }

    pub fn contains(&self, event: EventId) -> bool {
        self.members.contains(&event)
    }

    /// Appends `event` unless it is already held; insertion order is kept.
    pub(crate) fn add_event(&mut self, event: EventId) {
        if self.members.insert(event) {
            self.events.push(event);
        }
    }

    pub(crate) fn remove_event(&mut self, event: EventId) -> bool {
        if !self.members.remove(&event) {
            return false;
        }
        self.events.retain(|&e| e != event);
        true
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.serial == other.serial
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.serial.cmp(&other.serial))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node[serial={}, {}-{}, events={}]",
            self.serial,
            self.start,
            self.end.pos,
            self.events.len()
        )
    }
}

/// Why a node merge was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeSkip {
    DifferentChromosome {
        target: String,
        source: String,
    },
    /// The source starts inside the target interval and carries more than one event.
    OverlappingMultiEvent { source_events: usize },
    /// The source was already absorbed, or source and target are the same node.
    Retired,
}

impl fmt::Display for MergeSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeSkip::DifferentChromosome { target, source } => {
                write!(f, "nodes are on different chromosomes ({target} vs {source})")
            }
            MergeSkip::OverlappingMultiEvent { source_events } => write!(
                f,
                "source overlaps the target and holds {source_events} events"
            ),
            MergeSkip::Retired => write!(f, "node was already merged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Merged,
    Skipped(MergeSkip),
}

impl MergeOutcome {
    pub fn is_merged(&self) -> bool {
        matches!(self, MergeOutcome::Merged)
    }
}
