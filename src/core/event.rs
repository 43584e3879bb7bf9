use super::{coordinate::GenomicCoordinate, svtype::EventType};
use crate::utils::util::{format_quality, parse_quality};
use std::{collections::BTreeSet, fmt};

/// Handle of an event inside a [`BreakpointGraph`](super::graph::BreakpointGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub usize);

/// Handle of a node inside a [`BreakpointGraph`](super::graph::BreakpointGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Which endpoint of an event a node link refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// Upstream tool that reported a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CallerKind {
    Socrates,
    Delly,
    Delly2,
    MetaSv,
    Bedpe,
    Crest,
    Gustaf,
    Gridss,
    Lumpy,
}

impl fmt::Display for CallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallerKind::Socrates => "SOCRATES",
            CallerKind::Delly => "DELLY",
            CallerKind::Delly2 => "DELLY2",
            CallerKind::MetaSv => "METASV",
            CallerKind::Bedpe => "BEDPE",
            CallerKind::Crest => "CREST",
            CallerKind::Gustaf => "GUSTAF",
            CallerKind::Gridss => "GRIDSS",
            CallerKind::Lumpy => "LUMPY",
        };
        write!(f, "{name}")
    }
}

/// The VCF-style columns carried through to the output record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFields {
    pub id: String,
    pub ref_allele: String,
    /// ALT as reported by the caller; the output column is always the event's type tag.
    pub alt: String,
    pub qual: String,
    pub filter: Option<String>,
    pub info: String,
}

impl RecordFields {
    pub fn filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(".")
    }

    pub fn quality(&self) -> f64 {
        parse_quality(&self.qual)
    }

    pub fn set_quality(&mut self, value: f64) {
        self.qual = format_quality(value);
    }

    /// Rewrites an existing `SVTYPE=` entry of INFO; records without one are left alone.
    pub fn set_svtype(&mut self, code: &str) {
        if !self.info.split(';').any(|entry| entry.starts_with("SVTYPE=")) {
            return;
        }
        self.info = self
            .info
            .split(';')
            .map(|entry| {
                if entry.starts_with("SVTYPE=") {
                    format!("SVTYPE={code}")
                } else {
                    entry.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(";");
    }
}

/// How the ids of a complex event's components are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Addition,
    Subtraction,
}

impl Polarity {
    pub fn separator(&self) -> &'static str {
        match self {
            Polarity::Addition => "+",
            Polarity::Subtraction => "-",
        }
    }
}

/// Components of a synthesized complex event.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub components: Vec<EventId>,
    pub polarity: Polarity,
    pub insertion_point: Option<GenomicCoordinate>,
}

#[derive(Debug, Clone)]
pub struct Event {
    c1: GenomicCoordinate,
    c2: GenomicCoordinate,
    pub event_type: EventType,
    pub record: RecordFields,
    pub callers: BTreeSet<CallerKind>,
    pub calls: u32,
    pub annotation: Option<String>,
    pub composition: Option<Composition>,
    nodes: [Option<NodeId>; 2],
}

impl Event {
    /// Creates an event; endpoints are stored smaller-first regardless of argument order.
    pub fn new(c1: GenomicCoordinate, c2: GenomicCoordinate, event_type: EventType) -> Self {
        let (c1, c2) = if c1 <= c2 { (c1, c2) } else { (c2, c1) };
        Self {
            c1,
            c2,
            event_type,
            record: RecordFields::default(),
            callers: BTreeSet::new(),
            calls: 0,
            annotation: None,
            composition: None,
            nodes: [None, None],
        }
    }

    pub fn with_record(mut self, record: RecordFields) -> Self {
        self.record = record;
        self
    }

    pub fn with_caller(mut self, caller: CallerKind, calls: u32) -> Self {
        self.callers.insert(caller);
        self.calls = calls;
        self
    }

    pub fn with_annotation(mut self, annotation: Option<String>) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn c1(&self) -> &GenomicCoordinate {
        &self.c1
    }

    pub fn c2(&self) -> &GenomicCoordinate {
        &self.c2
    }

    pub fn coordinate(&self, side: Side) -> &GenomicCoordinate {
        match side {
            Side::First => &self.c1,
            Side::Second => &self.c2,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn size(&self) -> Option<u64> {
        self.c1.distance_to(&self.c2)
    }

    pub fn node(&self, side: Side) -> Option<NodeId> {
        self.nodes[side.index()]
    }

    pub fn nodes(&self) -> [Option<NodeId>; 2] {
        self.nodes
    }

    pub(crate) fn set_node(&mut self, side: Side, node: Option<NodeId>) {
        self.nodes[side.index()] = node;
    }

    /// Node at the far end of this edge as seen from `node`.
    ///
    /// `None` unless both sides are linked and one of them is `node`; a self-loop yields
    /// `node` itself.
    pub fn other_node(&self, node: NodeId) -> Option<NodeId> {
        match self.nodes {
            [Some(a), Some(b)] if a == node => Some(b),
            [Some(a), Some(b)] if b == node => Some(a),
            _ => None,
        }
    }

    pub fn add_callers<'a>(&mut self, callers: impl IntoIterator<Item = &'a CallerKind>) {
        self.callers.extend(callers);
    }

    pub fn increase_calls(&mut self, n: u32) {
        self.calls += n;
    }

    /// Retypes a zero-length edge carrying only nucleotide sequence as an insertion.
    pub fn reclassify_if_pure_insertion(&mut self) -> bool {
        let is_sequence = self.annotation.as_deref().is_some_and(|annotation| {
            !annotation.is_empty()
                && annotation
                    .bytes()
                    .all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
        });
        let same_node = matches!(self.nodes, [Some(a), Some(b)] if a == b);
        if is_sequence && same_node && self.event_type != EventType::INSERTION {
            log::trace!(
                "Reclassifying {} from {} to {}",
                self.record.id,
                self.event_type,
                EventType::INSERTION
            );
            self.event_type = EventType::INSERTION;
            self.record.set_svtype(self.event_type.code());
            return true;
        }
        false
    }

    pub fn same_type(&self, other: &Event) -> bool {
        self.event_type == other.event_type
    }

    /// Tab-separated output record (CHROM POS ID REF ALT QUAL FILTER INFO;SUPPORT=n,m).
    pub fn to_record_line(&self) -> String {
        let info = if self.record.info.is_empty() {
            format!("SUPPORT={},{}", self.callers.len(), self.calls)
        } else {
            format!(
                "{};SUPPORT={},{}",
                self.record.info,
                self.callers.len(),
                self.calls
            )
        };
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.c1.chr,
            self.c1.pos,
            self.record.id,
            self.record.ref_allele,
            self.event_type.alt_tag(),
            format_quality(self.record.quality()),
            self.record.filter(),
            info
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(point) = self
            .composition
            .as_ref()
            .and_then(|composition| composition.insertion_point.as_ref())
            .filter(|_| self.event_type.has_insertion_point())
        {
            write!(f, "{point} ")?;
        }
        if self.c1.on_same_chromosome(&self.c2) {
            write!(
                f,
                "{} {}:{}-{} {}",
                self.record.id, self.c1.chr, self.c1.pos, self.c2.pos, self.event_type
            )
        } else {
            write!(
                f,
                "{} {}<->{} {}",
                self.record.id, self.c1, self.c2, self.event_type
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(chr: &str, pos: u64) -> GenomicCoordinate {
        GenomicCoordinate::new(chr, pos)
    }

    #[test]
    fn test_endpoints_are_stored_in_order() {
        let pairs = [
            (coord("chr1", 500), coord("chr1", 100)),
            (coord("chr1", 100), coord("chr1", 500)),
            (coord("chr2", 1), coord("chr1", 9_000)),
            (GenomicCoordinate::unresolved(), coord("chrX", 5)),
        ];
        for (a, b) in pairs {
            let forward = Event::new(a.clone(), b.clone(), EventType::UNKNOWN);
            let backward = Event::new(b, a, EventType::UNKNOWN);
            assert!(forward.c1() <= forward.c2());
            assert_eq!(forward.c1(), backward.c1());
            assert_eq!(forward.c2(), backward.c2());
        }
    }

    #[test]
    fn test_size() {
        let e = Event::new(coord("chr1", 100), coord("chr1", 350), EventType::DELETION);
        assert_eq!(e.size(), Some(250));
        let tx = Event::new(coord("chr1", 100), coord("chr3", 100), EventType::UNKNOWN);
        assert_eq!(tx.size(), None);
    }

    #[test]
    fn test_other_node() {
        let mut e = Event::new(coord("chr1", 1), coord("chr1", 2), EventType::DELETION);
        assert_eq!(e.other_node(NodeId(0)), None);
        e.set_node(Side::First, Some(NodeId(0)));
        assert_eq!(e.other_node(NodeId(0)), None);
        e.set_node(Side::Second, Some(NodeId(4)));
        assert_eq!(e.other_node(NodeId(0)), Some(NodeId(4)));
        assert_eq!(e.other_node(NodeId(4)), Some(NodeId(0)));
        assert_eq!(e.other_node(NodeId(9)), None);
        e.set_node(Side::Second, Some(NodeId(0)));
        assert_eq!(e.other_node(NodeId(0)), Some(NodeId(0)));
    }

    #[test]
    fn test_reclassify_pure_insertion_requires_sequence_and_single_node() {
        let mut e = Event::new(coord("chr1", 10), coord("chr1", 10), EventType::TANDEM_DUPLICATION)
            .with_annotation(Some("ACGTTGCA".to_string()));
        e.set_node(Side::First, Some(NodeId(1)));
        e.set_node(Side::Second, Some(NodeId(2)));
        assert!(!e.reclassify_if_pure_insertion());
        assert_eq!(e.event_type, EventType::TANDEM_DUPLICATION);

        e.set_node(Side::Second, Some(NodeId(1)));
        assert!(e.reclassify_if_pure_insertion());
        assert_eq!(e.event_type, EventType::INSERTION);

        let mut not_sequence =
            Event::new(coord("chr1", 10), coord("chr1", 10), EventType::DELETION)
                .with_annotation(Some("ACGN".to_string()));
        not_sequence.set_node(Side::First, Some(NodeId(1)));
        not_sequence.set_node(Side::Second, Some(NodeId(1)));
        assert!(!not_sequence.reclassify_if_pure_insertion());
        assert_eq!(not_sequence.event_type, EventType::DELETION);
    }

    #[test]
    fn test_evidence_accumulates() {
        let mut e = Event::new(coord("chr1", 1), coord("chr1", 2), EventType::DELETION)
            .with_caller(CallerKind::Delly, 1);
        let other: BTreeSet<CallerKind> = [CallerKind::Delly, CallerKind::Lumpy].into();
        e.add_callers(&other);
        e.increase_calls(3);
        assert_eq!(e.callers.len(), 2);
        assert_eq!(e.calls, 4);
    }

    #[test]
    fn test_record_line() {
        let e = Event::new(coord("chr1", 500), coord("chr1", 100), EventType::DELETION)
            .with_record(RecordFields {
                id: "DEL00001".to_string(),
                ref_allele: "N".to_string(),
                alt: "<DEL>".to_string(),
                qual: "35".to_string(),
                filter: Some("PASS".to_string()),
                info: "SVTYPE=DEL;END=500".to_string(),
            })
            .with_caller(CallerKind::Delly, 1);
        assert_eq!(
            e.to_record_line(),
            "chr1\t100\tDEL00001\tN\t<DEL>\t35.00\tPASS\tSVTYPE=DEL;END=500;SUPPORT=1,1"
        );
    }

    #[test]
    fn test_alt_column_follows_event_type() {
        let e = Event::new(coord("chr1", 100), coord("chr1", 400), EventType::TANDEM_DUPLICATION)
            .with_record(RecordFields {
                id: "DUP00007".to_string(),
                ref_allele: "N".to_string(),
                alt: "<DUP>".to_string(),
                qual: "12".to_string(),
                filter: Some("PASS".to_string()),
                info: String::new(),
            })
            .with_caller(CallerKind::Delly, 1);
        let line = e.to_record_line();
        let columns: Vec<&str> = line.split('\t').collect();
        assert_eq!(columns[4], "<TAN>");
        // No INFO of its own: SUPPORT stands alone.
        assert_eq!(columns[7], "SUPPORT=1,1");
    }

    #[test]
    fn test_reclassified_insertion_rewrites_svtype() {
        let mut e = Event::new(coord("chr1", 10), coord("chr1", 10), EventType::DELETION)
            .with_record(RecordFields {
                id: "SOC1".to_string(),
                ref_allele: ".".to_string(),
                alt: "<DEL>".to_string(),
                qual: ".".to_string(),
                filter: Some("PASS".to_string()),
                info: "SVTYPE=DEL;CHR2=chr1;END=10".to_string(),
            })
            .with_caller(CallerKind::Socrates, 1)
            .with_annotation(Some("ACGT".to_string()));
        e.set_node(Side::First, Some(NodeId(0)));
        e.set_node(Side::Second, Some(NodeId(0)));
        assert!(e.reclassify_if_pure_insertion());
        assert_eq!(
            e.to_record_line(),
            "chr1\t10\tSOC1\t.\t<INS>\t0.00\tPASS\tSVTYPE=INS;CHR2=chr1;END=10;SUPPORT=1,1"
        );
    }

    #[test]
    fn test_set_svtype_keeps_other_entries() {
        let mut record = RecordFields {
            info: "PRECISE;SVTYPE=BND;MATEID=x".to_string(),
            ..RecordFields::default()
        };
        record.set_svtype("TAN");
        assert_eq!(record.info, "PRECISE;SVTYPE=TAN;MATEID=x");

        let mut record = RecordFields {
            info: "PRECISE".to_string(),
            ..RecordFields::default()
        };
        record.set_svtype("TAN");
        assert_eq!(record.info, "PRECISE");
    }

    #[test]
    fn test_unset_filter_prints_dot() {
        let e = Event::new(coord("chr2", 7), coord("chr2", 9), EventType::UNKNOWN);
        let line = e.to_record_line();
        let columns: Vec<&str> = line.split('\t').collect();
        assert_eq!(columns[5], "0.00");
        assert_eq!(columns[6], ".");
        assert_eq!(columns[7], "SUPPORT=0,0");
    }

    #[test]
    fn test_display() {
        let mut e = Event::new(coord("chr1", 100), coord("chr1", 500), EventType::DELETION);
        e.record.id = "x".to_string();
        assert_eq!(e.to_string(), "x chr1:100-500 DEL");
        let mut tx = Event::new(coord("chr2", 5), coord("chr1", 7), EventType::UNKNOWN);
        tx.record.id = "y".to_string();
        assert_eq!(tx.to_string(), "y chr1:7<->chr2:5 XXX");
    }
}
