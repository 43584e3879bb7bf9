use std::{cmp::Ordering, fmt};

/// A position on a named chromosome.
///
/// An empty chromosome label marks an unresolved mate (e.g. a single breakend) and always
/// sorts after every labelled coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomicCoordinate {
    pub chr: String,
    pub pos: u64,
}

impl GenomicCoordinate {
    pub fn new(chr: impl Into<String>, pos: u64) -> Self {
        Self {
            chr: chr.into(),
            pos,
        }
    }

    /// Placeholder for the missing side of a single-ended breakend.
    pub fn unresolved() -> Self {
        Self {
            chr: String::new(),
            pos: 0,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        self.chr.is_empty()
    }

    pub fn on_same_chromosome(&self, other: &GenomicCoordinate) -> bool {
        self.chr == other.chr
    }

    /// Absolute distance on the same chromosome, `None` (unbounded) across chromosomes.
    pub fn distance_to(&self, other: &GenomicCoordinate) -> Option<u64> {
        if !self.on_same_chromosome(other) {
            return None;
        }
        Some(self.pos.abs_diff(other.pos))
    }

    fn cmp_chromosomes(&self, other: &GenomicCoordinate) -> Ordering {
        match (self.chr.is_empty(), other.chr.is_empty()) {
            (true, _) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.chr.cmp(&other.chr),
        }
    }
}

impl Ord for GenomicCoordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.on_same_chromosome(other) {
            return self
                .pos
                .cmp(&other.pos)
                .then_with(|| self.chr.cmp(&other.chr));
        }
        self.cmp_chromosomes(other)
    }
}

impl PartialOrd for GenomicCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GenomicCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chr, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(chr: &str, pos: u64) -> GenomicCoordinate {
        GenomicCoordinate::new(chr, pos)
    }

    #[test]
    fn test_same_chromosome_orders_by_position() {
        assert!(coord("chr1", 100) < coord("chr1", 200));
        assert!(coord("chr1", 300) > coord("chr1", 200));
        assert_eq!(coord("chr1", 5).cmp(&coord("chr1", 5)), Ordering::Equal);
    }

    #[test]
    fn test_different_chromosomes_order_by_label() {
        assert!(coord("chr1", 900) < coord("chr2", 1));
        // Lexicographic, not natural order.
        assert!(coord("chr10", 1) < coord("chr2", 1));
    }

    #[test]
    fn test_empty_chromosome_sorts_last() {
        let unresolved = GenomicCoordinate::unresolved();
        for other in [coord("chr1", 0), coord("chrY", 1_000_000), coord("a", 3)] {
            assert_eq!(unresolved.cmp(&other), Ordering::Greater);
            assert_eq!(other.cmp(&unresolved), Ordering::Less);
        }
    }

    #[test]
    fn test_ordering_is_strict_weak_on_sample() {
        let mut coords = vec![
            coord("chr2", 10),
            GenomicCoordinate::unresolved(),
            coord("chr1", 50),
            coord("chr1", 10),
            coord("chrX", 0),
        ];
        coords.sort();
        let expected = vec![
            coord("chr1", 10),
            coord("chr1", 50),
            coord("chr2", 10),
            coord("chrX", 0),
            GenomicCoordinate::unresolved(),
        ];
        assert_eq!(coords, expected);

        for a in &coords {
            assert_eq!(a.cmp(a), Ordering::Equal);
            for b in &coords {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
            }
        }
    }

    #[test]
    fn test_distance() {
        assert_eq!(coord("chr1", 100).distance_to(&coord("chr1", 97)), Some(3));
        assert_eq!(coord("chr1", 97).distance_to(&coord("chr1", 100)), Some(3));
        assert_eq!(coord("chr1", 100).distance_to(&coord("chr2", 100)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(coord("chr7", 12345).to_string(), "chr7:12345");
    }
}
