use super::coordinate::GenomicCoordinate;
use crate::utils::util::Result;
use std::fmt;

/// Direction in which the sequence continues past a breakend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    // simple
    INSERTION,
    INVERSION_1,
    INVERSION_2,
    DELETION,
    TANDEM_DUPLICATION,
    INVERTED_TRANSLOCATION_1,
    INVERTED_TRANSLOCATION_2,
    INTERCHROMOSOMAL_TRANSLOCATION_1,
    INTERCHROMOSOMAL_TRANSLOCATION_2,
    BREAKEND_1,
    BREAKEND_2,
    UNKNOWN,
    // complex
    COMPLEX_INVERSION,
    COMPLEX_INVERTED_DUPLICATION,
    COMPLEX_DUPLICATION,
    COMPLEX_INTERCHROMOSOMAL_DUPLICATION,
    COMPLEX_INTERCHROMOSOMAL_INVERTED_DUPLICATION,
    COMPLEX_TRANSLOCATION,
    COMPLEX_INVERTED_TRANSLOCATION,
    COMPLEX_INTERCHROMOSOMAL_TRANSLOCATION,
    COMPLEX_INTERCHROMOSOMAL_INVERTED_TRANSLOCATION,
    COMPLEX_BIG_INSERTION,
    COMPLEX_REPLACED_DELETION,
    COMPLEX_INVERTED_REPLACED_DELETION,
    COMPLEX_VECTOR_INTEGRATION,
}

impl EventType {
    pub const ALL: [EventType; 25] = [
        EventType::INSERTION,
        EventType::INVERSION_1,
        EventType::INVERSION_2,
        EventType::DELETION,
        EventType::TANDEM_DUPLICATION,
        EventType::INVERTED_TRANSLOCATION_1,
        EventType::INVERTED_TRANSLOCATION_2,
        EventType::INTERCHROMOSOMAL_TRANSLOCATION_1,
        EventType::INTERCHROMOSOMAL_TRANSLOCATION_2,
        EventType::BREAKEND_1,
        EventType::BREAKEND_2,
        EventType::UNKNOWN,
        EventType::COMPLEX_INVERSION,
        EventType::COMPLEX_INVERTED_DUPLICATION,
        EventType::COMPLEX_DUPLICATION,
        EventType::COMPLEX_INTERCHROMOSOMAL_DUPLICATION,
        EventType::COMPLEX_INTERCHROMOSOMAL_INVERTED_DUPLICATION,
        EventType::COMPLEX_TRANSLOCATION,
        EventType::COMPLEX_INVERTED_TRANSLOCATION,
        EventType::COMPLEX_INTERCHROMOSOMAL_TRANSLOCATION,
        EventType::COMPLEX_INTERCHROMOSOMAL_INVERTED_TRANSLOCATION,
        EventType::COMPLEX_BIG_INSERTION,
        EventType::COMPLEX_REPLACED_DELETION,
        EventType::COMPLEX_INVERTED_REPLACED_DELETION,
        EventType::COMPLEX_VECTOR_INTEGRATION,
    ];

    /// Symbolic ALT written for this type.
    ///
    /// The two interchromosomal complex types without a dedicated symbol fall back to `<XXX>`,
    /// and the replaced-deletion pair keeps its historical (swapped) symbols; downstream
    /// consumers of the output depend on these exact strings.
    pub fn alt_tag(&self) -> &'static str {
        match self {
            EventType::DELETION => "<DEL>",
            EventType::INSERTION => "<INS>",
            EventType::TANDEM_DUPLICATION => "<TAN>",
            EventType::INVERSION_1 | EventType::INVERSION_2 => "<INV>",
            EventType::INVERTED_TRANSLOCATION_1
            | EventType::INVERTED_TRANSLOCATION_2
            | EventType::INTERCHROMOSOMAL_TRANSLOCATION_1
            | EventType::INTERCHROMOSOMAL_TRANSLOCATION_2 => "<ITX>",
            EventType::BREAKEND_1 | EventType::BREAKEND_2 => "<BE>",
            EventType::COMPLEX_DUPLICATION => "<DUP>",
            EventType::COMPLEX_INVERTED_TRANSLOCATION => "<CVT>",
            EventType::COMPLEX_INVERTED_DUPLICATION => "<CVD>",
            EventType::COMPLEX_TRANSLOCATION => "<TRA>",
            EventType::COMPLEX_INVERSION => "<CIV>",
            EventType::COMPLEX_INTERCHROMOSOMAL_INVERTED_TRANSLOCATION => "<IVT>",
            EventType::COMPLEX_INTERCHROMOSOMAL_INVERTED_DUPLICATION => "<IVD>",
            EventType::COMPLEX_BIG_INSERTION => "<ISB>",
            EventType::COMPLEX_INVERTED_REPLACED_DELETION => "<RDE>",
            EventType::COMPLEX_REPLACED_DELETION => "<IRD>",
            EventType::COMPLEX_VECTOR_INTEGRATION => "<VEC>",
            EventType::UNKNOWN
            | EventType::COMPLEX_INTERCHROMOSOMAL_DUPLICATION
            | EventType::COMPLEX_INTERCHROMOSOMAL_TRANSLOCATION => "<XXX>",
        }
    }

    /// Short code used in SVTYPE INFO fields and log output.
    pub fn code(&self) -> &'static str {
        match self {
            EventType::INSERTION => "INS",
            EventType::INVERSION_1 => "INV1",
            EventType::INVERSION_2 => "INV2",
            EventType::DELETION => "DEL",
            EventType::TANDEM_DUPLICATION => "TAN",
            EventType::INVERTED_TRANSLOCATION_1 => "INVTX1",
            EventType::INVERTED_TRANSLOCATION_2 => "INVTX2",
            EventType::INTERCHROMOSOMAL_TRANSLOCATION_1 => "ITX1",
            EventType::INTERCHROMOSOMAL_TRANSLOCATION_2 => "ITX2",
            EventType::BREAKEND_1 => "BE1",
            EventType::BREAKEND_2 => "BE2",
            EventType::UNKNOWN => "XXX",
            EventType::COMPLEX_INVERSION => "COMPLEX_INVERSION",
            EventType::COMPLEX_INVERTED_DUPLICATION => "COMPLEX_INVERTED_DUPLICATION",
            EventType::COMPLEX_DUPLICATION => "COMPLEX_DUPLICATION",
            EventType::COMPLEX_INTERCHROMOSOMAL_DUPLICATION => {
                "COMPLEX_INTERCHROMOSOMAL_DUPLICATION"
            }
            EventType::COMPLEX_INTERCHROMOSOMAL_INVERTED_DUPLICATION => {
                "COMPLEX_INTERCHROMOSOMAL_INVERTED_DUPLICATION"
            }
            EventType::COMPLEX_TRANSLOCATION => "COMPLEX_TRANSLOCATION",
            EventType::COMPLEX_INVERTED_TRANSLOCATION => "COMPLEX_INVERTED_TRANSLOCATION",
            EventType::COMPLEX_INTERCHROMOSOMAL_TRANSLOCATION => {
                "COMPLEX_INTERCHROMOSOMAL_TRANSLOCATION"
            }
            EventType::COMPLEX_INTERCHROMOSOMAL_INVERTED_TRANSLOCATION => {
                "COMPLEX_INTERCHROMOSOMAL_INVERTED_TRANSLOCATION"
            }
            EventType::COMPLEX_BIG_INSERTION => "COMPLEX_BIG_INSERTION",
            EventType::COMPLEX_REPLACED_DELETION => "COMPLEX_REPLACED_DELETION",
            EventType::COMPLEX_INVERTED_REPLACED_DELETION => "COMPLEX_INVERTED_REPLACED_DELETION",
            EventType::COMPLEX_VECTOR_INTEGRATION => "VECTOR_PARTS",
        }
    }

    /// Complex types whose display form leads with the insertion point.
    pub fn has_insertion_point(&self) -> bool {
        matches!(
            self,
            EventType::COMPLEX_TRANSLOCATION
                | EventType::COMPLEX_DUPLICATION
                | EventType::COMPLEX_INTERCHROMOSOMAL_DUPLICATION
                | EventType::COMPLEX_INTERCHROMOSOMAL_TRANSLOCATION
                | EventType::COMPLEX_INVERTED_DUPLICATION
                | EventType::COMPLEX_INVERTED_TRANSLOCATION
                | EventType::COMPLEX_INTERCHROMOSOMAL_INVERTED_DUPLICATION
                | EventType::COMPLEX_INTERCHROMOSOMAL_INVERTED_TRANSLOCATION
        )
    }

    pub fn from_code(code: &str) -> Result<Self> {
        EventType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| crate::svfuse_error!("Invalid event type code: {code:?}"))
    }
}

impl std::str::FromStr for EventType {
    type Err = crate::error::SvfuseError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Canonical type of the edge between two breakends.
///
/// The pair is put in coordinate order first, so swapping the two (coordinate, strand) pairs
/// never changes the result. Coincident coordinates put the reverse strand first. A missing
/// second strand marks a single-ended breakend.
pub fn classify(
    c1: &GenomicCoordinate,
    o1: Strand,
    c2: &GenomicCoordinate,
    o2: Option<Strand>,
) -> EventType {
    let (c1, o1, c2, o2) = match o2 {
        Some(o2) if c1 > c2 || (c1 == c2 && o1 == Strand::Forward && o2 == Strand::Reverse) => {
            (c2, o2, c1, Some(o1))
        }
        _ => (c1, o1, c2, o2),
    };

    let Some(o2) = o2 else {
        return match o1 {
            Strand::Forward => EventType::BREAKEND_1,
            Strand::Reverse => EventType::BREAKEND_2,
        };
    };

    let same_chromosome = c1.on_same_chromosome(c2);
    if o1 == o2 {
        return match (same_chromosome, o1) {
            (true, Strand::Forward) => EventType::INVERSION_1,
            (true, Strand::Reverse) => EventType::INVERSION_2,
            (false, Strand::Forward) => EventType::INVERTED_TRANSLOCATION_1,
            (false, Strand::Reverse) => EventType::INVERTED_TRANSLOCATION_2,
        };
    }

    let joins_forward = match o1 {
        Strand::Forward => c1 < c2,
        Strand::Reverse => c1 >= c2,
    };
    match (same_chromosome, joins_forward) {
        (true, true) => EventType::DELETION,
        (true, false) => EventType::TANDEM_DUPLICATION,
        (false, true) => EventType::INTERCHROMOSOMAL_TRANSLOCATION_1,
        (false, false) => EventType::INTERCHROMOSOMAL_TRANSLOCATION_2,
    }
}
