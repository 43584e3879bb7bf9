use super::{parse_pos, required, synthesized_record, Breakpoint, EdgeSignature};
use crate::{
    core::{
        coordinate::GenomicCoordinate,
        event::CallerKind,
        svtype::{EventType, Strand},
    },
    error::SvfuseError,
    utils::util::Result,
};

const FORMAT: &str = "crest";

/// CREST reports soft-clip strands rather than join orientations, so its type word
/// is resolved here instead of going through the breakend classifier.
fn resolve_type(
    kind: &str,
    c1: &GenomicCoordinate,
    o1: Strand,
    c2: &GenomicCoordinate,
    o2: Strand,
) -> EventType {
    match kind {
        "DEL" => EventType::DELETION,
        "INS" => EventType::TANDEM_DUPLICATION,
        "INV" => EventType::COMPLEX_INVERSION,
        "ITX" => match o1 {
            Strand::Forward => EventType::INVERSION_1,
            Strand::Reverse => EventType::INVERSION_2,
        },
        "CTX" => match (o1, o2) {
            (Strand::Forward, Strand::Forward) if c1 < c2 => {
                EventType::INTERCHROMOSOMAL_TRANSLOCATION_1
            }
            (Strand::Forward, Strand::Forward) => EventType::INTERCHROMOSOMAL_TRANSLOCATION_2,
            (Strand::Reverse, Strand::Reverse) => EventType::UNKNOWN,
            (Strand::Forward, Strand::Reverse) => EventType::INVERTED_TRANSLOCATION_1,
            (Strand::Reverse, Strand::Forward) => EventType::INVERTED_TRANSLOCATION_2,
        },
        _ => {
            log::debug!("{FORMAT}: unrecognized type word {kind:?}");
            EventType::UNKNOWN
        }
    }
}

fn parse_strand(field: &str, name: &str) -> Result<Strand> {
    Strand::from_symbol(field).ok_or_else(|| {
        SvfuseError::malformed(FORMAT, format!("{name} {field:?} is not + or -"))
    })
}

/// `chr1  pos1  ori1  count1  chr2  pos2  ori2  count2  type ...`
pub(super) fn parse(line: &str, record_number: usize) -> Result<Breakpoint> {
    let fields: Vec<&str> = line.split('\t').collect();
    let chr1 = required(FORMAT, &fields, 0, "left chromosome")?;
    let p1 = parse_pos(FORMAT, "left position", required(FORMAT, &fields, 1, "left position")?)?;
    let o1 = parse_strand(required(FORMAT, &fields, 2, "left orientation")?, "left orientation")?;
    let chr2 = required(FORMAT, &fields, 4, "right chromosome")?;
    let p2 = parse_pos(FORMAT, "right position", required(FORMAT, &fields, 5, "right position")?)?;
    let o2 = parse_strand(required(FORMAT, &fields, 6, "right orientation")?, "right orientation")?;
    let kind = required(FORMAT, &fields, 8, "type")?.trim();

    let c1 = GenomicCoordinate::new(chr1, p1);
    let c2 = GenomicCoordinate::new(chr2, p2);
    let event_type = resolve_type(kind, &c1, o1, &c2, o2);
    Ok(Breakpoint {
        c1,
        record: synthesized_record(format!("CRT{record_number}"), event_type, &c2),
        c2,
        signature: EdgeSignature::Resolved(event_type),
        caller: CallerKind::Crest,
        annotation: None,
    })
}
