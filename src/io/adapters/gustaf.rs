use super::{info_value, parse_pos, required, synthesized_record, Breakpoint, EdgeSignature};
use crate::{
    core::{coordinate::GenomicCoordinate, event::CallerKind, svtype::EventType},
    error::SvfuseError,
    utils::util::Result,
};

const FORMAT: &str = "gustaf";

fn resolve_type(kind: &str, strand: &str) -> EventType {
    match kind {
        "deletion" => EventType::DELETION,
        "duplication" => EventType::TANDEM_DUPLICATION,
        "inversion" | "ITX" if strand == "-" => EventType::INVERSION_2,
        "inversion" | "ITX" => EventType::INVERSION_1,
        "insertion" => EventType::INSERTION,
        _ => {
            log::debug!("{FORMAT}: unrecognized type {kind:?}");
            EventType::UNKNOWN
        }
    }
}

/// GFF rows: `seqid source type start end score strand phase attributes`.
///
/// The mate comes from `endChr`/`endPos` attributes for translocations and is the
/// row's own `end` on the same chromosome when a `size` attribute is given instead.
pub(super) fn parse(line: &str, record_number: usize) -> Result<Breakpoint> {
    let fields: Vec<&str> = line.split('\t').collect();
    let chr1 = required(FORMAT, &fields, 0, "seqid")?;
    let kind = required(FORMAT, &fields, 2, "type")?.trim();
    let start = parse_pos(FORMAT, "start", required(FORMAT, &fields, 3, "start")?)?;
    let end = parse_pos(FORMAT, "end", required(FORMAT, &fields, 4, "end")?)?;
    let score = required(FORMAT, &fields, 5, "score")?;
    let strand = required(FORMAT, &fields, 6, "strand")?.trim();
    let attributes = required(FORMAT, &fields, 8, "attributes")?.trim();

    let c2 = match (
        info_value(attributes, "endChr"),
        info_value(attributes, "endPos"),
    ) {
        (Some(chr2), Some(pos2)) => {
            GenomicCoordinate::new(chr2, parse_pos(FORMAT, "endPos", pos2)?)
        }
        _ if info_value(attributes, "size").is_some() => GenomicCoordinate::new(chr1, end),
        _ => {
            return Err(SvfuseError::malformed(
                FORMAT,
                format!("attributes {attributes:?} carry neither endChr/endPos nor size"),
            ))
        }
    };

    let event_type = resolve_type(kind, strand);
    let id = info_value(attributes, "ID")
        .map(|id| id.to_string())
        .unwrap_or_else(|| format!("GUS{record_number}"));
    let mut record = synthesized_record(id, event_type, &c2);
    record.qual = score.to_string();

    Ok(Breakpoint {
        c1: GenomicCoordinate::new(chr1, start),
        c2,
        signature: EdgeSignature::Resolved(event_type),
        caller: CallerKind::Gustaf,
        record,
        annotation: None,
    })
}
