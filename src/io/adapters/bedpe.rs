use super::{parse_pos, required, synthesized_info, Breakpoint, EdgeSignature};
use crate::{
    core::{
        coordinate::GenomicCoordinate,
        event::{CallerKind, RecordFields},
        svtype::{EventType, Strand},
    },
    utils::util::Result,
};

const FORMAT: &str = "bedpe";

/// `chrom1 start1 end1 chrom2 start2 end2 name score strand1 strand2 [info]`
pub(super) fn parse(line: &str) -> Result<Breakpoint> {
    let fields: Vec<&str> = line.split('\t').collect();
    let chr1 = required(FORMAT, &fields, 0, "chrom1")?;
    let start1 = parse_pos(FORMAT, "start1", required(FORMAT, &fields, 1, "start1")?)?;
    let chr2 = required(FORMAT, &fields, 3, "chrom2")?;
    let start2 = parse_pos(FORMAT, "start2", required(FORMAT, &fields, 4, "start2")?)?;
    let name = required(FORMAT, &fields, 6, "name")?;
    let score = required(FORMAT, &fields, 7, "score")?;
    let strand1 = required(FORMAT, &fields, 8, "strand1")?;
    let strand2 = required(FORMAT, &fields, 9, "strand2")?;
    let extra = fields.get(10).map(|info| info.trim()).unwrap_or_default();

    let c1 = GenomicCoordinate::new(chr1, start1);
    let c2 = GenomicCoordinate::new(chr2, start2);
    let signature = match (Strand::from_symbol(strand1), Strand::from_symbol(strand2)) {
        (Some(o1), Some(o2)) => EdgeSignature::Stranded(o1, Some(o2)),
        _ => {
            log::debug!("{FORMAT}: {name} has unstranded breakends");
            EdgeSignature::Resolved(EventType::UNKNOWN)
        }
    };

    let mut breakpoint = Breakpoint {
        c1,
        c2,
        signature,
        caller: CallerKind::Bedpe,
        record: RecordFields::default(),
        annotation: None,
    };
    let event_type = breakpoint.event_type();
    let svinfo = synthesized_info(event_type.code(), &breakpoint.c2);
    breakpoint.record = RecordFields {
        id: name.to_string(),
        ref_allele: ".".to_string(),
        alt: event_type.alt_tag().to_string(),
        qual: score.to_string(),
        filter: Some("PASS".to_string()),
        info: if extra.is_empty() || extra == "." {
            svinfo
        } else {
            format!("{extra};{svinfo}")
        },
    };
    Ok(breakpoint)
}
