use super::{parse_pos, Breakpoint, EdgeSignature, VcfColumns};
use crate::{
    core::{
        coordinate::GenomicCoordinate,
        event::CallerKind,
        svtype::{EventType, Strand},
    },
    error::SvfuseError,
    utils::util::Result,
};

const FORMAT: &str = "metasv";

/// Orientation from a BreakDancer read-count string such as `12+3-`.
///
/// More forward than reverse reads gives `+`.
fn breakdancer_orientation(counts: &str) -> Option<Strand> {
    let mut numbers = counts
        .split(['+', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u32>().ok());
    let forward = numbers.next()??;
    let reverse = numbers.next().flatten().unwrap_or(0);
    Some(if forward > reverse {
        Strand::Forward
    } else {
        Strand::Reverse
    })
}

fn mate_coordinate(columns: &VcfColumns<'_>) -> Result<GenomicCoordinate> {
    let chr2 = columns.info_value("CHR2").unwrap_or(columns.chrom);
    if let Some(end) = columns.info_value("END") {
        return Ok(GenomicCoordinate::new(chr2, parse_pos(FORMAT, "END", end)?));
    }
    if let Some(svlen) = columns.info_value("SVLEN") {
        let svlen = svlen.trim().parse::<i64>().map_err(|e| {
            SvfuseError::malformed(FORMAT, format!("invalid SVLEN {svlen:?}: {e}"))
        })?;
        return Ok(GenomicCoordinate::new(
            chr2,
            columns.pos + svlen.unsigned_abs(),
        ));
    }
    Err(SvfuseError::malformed(
        FORMAT,
        format!("{} has neither END nor SVLEN", columns.id),
    ))
}

pub(super) fn parse(line: &str) -> Result<Breakpoint> {
    let columns = VcfColumns::parse(FORMAT, line)?;
    let c2 = mate_coordinate(&columns)?;

    let signature = match columns.alt {
        "<DEL>" => EdgeSignature::Resolved(EventType::DELETION),
        "<INS>" => EdgeSignature::Resolved(EventType::INSERTION),
        "<INV>" => EdgeSignature::Resolved(EventType::COMPLEX_INVERSION),
        "<DUP>" => EdgeSignature::Resolved(EventType::TANDEM_DUPLICATION),
        "<ITX>" | "<CTX>" => {
            let o1 = columns
                .info_value("BD_ORI1")
                .and_then(breakdancer_orientation);
            let o2 = columns
                .info_value("BD_ORI2")
                .and_then(breakdancer_orientation);
            match (o1, o2) {
                (Some(o1), Some(o2)) => EdgeSignature::Stranded(o1, Some(o2)),
                _ => {
                    log::debug!("{FORMAT}: {} lacks BD_ORI1/BD_ORI2", columns.id);
                    EdgeSignature::Resolved(EventType::UNKNOWN)
                }
            }
        }
        _ => EdgeSignature::Resolved(EventType::UNKNOWN),
    };

    Ok(Breakpoint {
        c1: columns.coordinate(),
        c2,
        signature,
        caller: CallerKind::MetaSv,
        record: columns.record(),
        annotation: None,
    })
}
