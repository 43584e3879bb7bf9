use super::{parse_pos, required, synthesized_record, Breakpoint, EdgeSignature, VcfColumns};
use crate::{
    core::{
        coordinate::GenomicCoordinate,
        event::CallerKind,
        svtype::{EventType, Strand},
    },
    error::SvfuseError,
    utils::util::Result,
};

/// `chr  start  end  size  support  mapq  >Type_id<`
pub(super) fn parse_legacy(line: &str, record_number: usize) -> Result<Breakpoint> {
    const FORMAT: &str = "delly-legacy";
    let fields: Vec<&str> = line
        .split(['\t', ':'])
        .filter(|field| !field.is_empty())
        .collect();
    let chr = required(FORMAT, &fields, 0, "chromosome")?;
    let start = parse_pos(FORMAT, "start", required(FORMAT, &fields, 1, "start")?)?;
    let end = parse_pos(FORMAT, "end", required(FORMAT, &fields, 2, "end")?)?;
    let tag = required(FORMAT, &fields, 6, "type tag")?;

    let label = tag.trim().trim_start_matches('>').trim_end_matches('<');
    let event_type = match label.split_once('_') {
        Some(("Deletion", _)) => EventType::DELETION,
        Some(("Duplication", _)) => EventType::TANDEM_DUPLICATION,
        Some(("Inversion", rest)) if rest.starts_with('0') => EventType::INVERSION_1,
        Some(("Inversion", rest)) if rest.starts_with('1') => EventType::INVERSION_2,
        _ => {
            log::debug!("{FORMAT}: unrecognized type tag {tag:?}");
            EventType::UNKNOWN
        }
    };

    let c2 = GenomicCoordinate::new(chr, end);
    let id = if label.is_empty() {
        format!("DELLY{record_number}")
    } else {
        label.to_string()
    };
    Ok(Breakpoint {
        c1: GenomicCoordinate::new(chr, start),
        record: synthesized_record(id, event_type, &c2),
        c2,
        signature: EdgeSignature::Resolved(event_type),
        caller: CallerKind::Delly,
        annotation: None,
    })
}

/// `CT=3to5` style connection type: 3' is `+`, 5' is `-`.
fn connection_strands(ct: &str) -> Option<(Strand, Strand)> {
    let strand = |end: &str| match end {
        "3" => Some(Strand::Forward),
        "5" => Some(Strand::Reverse),
        _ => None,
    };
    let (left, right) = ct.split_once("to")?;
    Some((strand(left)?, strand(right)?))
}

/// VCF output of Delly and Delly2, read through the `CHR2`, `END` and `CT` INFO keys.
pub(super) fn parse_vcf(line: &str, caller: CallerKind) -> Result<Breakpoint> {
    let format = match caller {
        CallerKind::Delly2 => "delly2",
        _ => "delly",
    };
    let columns = VcfColumns::parse(format, line)?;
    let chr2 = columns.info_value("CHR2").unwrap_or(columns.chrom);
    let end = columns
        .info_value("END")
        .ok_or_else(|| SvfuseError::malformed(format, format!("{} has no END", columns.id)))?;
    let c2 = GenomicCoordinate::new(chr2, parse_pos(format, "END", end)?);

    let signature = match columns.info_value("CT").and_then(connection_strands) {
        Some((o1, o2)) => EdgeSignature::Stranded(o1, Some(o2)),
        None if columns.alt == "<INS>" => EdgeSignature::Resolved(EventType::INSERTION),
        None => {
            log::debug!("{format}: {} has no usable CT", columns.id);
            EdgeSignature::Resolved(EventType::UNKNOWN)
        }
    };

    Ok(Breakpoint {
        c1: columns.coordinate(),
        c2,
        signature,
        caller,
        record: columns.record(),
        annotation: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_type_tags() {
        let cases = [
            (">Deletion_00000001<", EventType::DELETION),
            (">Duplication_00000002<", EventType::TANDEM_DUPLICATION),
            (">Inversion_0_00000003<", EventType::INVERSION_1),
            (">Inversion_1_00000004<", EventType::INVERSION_2),
            (">Translocation_00000005<", EventType::UNKNOWN),
        ];
        for (tag, expected) in cases {
            let line = format!("chr1\t100\t500\t400\t5\t30\t{tag}");
            let bp = parse_legacy(&line, 1).unwrap();
            assert_eq!(bp.event_type(), expected, "{tag}");
            assert_eq!(bp.c1, GenomicCoordinate::new("chr1", 100));
            assert_eq!(bp.c2, GenomicCoordinate::new("chr1", 500));
        }
    }

    #[test]
    fn test_legacy_record_fields() {
        let bp = parse_legacy("chr4\t10\t90\t80\t3\t60\t>Deletion_00000011<", 3).unwrap();
        assert_eq!(bp.record.id, "Deletion_00000011");
        assert_eq!(bp.record.alt, "<DEL>");
        assert_eq!(bp.record.info, "SVTYPE=DEL;CHR2=chr4;END=90");
        assert!(parse_legacy("chr4\t10\t90", 3).is_err());
    }

    #[test]
    fn test_connection_strands() {
        assert_eq!(
            connection_strands("3to5"),
            Some((Strand::Forward, Strand::Reverse))
        );
        assert_eq!(
            connection_strands("5to5"),
            Some((Strand::Reverse, Strand::Reverse))
        );
        assert_eq!(connection_strands("NtoN"), None);
        assert_eq!(connection_strands("35"), None);
    }

    #[test]
    fn test_vcf_keys_are_found_by_name() {
        // Same call, INFO keys in different orders.
        let delly = "chr1\t1000\tDEL00000001\tN\t<DEL>\t60\tPASS\tPRECISE;SVTYPE=DEL;CHR2=chr1;END=5000;CT=3to5";
        let delly2 = "chr1\t1000\tDEL00000001\tN\t<DEL>\t60\tPASS\tCT=3to5;PRECISE;END=5000;SVTYPE=DEL;CHR2=chr1";
        for (line, caller) in [(delly, CallerKind::Delly), (delly2, CallerKind::Delly2)] {
            let bp = parse_vcf(line, caller).unwrap();
            assert_eq!(bp.event_type(), EventType::DELETION);
            assert_eq!(bp.c2, GenomicCoordinate::new("chr1", 5000));
            assert_eq!(bp.caller, caller);
            assert_eq!(bp.record.info, line.split('\t').nth(7).unwrap());
        }
    }

    #[test]
    fn test_vcf_translocation_and_insertion() {
        let line = "chr2\t300\tBND00000001\tN\t<TRA>\t.\tPASS\tSVTYPE=BND;CHR2=chr7;END=800;CT=5to3";
        let bp = parse_vcf(line, CallerKind::Delly).unwrap();
        assert_eq!(bp.c2, GenomicCoordinate::new("chr7", 800));
        // (chr2:300 -) -> (chr7:800 +)
        assert_eq!(bp.event_type(), EventType::INTERCHROMOSOMAL_TRANSLOCATION_2);

        let line = "chr2\t300\tINS00000001\tN\t<INS>\t.\tPASS\tSVTYPE=INS;END=301;CT=NtoN";
        let bp = parse_vcf(line, CallerKind::Delly).unwrap();
        assert_eq!(bp.event_type(), EventType::INSERTION);
        assert_eq!(bp.c2, GenomicCoordinate::new("chr2", 301));

        let line = "chr2\t300\tX\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;CT=3to5";
        assert!(parse_vcf(line, CallerKind::Delly).is_err());
    }
}
