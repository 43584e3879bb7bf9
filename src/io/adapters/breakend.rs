use super::{info_value, synthesized_info, Breakpoint, EdgeSignature, VcfColumns};
use crate::{
    core::{coordinate::GenomicCoordinate, event::CallerKind, svtype::EventType, svtype::Strand},
    error::SvfuseError,
    utils::util::Result,
};

/// Decoded breakend-notation ALT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BreakendAlt {
    Paired {
        mate: GenomicCoordinate,
        o1: Strand,
        o2: Strand,
    },
    /// `t.` or `.t`: the mate is not known.
    Single { o1: Strand },
}

/// Decodes `t[p[`, `t]p]`, `]p]t`, `[p[t` and single breakends.
///
/// Returns `Ok(None)` when the ALT is not breakend notation at all.
pub(crate) fn parse_breakend_alt(format: &str, alt: &str) -> Result<Option<BreakendAlt>> {
    let Some(first_bracket_idx) = alt.find(['[', ']']) else {
        if alt.len() > 1 && alt.starts_with('.') {
            return Ok(Some(BreakendAlt::Single {
                o1: Strand::Reverse,
            }));
        }
        if alt.len() > 1 && alt.ends_with('.') {
            return Ok(Some(BreakendAlt::Single {
                o1: Strand::Forward,
            }));
        }
        return Ok(None);
    };
    let bracket = alt.as_bytes()[first_bracket_idx] as char;
    let second_bracket_idx = alt[first_bracket_idx + 1..]
        .find(bracket)
        .map(|rel| rel + first_bracket_idx + 1)
        .ok_or_else(|| {
            SvfuseError::malformed(
                format,
                format!("breakend ALT is missing closing bracket '{bracket}': {alt:?}"),
            )
        })?;

    let mate = &alt[first_bracket_idx + 1..second_bracket_idx];
    let (contig, pos) = mate.rsplit_once(':').ok_or_else(|| {
        SvfuseError::malformed(
            format,
            format!("breakend mate does not look like contig:pos: {mate:?}"),
        )
    })?;
    let pos = super::parse_pos(format, "breakend mate position", pos)?;

    let o1 = if first_bracket_idx == 0 {
        Strand::Reverse
    } else {
        Strand::Forward
    };
    let o2 = if bracket == ']' {
        Strand::Forward
    } else {
        Strand::Reverse
    };
    Ok(Some(BreakendAlt::Paired {
        mate: GenomicCoordinate::new(contig, pos),
        o1,
        o2,
    }))
}

fn breakend_breakpoint(
    format: &str,
    columns: &VcfColumns<'_>,
    caller: CallerKind,
) -> Result<Breakpoint> {
    let (c2, signature) = match parse_breakend_alt(format, columns.alt)? {
        Some(BreakendAlt::Paired { mate, o1, o2 }) => (mate, EdgeSignature::Stranded(o1, Some(o2))),
        Some(BreakendAlt::Single { o1 }) => {
            (GenomicCoordinate::unresolved(), EdgeSignature::Stranded(o1, None))
        }
        None => {
            log::debug!(
                "{format}: ALT {:?} of {} is not breakend notation",
                columns.alt,
                columns.id
            );
            (
                GenomicCoordinate::unresolved(),
                EdgeSignature::Resolved(EventType::UNKNOWN),
            )
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

/// GRIDSS INFO is replaced by the resolved type and mate; calls without a decodable
/// orientation carry no INFO.
pub(super) fn parse_gridss(line: &str) -> Result<Breakpoint> {
    let columns = VcfColumns::parse("gridss", line)?;
    let mut breakpoint = breakend_breakpoint("gridss", &columns, CallerKind::Gridss)?;
    breakpoint.record.info = match breakpoint.signature {
        EdgeSignature::Stranded(..) => {
            synthesized_info(breakpoint.event_type().code(), &breakpoint.c2)
        }
        EdgeSignature::Resolved(_) => String::new(),
    };
    Ok(breakpoint)
}

pub(super) fn parse_lumpy(line: &str) -> Result<Breakpoint> {
    const FORMAT: &str = "lumpy";
    let columns = VcfColumns::parse(FORMAT, line)?;
    let symbolic_end = || -> Result<GenomicCoordinate> {
        let end = columns.info_value("END").ok_or_else(|| {
            SvfuseError::malformed(FORMAT, format!("{} has no END", columns.alt))
        })?;
        Ok(GenomicCoordinate::new(
            columns.chrom,
            super::parse_pos(FORMAT, "END", end)?,
        ))
    };

    let (c2, signature) = match columns.alt {
        "<INV>" => (
            symbolic_end()?,
            EdgeSignature::Resolved(EventType::COMPLEX_INVERSION),
        ),
        "<DEL>" | "<DUP>" => {
            let (o1, o2) = lumpy_strands(columns.info)?;
            (symbolic_end()?, EdgeSignature::Stranded(o1, Some(o2)))
        }
        _ => return breakend_breakpoint(FORMAT, &columns, CallerKind::Lumpy),
    };
    Ok(Breakpoint {
        c1: columns.coordinate(),
        c2,
        signature,
        caller: CallerKind::Lumpy,
        record: columns.record(),
        annotation: None,
    })
}

/// First orientation pair of `STRANDS=+-:4[,-+:2]`.
fn lumpy_strands(info: &str) -> Result<(Strand, Strand)> {
    let strands = info_value(info, "STRANDS")
        .ok_or_else(|| SvfuseError::malformed("lumpy", "symbolic ALT without STRANDS"))?;
    match (
        strands.get(0..1).and_then(Strand::from_symbol),
        strands.get(1..2).and_then(Strand::from_symbol),
    ) {
        (Some(o1), Some(o2)) => Ok((o1, o2)),
        _ => Err(SvfuseError::malformed(
            "lumpy",
            format!("unreadable STRANDS value {strands:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vcf_line(chrom: &str, pos: u64, alt: &str, info: &str) -> String {
        format!("{chrom}\t{pos}\tbnd1\tN\t{alt}\t42.5\tPASS\t{info}")
    }

    #[test]
    fn test_breakend_alt_orientations() {
        let cases = [
            ("]chr1:500]N", Strand::Reverse, Strand::Forward),
            ("N]chr1:500]", Strand::Forward, Strand::Forward),
            ("[chr1:500[N", Strand::Reverse, Strand::Reverse),
            ("N[chr1:500[", Strand::Forward, Strand::Reverse),
        ];
        for (alt, o1, o2) in cases {
            let decoded = parse_breakend_alt("gridss", alt).unwrap();
            assert_eq!(
                decoded,
                Some(BreakendAlt::Paired {
                    mate: GenomicCoordinate::new("chr1", 500),
                    o1,
                    o2
                }),
                "{alt}"
            );
        }
    }

    #[test]
    fn test_breakend_alt_contig_with_colon() {
        let decoded = parse_breakend_alt("gridss", "N[HLA-A*01:01:01:01:120[").unwrap();
        let Some(BreakendAlt::Paired { mate, .. }) = decoded else {
            panic!("expected paired breakend");
        };
        assert_eq!(mate, GenomicCoordinate::new("HLA-A*01:01:01:01", 120));
    }

    #[test]
    fn test_breakend_alt_errors_and_non_breakends() {
        assert!(parse_breakend_alt("gridss", "N[chr1:500").is_err());
        assert!(parse_breakend_alt("gridss", "N[chr1-500[").is_err());
        assert!(parse_breakend_alt("gridss", "N[chr1:x[").is_err());
        assert_eq!(parse_breakend_alt("gridss", "<DEL>").unwrap(), None);
        assert_eq!(parse_breakend_alt("gridss", ".").unwrap(), None);
    }

    #[test]
    fn test_gridss_paired_breakend_is_tandem_duplication() {
        let bp = parse_gridss(&vcf_line("chr1", 100, "]chr1:500]N", "SVTYPE=BND")).unwrap();
        assert_eq!(bp.event_type(), EventType::TANDEM_DUPLICATION);
        let event = bp.into_event();
        assert_eq!(event.c1(), &GenomicCoordinate::new("chr1", 100));
        assert_eq!(event.c2(), &GenomicCoordinate::new("chr1", 500));
        assert_eq!(event.id(), "bnd1");
        assert_eq!(event.record.qual, "42.5");
        assert_eq!(event.record.info, "SVTYPE=TAN;CHR2=chr1;END=500");
        assert!(event.callers.contains(&CallerKind::Gridss));
    }

    #[test]
    fn test_gridss_info_without_orientation_is_empty() {
        let bp = parse_gridss(&vcf_line("chr2", 700, "<INS>", "SVTYPE=INS")).unwrap();
        assert_eq!(bp.event_type(), EventType::UNKNOWN);
        assert_eq!(bp.record.info, "");
    }

    #[test]
    fn test_gridss_single_breakend() {
        let bp = parse_gridss(&vcf_line("chr2", 700, "A.", "SVTYPE=BND")).unwrap();
        assert!(bp.c2.is_unresolved());
        assert_eq!(bp.event_type(), EventType::BREAKEND_1);

        let bp = parse_gridss(&vcf_line("chr2", 700, ".A", "SVTYPE=BND")).unwrap();
        assert_eq!(bp.event_type(), EventType::BREAKEND_2);
    }

    #[test]
    fn test_gridss_interchromosomal() {
        let bp = parse_gridss(&vcf_line("chr2", 100, "N]chr1:500]", "SVTYPE=BND")).unwrap();
        assert_eq!(bp.event_type(), EventType::INVERTED_TRANSLOCATION_1);
    }

    #[test]
    fn test_lumpy_symbolic_alts() {
        let bp = parse_lumpy(&vcf_line(
            "chr3",
            1000,
            "<DEL>",
            "SVTYPE=DEL;SVLEN=-400;END=1400;STRANDS=+-:7",
        ))
        .unwrap();
        assert_eq!(bp.event_type(), EventType::DELETION);
        assert_eq!(bp.c2, GenomicCoordinate::new("chr3", 1400));

        let bp = parse_lumpy(&vcf_line(
            "chr3",
            1000,
            "<DUP>",
            "SVTYPE=DUP;END=1400;STRANDS=-+:3",
        ))
        .unwrap();
        assert_eq!(bp.event_type(), EventType::TANDEM_DUPLICATION);

        let bp = parse_lumpy(&vcf_line(
            "chr3",
            1000,
            "<INV>",
            "SVTYPE=INV;END=5000;STRANDS=++:3,--:2",
        ))
        .unwrap();
        assert_eq!(bp.event_type(), EventType::COMPLEX_INVERSION);
        assert!(bp.into_event().composition.is_none());
    }

    #[test]
    fn test_lumpy_breakend_and_missing_fields() {
        let bp = parse_lumpy(&vcf_line("chr1", 100, "N[chr1:900[", "SVTYPE=BND")).unwrap();
        assert_eq!(bp.event_type(), EventType::DELETION);
        assert!(parse_lumpy(&vcf_line("chr1", 100, "<DEL>", "END=300")).is_err());
        assert!(parse_lumpy(&vcf_line("chr1", 100, "<DEL>", "STRANDS=+-:2")).is_err());
    }
}
