use super::{parse_pos, required, synthesized_record, Breakpoint, EdgeSignature};
use crate::{
    core::{coordinate::GenomicCoordinate, event::CallerKind, svtype::Strand},
    error::SvfuseError,
    utils::util::Result,
};

const FORMAT: &str = "socrates";
const INSERTED_SEQUENCE: &str = "Inserted sequence: ";
/// Free-text comment column, 20 columns after the second orientation.
const COMMENT_COLUMN: usize = 24;

fn parse_locus(field: &str, name: &str) -> Result<GenomicCoordinate> {
    let (chr, pos) = field.trim().rsplit_once(':').ok_or_else(|| {
        SvfuseError::malformed(FORMAT, format!("{name} {field:?} is not chr:pos"))
    })?;
    Ok(GenomicCoordinate::new(chr, parse_pos(FORMAT, name, pos)?))
}

fn parse_strand(field: &str, name: &str) -> Result<Strand> {
    Strand::from_symbol(field).ok_or_else(|| {
        SvfuseError::malformed(FORMAT, format!("{name} {field:?} is not + or -"))
    })
}

/// Paired realignment rows: `chr:pos  dir  consensus  chr:pos  dir  ...`.
pub(super) fn parse(line: &str, record_number: usize) -> Result<Breakpoint> {
    let fields: Vec<&str> = line.split('\t').collect();
    let c1 = parse_locus(required(FORMAT, &fields, 0, "first locus")?, "first locus")?;
    let o1 = parse_strand(required(FORMAT, &fields, 1, "first orientation")?, "first orientation")?;
    let c2 = parse_locus(required(FORMAT, &fields, 3, "second locus")?, "second locus")?;
    let o2 = parse_strand(required(FORMAT, &fields, 4, "second orientation")?, "second orientation")?;

    let annotation = fields
        .get(COMMENT_COLUMN)
        .and_then(|comment| comment.trim().strip_prefix(INSERTED_SEQUENCE))
        .map(|sequence| sequence.trim().to_string())
        .filter(|sequence| !sequence.is_empty());

    let mut breakpoint = Breakpoint {
        c1,
        c2,
        signature: EdgeSignature::Stranded(o1, Some(o2)),
        caller: CallerKind::Socrates,
        record: Default::default(),
        annotation,
    };
    breakpoint.record = synthesized_record(
        format!("SOC{record_number}"),
        breakpoint.event_type(),
        &breakpoint.c2,
    );
    Ok(breakpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::svtype::EventType;

    fn row(c1: &str, o1: &str, c2: &str, o2: &str, comment: Option<&str>) -> String {
        let mut fields = vec![c1, o1, "ACGTTGCA", c2, o2];
        let filler = vec![""; COMMENT_COLUMN - fields.len()];
        fields.extend(filler);
        if let Some(comment) = comment {
            fields.push(comment);
        }
        fields.join("\t")
    }

    #[test]
    fn test_parse_deletion_row() {
        let bp = parse(&row("chr1:1000", "+", "chr1:2000", "-", None), 7).unwrap();
        assert_eq!(bp.event_type(), EventType::DELETION);
        assert_eq!(bp.record.id, "SOC7");
        assert_eq!(bp.record.alt, "<DEL>");
        assert_eq!(bp.record.ref_allele, ".");
        assert_eq!(bp.record.filter(), "PASS");
        assert_eq!(bp.record.info, "SVTYPE=DEL;CHR2=chr1;END=2000");
        assert_eq!(bp.annotation, None);
    }

    #[test]
    fn test_parse_inserted_sequence_comment() {
        let bp = parse(
            &row(
                "chr2:500",
                "+",
                "chr2:500",
                "-",
                Some("Inserted sequence: GATTACA"),
            ),
            1,
        )
        .unwrap();
        assert_eq!(bp.annotation.as_deref(), Some("GATTACA"));
        let other = parse(
            &row("chr2:500", "+", "chr2:900", "-", Some("short SC cluster")),
            2,
        )
        .unwrap();
        assert_eq!(other.annotation, None);
    }

    #[test]
    fn test_parse_rejects_malformed_rows() {
        assert!(parse("chr1:1000\t+", 1).is_err());
        assert!(parse("chr1-1000\t+\tAC\tchr1:2000\t-", 1).is_err());
        assert!(parse("chr1:1000\tx\tAC\tchr1:2000\t-", 1).is_err());
    }
}
