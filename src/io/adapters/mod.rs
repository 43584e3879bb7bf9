mod bedpe;
mod breakend;
mod crest;
mod delly;
mod gustaf;
mod metasv;
mod socrates;

use crate::{
    core::{
        coordinate::GenomicCoordinate,
        event::{CallerKind, Event, RecordFields},
        svtype::{classify, EventType, Strand},
    },
    error::SvfuseError,
    utils::util::Result,
};
use std::{fmt, str::FromStr};

/// Caller-specific text encodings understood by svfuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    SocratesLegacy,
    Socrates,
    DellyLegacy,
    Delly,
    Delly2,
    MetaSv,
    Bedpe,
    CrestLegacy,
    Crest,
    Gustaf,
    Gridss,
    Lumpy,
}

impl InputFormat {
    pub const ALL: [InputFormat; 12] = [
        InputFormat::SocratesLegacy,
        InputFormat::Socrates,
        InputFormat::DellyLegacy,
        InputFormat::Delly,
        InputFormat::Delly2,
        InputFormat::MetaSv,
        InputFormat::Bedpe,
        InputFormat::CrestLegacy,
        InputFormat::Crest,
        InputFormat::Gustaf,
        InputFormat::Gridss,
        InputFormat::Lumpy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::SocratesLegacy => "socrates-legacy",
            InputFormat::Socrates => "socrates",
            InputFormat::DellyLegacy => "delly-legacy",
            InputFormat::Delly => "delly",
            InputFormat::Delly2 => "delly2",
            InputFormat::MetaSv => "metasv",
            InputFormat::Bedpe => "bedpe",
            InputFormat::CrestLegacy => "crest-legacy",
            InputFormat::Crest => "crest",
            InputFormat::Gustaf => "gustaf",
            InputFormat::Gridss => "gridss",
            InputFormat::Lumpy => "lumpy",
        }
    }

    pub fn caller(&self) -> CallerKind {
        match self {
            InputFormat::SocratesLegacy | InputFormat::Socrates => CallerKind::Socrates,
            InputFormat::DellyLegacy | InputFormat::Delly => CallerKind::Delly,
            InputFormat::Delly2 => CallerKind::Delly2,
            InputFormat::MetaSv => CallerKind::MetaSv,
            InputFormat::Bedpe => CallerKind::Bedpe,
            InputFormat::CrestLegacy | InputFormat::Crest => CallerKind::Crest,
            InputFormat::Gustaf => CallerKind::Gustaf,
            InputFormat::Gridss => CallerKind::Gridss,
            InputFormat::Lumpy => CallerKind::Lumpy,
        }
    }

    /// Parses one non-header line. `record_number` (1-based) seeds synthesized record ids.
    pub fn parse_line(&self, line: &str, record_number: usize) -> Result<Breakpoint> {
        let line = line.trim_end_matches(['\r', '\n']);
        match self {
            InputFormat::SocratesLegacy | InputFormat::Socrates => {
                socrates::parse(line, record_number)
            }
            InputFormat::DellyLegacy => delly::parse_legacy(line, record_number),
            InputFormat::Delly => delly::parse_vcf(line, CallerKind::Delly),
            InputFormat::Delly2 => delly::parse_vcf(line, CallerKind::Delly2),
            InputFormat::MetaSv => metasv::parse(line),
            InputFormat::Bedpe => bedpe::parse(line),
            InputFormat::CrestLegacy | InputFormat::Crest => crest::parse(line, record_number),
            InputFormat::Gustaf => gustaf::parse(line, record_number),
            InputFormat::Gridss => breakend::parse_gridss(line),
            InputFormat::Lumpy => breakend::parse_lumpy(line),
        }
    }

    /// Header/comment lines carry no calls.
    pub fn is_header(&self, line: &str) -> bool {
        line.starts_with('#') || line.trim().is_empty()
    }
}

impl FromStr for InputFormat {
    type Err = SvfuseError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        InputFormat::ALL
            .iter()
            .copied()
            .find(|format| format.name() == lower)
            .ok_or_else(|| SvfuseError::UnknownInputFormat {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How an adapter expresses the edge type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSignature {
    /// Breakend orientations, typed by the shared classifier.
    Stranded(Strand, Option<Strand>),
    /// Symbolic encodings that already name the event type.
    Resolved(EventType),
}

/// One call as normalized by an adapter, before it becomes an [`Event`].
#[derive(Debug, Clone)]
pub struct Breakpoint {
    pub c1: GenomicCoordinate,
    pub c2: GenomicCoordinate,
    pub signature: EdgeSignature,
    pub caller: CallerKind,
    pub record: RecordFields,
    pub annotation: Option<String>,
}

impl Breakpoint {
    pub fn event_type(&self) -> EventType {
        match self.signature {
            EdgeSignature::Stranded(o1, o2) => classify(&self.c1, o1, &self.c2, o2),
            EdgeSignature::Resolved(event_type) => event_type,
        }
    }

    pub fn into_event(self) -> Event {
        let event_type = self.event_type();
        Event::new(self.c1, self.c2, event_type)
            .with_record(self.record)
            .with_caller(self.caller, 1)
            .with_annotation(self.annotation)
    }
}

/// Record fields for formats that do not carry VCF columns of their own.
pub(crate) fn synthesized_record(
    id: String,
    event_type: EventType,
    c2: &GenomicCoordinate,
) -> RecordFields {
    RecordFields {
        id,
        ref_allele: ".".to_string(),
        alt: event_type.alt_tag().to_string(),
        qual: ".".to_string(),
        filter: Some("PASS".to_string()),
        info: synthesized_info(event_type.alt_tag().trim_matches(['<', '>']), c2),
    }
}

pub(crate) fn synthesized_info(svtype: &str, c2: &GenomicCoordinate) -> String {
    format!("SVTYPE={};CHR2={};END={}", svtype, c2.chr, c2.pos)
}

pub(crate) fn parse_pos(format: &str, field: &str, value: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|e| {
        SvfuseError::malformed(format, format!("invalid {field} {value:?}: {e}"))
    })
}

pub(crate) fn required<'a>(
    format: &str,
    fields: &[&'a str],
    index: usize,
    name: &str,
) -> Result<&'a str> {
    fields.get(index).copied().ok_or_else(|| {
        SvfuseError::malformed(
            format,
            format!(
                "missing {name} (column {}, found {} columns)",
                index + 1,
                fields.len()
            ),
        )
    })
}

/// The eight fixed columns of a VCF data line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VcfColumns<'a> {
    pub chrom: &'a str,
    pub pos: u64,
    pub id: &'a str,
    pub ref_allele: &'a str,
    pub alt: &'a str,
    pub qual: &'a str,
    pub filter: &'a str,
    pub info: &'a str,
}

impl<'a> VcfColumns<'a> {
    pub fn parse(format: &str, line: &'a str) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 8 {
            return Err(SvfuseError::malformed(
                format,
                format!("expected at least 8 VCF columns, found {}", fields.len()),
            ));
        }
        Ok(Self {
            chrom: fields[0],
            pos: parse_pos(format, "POS", fields[1])?,
            id: fields[2],
            ref_allele: fields[3],
            alt: fields[4],
            qual: fields[5],
            filter: fields[6],
            info: fields[7],
        })
    }

    pub fn coordinate(&self) -> GenomicCoordinate {
        GenomicCoordinate::new(self.chrom, self.pos)
    }

    pub fn info_value(&self, key: &str) -> Option<&'a str> {
        info_value(self.info, key)
    }

    pub fn record(&self) -> RecordFields {
        RecordFields {
            id: self.id.to_string(),
            ref_allele: self.ref_allele.to_string(),
            alt: self.alt.to_string(),
            qual: self.qual.to_string(),
            filter: Some(self.filter.to_string()),
            info: self.info.to_string(),
        }
    }
}

/// Value of `key` in a `;`-separated `KEY=VALUE` list.
pub(crate) fn info_value<'a>(info: &'a str, key: &str) -> Option<&'a str> {
    info.split(';').find_map(|entry| {
        let (k, v) = entry.split_once('=')?;
        (k == key).then_some(v)
    })
}
