use crate::{core::event::Event, io::readers::is_gzipped, utils::util::Result};
use flate2::{write::GzEncoder, Compression};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

pub const CALL_HEADER: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO";

enum Sink {
    Plain(BufWriter<Box<dyn Write>>),
    Gzip(GzEncoder<BufWriter<File>>),
}

/// Writes consolidated calls as tab-separated records to a file or standard output.
pub struct CallWriter {
    sink: Sink,
    records_written: usize,
}

impl CallWriter {
    /// `None` writes to standard output; paths ending in `.gz` are gzip-compressed.
    pub fn new(output: Option<&Path>) -> Result<Self> {
        let sink = match output {
            Some(path) => {
                let file = File::create(path).map_err(|error| {
                    crate::svfuse_error!("Failed to create output file {}: {error}", path.display())
                })?;
                if is_gzipped(path) {
                    Sink::Gzip(GzEncoder::new(BufWriter::new(file), Compression::default()))
                } else {
                    Sink::Plain(BufWriter::new(Box::new(file)))
                }
            }
            None => Sink::Plain(BufWriter::new(Box::new(io::stdout()))),
        };
        Ok(Self {
            sink,
            records_written: 0,
        })
    }

    fn inner(&mut self) -> &mut dyn Write {
        match &mut self.sink {
            Sink::Plain(writer) => writer,
            Sink::Gzip(encoder) => encoder,
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        writeln!(self.inner(), "{CALL_HEADER}")?;
        Ok(())
    }

    pub fn write_event(&mut self, event: &Event) -> Result<()> {
        let line = event.to_record_line();
        writeln!(self.inner(), "{line}")?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flushes buffered output and completes the gzip stream.
    pub fn finish(self) -> Result<usize> {
        match self.sink {
            Sink::Plain(mut writer) => writer.flush()?,
            Sink::Gzip(encoder) => encoder.finish()?.flush()?,
        }
        Ok(self.records_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            coordinate::GenomicCoordinate,
            event::{CallerKind, RecordFields},
            svtype::EventType,
        },
        io::readers::open_input_reader,
    };
    use std::io::BufRead;
    use tempfile::tempdir;

    fn deletion() -> Event {
        Event::new(
            GenomicCoordinate::new("chr1", 100),
            GenomicCoordinate::new("chr1", 900),
            EventType::DELETION,
        )
        .with_record(RecordFields {
            id: "d1".to_string(),
            ref_allele: "N".to_string(),
            alt: "<DEL>".to_string(),
            qual: "12".to_string(),
            filter: Some("PASS".to_string()),
            info: "SVTYPE=DEL;END=900".to_string(),
        })
        .with_caller(CallerKind::Delly, 2)
    }

    fn read_lines(path: &Path) -> Vec<String> {
        open_input_reader(path)
            .unwrap()
            .lines()
            .collect::<std::io::Result<_>>()
            .unwrap()
    }

    #[test]
    fn test_write_plain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let mut writer = CallWriter::new(Some(&path)).unwrap();
        writer.write_header().unwrap();
        writer.write_event(&deletion()).unwrap();
        assert_eq!(writer.finish().unwrap(), 1);

        let lines = read_lines(&path);
        assert_eq!(lines[0], CALL_HEADER);
        assert_eq!(
            lines[1],
            "chr1\t100\td1\tN\t<DEL>\t12.00\tPASS\tSVTYPE=DEL;END=900;SUPPORT=1,2"
        );
    }

    #[test]
    fn test_write_gzip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tsv.gz");
        let mut writer = CallWriter::new(Some(&path)).unwrap();
        writer.write_header().unwrap();
        writer.write_event(&deletion()).unwrap();
        writer.write_event(&deletion()).unwrap();
        assert_eq!(writer.records_written(), 2);
        writer.finish().unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("chr1\t100\td1"));
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.tsv");
        assert!(CallWriter::new(Some(&path)).is_err());
    }
}
