use crate::{error::SvfuseError, utils::util::Result};
use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{BufReader, Read as ioRead},
    path::Path,
};

pub(crate) fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip")
}

/// Opens a caller output file, transparently decompressing `.gz`/`.gzip` inputs.
pub fn open_input_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    let file = File::open(path)
        .map_err(|error| crate::svfuse_error!("Failed to open file {}: {error}", path.display()))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(SvfuseError::InvalidGzipHeader {
                path: path.to_path_buf(),
            })
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}
