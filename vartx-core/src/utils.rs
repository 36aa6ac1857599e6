use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use fxhash::FxHashSet;

fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

///
/// Get a writer for a file, gzip-compressing when the path ends in `.gz`.
/// `None` or `-` writes to stdout.
///
pub fn get_dynamic_writer(file_path: Option<&str>) -> Result<BufWriter<Box<dyn Write>>> {
    let writer: Box<dyn Write> = match file_path {
        None | Some("-") => Box::new(std::io::stdout()),
        Some(path_str) => {
            let path = Path::new(path_str);
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            match is_gzipped(path) {
                true => Box::new(GzEncoder::new(file, Compression::default())),
                false => Box::new(file),
            }
        }
    };

    Ok(BufWriter::new(writer))
}

///
/// Read a list of call set names, one per line. Blank lines and `#` comments
/// are skipped.
///
pub fn read_call_set_list<P: AsRef<Path>>(file_path: P) -> Result<FxHashSet<String>> {
    let reader = get_dynamic_reader(file_path.as_ref())?;

    let mut names = FxHashSet::default();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim();
        if name.is_empty() || name.starts_with('#') {
            continue;
        }
        names.insert(name.to_string());
    }

    Ok(names)
}
