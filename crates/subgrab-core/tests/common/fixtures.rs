//! Archive fixtures built in memory.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A zip holding `entries` as (path, content); paths ending in `/` become directories.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default();
    for (path, content) in entries {
        if path.ends_with('/') {
            writer.add_directory(*path, opts).unwrap();
        } else {
            writer.start_file(*path, opts).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Subtitle-looking text of exactly `len` bytes.
pub fn subtitle_text(len: usize) -> Vec<u8> {
    b"1\n00:00:01,000 --> 00:00:02,000\nhello\n\n"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}
