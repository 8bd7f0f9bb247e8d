//! Memory-mapped event-store reader.
//!
//! The event store is line-delimited JSON, one event's banks per line. The
//! file is memory-mapped once and the mapping is shared, so bulk parsing can
//! fan lines out across threads without copying the file.

use crate::{Error, Result};
use memmap2::Mmap;
use rayon::prelude::*;
use sidisrec_core::Event;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A memory-mapped event-store reader.
pub struct MappedEventReader {
    mmap: Arc<Mmap>,
    path: PathBuf,
}

impl MappedEventReader {
    /// Opens an event store for memory-mapped reading.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or memory-mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        // SAFETY: The file is opened read-only and we assume it is not modified concurrently.
        // This is the standard safety contract for memory mapping.
        #[allow(unsafe_code)]
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self {
            mmap: Arc::new(mmap),
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Returns true if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.mmap
            .split(|&b| b == b'\n')
            .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
    }

    /// Number of events in the store without parsing them.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.lines().count()
    }

    /// Iterates events in file order, parsing and validating lazily.
    pub fn events(&self) -> impl Iterator<Item = Result<Event>> + '_ {
        self.lines().enumerate().map(|(n, line)| parse_line(&self.path, n, line))
    }

    /// Parses and validates every event, fanning lines across threads.
    /// Event order matches the file.
    ///
    /// # Errors
    /// Fails on the first malformed line or bank-length mismatch.
    pub fn read_all(&self) -> Result<Vec<Event>> {
        let lines: Vec<&[u8]> = self.lines().collect();
        lines
            .par_iter()
            .enumerate()
            .map(|(n, line)| parse_line(&self.path, n, line))
            .collect()
    }
}

fn parse_line(path: &Path, line_no: usize, line: &[u8]) -> Result<Event> {
    let event: Event = serde_json::from_slice(line).map_err(|err| {
        Error::InvalidFormat(format!(
            "event {} is not valid JSON: {} (file: {})",
            line_no,
            err,
            path.display()
        ))
    })?;
    event.validate()?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn store(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn event_json() -> String {
        let mut event = Event::default();
        event
            .particles
            .push(11, (1.0, 0.0, 9.5), (0.0, 0.0, -25.0), -1, 0.999, -2210);
        event.tracks.push(0, 0, 1, 30, 10.0);
        serde_json::to_string(&event).unwrap()
    }

    #[test]
    fn test_empty_store() {
        let file = store(&[]);
        let reader = MappedEventReader::open(file.path()).unwrap();
        assert!(reader.is_empty());
        assert_eq!(reader.event_count(), 0);
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_reads_events_in_order() {
        let json = event_json();
        let file = store(&[&json, "{}", &json]);
        let reader = MappedEventReader::open(file.path()).unwrap();
        assert_eq!(reader.event_count(), 3);

        let events = reader.read_all().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].particles.len(), 1);
        assert!(events[1].missing_banks());

        let lazy: Result<Vec<Event>> = reader.events().collect();
        assert_eq!(lazy.unwrap(), events);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let json = event_json();
        let file = store(&["", &json, "   ", ""]);
        let reader = MappedEventReader::open(file.path()).unwrap();
        assert_eq!(reader.event_count(), 1);
    }

    #[test]
    fn test_malformed_line_is_error() {
        let file = store(&["not json"]);
        let reader = MappedEventReader::open(file.path()).unwrap();
        assert!(matches!(reader.read_all(), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_ragged_banks_rejected() {
        let raw = r#"{"particles":{"pid":[11],"px":[1.0],"py":[0.0],"pz":[9.5],"vx":[0.0],"vy":[0.0],"vz":[-25.0],"charge":[-1],"beta":[0.999],"status":[-2210,1]}}"#;
        let file = store(&[raw]);
        let reader = MappedEventReader::open(file.path()).unwrap();
        assert!(matches!(reader.read_all(), Err(Error::Core(_))));
    }
}
