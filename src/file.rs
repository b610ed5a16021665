//! Local file destination.
use crate::sink::{Entry, Sink};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A [`Sink`] appending log lines to a local file.
///
/// The file is created if absent and opened in append mode. On unix it is
/// opened with `O_SYNC`, so every write reaches the disk before `emit`
/// returns; elsewhere the data is synced explicitly after each write.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: File,
    buf: Vec<u8>,
}
impl FileSink {
    /// Opens (or creates) `path` for appending.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_options().open(&path)?;
        Ok(FileSink {
            path,
            file,
            buf: Vec::new(),
        })
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
impl Sink for FileSink {
    fn emit(&mut self, entry: &Entry) -> io::Result<()> {
        self.buf.clear();
        entry.render_into(&mut self.buf);
        self.file.write_all(&self.buf)?;
        #[cfg(not(unix))]
        self.file.sync_data()?;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.file.sync_all()
    }
}

fn open_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666).custom_flags(libc::O_SYNC);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Facility, Severity};
    use std::fs;
    use tempfile::tempdir;

    fn entry(message: &str) -> Entry {
        Entry {
            priority: Facility::User | Severity::Notice,
            timestamp: "Jan  2 15:04:05",
            tag: "app",
            pid: 42,
            message,
        }
    }

    #[test]
    fn creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new.log");
        assert!(!path.exists());

        let mut sink = FileSink::open(&path).unwrap();
        sink.emit(&entry("hello")).unwrap();
        sink.close().unwrap();

        assert_eq!(sink.path(), path.as_path());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<13>Jan  2 15:04:05 app[42]: hello\n"
        );
    }

    #[test]
    fn appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("existing.log");
        fs::write(&path, "previous line\n").unwrap();

        let mut sink = FileSink::open(&path).unwrap();
        sink.emit(&entry("first")).unwrap();
        sink.emit(&entry("second\n")).unwrap();
        sink.close().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "previous line\n\
             <13>Jan  2 15:04:05 app[42]: first\n\
             <13>Jan  2 15:04:05 app[42]: second\n"
        );
    }

    #[test]
    fn open_failure_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("x.log");
        assert!(FileSink::open(&path).is_err());
    }
}
