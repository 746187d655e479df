//! CSV file operations

use crate::error::EtlError;
use crate::etl::{Extractor, Loader};
use crate::record::{Record, Table};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use eyre::Result;
use std::path::{Path, PathBuf};

/// Read records from a CSV file
///
/// With headers (the default) columns are matched by name, so their order
/// in the file is irrelevant and unknown columns are skipped. Without
/// headers every row must be `name,height,weight`.
pub struct CsvReader {
    path: PathBuf,
    has_headers: bool,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            has_headers: true,
        }
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Read all rows as records
    pub fn read(&self) -> Result<Table> {
        let file = std::fs::File::open(&self.path).map_err(|source| EtlError::Read {
            path: self.path.clone(),
            source,
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(self.has_headers)
            .trim(Trim::All)
            .from_reader(file);

        let headers = if self.has_headers {
            let headers = reader
                .headers()
                .map_err(|e| EtlError::parse(&self.path, Some(1), e))?;
            Some(headers.clone())
        } else {
            None
        };

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| {
                let line = e.position().map(|p| p.line());
                EtlError::parse(&self.path, line, e)
            })?;
            let line = row.position().map(|p| p.line());

            let record: Record = row
                .deserialize(headers.as_ref())
                .map_err(|e| EtlError::parse(&self.path, line, e))?;
            record
                .check_finite()
                .map_err(|reason| EtlError::parse(&self.path, line, reason))?;

            records.push(record);
        }

        log::debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

impl Extractor for CsvReader {
    type Item = Record;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read()
    }
}

/// Write records to a CSV file, replacing any previous content
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a header row and one row per record
    ///
    /// The header is written even when there are no records. Rows go to a
    /// temporary file beside the destination, which is renamed into place
    /// only once everything is flushed. On failure the destination is left
    /// as it was and the temporary file is removed.
    pub fn write(&self, records: &[Record]) -> Result<usize> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let staged = tempfile::Builder::new()
            .prefix(".hwetl-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| EtlError::write(&self.path, e))?;

        write_rows(staged.as_file(), records).map_err(|e| EtlError::write(&self.path, e))?;

        // tempfile creates 0600; give the output the usual 0644
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|e| EtlError::write(&self.path, e))?;
        }

        staged
            .persist(&self.path)
            .map_err(|e| EtlError::write(&self.path, e.error))?;

        Ok(records.len())
    }
}

fn write_rows<W: std::io::Write>(out: W, records: &[Record]) -> Result<(), csv::Error> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(out);

    writer.write_record(Record::COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

impl Loader for CsvWriter {
    type Item = Record;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        self.write(&items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn parse_error_of(result: Result<Table>) -> EtlError {
        let report = result.unwrap_err();
        match report.downcast::<EtlError>() {
            Ok(err) => err,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_with_headers() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "people.csv", "name,height,weight\nAlice,70,150\nBob,65.5,140.25\n");

        let records = CsvReader::new(&path).read().unwrap();
        assert_eq!(
            records,
            vec![
                Record::new("Alice", 70.0, 150.0),
                Record::new("Bob", 65.5, 140.25),
            ]
        );
    }

    #[test]
    fn test_read_column_order_does_not_matter() {
        let temp = TempDir::new().unwrap();
        let path = write_file(
            &temp,
            "people.csv",
            "weight, id ,name,height\n150,7,Alice,70\n",
        );

        let records = CsvReader::new(&path).read().unwrap();
        assert_eq!(records, vec![Record::new("Alice", 70.0, 150.0)]);
    }

    #[test]
    fn test_read_without_headers() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "people.csv", "Alice,70,150\nBob,65,140\n");

        let records = CsvReader::new(&path).with_headers(false).read().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], Record::new("Bob", 65.0, 140.0));
    }

    #[test]
    fn test_missing_column_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "people.csv", "name,height\nAlice,70\n");

        let err = parse_error_of(CsvReader::new(&path).read());
        assert!(matches!(err, EtlError::Parse { .. }));
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn test_non_numeric_value_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "people.csv", "name,height,weight\nAlice,70,150\nBob,tall,140\n");

        let err = parse_error_of(CsvReader::new(&path).read());
        match err {
            EtlError::Parse { line, .. } => assert_eq!(line, Some(3)),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_empty_value_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "people.csv", "name,height,weight\nAlice,,150\n");

        let err = parse_error_of(CsvReader::new(&path).read());
        assert!(matches!(err, EtlError::Parse { .. }));
    }

    #[test]
    fn test_nan_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "people.csv", "name,height,weight\nAlice,NaN,150\n");

        let err = parse_error_of(CsvReader::new(&path).read());
        assert!(err.to_string().contains("finite"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = parse_error_of(CsvReader::new(temp.path().join("nope.csv")).read());
        assert!(matches!(err, EtlError::Read { .. }));
    }

    #[test]
    fn test_write_overwrites_with_header() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "out.csv", "stale content\nfrom an older run\n");

        let writer = CsvWriter::new(&path);
        let count = writer
            .write(&[Record::new("Alice", 1.78, 68.04), Record::new("Bob", 1.65, 63.5)])
            .unwrap();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "name,height,weight\nAlice,1.78,68.04\nBob,1.65,63.5\n");
    }

    #[test]
    fn test_write_empty_table_writes_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");

        CsvWriter::new(&path).write(&[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "name,height,weight\n");
    }

    #[test]
    fn test_write_to_missing_directory_is_write_error() {
        let temp = TempDir::new().unwrap();
        let writer = CsvWriter::new(temp.path().join("missing").join("out.csv"));

        let report = writer.write(&[Record::new("Alice", 1.78, 68.04)]).unwrap_err();
        assert!(matches!(
            report.downcast_ref::<EtlError>(),
            Some(EtlError::Write { .. })
        ));
    }

    /// Accepts `limit` bytes, then fails like a full disk
    struct FullDisk {
        limit: usize,
    }

    impl std::io::Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if buf.len() > self.limit {
                return Err(std::io::Error::other("No space left on device"));
            }
            self.limit -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn staged_leftovers(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.to_string_lossy().ends_with(".tmp"))
            .collect()
    }

    #[test]
    fn test_write_rows_reports_full_disk() {
        let records: Vec<Record> = (0..5000)
            .map(|i| Record::new(format!("person-{i}"), 1.75, 70.0))
            .collect();

        let result = write_rows(FullDisk { limit: 8192 }, &records);
        assert!(result.unwrap_err().to_string().contains("No space left"));
    }

    #[test]
    fn test_failed_write_leaves_destination_untouched() {
        let temp = TempDir::new().unwrap();
        // A directory at the destination makes the final rename fail
        let path = temp.path().join("out.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep.txt"), "keep").unwrap();

        let report = CsvWriter::new(&path)
            .write(&[Record::new("Alice", 1.78, 68.04)])
            .unwrap_err();
        assert!(matches!(
            report.downcast_ref::<EtlError>(),
            Some(EtlError::Write { .. })
        ));

        assert!(path.is_dir());
        assert_eq!(std::fs::read_to_string(path.join("keep.txt")).unwrap(), "keep");
        assert!(staged_leftovers(temp.path()).is_empty());
    }

    #[test]
    fn test_successful_write_leaves_no_staged_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");

        CsvWriter::new(&path).write(&[Record::new("Alice", 1.78, 68.04)]).unwrap();
        CsvWriter::new(&path).write(&[Record::new("Bob", 1.65, 63.5)]).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "name,height,weight\nBob,1.65,63.5\n"
        );
        assert!(staged_leftovers(temp.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        CsvWriter::new(&path).write(&[]).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_written_file_reads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        let records = vec![Record::new("Alice, Jr.", 1.78, 68.04)];

        CsvWriter::new(&path).write(&records).unwrap();
        assert_eq!(CsvReader::new(&path).read().unwrap(), records);
    }
}
