// Source tests: file and reader sources, read failures

mod common;

use common::{STATUS_DAT, write_status_file};
use nagios_status::source::{FileSource, ReaderSource, StatusSource};
use nagios_status::StatusParser;

#[tokio::test]
async fn test_file_source_reads_content() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_status_file(&dir, STATUS_DAT);
    let source = FileSource::new(&path);
    assert_eq!(source.read_to_string().await.unwrap(), STATUS_DAT);
    assert!(source.describe().contains("status.dat"));
}

#[tokio::test]
async fn test_missing_file_is_source_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let parser = StatusParser::from_path(dir.path().join("missing.dat"));
    let err = parser.parse().await.unwrap_err();
    assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    assert!(err.origin.contains("missing.dat"));
    assert!(err.to_string().contains("failed to read status"));
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced_not_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("status.dat");
    let mut bytes = b"hoststatus {\n\thost_name=caf".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b"\n\tcurrent_state=0\n\t}\n");
    std::fs::write(&path, bytes).unwrap();

    let snapshot = StatusParser::from_path(&path).parse().await.unwrap();
    assert_eq!(snapshot.hosts.len(), 1);
    assert!(snapshot.hosts.keys().all(|k| k.starts_with("caf")));
}

#[tokio::test]
async fn test_reader_source_parses_stream() {
    let reader = std::io::Cursor::new(STATUS_DAT.as_bytes().to_vec());
    let parser = StatusParser::new(ReaderSource::new(reader, "fixture"));
    assert_eq!(parser.source().describe(), "stream: fixture");
    let snapshot = parser.parse().await.unwrap();
    assert_eq!(snapshot.hosts.len(), 2);

    // The stream is consumed by the first read.
    let again = parser.parse().await.unwrap();
    assert!(again.hosts.is_empty());
}

#[tokio::test]
async fn test_file_is_reread_on_every_parse() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_status_file(&dir, "info {\n\tcreated=1\n\t}\n");
    let parser = StatusParser::from_path(&path);
    assert_eq!(parser.parse().await.unwrap().info.fields["created"], "1");
    write_status_file(&dir, "info {\n\tcreated=2\n\t}\n");
    assert_eq!(parser.parse().await.unwrap().info.fields["created"], "2");
}
