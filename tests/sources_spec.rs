use bindxml_reader::{
    BindXmlError, BindXmlReader, DefaultSource, DocumentSource, FetchError, SchemaVersion, Source,
    DEFAULT_PORT,
};
use std::cell::Cell;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

fn fixture_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("tests");
    p.push("fixtures");
    p.push(name);
    p
}

fn fixture_bytes(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name)).unwrap_or_else(|e| panic!("read {}: {}", name, e))
}

/// Serves documents from memory and counts how often it was asked.
struct MemorySource {
    documents: HashMap<Source, Vec<u8>>,
    fetches: Cell<usize>,
}

impl DocumentSource for MemorySource {
    fn fetch(&self, source: &Source) -> Result<Vec<u8>, FetchError> {
        self.fetches.set(self.fetches.get() + 1);
        self.documents.get(source).cloned().ok_or_else(|| {
            FetchError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "no such BIND instance",
            ))
        })
    }
}

#[test]
fn source_defaults_and_urls() {
    assert_eq!(Source::host("ns1.example.org"), Source::http("ns1.example.org", DEFAULT_PORT));
    assert_eq!(DEFAULT_PORT, 8053);
    assert_eq!(
        Source::http("10.0.0.53", 8080).url().as_deref(),
        Some("http://10.0.0.53:8080/")
    );
    assert_eq!(Source::file("/tmp/stats.xml").url(), None);
    assert_eq!(Source::http("ns1", 8053).to_string(), "ns1:8053");

    assert_eq!(DefaultSource::new().timeout(), None);
    assert_eq!(
        DefaultSource::with_timeout(Duration::from_secs(3)).timeout(),
        Some(Duration::from_secs(3))
    );
}

#[test]
fn substituted_source_feeds_the_reader() {
    let ns1 = Source::host("ns1.example.org");
    let ns2 = Source::host("ns2.example.org");
    let mut documents = HashMap::new();
    documents.insert(ns1.clone(), fixture_bytes("bindxml-v2_2.xml"));
    documents.insert(ns2.clone(), fixture_bytes("bindxml-v3_5.xml"));
    let fetcher = MemorySource {
        documents,
        fetches: Cell::new(0),
    };

    let reader = BindXmlReader::with_source(&fetcher);
    assert_eq!(reader.load(&ns1).expect("ns1").version(), SchemaVersion::V2_2);
    assert_eq!(reader.load(&ns2).expect("ns2").version(), SchemaVersion::V3_5);
    assert_eq!(reader.load(&ns1).expect("ns1 again").version(), SchemaVersion::V2_2);
    assert_eq!(fetcher.fetches.get(), 3, "every load must fetch exactly once");

    let unreachable = Source::host("ns3.example.org");
    match reader.load(&unreachable) {
        Err(BindXmlError::Retrieval { target, cause }) => {
            assert_eq!(target, "ns3.example.org:8053");
            assert!(matches!(cause, FetchError::Io(_)));
        }
        other => panic!("expected Retrieval, got {:?}", other.map(|s| s.version())),
    }
}

#[test]
fn missing_file_is_a_retrieval_error() {
    let err = BindXmlReader::new()
        .load(&Source::file(fixture_path("does-not-exist.xml")))
        .expect_err("file is missing");
    assert!(err.is_retrieval(), "got {:?}", err);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn refused_connection_is_a_retrieval_error() {
    // Grab a free port, then close it so nothing is listening.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let reader = BindXmlReader::with_source(DefaultSource::with_timeout(Duration::from_secs(5)));
    match reader.load(&Source::http("127.0.0.1", port)) {
        Err(BindXmlError::Retrieval { cause, .. }) => {
            assert!(matches!(cause, FetchError::Http(_)), "got {:?}", cause)
        }
        other => panic!("expected Retrieval, got {:?}", other.map(|s| s.version())),
    }
}

/// Answers exactly one HTTP request with `status` and `body`.
fn serve_once(status: &'static str, body: Vec<u8>) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).expect("read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        );
        stream.write_all(head.as_bytes()).expect("write head");
        stream.write_all(&body).expect("write body");
    });
    port
}

#[test]
fn statistics_channel_over_http() {
    let port = serve_once("200 OK", fixture_bytes("bindxml-v3_6.xml"));
    let snapshot = BindXmlReader::new()
        .load(&Source::http("127.0.0.1", port))
        .expect("load over HTTP");

    let from_file = BindXmlReader::new()
        .load(&Source::file(fixture_path("bindxml-v3_6.xml")))
        .expect("load from file");
    assert_eq!(snapshot, from_file);
}

#[test]
fn http_error_status_is_a_retrieval_error() {
    let port = serve_once("404 Not Found", b"not here".to_vec());
    match BindXmlReader::new().load(&Source::http("127.0.0.1", port)) {
        Err(BindXmlError::Retrieval { cause: FetchError::Status(code), .. }) => assert_eq!(code, 404),
        other => panic!("expected Retrieval with status, got {:?}", other.map(|s| s.version())),
    }
}
