use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use helpchunk::{
    Chunk, ChunkSink, CrawlConfig, DocumentOutcome, DocumentSource, Error, FetchError, FileSink,
    Pipeline,
};

const BASE: &str = "https://help.example.com/help";

/// In-memory source: URL → markup, anything else is a 404.
#[derive(Default)]
struct FakeSource {
    pages: HashMap<String, String>,
}

impl FakeSource {
    fn with(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

impl DocumentSource for FakeSource {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

type SaveLog = Arc<Mutex<Vec<(String, String)>>>;

/// Records every save into a shared log; optionally fails from the
/// `fail_from`-th call on.
#[derive(Default)]
struct MemorySink {
    saved: SaveLog,
    fail_from: Option<usize>,
}

impl MemorySink {
    fn failing_from(n: usize) -> Self {
        Self {
            saved: SaveLog::default(),
            fail_from: Some(n),
        }
    }

    fn log(&self) -> SaveLog {
        Arc::clone(&self.saved)
    }
}

fn names(log: &SaveLog) -> Vec<String> {
    let mut names: Vec<String> = log.lock().expect("lock").iter().map(|(n, _)| n.clone()).collect();
    names.sort();
    names
}

impl ChunkSink for MemorySink {
    fn save(&self, chunk: &Chunk, name: &str) -> helpchunk::Result<PathBuf> {
        let mut saved = self.saved.lock().expect("lock");
        if self.fail_from.is_some_and(|n| saved.len() >= n) {
            return Err(Error::Io(std::io::Error::other("disk full")));
        }
        saved.push((name.to_string(), chunk.text.clone()));
        Ok(PathBuf::from(name))
    }
}

fn config() -> CrawlConfig {
    CrawlConfig {
        base_url: BASE.to_string(),
        max_workers: 2,
        ..CrawlConfig::default()
    }
}

const ARTICLE: &str = r#"
    <html><head><title>Sharing - Help Center</title></head>
    <body>
      <nav><p>Request a demo</p><p>Log in</p></nav>
      <h1>Share a page</h1>
      <p>Open the share menu.</p>
      <h2>Permissions</h2>
      <p>Pick who can edit.</p>
    </body></html>
"#;

const INDEX: &str = r##"
    <html><body>
      <a href="/help/share-a-page">Share</a>
      <a href="/help/share-a-page#permissions">Share again</a>
      <a href="/help/empty">Empty</a>
      <a href="/help/missing">Missing</a>
      <a href="/help/guides/intro">Guide</a>
      <a href="https://other.example.com/help/elsewhere">Offsite</a>
      <a href="/pricing">Pricing</a>
      <a href="#top">Top</a>
    </body></html>
"##;

#[test]
fn process_url_saves_chunks_named_after_first_heading() {
    let source = FakeSource::default().with("https://help.example.com/help/share", ARTICLE);
    let sink = MemorySink::default();
    let pipeline = Pipeline::new(&config(), source, sink).expect("valid config");

    let outcome = pipeline.process_url("https://help.example.com/help/share");
    match outcome {
        DocumentOutcome::Saved { name, chunks } => {
            assert_eq!(name, "Share a page");
            assert_eq!(chunks, 1);
        }
        other => panic!("expected Saved, got {other:?}"),
    }
}

#[test]
fn empty_document_is_never_persisted() {
    let html = "<html><body><nav><p>Log in</p></nav><div>no content tags</div></body></html>";
    let source = FakeSource::default().with("https://help.example.com/help/empty", html);
    let sink = MemorySink::default();
    let log = sink.log();
    let pipeline = Pipeline::new(&config(), source, sink).expect("valid config");

    let outcome = pipeline.process_url("https://help.example.com/help/empty");
    assert!(matches!(outcome, DocumentOutcome::Empty));

    let summary = pipeline
        .run(vec!["https://help.example.com/help/empty".to_string()])
        .expect("pool builds");
    assert_eq!(summary.empty, 1);
    assert_eq!(summary.chunks_written, 0);
    assert!(names(&log).is_empty());
}

#[test]
fn fetch_failure_is_reported_not_fatal() {
    let pipeline =
        Pipeline::new(&config(), FakeSource::default(), MemorySink::default()).expect("valid config");

    match pipeline.process_url("https://help.example.com/help/missing") {
        DocumentOutcome::FetchFailed(FetchError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected FetchFailed, got {other:?}"),
    }
}

#[test]
fn save_failure_reports_chunks_already_written() {
    let mut cfg = config();
    cfg.max_chunk_length = 25;
    let source = FakeSource::default().with("https://help.example.com/help/share", ARTICLE);
    let pipeline = Pipeline::new(&cfg, source, MemorySink::failing_from(1)).expect("valid config");

    match pipeline.process_url("https://help.example.com/help/share") {
        DocumentOutcome::SaveFailed { saved, error } => {
            assert_eq!(saved, 1);
            assert!(matches!(error, Error::Io(_)));
        }
        other => panic!("expected SaveFailed, got {other:?}"),
    }
}

#[test]
fn crawl_discovers_links_and_summarizes() {
    let source = FakeSource::default()
        .with(BASE, INDEX)
        .with("https://help.example.com/help/share-a-page", ARTICLE)
        .with(
            "https://help.example.com/help/empty",
            "<body><p>Get Notion free</p></body>",
        );
    let pipeline = Pipeline::new(&config(), source, MemorySink::default()).expect("valid config");

    let summary = pipeline.crawl().expect("index fetched");
    assert_eq!(summary.documents, 3);
    assert_eq!(summary.saved_documents, 1);
    assert_eq!(summary.chunks_written, 1);
    assert_eq!(summary.empty, 1);
    assert_eq!(summary.fetch_failures, 1);
    assert_eq!(summary.skipped(), 2);
}

#[test]
fn crawl_fails_when_index_is_unreachable() {
    let pipeline =
        Pipeline::new(&config(), FakeSource::default(), MemorySink::default()).expect("valid config");
    assert!(matches!(pipeline.crawl(), Err(Error::Fetch(_))));
}

#[test]
fn run_with_file_sink_writes_part_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cfg = config();
    cfg.max_chunk_length = 25;

    let source = FakeSource::default()
        .with("https://help.example.com/help/a", ARTICLE)
        .with(
            "https://help.example.com/help/b",
            "<body><h2>Billing: FAQ</h2><p>Invoices are monthly.</p></body>",
        );
    let sink = FileSink::new(dir.path().join("out")).expect("sink dir");
    let pipeline = Pipeline::new(&cfg, source, sink).expect("valid config");

    let summary = pipeline
        .run(vec![
            "https://help.example.com/help/a".to_string(),
            "https://help.example.com/help/b".to_string(),
        ])
        .expect("pool builds");
    assert_eq!(summary.saved_documents, 2);

    let out = dir.path().join("out");
    let first = std::fs::read_to_string(out.join("Share a page_part_1.txt")).expect("part 1");
    assert_eq!(first, "Share a page\nOpen the share menu.");
    let second = std::fs::read_to_string(out.join("Share a page_part_2.txt")).expect("part 2");
    assert_eq!(second, "Permissions\nPick who can edit.");

    let billing = std::fs::read_to_string(out.join("Billing- FAQ_part_1.txt")).expect("sanitized name");
    assert!(billing.starts_with("Billing: FAQ"));
}

#[test]
fn untitled_document_falls_back_to_page_title_then_url() {
    let source = FakeSource::default()
        .with(
            "https://help.example.com/help/titled",
            "<html><head><title>Page Title</title></head><body><p>Only prose.</p></body></html>",
        )
        .with("https://help.example.com/help/bare-page", "<body><p>Only prose.</p></body>");
    let sink = MemorySink::default();
    let log = sink.log();
    let pipeline = Pipeline::new(&config(), source, sink).expect("valid config");

    pipeline
        .run(vec![
            "https://help.example.com/help/titled".to_string(),
            "https://help.example.com/help/bare-page".to_string(),
        ])
        .expect("pool builds");

    assert_eq!(names(&log), vec!["Page Title_part_1.txt", "bare-page_part_1.txt"]);
}

#[test]
fn sink_sees_part_names_in_order() {
    let mut cfg = config();
    cfg.max_chunk_length = 25;
    let source = FakeSource::default().with("https://help.example.com/help/share", ARTICLE);
    let sink = MemorySink::default();
    let log = sink.log();
    let pipeline = Pipeline::new(&cfg, source, sink).expect("valid config");

    let outcome = pipeline.process_url("https://help.example.com/help/share");
    assert!(matches!(outcome, DocumentOutcome::Saved { chunks: 2, .. }));

    let saved = log.lock().expect("lock").clone();
    assert_eq!(
        saved,
        vec![
            ("Share a page_part_1.txt".to_string(), "Share a page\nOpen the share menu.".to_string()),
            ("Share a page_part_2.txt".to_string(), "Permissions\nPick who can edit.".to_string()),
        ]
    );
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut cfg = config();
    cfg.max_chunk_length = 0;
    assert!(matches!(
        Pipeline::new(&cfg, FakeSource::default(), MemorySink::default()),
        Err(Error::InvalidConfig(_))
    ));

    let mut cfg = config();
    cfg.max_workers = 0;
    assert!(Pipeline::new(&cfg, FakeSource::default(), MemorySink::default()).is_err());
}

#[test]
fn process_markup_is_pure() {
    let source = FakeSource::default();
    let sink = MemorySink::default();
    let log = sink.log();
    let pipeline = Pipeline::new(&config(), source, sink).expect("valid config");

    let chunks = pipeline.process_markup(ARTICLE).expect("valid options");
    assert_eq!(chunks.len(), 1);
    assert!(!chunks[0].text.contains("Request a demo"));
    assert!(names(&log).is_empty());
}

fn overview_source() -> FakeSource {
    FakeSource::default()
        .with(
            "https://help.example.com/help/alpha",
            "<body><h2>Overview</h2><p>Alpha one line here.</p><h2>Details</h2><p>Alpha two.</p></body>",
        )
        .with(
            "https://help.example.com/help/beta",
            "<body><h2>Overview</h2><p>Beta only.</p></body>",
        )
}

fn overview_urls() -> Vec<String> {
    vec![
        "https://help.example.com/help/alpha".to_string(),
        "https://help.example.com/help/beta".to_string(),
    ]
}

#[test]
fn same_titled_documents_get_distinct_names() {
    let mut cfg = config();
    cfg.max_chunk_length = 40;
    let sink = MemorySink::default();
    let log = sink.log();
    let pipeline = Pipeline::new(&cfg, overview_source(), sink).expect("valid config");

    let first = pipeline.process_url("https://help.example.com/help/alpha");
    let second = pipeline.process_url("https://help.example.com/help/beta");
    assert!(matches!(first, DocumentOutcome::Saved { ref name, chunks: 2 } if name == "Overview"));
    assert!(matches!(second, DocumentOutcome::Saved { ref name, chunks: 1 } if name == "Overview-beta"));
    assert_eq!(
        names(&log),
        vec!["Overview-beta_part_1.txt", "Overview_part_1.txt", "Overview_part_2.txt"]
    );
}

#[test]
fn same_titled_documents_do_not_overwrite_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cfg = config();
    cfg.max_chunk_length = 40;
    let sink = FileSink::new(dir.path()).expect("sink dir");
    let pipeline = Pipeline::new(&cfg, overview_source(), sink).expect("valid config");

    let summary = pipeline.run(overview_urls()).expect("pool builds");
    assert_eq!(summary.saved_documents, 2);
    assert_eq!(summary.chunks_written, 3);

    let mut contents: Vec<String> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| std::fs::read_to_string(entry.expect("entry").path()).expect("read chunk"))
        .collect();
    contents.sort();
    assert_eq!(
        contents,
        vec![
            "Details\nAlpha two.",
            "Overview\nAlpha one line here.",
            "Overview\nBeta only.",
        ]
    );
}

#[test]
fn existing_files_are_left_alone() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("Overview_part_1.txt"), "from an earlier run").expect("seed file");

    let sink = FileSink::new(dir.path()).expect("sink dir");
    let pipeline = Pipeline::new(&config(), overview_source(), sink).expect("valid config");

    let outcome = pipeline.process_url("https://help.example.com/help/beta");
    assert!(matches!(outcome, DocumentOutcome::Saved { ref name, .. } if name == "Overview-beta"));

    let earlier = std::fs::read_to_string(dir.path().join("Overview_part_1.txt")).expect("seeded");
    assert_eq!(earlier, "from an earlier run");
    let saved = std::fs::read_to_string(dir.path().join("Overview-beta_part_1.txt")).expect("saved");
    assert_eq!(saved, "Overview\nBeta only.");
}

#[test]
fn long_multibyte_title_fits_file_name_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let title = "测".repeat(120);
    let html = format!("<body><h2>{title}</h2><p>正文内容。</p></body>");
    let source = FakeSource::default().with("https://help.example.com/help/cjk", &html);
    let sink = FileSink::new(dir.path()).expect("sink dir");
    let pipeline = Pipeline::new(&config(), source, sink).expect("valid config");

    let name = match pipeline.process_url("https://help.example.com/help/cjk") {
        DocumentOutcome::Saved { name, chunks } => {
            assert_eq!(chunks, 1);
            name
        }
        other => panic!("expected Saved, got {other:?}"),
    };
    assert!(name.len() <= 100);
    assert!(title.starts_with(&name));

    let text = std::fs::read_to_string(dir.path().join(format!("{name}_part_1.txt"))).expect("chunk");
    assert_eq!(text, format!("{title}\n正文内容。"));
}
