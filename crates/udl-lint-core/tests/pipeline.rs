//! Integration tests: requests through the queue, worker and dispatcher.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;
use udl_lint_core::{
    keys, ChannelDispatcher, DispatchError, GenericLinterAggregator, InMemoryLinterRegistry,
    LintError, LintRequest, LintResult, LintResults, LintService, Linter, LinterRegistry,
    MapPreferences, Severity,
};

const WAIT: Duration = Duration::from_secs(5);

/// Reports a fixed number of findings and counts its invocations.
struct Fixed {
    name: &'static str,
    count: usize,
    calls: AtomicUsize,
}

impl Fixed {
    fn new(name: &'static str, count: usize) -> Arc<Self> {
        Arc::new(Self {
            name,
            count,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Linter for Fixed {
    fn name(&self) -> &str {
        self.name
    }

    fn lint_with_text(&self, _: &LintRequest, _: &str) -> Result<LintResults, LintError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((1..=self.count)
            .map(|line| LintResult::new(Severity::Warning, line, 1, 2, self.name))
            .collect())
    }
}

struct Broken;

impl Linter for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn lint_with_text(&self, _: &LintRequest, _: &str) -> Result<LintResults, LintError> {
        Err(LintError::Linter {
            linter: "broken".into(),
            message: "interpreter not found".into(),
        })
    }
}

fn start(prefs: MapPreferences) -> (LintService, mpsc::Receiver<LintRequest>) {
    let (dispatcher, rx) = ChannelDispatcher::new();
    let service = LintService::builder(dispatcher)
        .preferences(Arc::new(prefs))
        .start()
        .expect("spawn worker");
    (service, rx)
}

// ── Aggregation ──

#[test]
fn aggregator_merges_two_and_five_into_seven() {
    let a = Fixed::new("a", 2);
    let b = Fixed::new("b", 5);
    let registry: Arc<dyn LinterRegistry> = Arc::new(
        InMemoryLinterRegistry::new()
            .with(a.clone())
            .with(b.clone())
            .with_language("Python", ["a", "b"]),
    );
    let agg = GenericLinterAggregator::new("Python", registry);
    let results = agg
        .lint(&LintRequest::new("u", "Python", "pass\n"))
        .expect("aggregation");
    assert_eq!(results.len(), 7);
}

#[test]
fn aggregator_with_failing_first_linter_equals_second() {
    let b = Fixed::new("b", 5);
    let registry: Arc<dyn LinterRegistry> = Arc::new(
        InMemoryLinterRegistry::new()
            .with(Arc::new(Broken))
            .with(b.clone())
            .with_language("Python", ["broken", "b"]),
    );
    let agg = GenericLinterAggregator::new("Python", registry);
    let req = LintRequest::new("u", "Python", "pass\n");
    let results = agg.lint(&req).expect("aggregation");
    let alone = b.lint(&req).expect("b alone");
    assert_eq!(results, alone);
}

// ── Worker pipeline ──

#[test]
fn encoding_failure_skips_the_linter() {
    let linter = Fixed::new("never", 3);
    let (service, rx) = start(MapPreferences::new());
    let content = "first line\n0123456789\u{263a} rest\nthird\n";

    service
        .add_request(
            LintRequest::new("doc", "Text", content)
                .with_encoding("ascii")
                .with_linter(linter.clone()),
        )
        .expect("queued");
    let done = rx.recv_timeout(WAIT).expect("reported");

    assert_eq!(done.results.len(), 1);
    let r = &done.results.as_slice()[0];
    assert_eq!(r.severity, Severity::Error);
    assert_eq!((r.line_start, r.col_start, r.col_end), (2, 11, 12));
    assert_eq!(linter.calls(), 0);
    assert!(service.shutdown_and_wait(WAIT));
}

#[test]
fn crlf_run_in_lf_document_is_one_warning() {
    let (service, rx) = start(MapPreferences::new().with_string(keys::END_OF_LINE, "lf"));
    let content = "l1\nl2\nl3\r\nl4\r\nl5\r\nl6\nl7\n";

    service
        .add_request(LintRequest::new("doc", "Text", content))
        .expect("queued");
    let done = rx.recv_timeout(WAIT).expect("reported");

    assert_eq!(done.results.len(), 1);
    let r = &done.results.as_slice()[0];
    assert_eq!(r.severity, Severity::Warning);
    assert_eq!((r.line_start, r.line_end), (3, 5));
    service.shutdown();
}

#[test]
fn linter_failure_leaves_request_usable() {
    let (service, rx) = start(MapPreferences::new());
    service
        .add_request(LintRequest::new("doc", "Text", "ok\n").with_linter(Arc::new(Broken)))
        .expect("queued");
    let done = rx.recv_timeout(WAIT).expect("reported");
    assert!(done.error.is_none());
    assert!(done.results.is_empty());
}

#[test]
fn registry_resolves_linters_for_requests() {
    let a = Fixed::new("a", 2);
    let registry = InMemoryLinterRegistry::new()
        .with(a.clone())
        .with_language("Perl", ["a"]);
    let (dispatcher, rx) = ChannelDispatcher::new();
    let service = LintService::builder(dispatcher)
        .registry(Arc::new(registry))
        .start()
        .expect("spawn worker");

    service
        .add_request(LintRequest::new("doc", "Perl", "1;\n"))
        .expect("queued");
    let done = rx.recv_timeout(WAIT).expect("reported");
    assert_eq!(done.results.len(), 2);
    assert_eq!(a.calls(), 1);
}

// ── Cancellation and shutdown ──

/// Blocks inside the linter until released, so the queue can be inspected
/// while the worker is busy.
struct Gate {
    entered: parking_lot::Mutex<Option<mpsc::Sender<()>>>,
    release: parking_lot::Mutex<mpsc::Receiver<()>>,
}

impl Linter for Gate {
    fn name(&self) -> &str {
        "gate"
    }

    fn lint_with_text(&self, _: &LintRequest, _: &str) -> Result<LintResults, LintError> {
        if let Some(entered) = self.entered.lock().take() {
            let _ = entered.send(());
        }
        let _ = self.release.lock().recv_timeout(WAIT);
        Ok(LintResults::new())
    }
}

fn gated() -> (Arc<Gate>, mpsc::Receiver<()>, mpsc::Sender<()>) {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let gate = Arc::new(Gate {
        entered: parking_lot::Mutex::new(Some(entered_tx)),
        release: parking_lot::Mutex::new(release_rx),
    });
    (gate, entered_rx, release_tx)
}

#[test]
fn cancel_removes_only_queued_requests() {
    let (gate, entered, release) = gated();
    let (service, rx) = start(MapPreferences::new());

    service
        .add_request(LintRequest::new("doc", "Text", "a\n").with_linter(gate))
        .expect("queued");
    entered.recv_timeout(WAIT).expect("worker is linting");

    service
        .add_request(LintRequest::new("doc", "Text", "b\n"))
        .expect("queued");
    service
        .add_request(LintRequest::new("other", "Text", "c\n"))
        .expect("queued");
    assert_eq!(service.cancel_pending_requests("doc"), 1);
    assert_eq!(service.pending(), 1);

    release.send(()).expect("gate alive");
    let first = rx.recv_timeout(WAIT).expect("in-flight request finishes");
    assert_eq!(first.content, "a\n");
    let second = rx.recv_timeout(WAIT).expect("other request runs");
    assert_eq!(second.uid, "other");
}

#[test]
fn shutdown_jumps_ahead_of_queued_work() {
    let (gate, entered, release) = gated();
    let (service, rx) = start(MapPreferences::new());

    service
        .add_request(LintRequest::new("busy", "Text", "a\n").with_linter(gate))
        .expect("queued");
    entered.recv_timeout(WAIT).expect("worker is linting");
    for i in 0..3 {
        service
            .add_request(LintRequest::new(format!("q{i}"), "Text", "b\n"))
            .expect("queued");
    }

    service.shutdown();
    release.send(()).expect("gate alive");
    assert!(service.shutdown_and_wait(WAIT));

    let reported: Vec<String> = rx.try_iter().map(|r| r.uid).collect();
    assert_eq!(reported, vec!["busy".to_string()]);
}

#[test]
fn reporting_to_a_gone_document_keeps_the_worker_alive() {
    let (seen_tx, seen) = mpsc::channel();
    let dispatch = move |req: LintRequest| -> Result<(), DispatchError> {
        let gone = req.uid == "closed";
        let _ = seen_tx.send(req.uid);
        if gone {
            Err(DispatchError::DocumentGone)
        } else {
            Ok(())
        }
    };
    let service = LintService::builder(dispatch).start().expect("spawn worker");

    service
        .add_request(LintRequest::new("closed", "Text", "x\n"))
        .expect("queued");
    service
        .add_request(LintRequest::new("open", "Text", "y\n"))
        .expect("queued");

    assert_eq!(seen.recv_timeout(WAIT).expect("first report"), "closed");
    assert_eq!(seen.recv_timeout(WAIT).expect("second report"), "open");
    assert!(service.shutdown_and_wait(WAIT));
}
