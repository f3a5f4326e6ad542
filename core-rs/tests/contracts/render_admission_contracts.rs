//! Render Admission Contract Tests
//!
//! The PlantUML server is shared infrastructure. These tests pin how many
//! requests may be in flight at once and that a batch always completes, with
//! failures attached to the class that caused them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rdfsdoc_core::render::DEFAULT_CONCURRENCY;
use rdfsdoc_core::{Declaration, DocError, GraphBuilder, Ontology, OutputFormat, RenderOrchestrator, RenderStatus, RenderTransport, Result};

/// Transport that records the peak number of concurrent calls
#[derive(Default)]
struct Gauge {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl RenderTransport for Gauge {
    async fn render(&self, diagram: String, format: OutputFormat) -> Result<Vec<u8>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(10)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if diagram.contains("\"cim:C013\"") {
            return Err(DocError::Http("502 Bad Gateway".to_string()));
        }
        Ok(format.as_str().as_bytes().to_vec())
    }
}

fn many_classes(count: usize) -> Ontology {
    let declarations: Vec<Declaration> = (0..count).map(|i| Declaration::class(format!("C{:03}", i)).into()).collect();
    GraphBuilder::build("cim", declarations)
}

/// WHY: At most DEFAULT_CONCURRENCY renderer calls are in flight
/// REASON: The server is shared and throttles or drops excess connections
/// BREAKS: Large schemas overload the renderer and every diagram fails
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn in_flight_calls_never_exceed_bound() {
    let mut graph = many_classes(120);
    let orchestrator = RenderOrchestrator::new(Gauge::default());

    let report = orchestrator.render_all(&mut graph).await;

    let gauge = orchestrator.transport();
    assert_eq!(gauge.calls.load(Ordering::SeqCst), 120);
    assert!(gauge.peak.load(Ordering::SeqCst) <= DEFAULT_CONCURRENCY);
    assert!(gauge.peak.load(Ordering::SeqCst) > 1, "calls should overlap");
    assert_eq!(gauge.in_flight.load(Ordering::SeqCst), 0);
    assert_eq!(report.total(), 120);
}

/// WHY: A custom bound is honoured exactly
/// REASON: Operators lower the bound for small self-hosted servers
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn custom_bound_is_honoured() {
    let mut graph = many_classes(30);
    let orchestrator = RenderOrchestrator::new(Gauge::default()).with_concurrency(3);

    orchestrator.render_all(&mut graph).await;

    assert!(orchestrator.transport().peak.load(Ordering::SeqCst) <= 3);
    assert_eq!(orchestrator.transport().calls.load(Ordering::SeqCst), 30);
}

/// WHY: One failed render never aborts the batch or loses a permit
/// REASON: Permits are released on every exit path
/// BREAKS: A single bad diagram stalls or truncates the whole site
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failure_is_attached_to_its_class_and_batch_completes() {
    let mut graph = many_classes(120);
    let orchestrator = RenderOrchestrator::new(Gauge::default()).with_format(OutputFormat::Png);

    let report = orchestrator.render_all(&mut graph).await;

    assert_eq!(report.rendered, 119);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].class, "C013");

    match &graph.lookup("C013").unwrap().diagram {
        RenderStatus::Failed(message) => assert!(message.contains("502")),
        other => panic!("Expected Failed, got {:?}", other),
    }
    let image = graph.lookup("C014").unwrap().diagram.image().unwrap();
    assert_eq!(image.format, OutputFormat::Png);
    assert_eq!(image.bytes, b"png".to_vec());

    assert!(graph.iter().all(|(_, class)| !class.diagram.is_pending()));
}

/// WHY: Strict mode surfaces the first failure as a single error naming its class
#[tokio::test]
async fn strict_result_names_failed_class() {
    let mut graph = many_classes(20);
    let report = RenderOrchestrator::new(Gauge::default()).render_all(&mut graph).await;

    match report.into_result() {
        Err(DocError::Render { class, .. }) => assert_eq!(class, "C013"),
        other => panic!("Expected Render error, got {:?}", other),
    }
}
