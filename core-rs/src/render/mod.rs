//! Concurrent diagram rendering
//!
//! Synthesizes the diagram of every Class-stereotype class, submits all of
//! them to a [`RenderTransport`] at once and attaches the results. A
//! semaphore bounds how many renderer calls are in flight; each task holds
//! its permit only around the renderer call and drops it on every exit
//! path. Failures are recorded per class and never abort the batch.

pub mod plantuml;
pub mod transport;

pub use plantuml::PlantUmlServer;
pub use transport::RenderTransport;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::diagram::{DiagramOptions, DiagramSynthesizer};
use crate::errors::{DocError, Result};
use crate::model::{ClassId, DiagramImage, OutputFormat, Ontology, RenderStatus, Stereotype};

/// Maximum renderer calls in flight
pub const DEFAULT_CONCURRENCY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    pub class: String,
    pub message: String,
}

/// Outcome of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub rendered: usize,
    /// Sorted by class name
    pub failures: Vec<RenderFailure>,
}

impl RenderReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.rendered + self.failures.len()
    }

    /// Turn the first failure into a batch-level error naming its class
    pub fn into_result(self) -> Result<Self> {
        match self.failures.first() {
            Some(failure) => Err(DocError::Render {
                class: failure.class.clone(),
                message: failure.message.clone(),
            }),
            None => Ok(self),
        }
    }
}

pub struct RenderOrchestrator<T: RenderTransport> {
    transport: Arc<T>,
    concurrency: usize,
    format: OutputFormat,
    options: DiagramOptions,
}

impl<T: RenderTransport> RenderOrchestrator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            concurrency: DEFAULT_CONCURRENCY,
            format: OutputFormat::Svg,
            options: DiagramOptions::default(),
        }
    }

    /// Admission bound; values below 1 are raised to 1
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_diagram_options(mut self, options: DiagramOptions) -> Self {
        self.options = options;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Render every Class-stereotype class and set its `diagram`
    ///
    /// Returns once every submission has completed or failed.
    pub async fn render_all(&self, graph: &mut Ontology) -> RenderReport {
        let targets = graph.ids_by_stereotype(Stereotype::Class);
        tracing::info!(
            "[Render] Rendering {} diagrams ({} at a time)",
            targets.len(),
            self.concurrency
        );

        let mut outcomes: Vec<(ClassId, RenderStatus)> = Vec::with_capacity(targets.len());
        let mut submissions = Vec::with_capacity(targets.len());

        for id in targets {
            match DiagramSynthesizer::new(graph, self.options).synthesize(id) {
                Ok(text) => submissions.push((id, text)),
                Err(e) => {
                    tracing::warn!("[Render] Skipping {}: {}", graph.get(id).name, e);
                    outcomes.push((id, RenderStatus::Failed(e.to_string())));
                }
            }
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        let mut task_classes = HashMap::new();

        for (id, text) in submissions {
            let semaphore = Arc::clone(&semaphore);
            let transport = Arc::clone(&self.transport);
            let format = self.format;

            let handle = tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (id, Err(DocError::Http("admission gate closed".to_string())));
                };
                (id, transport.render(text, format).await)
            });
            task_classes.insert(handle.id(), id);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, (id, Ok(bytes)))) => {
                    outcomes.push((id, RenderStatus::Rendered(DiagramImage { format: self.format, bytes })));
                }
                Ok((_, (id, Err(e)))) => {
                    tracing::warn!("[Render] {} failed: {}", graph.get(id).name, e);
                    outcomes.push((id, RenderStatus::Failed(e.to_string())));
                }
                Err(join_error) => {
                    if let Some(id) = task_classes.get(&join_error.id()).copied() {
                        tracing::warn!("[Render] {} task aborted: {}", graph.get(id).name, join_error);
                        outcomes.push((id, RenderStatus::Failed(join_error.to_string())));
                    }
                }
            }
        }

        let mut report = RenderReport::default();
        for (id, status) in outcomes {
            let class = graph.get_mut(id);
            match &status {
                RenderStatus::Rendered(_) => report.rendered += 1,
                RenderStatus::Failed(message) => report.failures.push(RenderFailure {
                    class: class.name.clone(),
                    message: message.clone(),
                }),
                RenderStatus::Pending => {}
            }
            class.diagram = status;
        }
        report.failures.sort_by(|a, b| a.class.cmp(&b.class));

        tracing::info!(
            "[Render] Done: {} rendered, {} failed",
            report.rendered,
            report.failures.len()
        );
        report
    }
}
