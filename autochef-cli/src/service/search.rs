//! Search service
//!
//! Drives a recipe search:
//! - Detecting: ask the detection service once for a prefix recipe
//! - Searching: append every catalog entry to the prefix, bake, classify
//! - Done: hand back a report with every candidate in catalog order
//!
//! The whole catalog is always tried; there is no early exit on a hit.

use autochef_client::ClientError;
use autochef_core::catalog::{Catalog, CatalogItem, KeyMaterial, SlotPolicy};
use autochef_core::classify::Classifier;
use autochef_core::domain::candidate::{Candidate, CandidateStatus, SearchReport};
use autochef_core::domain::operation::OperationDescriptor;
use autochef_core::domain::pipeline::Pipeline;
use autochef_core::domain::transform::TransformResult;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{DetectionService, TransformService};

/// Errors that end a search before any candidate is tried
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Detection failed: {0}")]
    DetectionUnavailable(#[source] ClientError),
}

/// Tunables for a search run
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Fills key/IV slots of catalog entries
    pub keys: KeyMaterial,
    pub slot_policy: SlotPolicy,
    /// Candidates baked at once; 1 means strictly sequential
    pub concurrency: usize,
    /// Keep going with an empty prefix when detection fails
    pub allow_blind: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            keys: KeyMaterial::default(),
            slot_policy: SlotPolicy::Blank,
            concurrency: 1,
            allow_blind: false,
        }
    }
}

/// Catalog-driven recipe search
pub struct SearchService {
    detector: Arc<dyn DetectionService>,
    transformer: Arc<dyn TransformService>,
    catalog: Arc<Catalog>,
    classifier: Arc<dyn Classifier>,
    options: SearchOptions,
}

/// A catalog position while a concurrent search is in flight
enum Slot {
    Done(Candidate),
    Pending {
        index: usize,
        operation: OperationDescriptor,
        handle: JoinHandle<Candidate>,
    },
}

impl SearchService {
    pub fn new(
        detector: Arc<dyn DetectionService>,
        transformer: Arc<dyn TransformService>,
        catalog: Arc<Catalog>,
        classifier: Arc<dyn Classifier>,
        options: SearchOptions,
    ) -> Self {
        Self {
            detector,
            transformer,
            catalog,
            classifier,
            options,
        }
    }

    /// Runs a full search over `input`
    pub async fn run(&self, input: &str) -> Result<SearchReport, SearchError> {
        info!("Detecting prefix recipe");

        let prefix = match self.detector.detect(input).await {
            Ok(detection) => detection.best(),
            Err(e) if self.options.allow_blind => {
                warn!("Detection failed, searching without a prefix: {}", e);
                Pipeline::empty()
            }
            Err(e) => return Err(SearchError::DetectionUnavailable(e)),
        };

        if prefix.is_empty() {
            info!("No prefix recipe detected");
        } else {
            info!("Detected prefix: {}", prefix.summary());
        }

        info!(
            "Trying {} catalog entries (concurrency {})",
            self.catalog.len(),
            self.options.concurrency
        );

        let prefix = Arc::new(prefix);
        let candidates = if self.options.concurrency > 1 {
            self.search_concurrent(input, &prefix).await
        } else {
            self.search_sequential(input, &prefix).await
        };

        let report = SearchReport {
            prefix: Arc::unwrap_or_clone(prefix),
            candidates,
        };

        info!(
            "Search finished: {} hit(s), {} candidate(s) evaluated",
            report.hit_count(),
            report.evaluated()
        );

        Ok(report)
    }

    async fn search_sequential(&self, input: &str, prefix: &Pipeline) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(self.catalog.len());

        for (index, item) in self.catalog.items().iter().enumerate() {
            let candidate = match self.prepare(index, item) {
                Ok(operation) => {
                    evaluate(
                        self.transformer.as_ref(),
                        self.classifier.as_ref(),
                        input,
                        prefix,
                        index,
                        operation,
                    )
                    .await
                }
                Err(skipped) => skipped,
            };
            candidates.push(candidate);
        }

        candidates
    }

    /// Bakes up to `concurrency` candidates at once; results are merged back
    /// in catalog order, not completion order.
    async fn search_concurrent(&self, input: &str, prefix: &Arc<Pipeline>) -> Vec<Candidate> {
        let semaphore = Arc::new(Semaphore::new(self.options.concurrency));
        let input: Arc<str> = Arc::from(input);
        let mut slots = Vec::with_capacity(self.catalog.len());

        for (index, item) in self.catalog.items().iter().enumerate() {
            let operation = match self.prepare(index, item) {
                Ok(operation) => operation,
                Err(skipped) => {
                    slots.push(Slot::Done(skipped));
                    continue;
                }
            };

            let semaphore = Arc::clone(&semaphore);
            let transformer = Arc::clone(&self.transformer);
            let classifier = Arc::clone(&self.classifier);
            let input = Arc::clone(&input);
            let prefix = Arc::clone(prefix);
            let task_operation = operation.clone();

            let handle = tokio::spawn(async move {
                // Permit is released when dropped
                let _permit = semaphore.acquire_owned().await.ok();
                evaluate(
                    transformer.as_ref(),
                    classifier.as_ref(),
                    &input,
                    &prefix,
                    index,
                    task_operation,
                )
                .await
            });

            slots.push(Slot::Pending {
                index,
                operation,
                handle,
            });
        }

        let mut candidates = Vec::with_capacity(slots.len());
        for slot in slots {
            let candidate = match slot {
                Slot::Done(candidate) => candidate,
                Slot::Pending {
                    index,
                    operation,
                    handle,
                } => match handle.await {
                    Ok(candidate) => candidate,
                    Err(e) => {
                        warn!("Candidate task for {} panicked: {}", operation, e);
                        Candidate {
                            index,
                            label: operation.name().to_string(),
                            operation: Some(operation),
                            status: CandidateStatus::Failed {
                                reason: format!("task failed: {}", e),
                            },
                        }
                    }
                },
            };
            candidates.push(candidate);
        }

        candidates
    }

    /// Resolves a catalog item into a suffix operation, or the skipped
    /// candidate explaining why it cannot be tried
    fn prepare(&self, index: usize, item: &CatalogItem) -> Result<OperationDescriptor, Candidate> {
        let skipped = |reason: String| Candidate {
            index,
            label: item.label().to_string(),
            operation: None,
            status: CandidateStatus::Skipped { reason },
        };

        match item {
            CatalogItem::Malformed { label, reason } => {
                warn!("Skipping malformed catalog entry {}: {}", label, reason);
                Err(skipped(format!("malformed catalog entry: {}", reason)))
            }
            CatalogItem::Entry(entry) => entry
                .resolve(&self.options.keys, self.options.slot_policy)
                .map_err(|e| {
                    warn!("Skipping {}: {}", entry.op, e);
                    skipped(e.to_string())
                }),
        }
    }
}

/// Bakes `prefix + operation` and classifies the outcome
async fn evaluate(
    transformer: &dyn TransformService,
    classifier: &dyn Classifier,
    input: &str,
    prefix: &Pipeline,
    index: usize,
    operation: OperationDescriptor,
) -> Candidate {
    let label = operation.name().to_string();
    let pipeline = prefix.extend(operation.clone());

    debug!("Candidate #{}: {}", index, pipeline.summary());
    let result = transformer.bake(input, &pipeline).await;

    let status = match &result {
        TransformResult::Failure(failure) => {
            warn!("{} failed: {}", label, failure);
            CandidateStatus::Failed {
                reason: failure.to_string(),
            }
        }
        TransformResult::Success(output) if classifier.is_hit(&result) => {
            info!("Hit: {}", label);
            CandidateStatus::Hit {
                output: output.text(),
            }
        }
        TransformResult::Success(_) => {
            debug!("{} produced no recognizable output", label);
            CandidateStatus::Miss
        }
    };

    Candidate {
        index,
        label,
        operation: Some(operation),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use autochef_core::catalog::CatalogEntry;
    use autochef_core::classify::MarkerClassifier;
    use autochef_core::domain::detection::{DetectionResult, MagicCandidate};
    use autochef_core::domain::operation::Argument;
    use autochef_core::domain::transform::BakeOutput;
    use std::sync::Mutex;
    use std::time::Duration;

    // =============================================================================
    // Fakes
    // =============================================================================

    struct FakeDetector {
        result: Result<DetectionResult, u16>,
    }

    impl FakeDetector {
        fn prefix(ops: &[&str]) -> Arc<Self> {
            let recipe = ops
                .iter()
                .map(|op| OperationDescriptor::new(*op, vec![]))
                .collect();
            Arc::new(Self {
                result: Ok(DetectionResult {
                    candidates: vec![MagicCandidate {
                        recipe,
                        preview: None,
                        entropy: None,
                    }],
                }),
            })
        }

        fn nothing() -> Arc<Self> {
            Arc::new(Self {
                result: Ok(DetectionResult::default()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                result: Err(status),
            })
        }
    }

    #[async_trait]
    impl DetectionService for FakeDetector {
        async fn detect(&self, _input: &str) -> Result<DetectionResult, ClientError> {
            match &self.result {
                Ok(detection) => Ok(detection.clone()),
                Err(status) => Err(ClientError::api_error(*status, "boom")),
            }
        }
    }

    type Responder = Box<dyn Fn(&Pipeline) -> TransformResult + Send + Sync>;

    struct FakeTransformer {
        respond: Responder,
        delay: fn(&Pipeline) -> Duration,
        calls: Mutex<Vec<Pipeline>>,
    }

    impl FakeTransformer {
        fn new(respond: impl Fn(&Pipeline) -> TransformResult + Send + Sync + 'static) -> Arc<Self> {
            Arc::new(Self {
                respond: Box::new(respond),
                delay: |_| Duration::ZERO,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn with_delay(
            respond: impl Fn(&Pipeline) -> TransformResult + Send + Sync + 'static,
            delay: fn(&Pipeline) -> Duration,
        ) -> Arc<Self> {
            Arc::new(Self {
                respond: Box::new(respond),
                delay,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Pipeline> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TransformService for FakeTransformer {
        async fn bake(&self, _input: &str, pipeline: &Pipeline) -> TransformResult {
            self.calls.lock().unwrap().push(pipeline.clone());
            let delay = (self.delay)(pipeline);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            (self.respond)(pipeline)
        }
    }

    fn string_output(value: &str) -> TransformResult {
        let body = serde_json::json!({"type": "string", "value": value}).to_string();
        TransformResult::Success(BakeOutput::from_body(body).unwrap())
    }

    fn number_output() -> TransformResult {
        TransformResult::Success(BakeOutput::from_body(r#"{"type":"number","value":42}"#).unwrap())
    }

    fn last_op(pipeline: &Pipeline) -> &str {
        pipeline.operations().last().map(|op| op.name()).unwrap_or("")
    }

    fn simple_catalog(n: usize) -> Arc<Catalog> {
        Arc::new(Catalog::from_entries(
            (0..n)
                .map(|i| CatalogEntry {
                    op: format!("op{}", i),
                    args: vec![],
                })
                .collect(),
        ))
    }

    fn service(
        detector: Arc<FakeDetector>,
        transformer: Arc<FakeTransformer>,
        catalog: Arc<Catalog>,
        options: SearchOptions,
    ) -> SearchService {
        SearchService::new(
            detector,
            transformer,
            catalog,
            Arc::new(MarkerClassifier),
            options,
        )
    }

    // =============================================================================
    // Tests
    // =============================================================================

    #[tokio::test]
    async fn test_single_failure_does_not_abort_search() {
        let transformer = FakeTransformer::new(|pipeline| {
            if last_op(pipeline) == "op3" {
                TransformResult::failure(Some(500), "Internal Server Error")
            } else {
                string_output(last_op(pipeline))
            }
        });
        let search = service(
            FakeDetector::prefix(&["From Base64"]),
            transformer.clone(),
            simple_catalog(6),
            SearchOptions::default(),
        );

        let report = search.run("abc").await.unwrap();

        assert_eq!(transformer.calls().len(), 6);
        let hits: Vec<_> = report.hits().map(|(label, _)| label).collect();
        assert_eq!(hits, vec!["op0", "op1", "op2", "op4", "op5"]);
        assert!(matches!(
            report.candidates[3].status,
            CandidateStatus::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn test_detection_failure_evaluates_nothing() {
        let transformer = FakeTransformer::new(|_| string_output("x"));
        let search = service(
            FakeDetector::failing(500),
            transformer.clone(),
            simple_catalog(4),
            SearchOptions::default(),
        );

        let err = search.run("abc").await.unwrap_err();

        let SearchError::DetectionUnavailable(cause) = err;
        assert_eq!(cause.status(), Some(500));
        assert!(transformer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_allow_blind_searches_without_prefix() {
        let transformer = FakeTransformer::new(|_| number_output());
        let search = service(
            FakeDetector::failing(503),
            transformer.clone(),
            simple_catalog(3),
            SearchOptions {
                allow_blind: true,
                ..SearchOptions::default()
            },
        );

        let report = search.run("abc").await.unwrap();

        assert_eq!(report.prefix_label(), None);
        assert_eq!(report.hit_count(), 0);
        assert_eq!(transformer.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_three_layer_end_to_end() {
        let key = "0123456789abcdef";
        let transformer = FakeTransformer::new(move |pipeline| {
            let names: Vec<_> = pipeline.operations().iter().map(|op| op.name()).collect();
            let keyed = pipeline
                .operations()
                .last()
                .map(|op| op.args.first() == Some(&Argument::keyed("Hex", key)))
                .unwrap_or(false);
            if names == ["From Base32", "From Base64", "RC2 Decrypt"] && keyed {
                string_output("flag{test}")
            } else {
                TransformResult::failure(Some(500), "generic failure")
            }
        });
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let search = service(
            FakeDetector::prefix(&["From Base32", "From Base64"]),
            transformer.clone(),
            catalog.clone(),
            SearchOptions {
                keys: KeyMaterial {
                    key: Some(key.to_string()),
                    iv: Some(String::new()),
                },
                ..SearchOptions::default()
            },
        );

        let report = search.run("JZLU26K2IRJGQWTKIU2U2V2F").await.unwrap();

        let hits: Vec<_> = report.hits().collect();
        assert_eq!(hits, vec![("RC2 Decrypt", "flag{test}")]);
        assert_eq!(
            report.prefix_label().as_deref(),
            Some("From Base32 --> From Base64")
        );
        assert_eq!(transformer.calls().len(), catalog.len());
    }

    #[tokio::test]
    async fn test_empty_detection_uses_single_operation_pipelines() {
        let transformer = FakeTransformer::new(|_| number_output());
        let search = service(
            FakeDetector::nothing(),
            transformer.clone(),
            simple_catalog(5),
            SearchOptions::default(),
        );

        let report = search.run("abc").await.unwrap();

        assert_eq!(report.prefix_label(), None);
        let calls = transformer.calls();
        assert_eq!(calls.len(), 5);
        assert!(calls.iter().all(|pipeline| pipeline.len() == 1));
    }

    #[tokio::test]
    async fn test_report_keeps_catalog_order() {
        let transformer = FakeTransformer::new(|pipeline| match last_op(pipeline) {
            "op1" | "op4" => TransformResult::failure(None, "connection refused"),
            "op2" => number_output(),
            op => string_output(op),
        });
        let search = service(
            FakeDetector::prefix(&["From Hex"]),
            transformer,
            simple_catalog(6),
            SearchOptions::default(),
        );

        let report = search.run("abc").await.unwrap();

        let indices: Vec<_> = report.candidates.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        let hits: Vec<_> = report.hits().map(|(label, _)| label).collect();
        assert_eq!(hits, vec!["op0", "op3", "op5"]);
    }

    #[tokio::test]
    async fn test_concurrent_search_keeps_catalog_order() {
        // Earlier entries finish last
        let transformer = FakeTransformer::with_delay(
            |pipeline| string_output(last_op(pipeline)),
            |pipeline| {
                let index: u64 = last_op(pipeline)
                    .trim_start_matches("op")
                    .parse()
                    .unwrap_or(0);
                Duration::from_millis(5 * (8 - index))
            },
        );
        let search = service(
            FakeDetector::prefix(&["From Hex"]),
            transformer.clone(),
            simple_catalog(8),
            SearchOptions {
                concurrency: 4,
                ..SearchOptions::default()
            },
        );

        let report = search.run("abc").await.unwrap();

        assert_eq!(transformer.calls().len(), 8);
        let labels: Vec<_> = report.hits().map(|(label, _)| label.to_string()).collect();
        let expected: Vec<_> = (0..8).map(|i| format!("op{}", i)).collect();
        assert_eq!(labels, expected);
    }

    #[tokio::test]
    async fn test_malformed_and_unresolved_entries_are_skipped() {
        let catalog = Catalog::from_json(
            r#"[
                {"op": "ROT13", "args": [true, true, false, 13]},
                {"op": "Broken", "args": 7},
                {"op": "RC2 Decrypt", "args": [{"slot": "key", "option": "Hex"}, "Hex", "Raw"]},
                {"op": "ROT47", "args": [47]}
            ]"#,
        )
        .unwrap();
        let transformer = FakeTransformer::new(|pipeline| string_output(last_op(pipeline)));
        let search = service(
            FakeDetector::prefix(&["From Base64"]),
            transformer.clone(),
            Arc::new(catalog),
            SearchOptions {
                slot_policy: SlotPolicy::Strict,
                ..SearchOptions::default()
            },
        );

        let report = search.run("abc").await.unwrap();

        assert_eq!(report.candidates.len(), 4);
        assert!(matches!(
            report.candidates[1].status,
            CandidateStatus::Skipped { .. }
        ));
        assert!(matches!(
            report.candidates[2].status,
            CandidateStatus::Skipped { .. }
        ));
        assert_eq!(report.evaluated(), 2);
        let hits: Vec<_> = report.hits().map(|(label, _)| label).collect();
        assert_eq!(hits, vec!["ROT13", "ROT47"]);
        assert_eq!(transformer.calls().len(), 2);
    }
}
