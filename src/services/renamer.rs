use crate::metrics::Metrics;
use crate::models::{
    NodeError, NodeKind, NodeRef, RENAME_BATCH_SIZE, RenameOptions, RunSummary, is_valid_node_kind,
};
use crate::services::classifier::GeneratedNameClassifier;
use crate::services::naming::NamingStrategyManager;
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use thiserror::Error;

/// Failure to rename a single node. Never escapes a run; see
/// [`RenameOrchestrator::rename_selection`].
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Could not rename {node_id}: {source}")]
    Strategy {
        node_id: String,
        source: anyhow::Error,
    },

    #[error("Could not rename {node_id}: {source}")]
    Assignment { node_id: String, source: NodeError },
}

impl RenameError {
    pub fn node_id(&self) -> &str {
        match self {
            RenameError::Strategy { node_id, .. } | RenameError::Assignment { node_id, .. } => {
                node_id
            }
        }
    }
}

/// Receives per-node failures so they can be shown to the user without
/// interrupting the run.
pub trait FailureNotifier: Send + Sync {
    fn node_failed(&self, error: &RenameError);
}

#[derive(Debug, Default)]
struct RunCounters {
    renamed: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl RunCounters {
    fn summary(&self) -> RunSummary {
        RunSummary {
            renamed: self.renamed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Walks a selection and renames every eligible node.
///
/// Runs are cooperative: selection roots are split into batches of
/// [`RENAME_BATCH_SIZE`], the roots of a batch (and the children of every
/// node) are driven concurrently with `join_all`, and the run yields to the
/// scheduler once between batches. Siblings complete in no particular order.
///
/// A node is renamed only when it passes every gate in
/// [`rename_layer`](Self::rename_layer). Instances are neither renamed nor
/// descended into unless `options.instance` is set.
pub struct RenameOrchestrator {
    classifier: GeneratedNameClassifier,
    naming: Arc<NamingStrategyManager>,
    notifier: Option<Arc<dyn FailureNotifier>>,
    metrics: Arc<Metrics>,
    batch_size: usize,
}

impl RenameOrchestrator {
    pub fn new(naming: Arc<NamingStrategyManager>) -> Self {
        Self {
            classifier: GeneratedNameClassifier::new(),
            naming,
            notifier: None,
            metrics: Arc::new(Metrics::new()),
            batch_size: RENAME_BATCH_SIZE,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn FailureNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Rename the selection and its descendants.
    ///
    /// Returns true iff at least one node's name actually changed. Per-node
    /// failures are logged, reported to the notifier and counted as "not
    /// renamed"; they never abort the run.
    pub async fn rename_selection(&self, roots: &[NodeRef], options: &RenameOptions) -> bool {
        self.rename_selection_with_report(roots, options)
            .await
            .any_renamed()
    }

    /// Same as [`rename_selection`](Self::rename_selection), returning per-run counts
    pub async fn rename_selection_with_report(
        &self,
        roots: &[NodeRef],
        options: &RenameOptions,
    ) -> RunSummary {
        let start = Instant::now();
        let counters = RunCounters::default();
        let batch_count = roots.len().div_ceil(self.batch_size);

        tracing::info!(
            "Renaming {} selected layers in {} batches",
            roots.len(),
            batch_count
        );

        for (index, batch) in roots.chunks(self.batch_size).enumerate() {
            if index > 0 {
                tokio::task::yield_now().await;
            }

            tracing::debug!("Processing batch {}/{}", index + 1, batch_count);

            join_all(
                batch
                    .iter()
                    .map(|root| self.rename_tree(root, options, &counters)),
            )
            .await;
        }

        let summary = counters.summary();
        self.metrics.record_run(start.elapsed());

        tracing::info!(
            "Rename run finished in {:.2}ms: {} renamed, {} skipped, {} failed",
            start.elapsed().as_secs_f64() * 1000.0,
            summary.renamed,
            summary.skipped,
            summary.failed
        );

        summary
    }

    fn rename_tree<'a>(
        &'a self,
        node: &'a NodeRef,
        options: &'a RenameOptions,
        counters: &'a RunCounters,
    ) -> BoxFuture<'a, bool> {
        async move {
            let is_instance = node.kind() == NodeKind::Instance.as_str();

            if is_instance && !options.instance {
                tracing::trace!("Skipping instance subtree {}", node.id());
                counters.skipped.fetch_add(1, Ordering::Relaxed);
                self.metrics.record_node_skipped();
                return false;
            }

            let renamed = self.try_rename_layer(node, options, counters).await;

            let children = match node.children() {
                Some(children) if !children.is_empty() && (!is_instance || options.instance) => {
                    children
                }
                _ => return renamed,
            };

            let child_results = join_all(
                children
                    .iter()
                    .map(|child| self.rename_tree(child, options, counters)),
            )
            .await;

            renamed | child_results.into_iter().any(|child_renamed| child_renamed)
        }
        .boxed()
    }

    /// Per-node failure boundary around [`rename_layer`](Self::rename_layer)
    async fn try_rename_layer(
        &self,
        node: &NodeRef,
        options: &RenameOptions,
        counters: &RunCounters,
    ) -> bool {
        match self.rename_layer(node, options).await {
            Ok(true) => {
                counters.renamed.fetch_add(1, Ordering::Relaxed);
                self.metrics.record_node_renamed();
                true
            }
            Ok(false) => {
                counters.skipped.fetch_add(1, Ordering::Relaxed);
                self.metrics.record_node_skipped();
                false
            }
            Err(e) => {
                tracing::error!(node_id = %e.node_id(), "{}", e);
                counters.failed.fetch_add(1, Ordering::Relaxed);
                self.metrics.record_node_failed();

                if let Some(notifier) = &self.notifier {
                    notifier.node_failed(&e);
                }
                false
            }
        }
    }

    /// Rename a single node if it is eligible.
    ///
    /// Returns `Ok(false)` without asking the strategy when the node:
    /// - has a type tag outside the known kinds
    /// - is locked and `options.locked` is off
    /// - is hidden and `options.hidden` is off
    /// - is an instance and `options.instance` is off
    /// - carries a custom name and `options.rename_custom_names` is off
    ///
    /// Otherwise the strategy's proposal is assigned when it differs from the
    /// current name.
    pub async fn rename_layer(
        &self,
        node: &NodeRef,
        options: &RenameOptions,
    ) -> Result<bool, RenameError> {
        if !is_valid_node_kind(node.kind()) {
            tracing::warn!("Skipping node {} with unknown kind {}", node.id(), node.kind());
            self.metrics.record_unknown_kind();
            return Ok(false);
        }

        if node.locked() && !options.locked {
            tracing::trace!("Skipping locked node {}", node.id());
            return Ok(false);
        }

        if !node.visible() && !options.hidden {
            tracing::trace!("Skipping hidden node {}", node.id());
            return Ok(false);
        }

        if node.kind() == NodeKind::Instance.as_str() && !options.instance {
            return Ok(false);
        }

        if !options.rename_custom_names && !self.classifier.is_host_or_plugin_generated_name(&**node)
        {
            tracing::trace!("Keeping custom name of node {}: {:?}", node.id(), node.name());
            return Ok(false);
        }

        let current = node.name();
        let proposed = self.naming.generate_name(node, options).await?;

        if proposed == current {
            return Ok(false);
        }

        node.set_name(&proposed)
            .map_err(|source| RenameError::Assignment {
                node_id: node.id().to_string(),
                source,
            })?;

        tracing::debug!("Renamed node {}: {:?} -> {:?}", node.id(), current, proposed);
        Ok(true)
    }
}
