//! Structured tracing for filter configuration, decisions and ancestor
//! materialization.
//!
//! Every function is compiled behind the `tracing` feature and collapses to
//! an inline no-op otherwise. Targets use the `xfer::` prefix so the
//! `logging` crate's `FilterLogLayer` can gate them with the matching
//! verbosity flag.
//!
//! # Examples
//!
//! ```rust,ignore
//! use filters::debug_filter::{trace_category_configured, trace_pass_summary};
//! use filters::{FilterKind, MaterializeSummary};
//!
//! trace_category_configured(FilterKind::IncludePattern, 4);
//! trace_pass_summary(&MaterializeSummary::default());
//! ```

use crate::{FilterKind, MaterializeSummary, RelativePath, Verdict};

#[cfg(feature = "tracing")]
const FILTER_TARGET: &str = "xfer::filter";
#[cfg(feature = "tracing")]
const ANCESTOR_TARGET: &str = "xfer::ancestor";
#[cfg(feature = "tracing")]
const STATS_TARGET: &str = "xfer::stats";

/// Traces a category being compiled into a filter set.
///
/// # Arguments
///
/// * `kind` - The configured family
/// * `entries` - Number of non-empty list entries (1 for scalar categories)
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_category_configured(kind: FilterKind, entries: usize) {
    tracing::debug!(
        target: FILTER_TARGET,
        kind = %kind,
        entries = entries,
        "category_configured"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_category_configured(_kind: FilterKind, _entries: usize) {}

/// Traces the verdict reached for one enumerated item.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_item_decision(path: &RelativePath, is_folder: bool, verdict: Verdict) {
    tracing::trace!(
        target: FILTER_TARGET,
        path = %path,
        is_folder = is_folder,
        verdict = %verdict,
        "item_decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_item_decision(_path: &RelativePath, _is_folder: bool, _verdict: Verdict) {}

/// Traces a folder forwarded because a descendant was accepted.
///
/// `synthesized` is `true` when the enumerator never reported the folder.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_ancestor_emitted(path: &RelativePath, synthesized: bool) {
    tracing::debug!(
        target: ANCESTOR_TARGET,
        path = %path,
        synthesized = synthesized,
        "ancestor_emitted"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_ancestor_emitted(_path: &RelativePath, _synthesized: bool) {}

/// Traces the totals of a finished pass.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_pass_summary(summary: &MaterializeSummary) {
    tracing::info!(
        target: STATS_TARGET,
        accepted_files = summary.accepted_files(),
        accepted_folders = summary.accepted_folders(),
        synthesized_ancestors = summary.synthesized_ancestors(),
        rejected_files = summary.rejected_files(),
        rejected_folders = summary.rejected_folders(),
        "pass_summary"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_pass_summary(_summary: &MaterializeSummary) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AcceptReason, RejectReason};

    #[test]
    fn trace_functions_accept_all_inputs() {
        let path = RelativePath::parse("sub/subsub");
        trace_category_configured(FilterKind::ExcludePath, 2);
        trace_item_decision(&path, true, Verdict::Accepted(AcceptReason::SelfMatched));
        trace_item_decision(
            &path,
            false,
            Verdict::Rejected(RejectReason::Excluded(FilterKind::ExcludePath)),
        );
        trace_ancestor_emitted(&path, true);
        trace_pass_summary(&MaterializeSummary::default());
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn events_reach_the_subscriber() {
        use std::sync::{Arc, Mutex};
        use tracing::subscriber::with_default;
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        #[derive(Clone, Default)]
        struct Targets(Arc<Mutex<Vec<String>>>);

        impl<S: tracing::Subscriber> Layer<S> for Targets {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                if let Ok(mut targets) = self.0.lock() {
                    targets.push(event.metadata().target().to_owned());
                }
            }
        }

        let targets = Targets::default();
        let subscriber = tracing_subscriber::registry().with(targets.clone());
        with_default(subscriber, || {
            trace_category_configured(FilterKind::IncludePath, 1);
            trace_ancestor_emitted(&RelativePath::parse("a"), false);
        });

        let seen = targets.0.lock().unwrap().clone();
        assert_eq!(seen, ["xfer::filter", "xfer::ancestor"]);
    }
}
