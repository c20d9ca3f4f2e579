//! Pieces shared by the encrypt and decrypt orchestrators: request checks,
//! the sequential per-file loop with progress scaling, and batch aggregation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::errors::{EncryptzError, Result};
use crate::core::models::algorithm::Algorithm;
use crate::core::models::outcome::{EncryptionOutcome, ItemOutcome, OutcomeMetadata, Payload};
use crate::core::models::request::EncryptionRequest;
use crate::core::services::progress::{self, ProgressFn};

/// One unit of batch work: the input file and, when fixed by the batch,
/// where its result goes.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
}

/// Reject requests for password-based algorithms that carry no password.
pub fn require_password(request: &EncryptionRequest, operation: &'static str) -> Result<()> {
    if request.algorithm.needs_password() && request.password().is_none() {
        return Err(EncryptzError::PasswordRequired {
            algorithm: request.algorithm,
            operation,
        });
    }
    Ok(())
}

/// Label shown next to progress for a file.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Turn a fallible operation into an outcome, logging the failure.
pub fn into_outcome(result: Result<EncryptionOutcome>, context: &str) -> EncryptionOutcome {
    result.unwrap_or_else(|e| {
        warn!(context, kind = ?e.kind(), "{e}");
        EncryptionOutcome::failure(e.to_string())
    })
}

/// Process `items` one after another, continuing past failures.
///
/// `process` receives each item and a progress callback that rescales the
/// item's own `0..=100` progress into the batch-wide percentage. An item whose
/// destination was already claimed by an earlier one fails without running.
pub fn run_batch<P>(
    items: &[BatchItem],
    progress: Option<&ProgressFn<'_>>,
    mut process: P,
) -> Vec<ItemOutcome>
where
    P: FnMut(&BatchItem, Option<&ProgressFn<'_>>) -> EncryptionOutcome,
{
    let count = items.len();
    let mut results = Vec::with_capacity(count);
    let mut claimed: HashSet<&Path> = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let scaled: &ProgressFn<'_> = &move |current, total, label| {
            if let Some(overall) = progress::overall_percent(index, count, current, total) {
                progress::report(progress, overall, 100, label);
            }
        };

        let outcome = match item.destination.as_deref() {
            Some(dest) if !claimed.insert(dest) => into_outcome(
                Err(EncryptzError::OutputConflict {
                    path: dest.to_path_buf(),
                }),
                "batch item",
            ),
            _ => process(item, progress.map(|_| scaled)),
        };
        if !outcome.success {
            warn!(
                file = %item.source.display(),
                error = outcome.error_message.as_deref().unwrap_or_default(),
                "file failed, continuing with the rest of the batch"
            );
        }
        results.push(ItemOutcome {
            source: item.source.clone(),
            outcome,
        });
    }

    results
}

/// Pair multi-file results with the inputs they came from, so they can be
/// folded with [`aggregate`] like a directory batch.
pub fn pair_with_sources(
    paths: &[PathBuf],
    outcomes: Vec<EncryptionOutcome>,
) -> Vec<ItemOutcome> {
    paths
        .iter()
        .cloned()
        .zip(outcomes)
        .map(|(source, outcome)| ItemOutcome { source, outcome })
        .collect()
}

/// Fold per-file results into one batch outcome.
///
/// The batch succeeds only when every item did (an empty batch trivially
/// does). Sizes are summed over the items; failed items carry none.
pub fn aggregate(
    algorithm: Algorithm,
    payload: Payload,
    items: Vec<ItemOutcome>,
) -> EncryptionOutcome {
    let total = items.len();
    let succeeded = items.iter().filter(|i| i.outcome.success).count();

    if succeeded == total {
        let original_size = items.iter().map(|i| i.outcome.original_size()).sum();
        let encrypted_size = items.iter().map(|i| i.outcome.encrypted_size()).sum();
        info!(
            files = total,
            original_size,
            encrypted_size,
            "batch complete"
        );
        return EncryptionOutcome::success(
            payload,
            OutcomeMetadata::now(algorithm, original_size, encrypted_size),
        )
        .with_items(items);
    }

    let failed = total - succeeded;
    let first = items
        .iter()
        .find(|i| !i.outcome.success)
        .map(|i| {
            format!(
                "{}: {}",
                i.source.display(),
                i.outcome.error_message.as_deref().unwrap_or("unknown error")
            )
        })
        .unwrap_or_default();

    EncryptionOutcome::failure(format!(
        "{failed} of {total} files failed (first failure: {first})"
    ))
    .with_items(items)
}
