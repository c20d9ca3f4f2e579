/// Progress callback: `(current, total, label)`.
///
/// Called synchronously, inline with processing.
pub type ProgressFn<'a> = dyn Fn(u64, u64, Option<&str>) + Send + Sync + 'a;

/// Per-file checkpoints reported by the single-file path.
pub const FILE_STARTED: u64 = 0;
pub const FILE_TRANSFORMED: u64 = 50;
pub const FILE_WRITTEN: u64 = 100;
pub const FILE_TOTAL: u64 = 100;

/// Combine one item's fractional progress into the batch percentage.
///
/// `index` is the 0-based position of the item among `count` items and
/// `current / total` its own completion. Returns `None` for an empty batch,
/// which reports no progress at all.
pub fn overall_percent(index: usize, count: usize, current: u64, total: u64) -> Option<u64> {
    if count == 0 {
        return None;
    }
    let fraction = if total == 0 {
        1.0
    } else {
        (current.min(total) as f64) / (total as f64)
    };
    let overall = (((index as f64 + fraction) / count as f64) * 100.0).round() as u64;

    // Large batches would otherwise round up to 100 before the last write.
    let finished = index + 1 >= count && current >= total;
    Some(if finished { 100 } else { overall.min(99) })
}

/// Invoke `progress` if present.
pub fn report(progress: Option<&ProgressFn<'_>>, current: u64, total: u64, label: Option<&str>) {
    if let Some(cb) = progress {
        cb(current, total, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_reports_nothing() {
        assert_eq!(overall_percent(0, 0, 50, 100), None);
    }

    #[test]
    fn single_item_matches_its_own_progress() {
        assert_eq!(overall_percent(0, 1, 0, 100), Some(0));
        assert_eq!(overall_percent(0, 1, 50, 100), Some(50));
        assert_eq!(overall_percent(0, 1, 100, 100), Some(100));
    }

    #[test]
    fn three_items_round_to_nearest() {
        assert_eq!(overall_percent(0, 3, 50, 100), Some(17));
        assert_eq!(overall_percent(1, 3, 0, 100), Some(33));
        assert_eq!(overall_percent(2, 3, 100, 100), Some(100));
    }

    #[test]
    fn monotonic_across_batch_and_hits_100_once() {
        let count = 7;
        let mut seen = Vec::new();
        for index in 0..count {
            for current in [FILE_STARTED, FILE_TRANSFORMED, FILE_WRITTEN] {
                seen.push(overall_percent(index, count, current, FILE_TOTAL).unwrap());
            }
        }
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.iter().filter(|&&p| p == 100).count(), 1);
        assert_eq!(*seen.last().unwrap(), 100);
    }

    #[test]
    fn large_batch_holds_100_for_the_final_write() {
        assert_eq!(overall_percent(199, 200, 0, 100), Some(99));
        assert_eq!(overall_percent(199, 200, 50, 100), Some(99));
        assert_eq!(overall_percent(199, 200, 100, 100), Some(100));
    }
}
