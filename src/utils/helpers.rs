/// Cuts a list into display rows of `width` items. The last row may be short.
pub fn chunk_rows<T: Clone>(items: &[T], width: usize) -> Vec<Vec<T>> {
    items.chunks(width.max(1)).map(<[T]>::to_vec).collect()
}

/// Caps the worker count for a sweep: never zero, never more than there are
/// targets.
pub fn calculate_optimal_workers(max_workers: usize, targets: usize) -> usize {
    max_workers.min(targets).max(1)
}
