use crate::get_cpu_count;
use std::thread;

/// Maps `op` over `items` on scoped worker threads, one contiguous chunk per
/// available CPU, and returns the results in input order.
///
/// Small inputs (or single-core hosts) run on the calling thread.
pub fn parallel_map<T, R, OP>(items: &[T], op: OP) -> Vec<R>
where
    T: Sync,
    R: Send,
    OP: Fn(&T) -> R + Sync,
{
    let workers = get_cpu_count().min(items.len());
    if workers <= 1 {
        return items.iter().map(&op).collect();
    }

    let chunk_size = items.len().div_ceil(workers);
    let op = &op;
    thread::scope(|scope| {
        let handles: Vec<_> = items
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || chunk.iter().map(op).collect::<Vec<R>>()))
            .collect();

        let mut results = Vec::with_capacity(items.len());
        for handle in handles {
            match handle.join() {
                Ok(chunk) => results.extend(chunk),
                // a worker panic is a bug in `op`: surface it on the caller's thread
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        results
    })
}
