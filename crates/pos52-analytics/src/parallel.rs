//! Conditional parallel iteration.
//!
//! Uses rayon when the `parallel` feature is enabled, the config allows it,
//! and the collection is large enough. Output order always matches input
//! order, so results are identical to the sequential path.

use pos52_config::AnalysisConfig;

/// Returns true if parallel processing should be used for `count` items.
#[must_use]
pub fn should_parallelize(config: &AnalysisConfig, count: usize) -> bool {
    cfg!(feature = "parallel") && config.parallel && count >= config.parallel_threshold
}

/// Maps a function over items, conditionally using parallel iteration.
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &AnalysisConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if should_parallelize(config, items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}
