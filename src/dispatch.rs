use std::panic::{self, AssertUnwindSafe};

use log::{debug, info};
use rayon::prelude::*;

use crate::{
    error::{Error, Result},
    index::TransactionIndex,
    search::ClosureSearch,
    types::{Item, PatternRecord, TidSet},
};

/// Run one closure search per frequent item and concatenate the results.
///
/// Roots are submitted by decreasing support, and the output keeps that
/// submission order whatever the number of workers. `n_jobs == 1` runs on
/// the calling thread; anything above that gets a dedicated pool.
pub fn dispatch<I: Item>(
    index: &TransactionIndex<I>,
    n_jobs: usize,
) -> Result<Vec<PatternRecord<I>>> {
    if n_jobs < 1 {
        return Err(Error::InvalidParameter(format!(
            "n_jobs must be at least 1, got {}",
            n_jobs
        )));
    }

    let roots = index.by_descending_support();
    info!(
        "exploring {} root items with {} worker(s), min support {}",
        roots.len(),
        n_jobs,
        index.min_support_count()
    );

    let batches: Vec<Vec<PatternRecord<I>>> = if n_jobs == 1 {
        roots
            .iter()
            .map(|&(item, tids)| explore_root(index, item, tids))
            .collect::<Result<Vec<_>>>()?
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_jobs)
            .thread_name(|i| format!("lcm-worker-{}", i))
            .build()
            .map_err(|e| Error::Worker {
                root: "<pool>".to_owned(),
                reason: e.to_string(),
            })?;
        // workers can fail in any order; report the earliest root that did
        let outcomes: Vec<Result<Vec<PatternRecord<I>>>> = pool.install(|| {
            roots
                .par_iter()
                .map(|&(item, tids)| explore_root(index, item, tids))
                .collect()
        });
        outcomes.into_iter().collect::<Result<Vec<_>>>()?
    };

    let patterns: Vec<PatternRecord<I>> = batches.into_iter().flatten().collect();
    info!("found {} closed itemsets", patterns.len());
    Ok(patterns)
}

/// Exhaust the search rooted at `item`.
///
/// A panic inside the search is turned into an error for that root.
fn explore_root<I: Item>(
    index: &TransactionIndex<I>,
    item: &I,
    tids: &TidSet,
) -> Result<Vec<PatternRecord<I>>> {
    let found = panic::catch_unwind(AssertUnwindSafe(|| {
        ClosureSearch::from_root(index, item, tids).collect::<Vec<_>>()
    }))
    .map_err(|payload| Error::Worker {
        root: item.label(),
        reason: panic_message(payload.as_ref()),
    })?;

    if !found.is_empty() {
        debug!("found {} new itemsets from item {}", found.len(), item.label());
    }
    Ok(found)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_owned()
    }
}
