use std::convert::TryFrom;

use crate::{
    assemble::{assemble, to_supports, Discovery, EncodedMatrix},
    dispatch::dispatch,
    error::{Error, Result},
    index::TransactionIndex,
    support::MinSupport,
    types::{Item, PatternRecord, SupportRecord},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LcmParams {
    /// Absolute count or fraction of transactions an itemset must appear in.
    pub min_supp: MinSupport,
    /// Number of workers; each frequent item seeds one search task.
    pub n_jobs: usize,
}

impl Default for LcmParams {
    fn default() -> Self {
        LcmParams {
            min_supp: MinSupport::default(),
            n_jobs: 1,
        }
    }
}

impl LcmParams {
    pub fn validate(self) -> Result<Self> {
        let min_supp = self.min_supp.validate()?;
        if self.n_jobs < 1 {
            return Err(Error::InvalidParameter(format!(
                "n_jobs must be at least 1, got {}",
                self.n_jobs
            )));
        }
        Ok(LcmParams {
            min_supp,
            n_jobs: self.n_jobs,
        })
    }

    /// Worker count from a signed value, as received from dynamic callers.
    pub fn checked_jobs(n_jobs: i64) -> Result<usize> {
        usize::try_from(n_jobs)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| {
                Error::InvalidParameter(format!("n_jobs must be at least 1, got {}", n_jobs))
            })
    }
}

/// Linear time Closed itemset Miner.
///
/// ```
/// use lcm::Lcm;
///
/// let mut miner: Lcm<u32> = Lcm::with_min_supp(2)?;
/// let records = miner.discover_supports(vec![vec![1, 2, 3, 4, 5, 6], vec![2, 3, 5], vec![2, 5]])?;
///
/// let found: Vec<(Vec<u32>, u64)> = records
///     .into_iter()
///     .map(|r| (r.itemset.into_iter().collect(), r.support))
///     .collect();
/// assert_eq!(found, vec![(vec![2, 5], 3), (vec![2, 3, 5], 2)]);
/// # Ok::<(), lcm::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Lcm<I: Item> {
    params: LcmParams,
    index: Option<TransactionIndex<I>>,
}

impl<I: Item> Lcm<I> {
    pub fn new(params: LcmParams) -> Result<Self> {
        Ok(Lcm {
            params: params.validate()?,
            index: None,
        })
    }

    pub fn with_min_supp<S: Into<MinSupport>>(min_supp: S) -> Result<Self> {
        Self::new(LcmParams {
            min_supp: min_supp.into(),
            ..LcmParams::default()
        })
    }

    pub fn params(&self) -> LcmParams {
        self.params
    }

    /// The index from the last `fit`, if any.
    pub fn index(&self) -> Option<&TransactionIndex<I>> {
        self.index.as_ref()
    }

    pub fn n_transactions(&self) -> usize {
        self.index.as_ref().map_or(0, TransactionIndex::n_transactions)
    }

    /// Index the database, replacing whatever a previous fit produced.
    pub fn fit<D, T>(&mut self, transactions: D) -> Result<&TransactionIndex<I>>
    where
        D: IntoIterator<Item = T>,
        T: IntoIterator<Item = I>,
    {
        self.index = None;
        let index = TransactionIndex::build(transactions, self.params.min_supp)?;
        Ok(self.index.get_or_insert(index))
    }

    /// Fit, then mine every closed itemset meeting the minimum support.
    pub fn discover<D, T>(&mut self, transactions: D, return_tids: bool) -> Result<Discovery<I>>
    where
        D: IntoIterator<Item = T>,
        T: IntoIterator<Item = I>,
    {
        let patterns = self.mine(transactions)?;
        Ok(assemble(patterns, return_tids))
    }

    pub fn discover_supports<D, T>(&mut self, transactions: D) -> Result<Vec<SupportRecord<I>>>
    where
        D: IntoIterator<Item = T>,
        T: IntoIterator<Item = I>,
    {
        Ok(to_supports(self.mine(transactions)?))
    }

    pub fn discover_tids<D, T>(&mut self, transactions: D) -> Result<Vec<PatternRecord<I>>>
    where
        D: IntoIterator<Item = T>,
        T: IntoIterator<Item = I>,
    {
        self.mine(transactions)
    }

    /// Fit, mine, and one-hot encode the closed itemsets against the
    /// transactions. `sort` orders columns by decreasing support.
    pub fn transform<D, T>(&mut self, transactions: D, sort: bool) -> Result<EncodedMatrix<I>>
    where
        D: IntoIterator<Item = T>,
        T: IntoIterator<Item = I>,
    {
        let patterns = self.mine(transactions)?;
        Ok(EncodedMatrix::encode(patterns, self.n_transactions(), sort))
    }

    fn mine<D, T>(&mut self, transactions: D) -> Result<Vec<PatternRecord<I>>>
    where
        D: IntoIterator<Item = T>,
        T: IntoIterator<Item = I>,
    {
        let n_jobs = self.params.n_jobs;
        let index = self.fit(transactions)?;
        dispatch(index, n_jobs)
    }
}
