use std::{convert::TryFrom, ops::Bound};

use log::debug;

use crate::{
    error::{Error, Result},
    support::MinSupport,
    types::{Item, ItemIndex, Support, TidSet, TransactionId},
};

/// Item to transaction-id mapping, pruned of infrequent items.
///
/// Built once from the whole database and read-only afterwards, so a single
/// index can be shared by reference between every root search.
#[derive(Debug, Clone)]
pub struct TransactionIndex<I: Item> {
    item_to_tids: ItemIndex<I>,
    n_transactions: usize,
    min_support_count: Support,
}

impl<I: Item> TransactionIndex<I> {
    /// Index `transactions`, numbering them from 0 in input order.
    pub fn build<D, T>(transactions: D, min_supp: MinSupport) -> Result<Self>
    where
        D: IntoIterator<Item = T>,
        T: IntoIterator<Item = I>,
    {
        let min_supp = min_supp.validate()?;
        let mut item_to_tids: ItemIndex<I> = ItemIndex::new();
        let mut reference: Option<I> = None;
        let mut n_transactions = 0_usize;

        for transaction in transactions {
            let tid = TransactionId::try_from(n_transactions).map_err(|_| Error::MalformedInput {
                transaction: TransactionId::MAX,
                reason: format!("more than {} transactions", TransactionId::MAX),
            })?;
            for item in transaction {
                if let Some(tids) = item_to_tids.get_mut(&item) {
                    tids.insert(tid);
                    continue;
                }
                match &reference {
                    Some(first) if !first.comparable_with(&item) => {
                        return Err(Error::MalformedInput {
                            transaction: tid,
                            reason: format!(
                                "item {:?} cannot be ordered against {:?}",
                                item, first
                            ),
                        });
                    }
                    Some(_) => {}
                    None => reference = Some(item.clone()),
                }
                let mut tids = TidSet::new();
                tids.insert(tid);
                item_to_tids.insert(item, tids);
            }
            n_transactions += 1;
        }

        let min_support_count = min_supp.resolve(n_transactions);
        let n_items = item_to_tids.len();
        item_to_tids.retain(|_, tids| tids.len() >= min_support_count);
        debug!(
            "indexed {} transactions, kept {} of {} items with support >= {}",
            n_transactions,
            item_to_tids.len(),
            n_items,
            min_support_count
        );

        Ok(TransactionIndex {
            item_to_tids,
            n_transactions,
            min_support_count,
        })
    }

    pub fn n_transactions(&self) -> usize {
        self.n_transactions
    }

    pub fn min_support_count(&self) -> Support {
        self.min_support_count
    }

    pub fn len(&self) -> usize {
        self.item_to_tids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_to_tids.is_empty()
    }

    pub fn tids(&self, item: &I) -> Option<&TidSet> {
        self.item_to_tids.get(item)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&I, &TidSet)> {
        self.item_to_tids.iter()
    }

    pub fn iter_desc(&self) -> impl Iterator<Item = (&I, &TidSet)> {
        self.item_to_tids.iter().rev()
    }

    /// Items strictly lower than `limit`, in ascending order.
    pub fn below<'a>(
        &'a self,
        limit: &'a I,
    ) -> impl DoubleEndedIterator<Item = (&'a I, &'a TidSet)> {
        self.item_to_tids
            .range::<I, _>((Bound::Unbounded, Bound::Excluded(limit)))
    }

    /// Items ordered by decreasing support; ties keep the item order.
    pub fn by_descending_support(&self) -> Vec<(&I, &TidSet)> {
        let mut items: Vec<(&I, &TidSet)> = self.item_to_tids.iter().collect();
        items.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()));
        items
    }
}
