use std::rc::Rc;

use crate::{
    index::TransactionIndex,
    types::{Item, Itemset, PatternRecord, TidSet},
};

/// Depth-first enumeration of the closed itemsets reachable from one
/// `(prefix, tids, limit)` seed, by prefix-preserving closure extension.
///
/// A branch yields its closure only when the greatest item covering `tids`
/// is `limit` itself. That pins every closed itemset to a single generating
/// branch, so no itemset is produced twice and nothing has to be stored to
/// check closedness. Records come out in the same order as a recursive
/// pre-order walk with children visited in ascending item order.
pub struct ClosureSearch<'a, I: Item> {
    index: &'a TransactionIndex<I>,
    stack: Vec<Frame<'a, I>>,
}

struct Frame<'a, I: Item> {
    prefix: Rc<Itemset<I>>,
    tids: TidSet,
    limit: &'a I,
}

impl<'a, I: Item> ClosureSearch<'a, I> {
    pub fn new(
        index: &'a TransactionIndex<I>,
        prefix: Itemset<I>,
        tids: TidSet,
        limit: &'a I,
    ) -> Self {
        ClosureSearch {
            index,
            stack: vec![Frame {
                prefix: Rc::new(prefix),
                tids,
                limit,
            }],
        }
    }

    /// Search rooted at the empty itemset, with `root` as the first limit.
    pub fn from_root(index: &'a TransactionIndex<I>, root: &'a I, tids: &TidSet) -> Self {
        Self::new(index, Itemset::new(), tids.clone(), root)
    }

    fn expand(&mut self, frame: Frame<'a, I>) -> Option<PatternRecord<I>> {
        let Frame {
            prefix,
            tids,
            limit,
        } = frame;
        let index = self.index;

        // items are scanned in reverse order, so the first hit is the max
        let mut covering = index
            .iter_desc()
            .filter(|(item, ids)| !prefix.contains(*item) && tids.is_subset(ids))
            .map(|(item, _)| item);
        let max_item = covering.next()?;
        if max_item != limit {
            return None;
        }

        let mut closure: Itemset<I> = (*prefix).clone();
        closure.insert(max_item.clone());
        closure.extend(covering.cloned());
        let closure = Rc::new(closure);

        let min_support_count = index.min_support_count();
        let children: Vec<Frame<'a, I>> = index
            .below(limit)
            .filter(|(item, _)| !closure.contains(*item))
            .filter(|(_, ids)| tids.intersection_len(ids) >= min_support_count)
            .map(|(item, ids)| Frame {
                prefix: Rc::clone(&closure),
                tids: &tids & ids,
                limit: item,
            })
            .collect();
        self.stack.extend(children.into_iter().rev());

        Some(PatternRecord {
            itemset: (*closure).clone(),
            tids,
        })
    }
}

impl<'a, I: Item> Iterator for ClosureSearch<'a, I> {
    type Item = PatternRecord<I>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            if let Some(record) = self.expand(frame) {
                return Some(record);
            }
        }
        None
    }
}
