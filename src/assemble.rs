use std::fmt::{self, Display, Formatter};

use bitvec::prelude::*;
use itertools::Itertools;

use crate::types::{
    by_descending_support, itemset_label, Item, Itemset, PatternRecord, SupportRecord,
};

type Column = BitVec<usize, Lsb0>;

/// Output of a discovery run, with or without transaction ids.
#[derive(Debug, Clone, PartialEq)]
pub enum Discovery<I: Item> {
    Supports(Vec<SupportRecord<I>>),
    Tids(Vec<PatternRecord<I>>),
}

impl<I: Item> Discovery<I> {
    pub fn len(&self) -> usize {
        match self {
            Discovery::Supports(records) => records.len(),
            Discovery::Tids(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn itemsets(&self) -> Vec<&Itemset<I>> {
        match self {
            Discovery::Supports(records) => records.iter().map(|r| &r.itemset).collect(),
            Discovery::Tids(records) => records.iter().map(|r| &r.itemset).collect(),
        }
    }
}

pub fn assemble<I: Item>(patterns: Vec<PatternRecord<I>>, return_tids: bool) -> Discovery<I> {
    if return_tids {
        Discovery::Tids(patterns)
    } else {
        Discovery::Supports(to_supports(patterns))
    }
}

pub fn to_supports<I: Item>(patterns: Vec<PatternRecord<I>>) -> Vec<SupportRecord<I>> {
    patterns.into_iter().map(SupportRecord::from).collect()
}

/// One-hot encoding of patterns: a row per transaction, a column per
/// itemset, set where the transaction supports the itemset.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedMatrix<I: Item> {
    n_rows: usize,
    labels: Vec<Itemset<I>>,
    columns: Vec<Column>,
}

impl<I: Item> EncodedMatrix<I> {
    /// `sort` orders columns by decreasing support; equal supports keep
    /// discovery order.
    pub fn encode(mut patterns: Vec<PatternRecord<I>>, n_transactions: usize, sort: bool) -> Self {
        if sort {
            patterns.sort_by(|a, b| by_descending_support(a.support(), b.support()));
        }

        let mut labels = Vec::with_capacity(patterns.len());
        let mut columns = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let mut column: Column = BitVec::repeat(false, n_transactions);
            for tid in pattern.tids.iter() {
                column.set(tid as usize, true);
            }
            labels.push(pattern.itemset);
            columns.push(column);
        }

        EncodedMatrix {
            n_rows: n_transactions,
            labels,
            columns,
        }
    }

    /// `(transactions, itemsets)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn columns(&self) -> &[Itemset<I>] {
        &self.labels
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.n_rows {
            return None;
        }
        self.columns.get(col).map(|column| column[row])
    }

    /// Transactions supporting the itemset in column `col`.
    pub fn column(&self, col: usize) -> Option<Vec<usize>> {
        self.columns
            .get(col)
            .map(|column| (0..self.n_rows).filter(|&row| column[row]).collect())
    }

    /// Columns whose itemset appears in transaction `row`.
    pub fn row(&self, row: usize) -> Option<Vec<usize>> {
        if row >= self.n_rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .positions(|column| column[row])
                .collect(),
        )
    }

    /// Row-major 0/1 copy of the matrix.
    pub fn to_dense(&self) -> Vec<Vec<u8>> {
        (0..self.n_rows)
            .map(|row| self.columns.iter().map(|column| column[row] as u8).collect())
            .collect()
    }

    pub fn support(&self, col: usize) -> Option<usize> {
        self.columns.get(col).map(|column| column.count_ones())
    }
}

impl<I: Item> Display for EncodedMatrix<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.labels.iter().map(itemset_label).collect();
        let index_width = self.n_rows.saturating_sub(1).to_string().len();

        write!(f, "{:>width$}", "", width = index_width)?;
        for label in &labels {
            write!(f, "  {}", label)?;
        }
        writeln!(f)?;

        for row in 0..self.n_rows {
            write!(f, "{:>width$}", row, width = index_width)?;
            for (label, column) in labels.iter().zip(&self.columns) {
                write!(f, "  {:>width$}", column[row] as u8, width = label.len())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
