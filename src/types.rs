use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Debug, Display, Formatter},
    hash::Hash,
};

use itertools::Itertools;
use roaring::RoaringBitmap;

pub type TransactionId = u32;
pub type TidSet = RoaringBitmap;
pub type Support = u64;

pub type Itemset<I> = BTreeSet<I>;
pub type ItemIndex<I> = BTreeMap<I, TidSet>;

/// A token that can be indexed by the miner.
///
/// The order given by `Ord` is the fixed item order used for closure
/// scanning and candidate enumeration. `comparable_with` lets dynamically
/// typed items refuse to be ordered against each other.
pub trait Item: Ord + Hash + Clone + Debug + Send + Sync {
    fn comparable_with(&self, _other: &Self) -> bool {
        true
    }

    fn label(&self) -> String {
        format!("{:?}", self)
    }
}

macro_rules! impl_item {
    ($($t:ty),*) => {
        $(impl Item for $t {})*
    };
}

impl_item!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, char, String, &'static str);

/// Dynamically typed item, as handed over by a foreign caller.
///
/// Integers and strings never compare with each other; a database mixing
/// both is rejected while indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    Int(i64),
    Str(String),
}

impl Token {
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Int(_) => "int",
            Token::Str(_) => "str",
        }
    }
}

impl Item for Token {
    fn comparable_with(&self, other: &Self) -> bool {
        self.kind() == other.kind()
    }

    fn label(&self) -> String {
        match self {
            Token::Int(i) => i.to_string(),
            Token::Str(s) => format!("{:?}", s),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(i) => write!(f, "{}", i),
            Token::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Token {
    fn from(i: i64) -> Self {
        Token::Int(i)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Str(s.to_owned())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token::Str(s)
    }
}

/// A closed itemset together with the exact set of transactions supporting it.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternRecord<I: Item> {
    pub itemset: Itemset<I>,
    pub tids: TidSet,
}

impl<I: Item> PatternRecord<I> {
    pub fn support(&self) -> Support {
        self.tids.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportRecord<I: Item> {
    pub itemset: Itemset<I>,
    pub support: Support,
}

impl<I: Item> From<PatternRecord<I>> for SupportRecord<I> {
    fn from(record: PatternRecord<I>) -> Self {
        let support = record.support();
        SupportRecord {
            itemset: record.itemset,
            support,
        }
    }
}

/// Formats an itemset the way it is shown in tables: `(2, 3, 5)`.
pub fn itemset_label<I: Item>(itemset: &Itemset<I>) -> String {
    format!("({})", itemset.iter().map(Item::label).join(", "))
}

/// Orders by descending support, leaving equal supports where they were.
pub fn by_descending_support(a: Support, b: Support) -> Ordering {
    b.cmp(&a)
}
