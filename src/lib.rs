//! Closed itemset mining with LCM (Linear time Closed itemset Miner).
//!
//! Transactions are indexed into item -> transaction-id bitmaps, then every
//! frequent item seeds an independent prefix-preserving closure search.
//! Seeds may run on a pool of worker threads; results always come back in
//! seed order.

pub mod assemble;
pub mod dispatch;
pub mod error;
pub mod index;
pub mod lcm;
pub mod search;
pub mod support;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use assemble::{Discovery, EncodedMatrix};
pub use error::{Error, Result};
pub use index::TransactionIndex;
pub use lcm::{Lcm, LcmParams};
pub use search::ClosureSearch;
pub use support::MinSupport;
pub use types::{Item, Itemset, PatternRecord, SupportRecord, TidSet, Token, TransactionId};
