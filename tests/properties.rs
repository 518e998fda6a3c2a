use std::collections::{BTreeMap, BTreeSet, HashSet};

use lcm::{Lcm, LcmParams, MinSupport, PatternRecord};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

const N_ITEMS: u8 = 6;
const MAX_TRANSACTIONS: usize = 9;

#[derive(Debug, Clone)]
struct Database(Vec<Vec<u8>>);

impl Arbitrary for Database {
    fn arbitrary(g: &mut Gen) -> Self {
        let n_transactions = usize::arbitrary(g) % (MAX_TRANSACTIONS + 1);
        Database(
            (0..n_transactions)
                .map(|_| {
                    let len = usize::arbitrary(g) % (N_ITEMS as usize + 1);
                    (0..len).map(|_| u8::arbitrary(g) % N_ITEMS).collect()
                })
                .collect(),
        )
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Database))
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mine(db: &Database, min_supp: i64, n_jobs: usize) -> Vec<PatternRecord<u8>> {
    let params = LcmParams {
        min_supp: MinSupport::Absolute(min_supp),
        n_jobs,
    };
    Lcm::new(params)
        .unwrap()
        .discover_tids(db.0.clone())
        .unwrap()
}

fn support_of(db: &Database, itemset: &BTreeSet<u8>) -> BTreeSet<u32> {
    db.0.iter()
        .enumerate()
        .filter(|(_, transaction)| itemset.iter().all(|item| transaction.contains(item)))
        .map(|(tid, _)| tid as u32)
        .collect()
}

/// Every non-empty closed itemset with enough support, by exhaustive search.
fn brute_force(db: &Database, min_supp: usize) -> BTreeMap<BTreeSet<u8>, BTreeSet<u32>> {
    let mut closed = BTreeMap::new();
    for mask in 1_u32..(1 << N_ITEMS) {
        let itemset: BTreeSet<u8> = (0..N_ITEMS).filter(|i| mask & (1 << i) != 0).collect();
        let tids = support_of(db, &itemset);
        if tids.is_empty() || tids.len() < min_supp {
            continue;
        }
        let is_closed = (0..N_ITEMS)
            .filter(|item| !itemset.contains(item))
            .all(|item| {
                let mut bigger = itemset.clone();
                bigger.insert(item);
                support_of(db, &bigger).len() < tids.len()
            });
        if is_closed {
            closed.insert(itemset, tids);
        }
    }
    closed
}

fn as_map(patterns: &[PatternRecord<u8>]) -> BTreeMap<BTreeSet<u8>, BTreeSet<u32>> {
    patterns
        .iter()
        .map(|p| (p.itemset.clone(), p.tids.iter().collect()))
        .collect()
}

#[quickcheck]
fn prop_matches_brute_force(db: Database, min_supp: u8) -> bool {
    let min_supp = (min_supp % 4 + 1) as usize;
    let patterns = mine(&db, min_supp as i64, 1);
    as_map(&patterns) == brute_force(&db, min_supp)
}

#[quickcheck]
fn prop_no_duplicates(db: Database, n_jobs: u8) -> bool {
    let patterns = mine(&db, 1, (n_jobs % 4 + 1) as usize);
    let unique: HashSet<_> = patterns.iter().map(|p| p.itemset.clone()).collect();
    unique.len() == patterns.len()
}

#[quickcheck]
fn prop_parallel_keeps_submission_order(db: Database) -> bool {
    let sequential = mine(&db, 1, 1);
    (2..=4).all(|n_jobs| mine(&db, 1, n_jobs) == sequential)
}

#[quickcheck]
fn prop_support_is_antitone(db: Database) -> bool {
    let patterns = mine(&db, 1, 1);
    patterns.iter().all(|a| {
        patterns.iter().all(|b| {
            !(a.itemset.is_subset(&b.itemset) && a.itemset != b.itemset)
                || (a.support() >= b.support() && b.tids.is_subset(&a.tids))
        })
    })
}

#[quickcheck]
fn prop_emitted_itemsets_are_closed(db: Database, min_supp: u8) -> bool {
    let min_supp = (min_supp % 3 + 1) as i64;
    mine(&db, min_supp, 2).iter().all(|p| {
        p.support() >= min_supp as u64
            && support_of(&db, &p.itemset) == p.tids.iter().collect::<BTreeSet<u32>>()
            && (0..N_ITEMS).filter(|i| !p.itemset.contains(i)).all(|item| {
                let mut bigger = p.itemset.clone();
                bigger.insert(item);
                (support_of(&db, &bigger).len() as u64) < p.support()
            })
    })
}

#[quickcheck]
fn prop_encoding_round_trips(db: Database) -> bool {
    let mut lcm = Lcm::with_min_supp(1).unwrap();
    let matrix = lcm.transform(db.0.clone(), true).unwrap();
    let labels = matrix.columns();

    matrix.shape() == (db.0.len(), labels.len())
        && db.0.iter().enumerate().all(|(tid, transaction)| {
            let expected: Vec<usize> = labels
                .iter()
                .enumerate()
                .filter(|(_, itemset)| itemset.iter().all(|item| transaction.contains(item)))
                .map(|(col, _)| col)
                .collect();
            matrix.row(tid) == Some(expected)
        })
}

#[test]
fn concrete_scenarios() {
    init_logging();
    let transactions: Vec<Vec<u32>> = vec![vec![1, 2, 3, 4, 5, 6], vec![2, 3, 5], vec![2, 5]];

    let absolute: Vec<(Vec<u32>, u64)> = Lcm::with_min_supp(2)
        .unwrap()
        .discover_supports(transactions.clone())
        .unwrap()
        .into_iter()
        .map(|r| (r.itemset.into_iter().collect(), r.support))
        .collect();
    assert_eq!(absolute, vec![(vec![2, 5], 3), (vec![2, 3, 5], 2)]);

    let relative: Vec<(Vec<u32>, u64)> = Lcm::with_min_supp(1.0)
        .unwrap()
        .discover_supports(transactions)
        .unwrap()
        .into_iter()
        .map(|r| (r.itemset.into_iter().collect(), r.support))
        .collect();
    assert_eq!(relative, vec![(vec![2, 5], 3)]);
}

#[test]
fn string_items_and_default_support() {
    init_logging();
    let baskets = vec![
        vec!["bread", "milk"],
        vec!["bread", "diapers", "beer", "eggs"],
        vec!["milk", "diapers", "beer", "cola"],
        vec!["bread", "milk", "diapers", "beer"],
        vec!["bread", "milk", "diapers", "cola"],
    ];
    let mut lcm = Lcm::new(LcmParams {
        n_jobs: 2,
        ..LcmParams::default()
    })
    .unwrap();
    let found: BTreeMap<Vec<&str>, u64> = lcm
        .discover_supports(baskets)
        .unwrap()
        .into_iter()
        .map(|r| (r.itemset.into_iter().collect(), r.support))
        .collect();

    // 20% of 5 transactions: anything seen once is frequent
    assert_eq!(lcm.index().unwrap().min_support_count(), 1);
    assert_eq!(found[&vec!["beer", "diapers"]], 3);
    assert_eq!(found[&vec!["bread", "milk"]], 3);
    assert_eq!(found[&vec!["beer", "bread", "diapers", "eggs"]], 1);
    assert!(!found.contains_key(&vec!["beer"]));
    assert!(!found.contains_key(&vec!["eggs"]));
}
