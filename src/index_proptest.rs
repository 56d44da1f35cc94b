#![cfg(test)]

// Property tests for Index kept inside the crate so they can drive both
// store backends through the same model.

use crate::config::{IndexConfig, Mode};
use crate::entry::Entry;
use crate::hashed_store::HashedStore;
use crate::index::Index;
use crate::ordered_store::OrderedStore;
use crate::store::SlotStore;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Add(usize, usize),
    Remove(usize, usize),
    Get(usize),
    Vacuum,
}

const KEYS: usize = 6;
const VALUES: usize = 5;

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => (0..KEYS, 0..VALUES).prop_map(|(k, v)| Op::Add(k, v)),
        3 => (0..KEYS, 0..VALUES).prop_map(|(k, v)| Op::Remove(k, v)),
        2 => (0..KEYS).prop_map(Op::Get),
        1 => Just(Op::Vacuum),
    ];
    proptest::collection::vec(op, 1..80)
}

fn key(k: usize) -> Vec<u8> {
    format!("key{k}").into_bytes()
}

// Model slot: live value ids in order plus the capacity the list should have.
#[derive(Default)]
struct Slot {
    live: Vec<usize>,
    size: usize,
}

impl Slot {
    fn push(&mut self, v: usize) {
        if self.live.len() == self.size {
            self.size += 1;
        }
        self.live.push(v);
    }
}

fn check_key<'v, S>(
    sut: &Index<&'v String, S>,
    model: &BTreeMap<usize, Slot>,
    vals: &'v [String],
    k: usize,
) -> Result<(), TestCaseError>
where
    S: SlotStore<Slot = Entry<&'v String>>,
{
    let got = sut.get(&key(k)).unwrap();
    match model.get(&k).filter(|s| !s.live.is_empty()) {
        None => prop_assert!(got.is_none()),
        Some(slot) => {
            let view = got.expect("model has live values");
            prop_assert_eq!(view.count(), slot.live.len());
            prop_assert_eq!(view.size(), slot.size);
            for (have, &want) in view.iter().zip(&slot.live) {
                prop_assert!(core::ptr::eq(*have, &vals[want]));
            }
        }
    }
    Ok(())
}

fn run<'v, S>(mut sut: Index<&'v String, S>, vals: &'v [String], ops: Vec<Op>) -> Result<(), TestCaseError>
where
    S: SlotStore<Slot = Entry<&'v String>>,
{
    let unique = sut.mode() == Mode::Unique;
    let mut model: BTreeMap<usize, Slot> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Add(k, v) => {
                let slot = model.entry(k).or_default();
                let expected = if unique {
                    if slot.live.is_empty() {
                        slot.size = slot.size.max(1);
                        slot.live.push(v);
                        true
                    } else {
                        false
                    }
                } else {
                    if !slot.live.contains(&v) {
                        slot.push(v);
                    }
                    true
                };
                prop_assert_eq!(sut.add(&key(k), &vals[v]).unwrap(), expected);
                check_key(&sut, &model, vals, k)?;
            }
            Op::Remove(k, v) => {
                let expected = match model.get_mut(&k) {
                    Some(slot) => match slot.live.iter().position(|&x| x == v) {
                        Some(i) => {
                            slot.live.remove(i);
                            true
                        }
                        None => false,
                    },
                    None => false,
                };
                prop_assert_eq!(sut.remove(&key(k), &&vals[v]).unwrap(), expected);
                prop_assert!(!sut.contains(&key(k), &&vals[v]).unwrap());
                check_key(&sut, &model, vals, k)?;
            }
            Op::Get(k) => check_key(&sut, &model, vals, k)?,
            Op::Vacuum => {
                let before = model.len();
                model.retain(|_, s| !s.live.is_empty());
                for slot in model.values_mut() {
                    slot.size = slot.live.len();
                }
                let stats = sut.vacuum();
                prop_assert_eq!(stats.visited, before);
                prop_assert_eq!(stats.reclaimed, before - model.len());
                for k in 0..KEYS {
                    check_key(&sut, &model, vals, k)?;
                }
            }
        }
        prop_assert_eq!(sut.slot_count(), model.len());
    }

    prop_assert_eq!(sut.destroy(), model.len());
    Ok(())
}

// Property: Index matches a BTreeMap-of-lists model in both modes and over
// both stores.
// - add: unique rejects a live key; multi deduplicates by identity.
// - remove: hits only live values; leaves size untouched.
// - get: hides tombstones; preserves insertion order minus removals.
// - vacuum: deletes exactly the tombstones and shrinks size to count.
// - slot_count tracks present slots (tombstones included) after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_ordered_store_matches_model(unique in any::<bool>(), ops in arb_ops()) {
        let vals: Vec<String> = (0..VALUES).map(|i| format!("value{i}")).collect();
        let mode = if unique { Mode::Unique } else { Mode::Multi };
        let sut = Index::with_store(IndexConfig::new(mode), OrderedStore::new());
        run(sut, &vals, ops)?;
    }

    #[test]
    fn prop_hashed_store_matches_model(unique in any::<bool>(), ops in arb_ops()) {
        let vals: Vec<String> = (0..VALUES).map(|i| format!("value{i}")).collect();
        let mode = if unique { Mode::Unique } else { Mode::Multi };
        let sut = Index::with_store(IndexConfig::new(mode), HashedStore::new());
        run(sut, &vals, ops)?;
    }
}
