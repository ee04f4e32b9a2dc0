use std::collections::HashSet;

use compare::Compare;
use index::NodeIndex;
use node::{Color, Node};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use super::*;

struct KeyGenerator {
    rng: StdRng,
    unique: HashSet<i32>,
    limit: i32,
}

impl KeyGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i32 = 100_000;
        Self {
            rng: SeedableRng::from_seed(seed),
            unique: HashSet::new(),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> i32 {
        self.rng.gen_range(0..self.limit)
    }

    fn next_unique(&mut self) -> i32 {
        let mut key = self.next();
        while self.unique.contains(&key) {
            key = self.next();
        }
        self.unique.insert(key);
        key
    }
}

impl<V> RbTree<i32, V> {
    /// 1. Every node is either red or black.
    /// 2. The root is black.
    /// 3. Every leaf (NIL) is black.
    /// 4. If a node is red, then both its children are black.
    /// 5. For each node, all simple paths from the node to descendant leaves contain the
    /// same number of black nodes.
    fn check_rb_properties(&self) {
        assert!(matches!(
            self.node_ref(self.root, Node::color),
            Color::Black
        ));
        self.check_children_color(self.root);
        self.check_black_height(self.root);
    }

    fn check_children_color(&self, x: NodeIndex<u32>) {
        if x.is_sentinel() {
            return;
        }
        self.check_children_color(self.node_ref(x, Node::left));
        self.check_children_color(self.node_ref(x, Node::right));
        if self.node_ref(x, Node::is_red) {
            assert!(matches!(self.left_ref(x, Node::color), Color::Black));
            assert!(matches!(self.right_ref(x, Node::color), Color::Black));
        }
    }

    fn check_black_height(&self, x: NodeIndex<u32>) -> usize {
        if x.is_sentinel() {
            return 0;
        }
        let lefth = self.check_black_height(self.node_ref(x, Node::left));
        let righth = self.check_black_height(self.node_ref(x, Node::right));
        assert_eq!(lefth, righth);
        if self.node_ref(x, Node::is_black) {
            return lefth + 1;
        }
        lefth
    }

    fn check_parent_links(&self, x: NodeIndex<u32>) {
        for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)] {
            if !child.is_sentinel() {
                assert_eq!(self.node_ref(child, Node::parent), x);
                self.check_parent_links(child);
            }
        }
    }

    fn check_sentinel(&self) {
        let sentinel = &self.nodes[0];
        assert!(sentinel.is_black());
        assert!(sentinel.key.is_none() && sentinel.value.is_none());
        assert!(sentinel.left().is_sentinel());
        assert!(sentinel.right().is_sentinel());
        assert!(sentinel.parent().is_sentinel());
    }

    /// Structure, ordering and bookkeeping all agree.
    fn check_invariants(&self) {
        self.check_sentinel();
        assert_eq!(self.nodes.len(), self.len + 1);
        if self.root.is_sentinel() {
            assert_eq!(self.len, 0);
            assert!(self.first.is_sentinel());
            assert!(self.last.is_sentinel());
            return;
        }
        assert!(self.node_ref(self.root, Node::parent).is_sentinel());
        self.check_rb_properties();
        self.check_parent_links(self.root);
        assert_eq!(self.first, cursor::tree_minimum(&self.nodes, self.root));
        assert_eq!(self.last, cursor::tree_maximum(&self.nodes, self.root));

        let keys: Vec<_> = self.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), self.len);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        let rev: Vec<_> = self.iter().rev().map(|(k, _)| *k).collect();
        assert!(rev.iter().eq(keys.iter().rev()));
    }

    fn keys(&self) -> Vec<i32> {
        self.iter().map(|(k, _)| *k).collect()
    }
}

fn with_tree_and_generator<V>(test_fn: impl Fn(RbTree<i32, V>, KeyGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = KeyGenerator::new(seed);
        let tree = RbTree::new();
        test_fn(tree, gen);
    }
}

#[test]
fn red_black_tree_properties_is_satisfied() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for key in keys.clone() {
            let (_, inserted) = tree.insert(key, ());
            assert!(inserted);
        }
        tree.check_invariants();
    });
}

#[test]
fn invariants_hold_after_every_operation() {
    with_tree_and_generator(|mut tree, mut gen| {
        let mut keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for key in keys.clone() {
            let _ignore = tree.insert(key, key);
            tree.check_invariants();
        }
        keys.sort_unstable();
        for key in &keys {
            assert_eq!(tree.remove(key), Some((*key, *key)));
            tree.check_invariants();
        }
        assert!(tree.is_empty());
    });
}

#[test]
fn remove_in_random_order() {
    with_tree_and_generator(|mut tree, mut gen| {
        let mut keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for key in keys.clone() {
            let _ignore = tree.insert(key, ());
        }
        keys.shuffle(&mut gen.rng);
        let (removed, kept) = keys.split_at(600);
        for key in removed {
            assert!(tree.erase(key));
            assert!(!tree.erase(key));
        }
        tree.check_invariants();
        let mut kept = kept.to_vec();
        kept.sort_unstable();
        assert_eq!(tree.keys(), kept);
    });
}

#[test]
fn interleaved_insert_and_remove() {
    with_tree_and_generator(|mut tree, mut gen| {
        let mut model = std::collections::BTreeSet::new();
        for _ in 0..3000 {
            let key = gen.rng.gen_range(0..200);
            if gen.rng.gen_bool(0.6) {
                let (_, inserted) = tree.insert(key, ());
                assert_eq!(inserted, model.insert(key));
            } else {
                assert_eq!(tree.erase(&key), model.remove(&key));
            }
        }
        tree.check_invariants();
        assert!(tree.keys().into_iter().eq(model.into_iter()));
    });
}

#[test]
fn insert_lookup_and_erase_small_tree() {
    let mut tree = RbTree::<i32, ()>::new();
    for key in [10, 20, 5, 15, 3] {
        let _ignore = tree.insert(key, ());
    }
    tree.check_invariants();
    assert_eq!(tree.keys(), vec![3, 5, 10, 15, 20]);
    assert_eq!(tree.lower_bound(&12).key(), Some(&15));
    assert_eq!(tree.lower_bound(&15).key(), Some(&15));
    assert_eq!(tree.upper_bound(&15).key(), Some(&20));
    assert!(tree.upper_bound(&20).is_end());
    assert_eq!(tree.lower_bound(&0).key(), Some(&3));

    assert!(tree.erase(&10));
    tree.check_invariants();
    assert_eq!(tree.keys(), vec![3, 5, 15, 20]);
}

#[test]
fn duplicate_insert_keeps_first_value() {
    let mut tree = RbTree::<i32, &str>::new();
    let (c, inserted) = tree.insert(1, "a");
    assert!(inserted);
    assert_eq!(c.get(), Some((&1, &"a")));
    let (c, inserted) = tree.insert(1, "b");
    assert!(!inserted);
    assert_eq!(c.value(), Some(&"a"));
    assert_eq!(tree.len(), 1);
    tree.check_invariants();
}

#[test]
fn empty_tree_operations() {
    let mut tree = RbTree::<i32, ()>::new();
    assert!(!tree.erase(&1));
    assert!(tree.find(&1).is_end());
    assert_eq!(tree.find(&1), tree.end());
    assert_eq!(tree.begin(), tree.end());
    assert!(tree.end().prev_cursor().is_end());
    assert_eq!(tree.pop_first(), None);
    assert_eq!(tree.pop_last(), None);
    assert_eq!(tree.iter().next(), None);
    assert_eq!(tree.range(..).next(), None);
    assert_eq!(tree.remove_range(..), 0);
    tree.check_invariants();
}

#[test]
fn cursor_wraps_through_end() {
    let tree: RbTree<i32, ()> = {
        let mut tree = RbTree::new();
        for key in [2, 1, 3] {
            let _ignore = tree.insert(key, ());
        }
        tree
    };
    assert_eq!(tree.end().prev_cursor().key(), Some(&3));
    assert_eq!(tree.end().next_cursor().key(), Some(&1));
    assert!(tree.begin().prev_cursor().is_end());
    assert!(tree.find(&3).next_cursor().is_end());

    let mut c = tree.begin();
    let mut seen = vec![];
    while !c.is_end() {
        seen.push(*c.key().unwrap());
        c.move_next();
    }
    assert_eq!(seen, vec![1, 2, 3]);
    c.move_prev();
    c.move_prev();
    assert_eq!(c.key(), Some(&2));
}

#[test]
fn first_and_last_are_tracked() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(300)
            .collect();
        let (mut min, mut max) = (i32::MAX, i32::MIN);
        for key in keys {
            let _ignore = tree.insert(key, ());
            min = min.min(key);
            max = max.max(key);
            assert_eq!(tree.first_key_value().map(|(k, _)| *k), Some(min));
            assert_eq!(tree.last_key_value().map(|(k, _)| *k), Some(max));
            assert_eq!(tree.begin().key(), Some(&min));
            assert_eq!(tree.end().prev_cursor().key(), Some(&max));
        }
        while let Some((key, _)) = tree.pop_last() {
            if let Some((last, _)) = tree.last_key_value() {
                assert!(*last < key);
            }
            tree.check_invariants();
        }
        assert!(tree.first_key_value().is_none());
    });
}

#[test]
fn pop_first_drains_in_order() {
    with_tree_and_generator(|mut tree, mut gen| {
        let mut keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(500)
            .collect();
        for key in keys.clone() {
            let _ignore = tree.insert(key, key * 2);
        }
        keys.sort_unstable();
        let popped: Vec<_> = std::iter::from_fn(|| tree.pop_first()).collect();
        assert_eq!(popped, keys.iter().map(|k| (*k, k * 2)).collect::<Vec<_>>());
        tree.check_invariants();
    });
}

#[test]
fn iterators_are_double_ended_and_exact() {
    let mut tree = RbTree::new();
    for key in 0..10 {
        let _ignore = tree.insert(key, key);
    }
    let mut iter = tree.iter();
    assert_eq!(iter.len(), 10);
    assert_eq!(iter.next(), Some((&0, &0)));
    assert_eq!(iter.next_back(), Some((&9, &9)));
    assert_eq!(iter.len(), 8);
    let middle: Vec<_> = iter.map(|(k, _)| *k).collect();
    assert_eq!(middle, (1..9).collect::<Vec<_>>());

    let owned: Vec<_> = tree.clone().into_iter().collect();
    assert_eq!(owned, (0..10).map(|k| (k, k)).collect::<Vec<_>>());
    let owned_rev: Vec<_> = tree.clone().into_iter().rev().map(|(k, _)| k).collect();
    assert_eq!(owned_rev, (0..10).rev().collect::<Vec<_>>());

    let mut into_iter = tree.into_iter();
    assert_eq!(into_iter.next(), Some((0, 0)));
    assert_eq!(into_iter.next_back(), Some((9, 9)));
    assert_eq!(into_iter.len(), 8);
    assert_eq!(into_iter.count(), 8);
}

#[test]
fn range_bounds() {
    let mut tree = RbTree::new();
    for key in (0..20).step_by(2) {
        let _ignore = tree.insert(key, ());
    }
    fn keys(r: Range<'_, i32, ()>) -> Vec<i32> {
        r.map(|(k, _)| *k).collect()
    }
    assert_eq!(keys(tree.range(3..9)), vec![4, 6, 8]);
    assert_eq!(keys(tree.range(4..=10)), vec![4, 6, 8, 10]);
    assert_eq!(keys(tree.range(..4)), vec![0, 2]);
    assert_eq!(keys(tree.range(15..)), vec![16, 18]);
    assert_eq!(keys(tree.range(19..)), Vec::<i32>::new());
    assert_eq!(keys(tree.range(5..5)), Vec::<i32>::new());
    assert_eq!(keys(tree.range(..)).len(), 10);
    assert_eq!(
        tree.range(3..9).rev().map(|(k, _)| *k).collect::<Vec<_>>(),
        vec![8, 6, 4]
    );
    #[allow(clippy::reversed_empty_ranges)]
    let inverted = tree.range(10..4);
    assert_eq!(keys(inverted), Vec::<i32>::new());

    let mut mixed = tree.range(0..=6);
    assert_eq!(mixed.next_back(), Some((&6, &())));
    assert_eq!(mixed.next(), Some((&0, &())));
    assert_eq!(mixed.next_back(), Some((&4, &())));
    assert_eq!(mixed.next(), Some((&2, &())));
    assert_eq!(mixed.next(), None);
    assert_eq!(mixed.next_back(), None);
}

#[test]
fn remove_range_removes_only_the_range() {
    with_tree_and_generator(|mut tree, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for key in keys.clone() {
            let _ignore = tree.insert(key, ());
        }
        let expected = keys.iter().filter(|k| (20_000..60_000).contains(*k)).count();
        assert_eq!(tree.remove_range(20_000..60_000), expected);
        tree.check_invariants();
        assert_eq!(tree.len(), 1000 - expected);
        assert!(tree.keys().iter().all(|k| !(20_000..60_000).contains(k)));
    });
}

#[test]
fn clear_and_swap() {
    let mut a = RbTree::<i32, ()>::new();
    let mut b = RbTree::new();
    for key in 0..100 {
        let _ignore = a.insert(key, ());
    }
    let _ignore = b.insert(7, ());
    a.swap(&mut b);
    assert_eq!(a.keys(), vec![7]);
    assert_eq!(b.len(), 100);
    a.check_invariants();
    b.check_invariants();

    b.clear();
    b.check_invariants();
    assert!(b.is_empty());
    assert!(b.begin().is_end());
    let _ignore = b.insert(3, ());
    b.check_invariants();
    assert_eq!(b.keys(), vec![3]);
}

#[test]
fn clone_is_independent() {
    let mut a = RbTree::<i32, ()>::new();
    for key in 0..50 {
        let _ignore = a.insert(key, ());
    }
    let b = a.clone();
    assert_eq!(a.remove_range(..25), 25);
    a.check_invariants();
    b.check_invariants();
    assert_eq!(b.len(), 50);
    assert_eq!(a.keys(), (25..50).collect::<Vec<_>>());
}

#[test]
fn custom_comparator_orders_keys() {
    let mut tree: RbTree<_, _, _> = RbTree::with_cmp(compare::natural().rev());
    for key in [3, 1, 4, 1, 5, 9, 2, 6] {
        let _ignore = tree.insert(key, ());
    }
    let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![9, 6, 5, 4, 3, 2, 1]);
    assert_eq!(tree.lower_bound(&7).key(), Some(&6));
    assert!(tree.cmp().compares_lt(&2, &1));

    let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
    let mut tree: RbTree<_, _, _> = RbTree::with_cmp(by_len);
    let _ignore = tree.insert("ccc", 3);
    let _ignore = tree.insert("a", 1);
    let (_, inserted) = tree.insert("b", 2);
    assert!(!inserted);
    assert_eq!(tree.get(&"z"), Some(&1));
}

#[test]
fn try_insert_reports_exhausted_index() {
    let mut tree: RbTree<u32, (), _, u16> = RbTree::with_cmp(compare::natural());
    let max = u32::from(u16::MAX) - 1;
    for key in 0..max {
        assert!(matches!(tree.try_insert(key, ()), Ok((_, true))));
    }
    assert_eq!(
        tree.try_insert(max, ()).map(|(_, inserted)| inserted),
        Err(Error::CapacityExceeded)
    );
    assert_eq!(tree.try_insert(0, ()).map(|(_, inserted)| inserted), Ok(false));
    assert_eq!(tree.len(), max as usize);
    assert!(!tree.contains_key(&max));
    assert!(tree.erase(&0));
    assert!(matches!(tree.try_insert(max, ()), Ok((_, true))));
}

#[test]
#[should_panic(expected = "reached maximum number of nodes")]
fn insert_panics_on_exhausted_index() {
    let mut set: RbSet<u32, _, u16> = RbSet::with_cmp(compare::natural());
    for key in 0..u32::from(u16::MAX) {
        set.insert(key);
    }
}

#[test]
fn get_mut_updates_value() {
    let mut tree = RbTree::new();
    let _ignore = tree.insert(1, 10);
    *tree.get_mut(&1).unwrap() += 5;
    assert_eq!(tree.get(&1), Some(&15));
    assert_eq!(tree.get_mut(&2), None);
}

#[test]
fn map_facade() {
    let mut map = RbMap::new();
    assert_eq!(map.insert(2, "b"), (&mut "b", true));
    assert_eq!(map.insert(1, "a"), (&mut "a", true));
    assert_eq!(map.insert(2, "z"), (&mut "b", false));
    assert_eq!(map.len(), 2);
    assert_eq!(map[&1], "a");
    assert_eq!(map.at(&2), Ok(&"b"));
    assert_eq!(map.at(&3), Err(Error::KeyNotFound));
    assert_eq!(map.count(&1), 1);
    assert_eq!(map.count(&3), 0);
    *map.get_or_insert_default(3) = "c";
    assert_eq!(map.get(&3), Some(&"c"));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(map.values().rev().copied().collect::<Vec<_>>(), vec!["c", "b", "a"]);

    let (lo, hi) = map.equal_range(&2);
    assert_eq!(lo.key(), Some(&2));
    assert_eq!(hi.key(), Some(&3));
    let (lo, hi) = map.equal_range(&5);
    assert!(lo.is_end() && hi.is_end());

    assert_eq!(map.remove(&2), Some("b"));
    assert_eq!(map.remove(&2), None);
    assert_eq!(format!("{map:?}"), r#"{1: "a", 3: "c"}"#);
}

#[test]
#[should_panic(expected = "key not found")]
fn map_index_panics_on_missing_key() {
    let map: RbMap<i32, i32> = RbMap::new();
    let _ignore = map[&1];
}

#[test]
fn map_entry_api() {
    let mut map: RbMap<&str, usize> = RbMap::new();
    for word in "the quick brown fox jumps over the lazy dog the end".split(' ') {
        *map.entry(word).or_default() += 1;
    }
    assert_eq!(map.get(&"the"), Some(&3));
    assert_eq!(map.get(&"fox"), Some(&1));

    match map.entry("fox") {
        Entry::Occupied(mut e) => {
            assert_eq!(e.key(), &"fox");
            assert_eq!(e.insert(7), 1);
            assert_eq!(e.remove_entry(), ("fox", 7));
        }
        Entry::Vacant(_) => unreachable!(),
    }
    assert!(!map.contains_key(&"fox"));
    match map.entry("cat") {
        Entry::Vacant(e) => {
            assert_eq!(e.key(), &"cat");
            *e.insert(2) += 1;
        }
        Entry::Occupied(_) => unreachable!(),
    }
    assert_eq!(map.get(&"cat"), Some(&3));
    map.entry("cat").and_modify(|v| *v = 0).or_insert(9);
    map.entry("owl").and_modify(|v| *v = 0).or_insert(9);
    assert_eq!(map.get(&"cat"), Some(&0));
    assert_eq!(map.get(&"owl"), Some(&9));
    map.tree_check();
}

impl<K: Ord, V> RbMap<K, V> {
    fn tree_check(&self) {
        let keys: Vec<_> = self.keys().collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(keys.len(), self.len());
    }
}

#[test]
fn map_comparison_and_collect() {
    let a: RbMap<_, _> = [(1, 'a'), (2, 'b')].into_iter().collect();
    let b: RbMap<_, _> = [(2, 'b'), (1, 'a'), (2, 'x')].into_iter().collect();
    let c: RbMap<_, _> = [(1, 'a'), (3, 'c')].into_iter().collect();
    assert_eq!(a, b);
    assert!(a < c);
    let mut d = a.clone();
    d.extend([(0, 'z')]);
    assert_eq!(d.first_key_value(), Some((&0, &'z')));
    assert_ne!(a, d);
}

#[test]
fn set_facade() {
    let mut set = RbSet::new();
    for value in [5, 1, 4, 1, 3] {
        set.insert(value);
    }
    assert_eq!(set.len(), 4);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
    assert_eq!(set.first(), Some(&1));
    assert_eq!(set.last(), Some(&5));
    assert!(set.contains(&4));
    assert_eq!(set.count(&2), 0);
    assert_eq!(set.get(&3), Some(&3));
    assert_eq!(set.lower_bound(&2).key(), Some(&3));
    assert_eq!(set.upper_bound(&5), set.end());
    assert!(set.remove(&4));
    assert!(!set.remove(&4));
    assert_eq!(set.take(&3), Some(3));
    assert_eq!(set.iter().rev().copied().collect::<Vec<_>>(), vec![5, 1]);
    assert_eq!(format!("{set:?}"), "{1, 5}");

    let other: RbSet<_> = [5, 1].into_iter().collect();
    assert_eq!(set, other);
    let owned: Vec<_> = other.into_iter().collect();
    assert_eq!(owned, vec![1, 5]);

    let mut big: RbSet<i32> = (0..100).collect();
    assert_eq!(big.remove_range(10..90), 80);
    assert_eq!(big.range(..15).count(), 10);
    assert_eq!(big.pop_first(), Some(0));
    assert_eq!(big.pop_last(), Some(99));
    assert_eq!(big.len(), 18);
}

#[test]
fn occupied_entry_removal_keeps_tree_valid() {
    with_tree_and_generator(|_: RbTree<i32, ()>, mut gen| {
        let keys: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(200)
            .collect();
        let mut map: RbMap<i32, i32> = keys.iter().map(|k| (*k, -k)).collect();
        for key in &keys {
            match map.entry(*key) {
                Entry::Occupied(e) => assert_eq!(e.remove_entry(), (*key, -key)),
                Entry::Vacant(_) => unreachable!(),
            }
            assert!(!map.contains_key(key));
            map.tree_check();
        }
        assert!(map.is_empty());
        assert!(map.begin().is_end());
    });
}
