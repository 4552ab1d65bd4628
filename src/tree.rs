use rand::Rng;

use crate::{
    iter::{OwnedIter, RefIter},
    node::{remove_recurse, Node, RemoveResult},
};

/// An unbalanced binary search tree augmented with subtree-size counters,
/// supporting uniform random selection of a stored key in addition to the
/// usual insert / remove / find operations.
///
/// Duplicate keys are permitted and stored as distinct nodes. Insert, remove
/// and find run in time proportional to the tree height (logarithmic in the
/// expected case, linear in the worst case); [`sample()`] draws a key
/// uniformly at random in the same bound, without visiting more than one
/// root-to-node path.
///
/// ```
/// use orderstat::OrderStatTree;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut t = OrderStatTree::default();
///
/// t.insert("bananas");
/// t.insert("platanos");
///
/// assert!(t.contains(&"bananas"));
/// assert_eq!(t.len(), 2);
///
/// // Draw a key uniformly at random.
/// let mut rng = StdRng::seed_from_u64(42);
/// let key = t.sample(&mut rng).unwrap();
/// assert!(t.contains(key));
/// ```
///
/// [`sample()`]: OrderStatTree::sample
#[derive(Debug, Clone)]
pub struct OrderStatTree<K>(Option<Box<Node<K>>>);

impl<K> Default for OrderStatTree<K> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<K> OrderStatTree<K>
where
    K: Ord,
{
    /// Insert `key` into the tree, returning a reference to the newly stored
    /// key.
    ///
    /// Keys equal to an already stored key are retained as distinct entries
    /// (placed in the left subtree of their equal counterpart).
    pub fn insert(&mut self, key: K) -> &K {
        match self.0 {
            Some(ref mut v) => v.insert(key).key(),
            None => {
                self.0 = Some(Box::new(Node::new(key)));
                self.0.as_deref().unwrap().key()
            }
        }
    }

    /// Remove one occurrence of `key` from the tree, returning the extracted
    /// key.
    ///
    /// # Panics
    ///
    /// Panics if the tree contains no occurrence of `key` - removal of a
    /// missing key is a caller error, not a no-op.
    pub fn remove(&mut self, key: &K) -> K {
        match remove_recurse(&mut self.0, key) {
            Some(RemoveResult::Removed(v)) => v,
            Some(RemoveResult::ParentUnlink) => unreachable!(),
            None => panic!("cannot remove a key that is not in the tree"),
        }
    }

    /// Return a reference to the first stored key equal to `key`, if any.
    pub fn find(&self, key: &K) -> Option<&K> {
        self.0.as_deref().and_then(|v| v.find(key)).map(|v| v.key())
    }

    /// Returns true if the tree contains at least one key equal to `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Select one of the stored keys uniformly at random, or [`None`] if the
    /// tree is empty.
    ///
    /// Each stored key (duplicates included) is returned with probability
    /// `1/N` where `N` is the number of keys in the tree. The walk descends
    /// a single root-to-node path, guided by the subtree counters, so a draw
    /// costs the same as a lookup.
    pub fn sample<R>(&self, rng: &mut R) -> Option<&K>
    where
        R: Rng,
    {
        self.0.as_deref().map(|v| v.sample(rng).key())
    }
}

impl<K> OrderStatTree<K> {
    /// The number of keys stored in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.0
            .as_deref()
            .map(|v| v.left_count() + v.right_count() + 1)
            .unwrap_or_default()
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Iterate over all stored keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.0.iter().flat_map(|v| RefIter::new(v)).map(|v| v.key())
    }
}

impl<K> IntoIterator for OrderStatTree<K> {
    type Item = K;
    type IntoIter = OwnedIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        OwnedIter::new(self.0)
    }
}
