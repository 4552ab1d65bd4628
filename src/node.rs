use std::cmp::Ordering;

use rand::Rng;

#[derive(Debug)]
pub(super) enum RemoveResult<K> {
    /// The key was removed from the tree.
    Removed(K),

    /// The direct descendent node contains the key, but contains no children
    /// and must be unlinked by the parent.
    ParentUnlink,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    /// Child node pointers.
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,

    /// The exact number of nodes in the left / right subtree, not counting
    /// this node itself.
    ///
    /// These counters make uniform random node selection possible without
    /// scanning the tree, and must be kept exactly consistent with the
    /// structure across every insert and remove.
    left_count: usize,
    right_count: usize,

    key: K,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            left_count: 0,
            right_count: 0,
        }
    }

    /// Insert `key` into the subtree rooted at `self`, returning the newly
    /// created node.
    ///
    /// Keys equal to an existing key descend into the left subtree, so
    /// duplicates are stored as distinct nodes.
    pub(crate) fn insert(self: &mut Box<Self>, key: K) -> &mut Box<Self>
    where
        K: Ord,
    {
        // Record the new descendent in the counter of the branch taken
        // before descending into it.
        let child = match key.cmp(&self.key) {
            Ordering::Less | Ordering::Equal => {
                self.left_count += 1;
                &mut self.left
            }
            Ordering::Greater => {
                self.right_count += 1;
                &mut self.right
            }
        };

        match child {
            Some(v) => v.insert(key),
            None => child.get_or_insert(Box::new(Self::new(key))),
        }
    }

    pub(super) fn remove(self: &mut Box<Self>, key: &K) -> Option<RemoveResult<K>>
    where
        K: Ord,
    {
        // Recurse down the subtree rooted at `self`.
        //
        // The branch counter is adjusted only after a successful removal
        // below, so a probe for a missing key leaves every counter
        // untouched.
        match key.cmp(&self.key) {
            Ordering::Less => {
                let removed = remove_recurse(&mut self.left, key)?;
                self.left_count -= 1;
                return Some(removed);
            }
            Ordering::Greater => {
                let removed = remove_recurse(&mut self.right, key)?;
                self.right_count -= 1;
                return Some(removed);
            }
            Ordering::Equal => {
                // This node holds the key to be removed from the tree.
            }
        }

        if self.left.is_some() && self.right.is_some() {
            // This node has two children:
            //
            //                          +----------+
            //                     +----|   self   |----+
            //                     |    +----------+    |
            //                     v                    v
            //               +-----------+       +------------+
            //               | self.left |       | self.right |
            //               +-----------+       +------------+
            //
            // The in-order successor (the minimum of "self.right") is
            // unlinked from the right subtree and its key moves into this
            // node, which survives in place. Only the successor node is
            // physically removed.
            let right = self.right.as_mut().unwrap();
            let succ = match extract_subtree_min(right) {
                Some(v) => v,
                None => {
                    // "self.right" has no left edge and is itself the
                    // successor; splice its right subtree into its place.
                    let mut succ = self.right.take().unwrap();
                    self.right = succ.right.take();
                    succ.right_count = 0;
                    succ
                }
            };

            // The right subtree lost exactly one node (the successor); the
            // left subtree is unaffected.
            self.right_count -= 1;

            // Invariant: the unlinked successor carries no subtree.
            debug_assert!(succ.left.is_none());
            debug_assert!(succ.right.is_none());
            debug_assert!(succ.key > *key);

            let old = std::mem::replace(&mut self.key, succ.into_key());
            return Some(RemoveResult::Removed(old));
        }

        // Otherwise this node has at most one child, which is spliced into
        // its place; a childless node is unlinked by the parent.
        let old = if let Some(right) = self.right.take() {
            debug_assert!(self.left.is_none());
            std::mem::replace(self, right)
        } else if let Some(left) = self.left.take() {
            debug_assert!(self.right.is_none());
            std::mem::replace(self, left)
        } else {
            debug_assert_eq!(self.left_count, 0);
            debug_assert_eq!(self.right_count, 0);

            // Parent will unlink this "self" node.
            return Some(RemoveResult::ParentUnlink);
        };

        // Invariant: the node being unlinked contains no subtree.
        debug_assert!(old.left.is_none());
        debug_assert!(old.right.is_none());

        Some(RemoveResult::Removed(old.into_key()))
    }

    /// Return the first node matching `key` in the subtree rooted at `self`,
    /// if any.
    ///
    /// When duplicates of `key` exist, the topmost match is returned.
    pub(crate) fn find(&self, key: &K) -> Option<&Self>
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Equal => Some(self),
            Ordering::Less => self.left()?.find(key),
            Ordering::Greater => self.right()?.find(key),
        }
    }

    /// Select a node from the subtree rooted at `self`, uniformly at random.
    ///
    /// At each visited node a uniform integer is drawn from the closed
    /// interval `[-left_count, right_count]`: a draw of zero selects the
    /// node, a negative draw descends left and a positive draw descends
    /// right. The interval partitions into exactly one outcome per node of
    /// the subtree, so the walk reaches every node with equal probability.
    pub(crate) fn sample<R>(&self, rng: &mut R) -> &Self
    where
        R: Rng,
    {
        // Correctness: the counts are a usize each, but no addressable tree
        // can hold more than i64::MAX nodes, so the casts cannot truncate.
        let choice = rng.random_range(-(self.left_count as i64)..=self.right_count as i64);

        match choice {
            0 => self,
            // Invariant: a non-zero draw is bounded by the corresponding
            // subtree count, which is non-zero only when the child exists.
            v if v < 0 => self.left().unwrap().sample(rng),
            _ => self.right().unwrap().sample(rng),
        }
    }

    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn left_count(&self) -> usize {
        self.left_count
    }

    pub(crate) fn right_count(&self) -> usize {
        self.right_count
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Explode this [`Node`] into the key `K` it contains.
    pub(crate) fn into_key(self) -> K {
        self.key
    }
}

/// Extracts the node holding the minimum value in a descendent of `root`, if
/// any, linking the right subtree of the extracted node in its place.
///
/// Returns [`None`] when `root` has no left child ("root" itself holds the
/// subtree minimum, and is left untouched).
///
/// Decrements the left counter of every node on the path to the extracted
/// minimum, keeping the counters exact.
fn extract_subtree_min<K>(root: &mut Box<Node<K>>) -> Option<Box<Node<K>>> {
    // Descend left to the leaf.
    let v = match extract_subtree_min(root.left.as_mut()?) {
        Some(v) => v,
        None => {
            // The left child is the end of the left edge.
            //
            // ```text
            //                 6
            //                / \
            //    here ->   <4>   7
            //                \
            //                 5
            // ```
            //
            // Unlink it, splicing its right subtree (if any) into the left
            // slot of "root".
            let mut min = root.left.take().unwrap();
            root.left = min.right.take();
            min.right_count = 0;
            min
        }
    };

    // The left subtree of "root" shrunk by exactly one node; the extracted
    // minimum's right subtree (if any) was spliced back in its place.
    root.left_count -= 1;

    // Invariant: the extracted node carries no subtree.
    debug_assert!(v.left.is_none());
    debug_assert!(v.right.is_none());
    debug_assert_eq!(v.left_count, 0);
    debug_assert_eq!(v.right_count, 0);

    Some(v)
}

/// Recurse into `node`, calling [`Node::remove()`] to remove the provided
/// `key` from the subtree rooted at `node`, if it exists.
///
/// Returns [`None`] if the key is not found.
///
/// Clears the `node` pointer if the [`Node::remove()`] call returns
/// [`RemoveResult::ParentUnlink`], returning the extracted key within a
/// [`RemoveResult::Removed`] variant.
pub(super) fn remove_recurse<K>(
    node: &mut Option<Box<Node<K>>>,
    key: &K,
) -> Option<RemoveResult<K>>
where
    K: Ord,
{
    let remove_ret = node.as_mut().and_then(|v| v.remove(key))?;

    match remove_ret {
        RemoveResult::Removed(v) => Some(RemoveResult::Removed(v)),
        RemoveResult::ParentUnlink => {
            let node = node.take().unwrap();
            debug_assert!(node.key == *key);

            Some(RemoveResult::Removed(node.into_key()))
        }
    }
}
