//! Self-adjusting binary search tree
//!
//! Every `search`, `insert` and `remove` splays the tree around the
//! requested key: the node holding it (or the last node visited on the
//! search path when it is absent) ends up at the root. Repeated access to
//! the same working set therefore gets cheaper over time.
//!
//! The splay follows the recursive zig-zig/zig-zag formulation built from
//! [`Node::rotate_left`] and [`Node::rotate_right`], run with an explicit
//! path stack so degenerate spines cannot exhaust the call stack.

use std::cmp::Ordering;
use std::fmt;

use crate::node::{Link, Node};

/// Splay tree mapping ordered keys to values
pub struct SplayTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> SplayTree<K, V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Key currently at the root, without splaying
    pub fn root_key(&self) -> Option<&K> {
        self.root.as_ref().map(|node| &node.key)
    }

    /// Nodes on the longest root-to-leaf path (0 for an empty tree)
    pub fn height(&self) -> usize {
        let mut stack: Vec<(&Node<K, V>, usize)> = Vec::new();
        if let Some(root) = &self.root {
            stack.push((&**root, 1));
        }

        let mut height = 0;
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [&node.left, &node.right].into_iter().flatten() {
                stack.push((&**child, depth + 1));
            }
        }
        height
    }

    /// In-order iterator over `(key, value)` pairs. Does not splay.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left(&self.root);
        iter
    }

    /// Remove every node
    pub fn clear(&mut self) {
        // Ascending inserts build spines thousands of nodes deep, so
        // dropping has to be iterative.
        let mut stack: Vec<Box<Node<K, V>>> = Vec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }
}

impl<K: Ord, V> SplayTree<K, V> {
    /// Look up `key`, splaying the tree around it.
    ///
    /// Restructures the tree whether or not the key is present.
    pub fn search(&mut self, key: &K) -> Option<&V> {
        self.root = Self::splay(self.root.take(), key);
        self.root
            .as_deref()
            .filter(|node| node.key == *key)
            .map(|node| &node.value)
    }

    /// Insert or overwrite `key`, leaving it at the root.
    ///
    /// Returns the previous value when the key already existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(mut root) = Self::splay(self.root.take(), &key) else {
            self.root = Some(Node::new(key, value));
            self.len = 1;
            return None;
        };

        match key.cmp(&root.key) {
            Ordering::Equal => {
                let old = std::mem::replace(&mut root.value, value);
                self.root = Some(root);
                return Some(old);
            }
            Ordering::Less => {
                let mut node = Node::new(key, value);
                node.left = root.left.take();
                node.right = Some(root);
                self.root = Some(node);
            }
            Ordering::Greater => {
                let mut node = Node::new(key, value);
                node.right = root.right.take();
                node.left = Some(root);
                self.root = Some(node);
            }
        }
        self.len += 1;
        None
    }

    /// Remove `key` and return its value.
    ///
    /// The left subtree's maximum is splayed up to replace the removed root.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut root = Self::splay(self.root.take(), key)?;
        if root.key != *key {
            self.root = Some(root);
            return None;
        }

        let right = root.right.take();
        self.root = match Self::splay(root.left.take(), key) {
            Some(mut max) => {
                max.right = right;
                Some(max)
            }
            None => right,
        };
        self.len -= 1;
        Some(root.value)
    }

    fn splay(root: Link<K, V>, key: &K) -> Link<K, V> {
        // Descend, detaching each two-level step onto `path`, then replay the
        // steps bottom-up. Same rotations as the recursive formulation, but
        // the depth lives on the heap.
        let mut path: Vec<Step<K, V>> = Vec::new();
        let mut cur = root;

        let mut subtree = loop {
            let Some(mut node) = cur else {
                break None;
            };
            match key.cmp(&node.key) {
                Ordering::Equal => break Some(node),
                Ordering::Less => {
                    let Some(mut left) = node.left.take() else {
                        break Some(node);
                    };
                    match key.cmp(&left.key) {
                        Ordering::Less => {
                            cur = left.left.take();
                            path.push(Step::ZigZigLeft(node, left));
                        }
                        Ordering::Greater => {
                            cur = left.right.take();
                            path.push(Step::ZigZagLeft(node, left));
                        }
                        Ordering::Equal => {
                            node.left = Some(left);
                            break Some(Node::rotate_right(node));
                        }
                    }
                }
                Ordering::Greater => {
                    let Some(mut right) = node.right.take() else {
                        break Some(node);
                    };
                    match key.cmp(&right.key) {
                        Ordering::Greater => {
                            cur = right.right.take();
                            path.push(Step::ZigZigRight(node, right));
                        }
                        Ordering::Less => {
                            cur = right.left.take();
                            path.push(Step::ZigZagRight(node, right));
                        }
                        Ordering::Equal => {
                            node.right = Some(right);
                            break Some(Node::rotate_left(node));
                        }
                    }
                }
            }
        };

        while let Some(step) = path.pop() {
            subtree = Some(match step {
                Step::ZigZigLeft(mut node, mut left) => {
                    left.left = subtree;
                    node.left = Some(left);
                    Node::rotate_right(Node::rotate_right(node))
                }
                Step::ZigZagLeft(mut node, mut left) => {
                    left.right = subtree;
                    node.left = Some(Node::rotate_left(left));
                    Node::rotate_right(node)
                }
                Step::ZigZigRight(mut node, mut right) => {
                    right.right = subtree;
                    node.right = Some(right);
                    Node::rotate_left(Node::rotate_left(node))
                }
                Step::ZigZagRight(mut node, mut right) => {
                    right.left = subtree;
                    node.right = Some(Node::rotate_right(right));
                    Node::rotate_left(node)
                }
            });
        }
        subtree
    }
}

/// A pending two-level splay step: a node and its detached child, whose
/// own child on the search side is being splayed further down.
enum Step<K, V> {
    ZigZigLeft(Box<Node<K, V>>, Box<Node<K, V>>),
    ZigZagLeft(Box<Node<K, V>>, Box<Node<K, V>>),
    ZigZigRight(Box<Node<K, V>>, Box<Node<K, V>>),
    ZigZagRight(Box<Node<K, V>>, Box<Node<K, V>>),
}

impl<K, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for SplayTree<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SplayTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for SplayTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SplayTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a SplayTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator returned by [`SplayTree::iter`]
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link {
            self.stack.push(&**node);
            link = &node.left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
