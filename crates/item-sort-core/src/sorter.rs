use std::cmp::Ordering;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use crate::{AsItem, Item};

/// Ascending orderings a [`SortTree`] can be keyed by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Every record compares equal, so output keeps arrival order.
    Default,
    Id,
    /// Case-folded name, char by char.
    Name,
    /// Held count. Only meaningful as the second pass after `Id`.
    Quantity,
}

impl Comparator {
    #[must_use]
    pub fn compare(self, lhs: &Item, rhs: &Item) -> Ordering {
        match self {
            Self::Default => Ordering::Equal,
            Self::Id => lhs.item_type.cmp(&rhs.item_type),
            Self::Name => compare_names(&lhs.name, &rhs.name),
            Self::Quantity => lhs.stack.cmp(&rhs.stack),
        }
    }
}

fn compare_names(lhs: &str, rhs: &str) -> Ordering {
    lhs.chars().flat_map(char::to_lowercase).cmp(rhs.chars().flat_map(char::to_lowercase))
}

#[derive(Debug)]
struct Node<T> {
    /// Records with equal keys in arrival order. Never empty inside a tree.
    bucket: Vec<T>,
    left: Option<usize>,
    right: Option<usize>,
    height: u32,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Self {
        Self { bucket: vec![value], left: None, right: None, height: 1 }
    }
}

/// Height-balanced search tree ordered by a [`Comparator`].
///
/// Records that compare equal share one node and keep the order they were
/// inserted in, so draining the tree is a stable sort of the insertion
/// sequence. Nodes live in an arena and link by index.
///
/// ```
/// use item_sort_core::{Comparator, Item, SortTree};
///
/// let mut tree = SortTree::new(Comparator::Name);
/// tree.insert(Item { name: "Zephyr".to_string(), ..Item::default() });
/// tree.insert(Item { name: "axe-of-doom".to_string(), ..Item::default() });
///
/// let names: Vec<String> = tree.into_sorted().map(|item| item.name).collect();
/// assert_eq!(names, ["axe-of-doom", "Zephyr"]);
/// ```
#[derive(Debug)]
pub struct SortTree<T> {
    comparator: Comparator,
    nodes: Vec<Node<T>>,
    root: Option<usize>,
    len: usize,
}

impl<T: AsItem> SortTree<T> {
    #[must_use]
    pub fn new(comparator: Comparator) -> Self {
        Self { comparator, nodes: Vec::new(), root: None, len: 0 }
    }

    #[must_use]
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, value: T) {
        let root = self.insert_at(self.root, value);
        self.root = Some(root);
        self.len += 1;
    }

    /// Drain into a fresh tree keyed by `comparator`. Records that tie under
    /// the new comparator keep their order from this tree.
    #[must_use]
    pub fn rebuild(self, comparator: Comparator) -> Self {
        let mut tree = Self::new(comparator);
        tree.extend(self.into_sorted());
        tree
    }

    /// One-shot ascending traversal. Consumes the tree.
    #[must_use]
    pub fn into_sorted(self) -> SortedIter<T> {
        SortedIter {
            nodes: self.nodes,
            stack: Vec::new(),
            cursor: self.root,
            bucket: Vec::new().into_iter(),
            remaining: self.len,
        }
    }

    fn insert_at(&mut self, node: Option<usize>, value: T) -> usize {
        let Some(index) = node else {
            self.nodes.push(Node::leaf(value));
            return self.nodes.len() - 1;
        };

        let ordering = match self.nodes[index].bucket.first() {
            Some(key) => self.comparator.compare(value.as_item(), key.as_item()),
            None => Ordering::Equal,
        };
        match ordering {
            Ordering::Equal => {
                self.nodes[index].bucket.push(value);
                return index;
            }
            Ordering::Less => {
                let child = self.insert_at(self.nodes[index].left, value);
                self.nodes[index].left = Some(child);
            }
            Ordering::Greater => {
                let child = self.insert_at(self.nodes[index].right, value);
                self.nodes[index].right = Some(child);
            }
        }
        self.rebalance(index)
    }

    fn height(&self, node: Option<usize>) -> u32 {
        node.map_or(0, |index| self.nodes[index].height)
    }

    fn update_height(&mut self, index: usize) {
        let node = &self.nodes[index];
        let height = 1 + self.height(node.left).max(self.height(node.right));
        self.nodes[index].height = height;
    }

    fn balance_factor(&self, index: usize) -> i64 {
        let node = &self.nodes[index];
        i64::from(self.height(node.left)) - i64::from(self.height(node.right))
    }

    fn rotate_right(&mut self, index: usize) -> usize {
        let Some(pivot) = self.nodes[index].left else {
            return index;
        };
        self.nodes[index].left = self.nodes[pivot].right;
        self.nodes[pivot].right = Some(index);
        self.update_height(index);
        self.update_height(pivot);
        pivot
    }

    fn rotate_left(&mut self, index: usize) -> usize {
        let Some(pivot) = self.nodes[index].right else {
            return index;
        };
        self.nodes[index].right = self.nodes[pivot].left;
        self.nodes[pivot].left = Some(index);
        self.update_height(index);
        self.update_height(pivot);
        pivot
    }

    fn rebalance(&mut self, index: usize) -> usize {
        self.update_height(index);
        let balance = self.balance_factor(index);

        if balance > 1 {
            if let Some(left) = self.nodes[index].left {
                if self.balance_factor(left) < 0 {
                    let rotated = self.rotate_left(left);
                    self.nodes[index].left = Some(rotated);
                }
            }
            return self.rotate_right(index);
        }

        if balance < -1 {
            if let Some(right) = self.nodes[index].right {
                if self.balance_factor(right) > 0 {
                    let rotated = self.rotate_right(right);
                    self.nodes[index].right = Some(rotated);
                }
            }
            return self.rotate_left(index);
        }

        index
    }
}

impl<T: AsItem> Extend<T> for SortTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Lazy in-order drain of a [`SortTree`].
#[derive(Debug)]
pub struct SortedIter<T> {
    nodes: Vec<Node<T>>,
    stack: Vec<usize>,
    cursor: Option<usize>,
    bucket: std::vec::IntoIter<T>,
    remaining: usize,
}

impl<T> SortedIter<T> {
    /// An exhausted sequence, returned when a sort is abandoned.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            stack: Vec::new(),
            cursor: None,
            bucket: Vec::new().into_iter(),
            remaining: 0,
        }
    }
}

impl<T> Iterator for SortedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(value) = self.bucket.next() {
                self.remaining -= 1;
                return Some(value);
            }

            while let Some(index) = self.cursor {
                self.stack.push(index);
                self.cursor = self.nodes[index].left;
            }
            let index = self.stack.pop()?;
            self.bucket = std::mem::take(&mut self.nodes[index].bucket).into_iter();
            self.cursor = self.nodes[index].right;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for SortedIter<T> {}

impl<T> FusedIterator for SortedIter<T> {}
