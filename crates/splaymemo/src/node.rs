//! Splay tree node and the two rotation primitives

/// Owning child link
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A tree node. Keys in `left` are strictly smaller than `key`,
/// keys in `right` strictly greater.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }

    /// Promote `x.left` into the position of `x`.
    ///
    /// `x` becomes the right child of the promoted node and takes over the
    /// promoted node's former right subtree as its new left subtree.
    /// Without a left child there is nothing to rotate and `x` is returned as is.
    pub(crate) fn rotate_right(mut x: Box<Self>) -> Box<Self> {
        match x.left.take() {
            Some(mut y) => {
                x.left = y.right.take();
                y.right = Some(x);
                y
            }
            None => x,
        }
    }

    /// Mirror of [`Node::rotate_right`].
    pub(crate) fn rotate_left(mut x: Box<Self>) -> Box<Self> {
        match x.right.take() {
            Some(mut y) => {
                x.right = y.left.take();
                y.left = Some(x);
                y
            }
            None => x,
        }
    }
}
