use crate::node::Node;

/// An in-order [`Iterator`] of owned values, draining the subtree it is
/// constructed with.
#[derive(Debug)]
pub(crate) struct OwnedIter<T, A> {
    stack: Vec<Box<Node<T, A>>>,
}

impl<T, A> OwnedIter<T, A> {
    pub(crate) fn new(root: Option<Box<Node<T, A>>>) -> Self {
        let mut this = Self { stack: vec![] };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: Box<Node<T, A>>) {
        let mut ptr = Some(subtree_root);

        while let Some(mut v) = ptr {
            ptr = v.take_left();
            self.stack.push(v);
        }
    }
}

impl<T, A> Iterator for OwnedIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.take_right() {
            self.push_subtree(right);
        }

        Some(v.into_value())
    }
}
