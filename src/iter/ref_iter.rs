use crate::node::Node;

/// An in-order [`Iterator`] over borrowed [`Node`] instances.
#[derive(Debug)]
pub(crate) struct RefIter<'a, T, A> {
    stack: Vec<&'a Node<T, A>>,
}

impl<'a, T, A> RefIter<'a, T, A> {
    pub(crate) fn new(root: Option<&'a Node<T, A>>) -> Self {
        let mut this = Self { stack: vec![] };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node<T, A>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = v.left();
        }
    }
}

impl<'a, T, A> Iterator for RefIter<'a, T, A> {
    type Item = &'a Node<T, A>;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.right() {
            self.push_subtree(right);
        }

        Some(v)
    }
}
