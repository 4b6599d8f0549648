use std::cmp::Ordering;

/// A total order over values of type `T`, captured at tree construction time.
///
/// A [`Comparator`] must implement a strict weak ordering; the tree does not
/// validate this and an inconsistent ordering produces an unspecified (but
/// memory-safe) tree shape.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a [`Comparator`], as is
/// [`NaturalOrder`] for types that are themselves [`Ord`].
pub trait Comparator<T> {
    /// Order `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self)(a, b)
    }
}

/// The order defined by a type's own [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T> Comparator<T> for NaturalOrder
where
    T: Ord,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare(&2, &2), Ordering::Equal);
        assert_eq!(NaturalOrder.compare(&3, &2), Ordering::Greater);
    }

    #[test]
    fn test_closure_comparator() {
        // A reversed numeric order.
        let cmp = |a: &u32, b: &u32| b.cmp(a);

        assert_eq!(cmp.compare(&1, &2), Ordering::Greater);
        assert_eq!(cmp.compare(&2, &2), Ordering::Equal);
        assert_eq!(cmp.compare(&3, &2), Ordering::Less);
    }
}
