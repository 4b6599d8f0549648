use std::{
    fmt::{Debug, Write},
    ops::Range,
};

use proptest::prelude::*;

use crate::node::Node;

pub(crate) const RANGE_MAX: usize = 20;

/// Generate arbitrary (potentially invalid!) ranges with bounds from
/// [0..[`RANGE_MAX`]).
pub(crate) fn arbitrary_range() -> impl Strategy<Value = Range<usize>> {
    (0..RANGE_MAX, 0..RANGE_MAX).prop_map(|(start, end)| Range { start, end })
}

/// As [`arbitrary_range()`], but the lower bound never exceeds the upper
/// bound.
pub(crate) fn arbitrary_valid_range() -> impl Strategy<Value = Range<usize>> {
    (0..RANGE_MAX, 0..RANGE_MAX).prop_map(|(a, b)| Range {
        start: a.min(b),
        end: a.max(b),
    })
}

/// As [`arbitrary_valid_range()`], but the range is never empty: the lower
/// bound is strictly less than the upper bound.
pub(crate) fn arbitrary_nonempty_range() -> impl Strategy<Value = Range<usize>> {
    (0..RANGE_MAX - 1)
        .prop_flat_map(|start| (Just(start), (start + 1)..RANGE_MAX))
        .prop_map(|(start, end)| Range { start, end })
}

/// Derive a [`Range`] from a (start, end) tuple value.
pub(crate) fn mapped(v: &(usize, usize)) -> Range<usize> {
    v.0..v.1
}

#[allow(unused)]
pub(crate) fn print_dot<T, A>(n: &Node<T, A>) -> String
where
    T: Debug,
    A: Debug,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{");
    writeln!(buf, r#"bgcolor = "transparent";"#);
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    );
    recurse(n, &mut buf);
    writeln!(buf, "}}");

    buf
}

#[allow(unused)]
fn recurse<T, A, W>(n: &Node<T, A>, buf: &mut W)
where
    W: std::fmt::Write,
    T: Debug,
    A: Debug,
{
    writeln!(
        buf,
        r#""{:?}" [label="{:?} | {{ agg={:?} | h={} }}"];"#,
        n.value(),
        n.value(),
        n.aggregate(),
        n.height(),
    )
    .unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{:?}\" -> \"{:?}\" [color = \"orange1\";];",
                    n.value(),
                    v.value()
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{:?}\" [shape=point,style=invis];", n.value()).unwrap();
                writeln!(
                    buf,
                    "\"{:?}\" -> \"null_{:?}\" [style=invis];",
                    n.value(),
                    n.value()
                )
                .unwrap();
            }
        };
    }
}
