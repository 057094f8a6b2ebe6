//! Lazy depth-first traversal over a catalog.

use std::iter::FusedIterator;

use crate::catalog::{Node, Nodes, SEPARATOR, parent_of};

/// Visiting order of [`Iter`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Parent before children.
    #[default]
    PreOrder,
    /// Children before parent.
    PostOrder,
}

/// One entry yielded by a traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visit<'a> {
    /// Qualified name, e.g. `"main.app"`.
    pub path: String,
    /// 0 for top-level entries.
    pub depth: usize,
    pub node: Node<'a>,
}

#[derive(Clone, Debug)]
struct Frame<'a> {
    nodes: Nodes<'a>,
    prefix: Option<String>,
    depth: usize,
    /// Post-order only: the parent to emit once `nodes` is exhausted.
    owner: Option<Visit<'a>>,
}

/// Depth-first iterator; siblings always come in source order.
///
/// Holds one frame per open level, nothing is collected up front.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    order: Order,
    stack: Vec<Frame<'a>>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(nodes: Nodes<'a>, prefix: Option<String>, order: Order) -> Self {
        let depth = prefix
            .as_deref()
            .map_or(0, |p| p.matches(SEPARATOR).count() + 1);
        Self {
            order,
            stack: vec![Frame {
                nodes,
                prefix,
                depth,
                owner: None,
            }],
        }
    }

    /// Traversal rooted at `node`, which lives at `path`.
    pub(crate) fn single(node: Node<'a>, path: &str, order: Order) -> Self {
        Self::new(
            Nodes::One(Some(node)),
            parent_of(path).map(str::to_string),
            order,
        )
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Visit<'a>> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(node) = frame.nodes.next() else {
                if let Some(Frame {
                    owner: Some(visit), ..
                }) = self.stack.pop()
                {
                    return Some(visit);
                }
                continue;
            };

            let path = match &frame.prefix {
                Some(prefix) => format!("{prefix}{SEPARATOR}{}", node.name()),
                None => node.name().to_string(),
            };
            let depth = frame.depth;
            let children = node.children();

            match self.order {
                Order::PreOrder => {
                    let visit = Visit {
                        path: path.clone(),
                        depth,
                        node,
                    };
                    self.stack.push(Frame {
                        nodes: children,
                        prefix: Some(path),
                        depth: depth + 1,
                        owner: None,
                    });
                    return Some(visit);
                }
                Order::PostOrder => {
                    let visit = Visit {
                        path: path.clone(),
                        depth,
                        node,
                    };
                    self.stack.push(Frame {
                        nodes: children,
                        prefix: Some(path),
                        depth: depth + 1,
                        owner: Some(visit),
                    });
                }
            }
        }
    }
}

impl FusedIterator for Iter<'_> {}
