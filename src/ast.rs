use std::ops::Index;

/// Stable index of a node inside a [`Pattern`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialClass {
    Digit,
    Word,
    Whitespace,
}

impl SpecialClass {
    pub fn name(self) -> &'static str {
        match self {
            SpecialClass::Digit => "digit",
            SpecialClass::Word => "word",
            SpecialClass::Whitespace => "whitespace",
        }
    }
}

// Reserved: the parser does not emit anchors yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Start,
    End,
    StartString,
    EndString,
    EndLastMatch,
    WordBoundary,
}

impl AnchorKind {
    pub fn name(self) -> &'static str {
        match self {
            AnchorKind::Start => "start",
            AnchorKind::End => "end",
            AnchorKind::StartString => "start of string",
            AnchorKind::EndString => "end of string",
            AnchorKind::EndLastMatch => "end of last match",
            AnchorKind::WordBoundary => "word boundary",
        }
    }
}

/// Sentinel for an unbounded quantifier maximum.
pub const UNBOUNDED: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal { negated: bool, ch: u8 },
    Special { negated: bool, class: SpecialClass },
    Range { negated: bool, min: u8, max: u8 },
    Anchor { kind: AnchorKind },
    /// Applies to the sibling immediately before it.
    Quantifier { min: i32, max: i32 },
    List(Vec<NodeId>),
    /// A bracketed character class, one child per member.
    Alternator(Vec<NodeId>),
    CaptureGroup(Vec<NodeId>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Literal {
            negated: false,
            ch: 0,
        }
    }
}

impl Node {
    pub fn literal(ch: u8) -> Self {
        Node::Literal { negated: false, ch }
    }

    pub fn quantifier(min: i32, max: i32) -> Self {
        Node::Quantifier { min, max }
    }

    pub fn is_container(&self) -> bool {
        self.children().is_some()
    }

    /// Children of a container node, `None` for leaves.
    pub fn children(&self) -> Option<&[NodeId]> {
        match self {
            Node::List(children) | Node::Alternator(children) | Node::CaptureGroup(children) => {
                Some(children)
            }
            _ => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Node::List(children) | Node::Alternator(children) | Node::CaptureGroup(children) => {
                Some(children)
            }
            _ => None,
        }
    }
}

/// A compiled pattern: an arena of nodes rooted at a single `List`.
///
/// Every container owns its children by index. A node is referenced by
/// exactly one parent, children keep insertion order, and nothing is
/// removed once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    nodes: Vec<Node>,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern {
    /// Create a pattern holding only an empty root list.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::List(Vec::new())],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Children of `id`; empty for leaf nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children().unwrap_or(&[])
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children.
    pub fn is_empty(&self) -> bool {
        self.children(self.root()).is_empty()
    }

    /// Append `node` as the last child of `parent` and return its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a `List`, `Alternator` or `CaptureGroup`.
    pub fn push(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        match self.nodes[parent.0].children_mut() {
            Some(children) => children.push(id),
            None => panic!("cannot append a child to non-container node {parent:?}"),
        }
        self.nodes.push(node);
        id
    }

    /// Append a zeroed node to `parent` and hand it back for populating.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a container.
    pub fn append_child(&mut self, parent: NodeId) -> &mut Node {
        let id = self.push(parent, Node::default());
        &mut self.nodes[id.0]
    }

    /// Release every node depth-first, children before their parent, and
    /// return how many were released.
    pub fn free(mut self) -> usize {
        let mut released = 0;
        // (node, children already expanded)
        let mut stack = vec![(self.root(), false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                let node = std::mem::take(&mut self.nodes[id.0]);
                drop(node);
                released += 1;
                continue;
            }
            stack.push((id, true));
            for &child in self.children(id).iter().rev() {
                stack.push((child, false));
            }
        }
        debug_assert_eq!(released, self.nodes.len());
        released
    }
}

impl Index<NodeId> for Pattern {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}
