//! Node mapper trait and traversal infrastructure
//!
//! Transformations over token trees implement [`NodeMapper`] and only say what happens to a
//! leaf or around a composite. [`walk_nodes`] owns the recursion and guarantees document
//! order: a composite's children are visited in sequence, between `enter_composite` and
//! `exit_composite`, before any later sibling.
//!
//! Mappers are stateful (`&mut self`), and the same mapper instance sees the whole tree. That
//! is what lets the bracket annotator keep one stack across every nesting level.

use crate::metta::token::{Token, TokenNode};

pub trait NodeMapper {
    /// Transform a leaf. Default passes it through unchanged.
    fn map_leaf(&mut self, token: Token) -> TokenNode {
        TokenNode::Leaf(token)
    }

    /// Called before a composite's children are visited.
    fn enter_composite(&mut self) {}

    /// Called with the already mapped children of a composite.
    fn exit_composite(&mut self, children: Vec<TokenNode>) -> TokenNode {
        TokenNode::Composite(children)
    }
}

/// Rebuild `nodes` through `mapper`, recursing into composites.
pub fn walk_nodes(nodes: Vec<TokenNode>, mapper: &mut impl NodeMapper) -> Vec<TokenNode> {
    nodes
        .into_iter()
        .map(|node| walk_node(node, mapper))
        .collect()
}

fn walk_node(node: TokenNode, mapper: &mut impl NodeMapper) -> TokenNode {
    match node {
        TokenNode::Leaf(token) => mapper.map_leaf(token),
        TokenNode::Composite(children) => {
            mapper.enter_composite();
            let children = walk_nodes(children, mapper);
            mapper.exit_composite(children)
        }
    }
}
