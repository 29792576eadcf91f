//! Annotation passes over token trees.
//!
//! [mapper] provides the traversal; [brackets] is the bracket-depth pass built on it.

pub mod brackets;
pub mod mapper;

pub use brackets::{
    annotate, annotate_flat, annotate_flat_with_report, annotate_with_report, AnnotationReport,
    BracketAnnotator, BracketStack, OpenParen,
};
pub use mapper::{walk_nodes, NodeMapper};
