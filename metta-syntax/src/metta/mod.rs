//! Main module for MeTTa highlighting functionality

pub mod annotating;
pub mod document;
pub mod formats;
pub mod highlight;
pub mod lexing;
pub mod token;
