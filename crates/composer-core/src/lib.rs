//! Composer Core Types and Definitions
//!
//! This crate provides the foundational types for the Composer markup
//! language. It includes:
//!
//! - **Elements**: The closed vocabulary of node kinds ([`element::ElementType`])
//! - **Nodes**: The immutable document tree ([`node::Node`])
//! - **Blocks**: Decoded views of code and divider literals ([`block`] module)
//! - **Colors**: CSS color handling for colored spans ([`color::Color`])

pub mod block;
pub mod color;
pub mod element;
pub mod node;
