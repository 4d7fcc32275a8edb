//! Kensa Core - static analysis for React component files
//!
//! Parses JavaScript/JSX/TypeScript sources with SWC, runs a fixed set of
//! React-specific passes over the shared AST, bridges to ESLint for rule
//! checking and applies safe automatic fixes.

pub mod analysis;
pub mod config;
pub mod diagnostic;
pub mod fixer;
pub mod lint;
pub mod parser;
pub mod passes;
pub mod suggestions;
pub mod visitor;
