//! Specifier discovery for JavaScript/TypeScript files.
//!
//! Provides a lightweight scanner that locates `require`/`import`
//! specifiers and their source positions.

mod scan;

pub use scan::{scan_imports, ImportKind, ImportSpecifier};
