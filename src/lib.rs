//! esm2cjs - rewrite ES module `import`/`export` statements to CommonJS
//!
//! This crate converts `import`/`export` syntax into `require`/`exports`
//! assignments by matching a fixed set of statement shapes line by line. It
//! does not parse JavaScript: statements it does not recognize are passed
//! through unchanged.
//!
//! # Example
//!
//! ```
//! use esm2cjs::{transform, TransformOptions};
//!
//! let source = "import { readFile } from 'fs';\nexport default readFile;";
//! let out = transform(source, &TransformOptions::default());
//! assert_eq!(out, "const { readFile } = require('fs');\nmodule.exports = readFile;");
//! ```

pub mod exports;
pub mod files;
pub mod imports;
pub mod options;
pub mod rewrite;
mod scan;
mod transform;

pub use exports::{find_exports, ExportKind, ExportStatement};
pub use imports::{find_imports, ImportBinding, ImportStatement};
pub use options::{PathPattern, Replacement, TransformOptions};
pub use rewrite::PathRewriter;
pub use scan::{ModulePath, Specifier};
pub use transform::{transform, transform_with_report, TransformReport};
