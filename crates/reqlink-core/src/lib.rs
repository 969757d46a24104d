#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

//! Core library for reqlink: Node.js `require(X)` resolution with bundler
//! alias fallback, plus the pieces the CLI builds on (config, specifier
//! scanning, project checks).

pub mod check;
pub mod config;
pub mod error;
pub mod imports;
pub mod links;
pub mod paths;
pub mod resolver;
pub mod version;

pub use check::{check_project, CheckProblem, CheckReport, ProblemKind};
pub use config::{Config, ResolveSettings};
pub use error::{Error, Result};
pub use imports::{scan_imports, ImportKind, ImportSpecifier};
pub use resolver::{
    find_module, find_module_traced, FileSystem, ModuleResolver, OsFileSystem,
    ResolutionContext, ResolveTrace, Resolved, SpecifierKind,
};
pub use version::VERSION;
