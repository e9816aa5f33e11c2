//! Transformation engine contract for recast.
//!
//! A transformation is a named source rewrite (for example `rename`). The
//! protocol engine in `recastd` hands each transformation a
//! [`TransformationConfig`] describing the file system, the text
//! [`Selection`] and the caller's arguments, and receives a
//! [`TransformationResult`] holding a [`Log`], per-file [`EditSet`]s and
//! [`FsChange`] directives.
//!
//! The crate also provides the helpers the protocol engine needs to turn edit
//! sets into client-facing artefacts: [`apply_edits`] materialises edited
//! content and [`Patch`] renders a unified diff.
//!
//! # Example
//!
//! ```
//! use recast_transform::TransformationRegistry;
//!
//! let registry = TransformationRegistry::with_builtins();
//! let rename = registry.get("rename").expect("rename is built in");
//! assert_eq!(rename.description().name(), "Rename");
//! ```

pub mod builtin;
pub mod error;
pub mod fs;
pub mod log;
pub mod registry;
pub mod selection;
pub mod text;
pub mod transformation;

pub use self::error::{EditError, RegistryError};
pub use self::fs::{FileSystem, FsChange, LocalFileSystem};
pub use self::log::{Log, LogEntry, Severity};
pub use self::registry::TransformationRegistry;
pub use self::selection::Selection;
pub use self::text::{EditSet, Patch, Position, TextEdit, TextRange, apply_edits, apply_to_file};
pub use self::transformation::{
    Description, ParamValue, Parameter, Quality, Transformation, TransformationConfig,
    TransformationResult,
};
