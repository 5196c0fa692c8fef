//! topb-core - Conversion-method generation for annotated Go structs
//!
//! Scans Go source for struct types whose documentation carries the
//! `gen:topb` marker and writes, for each input file, a companion
//! `autogen_topb_<name>.go` holding one `ToPb()` method per marked type.
//! Each method copies the struct's fields by name into the same-named type
//! of a wire (protobuf) package.
//!
//! # Pipeline
//!
//! ```text
//! Discovery ──► SourceInput ──► SourceUnit ──► eligible types ──► GeneratedArtifact ──► file
//!  (loader)                      (ir)          (matcher)          (emitter)             (writer)
//! ```
//!
//! [`Driver`] runs the pipeline per file and records a [`FileReport`] for
//! each; one failing file never stops the others.
//!
//! # Example
//!
//! ```no_run
//! use topb_core::{Discovery, Driver, GenerateConfig};
//!
//! let driver = Driver::new(GenerateConfig {
//!     wire_import: Some("example.com/shop/gen/pb".to_string()),
//!     ..GenerateConfig::default()
//! });
//!
//! let report = driver
//!     .run(&Discovery::Explicit(vec!["models/order.go".into()]))
//!     .unwrap();
//! for file in &report.files {
//!     println!("{file}");
//! }
//! ```

pub mod config;
pub mod directive;
pub mod driver;
pub mod emitter;
pub mod error;
pub mod ir;
pub mod loader;
pub mod matcher;
pub mod writer;

pub use config::{ConfigFile, GenerateConfig};
pub use driver::{Driver, FileReport, Outcome, RunReport};
pub use emitter::GeneratedArtifact;
pub use error::{TopbError, TopbResult};
pub use ir::{Field, SourceUnit, TypeBody, TypeDeclaration};
pub use loader::{Discovery, SourceInput};
