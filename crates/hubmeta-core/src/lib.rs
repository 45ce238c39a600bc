//! # hubmeta core pipeline
//!
//! Reconciles the loosely structured artifacts a model hub serves for one model
//! (summary record, config documents, readme, file listing, spaces listing) into a
//! single [`NormalizedModelRecord`].
//!
//! Everything in this crate is pure and synchronous. Fetching the artifacts is the
//! job of a source fetcher living in the application crate.

pub mod assembler;
pub mod error;
pub mod extras;
pub mod record;
pub mod resolver;
pub mod section;
pub mod sources;

pub use assembler::{AssembleOptions, assemble, assemble_with};
pub use error::{CoreError, Result};
pub use record::{
    Benchmarks, Links, ModelTree, NormalizedModelRecord, SafetensorsInfo, SpaceEntry,
    TrainingDataSource, slugify,
};
pub use resolver::{Resolver, Strategy};
pub use sources::{
    CardData, ConfigDocument, ConfigKind, FileEntry, LicenseField, ModelSummary,
    RawModelSources, SafetensorsSummary, Sibling, SpaceRef, SummaryConfig,
};
