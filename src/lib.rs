//! Block-based coding sandbox core.
//!
//! Users place statement blocks from the [`catalog`] on a [`workspace`]. The
//! [`codegen`] module turns the placed blocks into program text and the
//! [`simulator`] "runs" that text by recognizing a fixed set of statement
//! shapes, producing a readable trace. [`studio`] ties these together the way
//! the editor's run button does.
//!
//! The binary `blockstudio` wraps the library for workspace files on disk.

pub mod catalog;
pub mod codegen;
pub mod model;
pub mod simulator;
pub mod studio;
pub mod workspace;
