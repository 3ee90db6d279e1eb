//! Pipeline pattern catalog and diagram construction.
//!
//! A [`Catalog`] holds named pipeline patterns; a [`Renderer`] turns a pattern
//! plus display [`Toggles`] into a [`RenderedGraph`], which [`to_dot`] prints
//! as Graphviz DOT for an external drawing engine.

pub mod builtin;
pub mod catalog;
pub mod diagnostics;
pub mod diagrams;
pub mod dot;
pub mod errors;
pub mod graph;
pub mod lint;
pub mod memo;
pub mod model;
pub mod parse;
pub mod render;
pub mod sheet;

pub use catalog::*;
pub use diagnostics::*;
pub use dot::*;
pub use errors::*;
pub use graph::*;
pub use lint::*;
pub use memo::*;
pub use model::*;
pub use parse::*;
pub use render::*;
pub use sheet::*;
