pub mod align;
pub mod differ;
pub mod document;
pub mod engine;
pub mod error;
pub mod html;
pub mod model;
pub mod unified;

pub use align::{align, side_by_side, side_by_side_fallback};
pub use differ::{DiffAlgorithm, DiffOptions, LineDiffer, SimilarDiffer};
pub use document::Document;
pub use engine::DiffEngine;
pub use error::ScriptError;
pub use model::{
    AlignedRow, Cell, DiffOperation, DiffScript, DiffStats, DisplayLine, Marker, OpKind,
    SideBySide,
};
pub use unified::{render_unified, render_unified_fallback};
