use tracing::{debug, trace};

use crate::align::{side_by_side, side_by_side_fallback};
use crate::differ::LineDiffer;
use crate::model::{DiffScript, DiffStats, DisplayLine, SideBySide};
use crate::unified::{render_unified, render_unified_fallback};

/// Entry point for comparing two config contents.
///
/// The line differ is passed in explicitly. Without one the engine renders a
/// degraded view instead of failing. Absent input is treated as empty text.
#[derive(Clone, Copy)]
pub struct DiffEngine<'a> {
    differ: Option<&'a dyn LineDiffer>,
}

impl<'a> DiffEngine<'a> {
    pub fn new(differ: Option<&'a dyn LineDiffer>) -> Self {
        Self { differ }
    }

    pub fn with_differ(differ: &'a dyn LineDiffer) -> Self {
        Self {
            differ: Some(differ),
        }
    }

    pub fn without_differ() -> Self {
        Self { differ: None }
    }

    pub fn has_differ(&self) -> bool {
        self.differ.is_some()
    }

    pub fn script<'s>(
        &self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> Option<DiffScript> {
        let differ = self.differ?;
        let old: Option<&str> = old.into();
        let new: Option<&str> = new.into();
        let script = differ.diff_lines(old.unwrap_or_default(), new.unwrap_or_default());
        trace!(operations = script.operations().len(), "computed line diff");
        Some(script)
    }

    pub fn unified<'s>(
        &self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> Vec<DisplayLine> {
        let new: Option<&str> = new.into();
        match self.script(old, new) {
            Some(script) => {
                let lines = render_unified(&script);
                trace!(lines = lines.len(), "rendered unified diff");
                lines
            }
            None => {
                debug!("no line differ available, showing new content only");
                render_unified_fallback(new.unwrap_or_default())
            }
        }
    }

    pub fn side_by_side<'s>(
        &self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> SideBySide {
        let old: Option<&str> = old.into();
        let new: Option<&str> = new.into();
        match self.script(old, new) {
            Some(script) => {
                let view = side_by_side(&script);
                trace!(
                    rows = view.rows().map_or(0, |rows| rows.len()),
                    "rendered side-by-side diff"
                );
                view
            }
            None => {
                debug!("no line differ available, showing both contents verbatim");
                side_by_side_fallback(old.unwrap_or_default(), new.unwrap_or_default())
            }
        }
    }

    pub fn stats<'s>(
        &self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> Option<DiffStats> {
        self.script(old, new).map(|script| script.stats())
    }
}

impl std::fmt::Debug for DiffEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffEngine")
            .field("has_differ", &self.has_differ())
            .finish()
    }
}
