//! Translation-unit driver
//!
//! Folds the classifier and the lowering over the comment-stripped lines of
//! one source unit. Carries the unit base name (static namespacing), the
//! program-scoped label allocator, and the diagnostic sink shared with the
//! assembler. Bad lines produce diagnostics and marker comments; they never
//! stop the fold.

use crate::classify::{classify, Verdict};
use crate::labels::LabelAllocator;
use crate::lower::{lower_command, LowerCtx};
use hvt_codegen::HackInst;
use hvt_common::{DiagnosticSink, SourceLocation};
use log::{debug, warn};

pub struct UnitTranslator<'a> {
    unit: &'a str,
    labels: &'a mut LabelAllocator,
    sink: &'a mut DiagnosticSink,
}

impl<'a> UnitTranslator<'a> {
    pub fn new(
        unit: &'a str,
        labels: &'a mut LabelAllocator,
        sink: &'a mut DiagnosticSink,
    ) -> Self {
        Self { unit, labels, sink }
    }

    /// Translate one unit's lines to a Hack instruction block.
    ///
    /// Lines must already be comment-stripped; the unit name must be a
    /// stable, collision-free identifier across the whole program.
    pub fn translate(&mut self, lines: &[String]) -> Vec<HackInst> {
        debug!("translating unit '{}' ({} lines)", self.unit, lines.len());

        let mut output = vec![HackInst::comment(format!("unit: {}", self.unit))];

        for (index, line) in lines.iter().enumerate() {
            let line_number = index as u32 + 1;
            match classify(line) {
                Verdict::Blank => {}
                Verdict::Malformed(text) => {
                    warn!("{}:{}: unrecognized line: {}", self.unit, line_number, text);
                    self.sink.warning(
                        format!("unrecognized line: {}", text),
                        SourceLocation::new(self.unit, line_number),
                    );
                    output.extend(malformed_marker(&text));
                }
                Verdict::Command(command) => {
                    let mut ctx = LowerCtx {
                        unit: self.unit,
                        labels: &mut *self.labels,
                    };
                    match lower_command(&command, &mut ctx) {
                        Ok(block) => output.extend(block),
                        Err(err) => {
                            warn!("{}:{}: {}: {}", self.unit, line_number, command, err);
                            self.sink.warning(
                                format!("{}: {}", command, err),
                                SourceLocation::new(self.unit, line_number),
                            );
                            output.push(HackInst::comment(format!(
                                "skipped `{}`: {}",
                                command, err
                            )));
                        }
                    }
                }
            }
        }

        debug!(
            "unit '{}' produced {} instructions",
            self.unit,
            output.len()
        );
        output
    }
}

/// Marker block left in the output where an unrecognized line was skipped.
fn malformed_marker(line: &str) -> Vec<HackInst> {
    vec![
        HackInst::comment("!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!"),
        HackInst::comment(format!("unrecognized line: \"{}\"", line)),
        HackInst::comment("!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!"),
    ]
}
