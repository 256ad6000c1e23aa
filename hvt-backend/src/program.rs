//! Program assembly
//!
//! Concatenates translated units into one program, optionally prefixed by
//! the bootstrap block. The assembler owns the two pieces of run-scoped
//! state: the label allocator (shared across units so generated labels are
//! program-unique) and the diagnostic sink.

use crate::labels::LabelAllocator;
use crate::lower::function::build_call;
use crate::unit::UnitTranslator;
use hvt_codegen::{Comp, Dest, HackInst};
use hvt_common::DiagnosticSink;
use log::{debug, info};

/// First usable stack address on the Hack machine.
pub const STACK_BASE: u16 = 256;

/// Function the bootstrap block transfers control to.
pub const ENTRY_FUNCTION: &str = "Sys.init";

pub struct ProgramAssembler {
    labels: LabelAllocator,
    sink: DiagnosticSink,
    output: Vec<HackInst>,
}

impl ProgramAssembler {
    pub fn new() -> Self {
        Self {
            labels: LabelAllocator::new(),
            sink: DiagnosticSink::new(),
            output: Vec::new(),
        }
    }

    /// Emit the bootstrap block: SP = 256, then an ordinary `call Sys.init 0`.
    ///
    /// Reuses the call lowering rather than a bespoke sequence, so bootstrap
    /// and regular calls share one frame-building implementation. Call this
    /// before adding units.
    pub fn emit_bootstrap(&mut self) {
        info!("emitting bootstrap (SP={}, entry={})", STACK_BASE, ENTRY_FUNCTION);
        self.output.push(HackInst::comment("bootstrap"));
        self.output.push(HackInst::at(STACK_BASE));
        self.output.push(HackInst::assign(Dest::D, Comp::A));
        self.output.push(HackInst::a("SP"));
        self.output.push(HackInst::assign(Dest::M, Comp::D));
        let call = build_call(ENTRY_FUNCTION, 0, &mut self.labels);
        self.output.extend(call);
    }

    /// Translate one unit and append its output. Units appear in the order
    /// they are added.
    pub fn add_unit(&mut self, name: &str, lines: &[String]) {
        debug!("adding unit '{}'", name);
        let block = UnitTranslator::new(name, &mut self.labels, &mut self.sink).translate(lines);
        self.output.extend(block);
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Consume the assembler, yielding the program and its diagnostics.
    pub fn finish(self) -> (Vec<HackInst>, DiagnosticSink) {
        info!(
            "program assembled: {} instructions, {}",
            self.output.len(),
            self.sink.summary()
        );
        (self.output, self.sink)
    }
}

impl Default for ProgramAssembler {
    fn default() -> Self {
        Self::new()
    }
}
