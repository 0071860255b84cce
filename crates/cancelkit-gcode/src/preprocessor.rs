//! Multi-pass preprocessing pipeline
//!
//! 1. Detection: classify the file (see [`crate::detect`]).
//! 2. Scan: replay the slicer's annotations to discover objects and record
//!    their extrusion points.
//! 3. Output: write the definition header, then every original line with
//!    START/END markers injected where objects begin and end.

use std::io::{self, BufRead, Seek, Write};

use cancelkit_core::{
    HullReducer, ObjectTable, ReducerKind, Result, DEFAULT_PRECISION, DEFAULT_SIMPLIFY_TOLERANCE,
};

use crate::detect::{detect, Detection};
use crate::lifecycle::Lifecycle;
use crate::markers;
use crate::matcher::LineMatcher;
use crate::read_line;
use crate::slicers::{
    Action, CuraAdapter, IdeaMakerAdapter, M486Adapter, Slic3rAdapter, SlicerAdapter, SlicerKind,
};

/// Per-run processing options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessorConfig {
    /// Quantization grid for object hulls
    pub precision: f64,
    /// Footprint reducer
    pub reducer: ReducerKind,
    /// Simplification tolerance of the enhanced reducer
    pub simplify_tolerance: f64,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            reducer: ReducerKind::default(),
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
        }
    }
}

/// What a run did to its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Markers were injected
    Processed {
        slicer: SlicerKind,
        /// Number of objects defined in the header
        objects: usize,
    },
    /// The input already had markers and was copied unchanged
    AlreadyProcessed,
}

/// Writer that knows whether it sits at the start of a line
struct MarkerWriter<'a, W: Write> {
    inner: &'a mut W,
    at_line_start: bool,
}

impl<'a, W: Write> MarkerWriter<'a, W> {
    fn new(inner: &'a mut W) -> Self {
        Self {
            inner,
            at_line_start: true,
        }
    }

    /// Write original bytes verbatim
    fn raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some(last) = bytes.last() {
            self.inner.write_all(bytes)?;
            self.at_line_start = *last == b'\n';
        }
        Ok(())
    }

    /// Write injected text on its own line
    fn injected(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if !self.at_line_start {
            self.inner.write_all(b"\n")?;
        }
        self.raw(text.as_bytes())
    }
}

/// Cancel-object preprocessor for a single stream
pub struct Preprocessor {
    config: PreprocessorConfig,
    reducer: Box<dyn HullReducer>,
}

impl Preprocessor {
    pub fn new(config: PreprocessorConfig) -> Self {
        let reducer = config.reducer.build(config.simplify_tolerance);
        tracing::debug!("Using {} hull reducer", reducer.name());
        Self { config, reducer }
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Detect the slicer and rewrite `input` into `output`
    ///
    /// Already processed input is copied byte for byte. Nothing is written
    /// when detection fails.
    pub fn run<R, W>(&self, input: &mut R, output: &mut W) -> Result<Outcome>
    where
        R: BufRead + Seek,
        W: Write,
    {
        match detect(input)? {
            Detection::AlreadyProcessed => {
                input.rewind()?;
                io::copy(input, output)?;
                Ok(Outcome::AlreadyProcessed)
            }
            Detection::Slicer(kind) => {
                tracing::info!("Processing {} G-code", kind);
                self.run_as(kind, input, output)
            }
        }
    }

    /// Rewrite `input` assuming it was produced by `kind`
    pub fn run_as<R, W>(&self, kind: SlicerKind, input: &mut R, output: &mut W) -> Result<Outcome>
    where
        R: BufRead + Seek,
        W: Write,
    {
        match kind {
            SlicerKind::Slic3r => self.run_with(Slic3rAdapter::new(), input, output),
            SlicerKind::Cura => self.run_with(CuraAdapter::new(), input, output),
            SlicerKind::IdeaMaker => self.run_with(IdeaMakerAdapter::new(), input, output),
            SlicerKind::M486 => self.run_with(M486Adapter::new(), input, output),
        }
    }

    /// Rewrite `input` with a specific adapter
    ///
    /// Fails with `UnknownObjectReference` if the adapter starts an object
    /// in the output pass that the scan pass never saw.
    pub fn run_with<A, R, W>(&self, mut adapter: A, input: &mut R, output: &mut W) -> Result<Outcome>
    where
        A: SlicerAdapter,
        R: BufRead + Seek,
        W: Write,
    {
        let mut objects = ObjectTable::with_precision(self.config.precision);
        let mut matcher = LineMatcher::new();

        Self::scan(&mut adapter, &mut matcher, &mut objects, input)?;

        let count = objects.definable().count();
        tracing::debug!("Scan found {} objects", count);

        matcher.clear_interests();
        matcher.set_active_hull(None);
        self.write_output(&mut adapter, &mut matcher, &mut objects, input, output)?;

        Ok(Outcome::Processed {
            slicer: adapter.kind(),
            objects: count,
        })
    }

    fn scan<A, R>(
        adapter: &mut A,
        matcher: &mut LineMatcher<A::Event>,
        objects: &mut ObjectTable,
        input: &mut R,
    ) -> Result<()>
    where
        A: SlicerAdapter,
        R: BufRead + Seek,
    {
        input.rewind()?;
        adapter.start_scan(matcher);

        let mut buf = Vec::new();
        while read_line(input, &mut buf)? {
            let line = String::from_utf8_lossy(&buf);
            let Some(event) = matcher.feed_line(&line, objects) else {
                continue;
            };

            for action in adapter.on_scan(event, &line) {
                match action {
                    Action::Define { id, name, reserved } => {
                        objects.define(&id, &name, reserved);
                    }
                    Action::Start { id, name } => {
                        let handle = objects.define(&id, &name, false);
                        matcher.set_active_hull(Some(handle));
                    }
                    Action::Stop => matcher.set_active_hull(None),
                    Action::CommentOut => {}
                }
            }
        }
        Ok(())
    }

    fn write_output<A, R, W>(
        &self,
        adapter: &mut A,
        matcher: &mut LineMatcher<A::Event>,
        objects: &mut ObjectTable,
        input: &mut R,
        output: &mut W,
    ) -> Result<()>
    where
        A: SlicerAdapter,
        R: BufRead + Seek,
        W: Write,
    {
        input.rewind()?;
        adapter.start_output(matcher);

        let mut out = MarkerWriter::new(output);
        out.injected(&adapter.header(objects, self.reducer.as_ref()))?;

        let mut lifecycle = Lifecycle::new();
        let mut buf = Vec::new();
        while read_line(input, &mut buf)? {
            let line = String::from_utf8_lossy(&buf);
            let Some(event) = matcher.feed_line(&line, objects) else {
                out.raw(&buf)?;
                continue;
            };

            let mut before = String::new();
            let mut after = String::new();
            let mut comment_out = false;

            for action in adapter.on_output(event, &line) {
                match action {
                    Action::Start { id, .. } => {
                        let handle = objects.handle(&id)?;
                        let transition = lifecycle.start(handle);
                        if let Some(closed) = transition.closed {
                            before.push_str(&markers::object_end(&objects.object(closed).name));
                        }
                        if let Some(opened) = transition.opened {
                            after.push_str(&markers::object_start(&objects.object(opened).name));
                        }
                    }
                    Action::Stop => {
                        if let Some(closed) = lifecycle.stop() {
                            before.push_str(&markers::object_end(&objects.object(closed).name));
                        }
                    }
                    Action::CommentOut => comment_out = true,
                    Action::Define { .. } => {}
                }
            }

            out.injected(&before)?;
            if comment_out {
                out.raw(b"; ")?;
            }
            out.raw(&buf)?;
            out.injected(&after)?;
        }

        if let Some(open) = lifecycle.finish() {
            out.injected(&markers::object_end(&objects.object(open).name))?;
        }
        Ok(())
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(PreprocessorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(text: &str) -> (Outcome, String) {
        let pre = Preprocessor::new(PreprocessorConfig {
            reducer: ReducerKind::Basic,
            ..Default::default()
        });
        let mut out = Vec::new();
        let outcome = pre
            .run(&mut Cursor::new(text.as_bytes().to_vec()), &mut out)
            .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_missing_final_newline() {
        let text = "; generated by PrusaSlicer\n; printing object A\nG1 X1 Y1 E1";
        let (_, out) = run(text);
        assert!(out.ends_with("G1 X1 Y1 E1\nEXCLUDE_OBJECT_END NAME=A\n"), "{}", out);
    }

    #[test]
    fn test_restart_auto_closes() {
        let text = "; generated by PrusaSlicer\n\
                    ; printing object A\nG1 X1 Y1 E1\n\
                    ; printing object B\nG1 X2 Y2 E1\n\
                    ; stop printing object B\n";
        let (outcome, out) = run(text);
        assert_eq!(
            outcome,
            Outcome::Processed {
                slicer: SlicerKind::Slic3r,
                objects: 2
            }
        );
        let body = out.split_once("; generated by PrusaSlicer\n").unwrap().1;
        assert_eq!(
            body,
            "; printing object A\nEXCLUDE_OBJECT_START NAME=A\nG1 X1 Y1 E1\n\
             EXCLUDE_OBJECT_END NAME=A\n; printing object B\nEXCLUDE_OBJECT_START NAME=B\nG1 X2 Y2 E1\n\
             EXCLUDE_OBJECT_END NAME=B\n; stop printing object B\n"
        );
    }

    #[test]
    fn test_repeated_start_single_bracket() {
        let text = "; generated by PrusaSlicer\n\
                    ; printing object A\n; printing object A\nG1 X1 Y1 E1\n";
        let (_, out) = run(text);
        assert_eq!(out.matches("EXCLUDE_OBJECT_START NAME=A").count(), 1);
        assert_eq!(out.matches("EXCLUDE_OBJECT_END NAME=A").count(), 1);
    }

    #[test]
    fn test_stop_without_object_is_noop() {
        let text = "; generated by PrusaSlicer\n; stop printing object A\n";
        let (outcome, out) = run(text);
        assert_eq!(
            outcome,
            Outcome::Processed {
                slicer: SlicerKind::Slic3r,
                objects: 0
            }
        );
        assert!(!out.contains("EXCLUDE_OBJECT_END"));
        assert!(out.contains("; 0 known objects\n"));
    }
}
