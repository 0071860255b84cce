//! Slic3r, PrusaSlicer and SuperSlicer
//!
//! Objects are bracketed by `; printing object <id>` and
//! `; stop printing object <id>` comments.

use super::{Action, SlicerAdapter, SlicerKind};
use crate::matcher::{strip_prefix_ignore_case, LineMatcher};

const START_PREFIX: &str = "; printing object";
const STOP_PREFIX: &str = "; stop printing object";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slic3rEvent {
    Start,
    Stop,
}

#[derive(Debug, Default)]
pub struct Slic3rAdapter;

impl Slic3rAdapter {
    pub fn new() -> Self {
        Self
    }

    fn register(matcher: &mut LineMatcher<Slic3rEvent>) {
        matcher.register_interest(START_PREFIX, Slic3rEvent::Start);
        matcher.register_interest(STOP_PREFIX, Slic3rEvent::Stop);
    }

    fn actions(event: Slic3rEvent, line: &str) -> Vec<Action> {
        match event {
            Slic3rEvent::Start => match strip_prefix_ignore_case(line, START_PREFIX) {
                Some(id) if !id.is_empty() => vec![Action::start(id)],
                _ => Vec::new(),
            },
            Slic3rEvent::Stop => vec![Action::Stop],
        }
    }
}

impl SlicerAdapter for Slic3rAdapter {
    type Event = Slic3rEvent;

    fn kind(&self) -> SlicerKind {
        SlicerKind::Slic3r
    }

    fn start_scan(&mut self, matcher: &mut LineMatcher<Slic3rEvent>) {
        Self::register(matcher);
    }

    fn start_output(&mut self, matcher: &mut LineMatcher<Slic3rEvent>) {
        Self::register(matcher);
    }

    fn on_scan(&mut self, event: Slic3rEvent, line: &str) -> Vec<Action> {
        Self::actions(event, line)
    }

    fn on_output(&mut self, event: Slic3rEvent, line: &str) -> Vec<Action> {
        Self::actions(event, line)
    }
}
