//! Raise3D ideaMaker
//!
//! Each object block starts with a name line followed by its numeric id:
//!
//! ```text
//! ;PRINTING: test_bed_part0.3mf
//! ;PRINTING_ID: 0
//! ```
//!
//! Id `-1` covers non-object meshes such as supports and is ignored.
//! `;REMAINING_TIME: 0` marks the end of the print.

use super::{comment_value, Action, SlicerAdapter, SlicerKind};
use crate::matcher::LineMatcher;

const NAME_PREFIX: &str = ";PRINTING:";
const ID_PREFIX: &str = ";PRINTING_ID:";
const REMAINING_PREFIX: &str = ";REMAINING_TIME:";
const NON_OBJECT_ID: &str = "-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeaMakerEvent {
    Name,
    Id,
    Remaining,
}

#[derive(Debug)]
pub struct IdeaMakerAdapter {
    pending_name: String,
}

impl Default for IdeaMakerAdapter {
    fn default() -> Self {
        Self {
            pending_name: "unknown".to_string(),
        }
    }
}

impl IdeaMakerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn object_id(line: &str) -> Option<&str> {
        comment_value(line).filter(|id| !id.is_empty() && *id != NON_OBJECT_ID)
    }

    fn is_print_end(line: &str) -> bool {
        comment_value(line)
            .and_then(|v| v.parse::<f64>().ok())
            .is_some_and(|v| v == 0.0)
    }
}

impl SlicerAdapter for IdeaMakerAdapter {
    type Event = IdeaMakerEvent;

    fn kind(&self) -> SlicerKind {
        SlicerKind::IdeaMaker
    }

    fn start_scan(&mut self, matcher: &mut LineMatcher<IdeaMakerEvent>) {
        self.pending_name = "unknown".to_string();
        matcher.register_interest(NAME_PREFIX, IdeaMakerEvent::Name);
        matcher.register_interest(ID_PREFIX, IdeaMakerEvent::Id);
        matcher.register_interest(REMAINING_PREFIX, IdeaMakerEvent::Remaining);
    }

    fn start_output(&mut self, matcher: &mut LineMatcher<IdeaMakerEvent>) {
        matcher.register_interest(ID_PREFIX, IdeaMakerEvent::Id);
        matcher.register_interest(REMAINING_PREFIX, IdeaMakerEvent::Remaining);
    }

    fn on_scan(&mut self, event: IdeaMakerEvent, line: &str) -> Vec<Action> {
        match event {
            IdeaMakerEvent::Name => {
                if let Some(name) = comment_value(line) {
                    self.pending_name = name.to_string();
                }
                Vec::new()
            }
            IdeaMakerEvent::Id => match Self::object_id(line) {
                Some(id) => vec![Action::Start {
                    id: id.to_string(),
                    name: self.pending_name.clone(),
                }],
                None => Vec::new(),
            },
            IdeaMakerEvent::Remaining if Self::is_print_end(line) => vec![Action::Stop],
            IdeaMakerEvent::Remaining => Vec::new(),
        }
    }

    fn on_output(&mut self, event: IdeaMakerEvent, line: &str) -> Vec<Action> {
        match event {
            IdeaMakerEvent::Id => Self::object_id(line)
                .map(|id| vec![Action::start(id)])
                .unwrap_or_default(),
            IdeaMakerEvent::Remaining if Self::is_print_end(line) => vec![Action::Stop],
            _ => Vec::new(),
        }
    }
}
