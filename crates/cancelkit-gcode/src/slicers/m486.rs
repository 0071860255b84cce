//! Firmware `M486` object commands
//!
//! `M486 T<n>` declares `n` objects numbered from zero and `M486 S<id>`
//! switches to one of them, with `S-1` meaning no object. The commands are
//! kept in the output behind a comment prefix so only the
//! `EXCLUDE_OBJECT_*` markers reach the firmware. Spaces between words are
//! optional, so `M486S0` is the same command as `M486 S0`.

use super::{Action, SlicerAdapter, SlicerKind};
use crate::matcher::{strip_prefix_ignore_case, GcodeWords, LineMatcher};

const PREFIX: &str = "M486";
const NO_OBJECT: i64 = -1;

/// Largest object count accepted from `M486 T<n>`
pub const MAX_OBJECT_COUNT: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct M486Event;

#[derive(Debug, Default)]
pub struct M486Adapter;

/// Parse an object id or count, normalizing forms like `01` or `+1`
fn integer(words: &GcodeWords<'_>, key: &str) -> Option<i64> {
    let raw = words.get(key)?;
    match raw.trim().parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::trace!("Ignoring malformed M486 {} value '{}'", key, raw);
            None
        }
    }
}

impl M486Adapter {
    pub fn new() -> Self {
        Self
    }

    fn actions(line: &str, scan: bool) -> Vec<Action> {
        let Some(rest) = strip_prefix_ignore_case(line, PREFIX) else {
            return Vec::new();
        };
        if rest.starts_with(|c: char| c.is_ascii_digit()) {
            return Vec::new();
        }

        // Re-split so a parameter glued to the command word becomes its own token
        let normalized = format!("{} {}", PREFIX, rest);
        let mut actions = Vec::new();
        if let Some(words) = GcodeWords::parse(&normalized) {
            Self::object_actions(&words, scan, &mut actions);
        }

        if !scan {
            actions.push(Action::CommentOut);
        }
        actions
    }

    fn object_actions(words: &GcodeWords<'_>, scan: bool, actions: &mut Vec<Action>) {
        if let Some(count) = integer(words, "T") {
            if !scan {
                return;
            }
            if count > MAX_OBJECT_COUNT {
                tracing::warn!(
                    "Ignoring M486 T{}: more than {} objects",
                    count,
                    MAX_OBJECT_COUNT
                );
            } else {
                actions.push(Action::Define {
                    id: NO_OBJECT.to_string(),
                    name: NO_OBJECT.to_string(),
                    reserved: true,
                });
                actions.extend((0..count.max(0)).map(|i| Action::Define {
                    id: i.to_string(),
                    name: i.to_string(),
                    reserved: false,
                }));
            }
        } else if let Some(id) = integer(words, "S") {
            if id == NO_OBJECT {
                actions.push(Action::Stop);
            } else {
                actions.push(Action::start(id.to_string()));
            }
        }
    }
}

impl SlicerAdapter for M486Adapter {
    type Event = M486Event;

    fn kind(&self) -> SlicerKind {
        SlicerKind::M486
    }

    fn start_scan(&mut self, matcher: &mut LineMatcher<M486Event>) {
        matcher.register_interest(PREFIX, M486Event);
    }

    fn start_output(&mut self, matcher: &mut LineMatcher<M486Event>) {
        matcher.register_interest(PREFIX, M486Event);
    }

    fn on_scan(&mut self, _event: M486Event, line: &str) -> Vec<Action> {
        Self::actions(line, true)
    }

    fn on_output(&mut self, _event: M486Event, line: &str) -> Vec<Action> {
        Self::actions(line, false)
    }
}
