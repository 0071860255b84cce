//! Streaming line classifier
//!
//! A [`LineMatcher`] does two independent things for every line it is fed:
//! it records extrusion points into the active object's hull, and it reports
//! which registered prefix (if any) the line starts with.

use std::collections::HashMap;

use cancelkit_core::{ObjectHandle, ObjectTable, Point};

/// A parsed G-code command with its parameters
///
/// Parameter keys are upper-cased single letters for `X10` style words and
/// verbatim keys for `KEY=value` words.
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeWords<'a> {
    pub command: &'a str,
    pub params: HashMap<String, &'a str>,
}

impl<'a> GcodeWords<'a> {
    /// Parse a line, `None` when it holds no command
    ///
    /// Everything from the first `;` on is a comment. Later occurrences of a
    /// key overwrite earlier ones.
    pub fn parse(line: &'a str) -> Option<Self> {
        let code = line.split(';').next().unwrap_or_default();
        let mut tokens = code.split_whitespace();
        let command = tokens.next()?;

        let mut params = HashMap::new();
        for token in tokens {
            if let Some((key, value)) = token.split_once('=') {
                params.insert(key.to_string(), value);
            } else {
                let mut chars = token.chars();
                if let Some(first) = chars.next() {
                    params.insert(first.to_uppercase().collect(), chars.as_str());
                }
            }
        }

        Some(Self { command, params })
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.params.get(key).copied()
    }

    /// Parameter parsed as a number, `None` if absent or malformed
    pub fn number(&self, key: &str) -> Option<f64> {
        let raw = self.get(key)?;
        match raw.parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::trace!("Ignoring malformed {} parameter '{}'", key, raw);
                None
            }
        }
    }

    /// XY position of an extruding move
    ///
    /// A move extrudes when `E` is a number greater than zero. Absent or
    /// malformed `E` counts as `-1`.
    pub fn extrusion_point(&self) -> Option<Point> {
        let e = self.number("E").unwrap_or(-1.0);
        if e <= 0.0 {
            return None;
        }

        let p = Point::new(self.number("X")?, self.number("Y")?);
        if p.is_finite() {
            Some(p)
        } else {
            tracing::trace!("Ignoring non-finite extrusion point {}", p);
            None
        }
    }
}

/// ASCII case-insensitive `starts_with`
fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len()
        && line.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Strip a prefix matched by [`LineMatcher`] and trim the remainder
pub fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let line = line.trim();
    if starts_with_ignore_case(line, prefix) {
        line.get(prefix.len()..).map(str::trim)
    } else {
        None
    }
}

/// Prefix-keyed line classifier with hull tracking
#[derive(Debug, Clone)]
pub struct LineMatcher<I> {
    interests: Vec<(String, I)>,
    active_hull: Option<ObjectHandle>,
}

impl<I: Copy> LineMatcher<I> {
    pub fn new() -> Self {
        Self {
            interests: Vec::new(),
            active_hull: None,
        }
    }

    /// Associate a literal line prefix with an interest id
    ///
    /// When prefixes overlap the one registered first wins.
    pub fn register_interest(&mut self, prefix: impl Into<String>, id: I) {
        self.interests.push((prefix.into(), id));
    }

    /// Drop all registered prefixes
    pub fn clear_interests(&mut self) {
        self.interests.clear();
    }

    pub fn interest_count(&self) -> usize {
        self.interests.len()
    }

    pub fn active_hull(&self) -> Option<ObjectHandle> {
        self.active_hull
    }

    /// Route extrusion points to an object, or stop recording with `None`
    pub fn set_active_hull(&mut self, handle: Option<ObjectHandle>) {
        self.active_hull = handle;
    }

    /// Interest id of the first registered prefix the trimmed line starts with
    pub fn classify(&self, line: &str) -> Option<I> {
        let line = line.trim();
        self.interests
            .iter()
            .find(|(prefix, _)| starts_with_ignore_case(line, prefix))
            .map(|(_, id)| *id)
    }

    /// Record geometry from the line, then classify it
    pub fn feed_line(&self, line: &str, objects: &mut ObjectTable) -> Option<I> {
        if let Some(handle) = self.active_hull {
            if let Some(point) = GcodeWords::parse(line).and_then(|w| w.extrusion_point()) {
                objects.hull_mut(handle).add_point(point);
            }
        }
        self.classify(line)
    }
}

impl<I: Copy> Default for LineMatcher<I> {
    fn default() -> Self {
        Self::new()
    }
}
