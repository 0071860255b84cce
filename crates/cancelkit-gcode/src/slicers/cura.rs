//! Ultimaker Cura
//!
//! Cura names the mesh being printed with `;MESH:<name>` and never marks the
//! end of an object. The last `;TIME_ELAPSED:` line printed while a mesh is
//! open marks the end of the final object.

use super::{comment_value, Action, SlicerAdapter, SlicerKind};
use crate::matcher::LineMatcher;

const MESH_PREFIX: &str = ";MESH:";
const ELAPSED_PREFIX: &str = ";TIME_ELAPSED:";
const NON_MESH: &str = "NONMESH";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuraEvent {
    Mesh,
    Elapsed,
}

#[derive(Debug, Default)]
pub struct CuraAdapter {
    in_mesh: bool,
    last_elapsed: Option<String>,
}

impl CuraAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(matcher: &mut LineMatcher<CuraEvent>) {
        matcher.register_interest(MESH_PREFIX, CuraEvent::Mesh);
        matcher.register_interest(ELAPSED_PREFIX, CuraEvent::Elapsed);
    }

    fn mesh_name(line: &str) -> Option<&str> {
        comment_value(line).filter(|name| !name.is_empty() && *name != NON_MESH)
    }
}

impl SlicerAdapter for CuraAdapter {
    type Event = CuraEvent;

    fn kind(&self) -> SlicerKind {
        SlicerKind::Cura
    }

    fn start_scan(&mut self, matcher: &mut LineMatcher<CuraEvent>) {
        self.in_mesh = false;
        self.last_elapsed = None;
        Self::register(matcher);
    }

    fn start_output(&mut self, matcher: &mut LineMatcher<CuraEvent>) {
        Self::register(matcher);
    }

    fn on_scan(&mut self, event: CuraEvent, line: &str) -> Vec<Action> {
        match event {
            CuraEvent::Mesh => match Self::mesh_name(line) {
                Some(name) => {
                    self.in_mesh = true;
                    vec![Action::start(name)]
                }
                None => Vec::new(),
            },
            CuraEvent::Elapsed => {
                if self.in_mesh {
                    self.last_elapsed = Some(line.trim().to_string());
                }
                Vec::new()
            }
        }
    }

    fn on_output(&mut self, event: CuraEvent, line: &str) -> Vec<Action> {
        match event {
            CuraEvent::Mesh => Self::mesh_name(line)
                .map(|name| vec![Action::start(name)])
                .unwrap_or_default(),
            CuraEvent::Elapsed => {
                if self.last_elapsed.as_deref() == Some(line.trim()) {
                    vec![Action::Stop]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonmesh_is_ignored() {
        let mut adapter = CuraAdapter::new();
        assert!(adapter.on_scan(CuraEvent::Mesh, ";MESH:NONMESH").is_empty());
        assert!(adapter.on_output(CuraEvent::Mesh, ";MESH:NONMESH").is_empty());
    }

    #[test]
    fn test_last_elapsed_stops() {
        let mut adapter = CuraAdapter::new();
        let mut matcher = LineMatcher::new();
        adapter.start_scan(&mut matcher);

        // Elapsed lines before any mesh do not count
        adapter.on_scan(CuraEvent::Elapsed, ";TIME_ELAPSED:1.0");
        adapter.on_scan(CuraEvent::Mesh, ";MESH:cube_1.stl");
        adapter.on_scan(CuraEvent::Elapsed, ";TIME_ELAPSED:10.5");
        adapter.on_scan(CuraEvent::Elapsed, ";TIME_ELAPSED:20.25\n");

        assert!(adapter.on_output(CuraEvent::Elapsed, ";TIME_ELAPSED:10.5").is_empty());
        assert_eq!(
            adapter.on_output(CuraEvent::Elapsed, ";TIME_ELAPSED:20.25\r\n"),
            vec![Action::Stop]
        );
    }

    #[test]
    fn test_mesh_start() {
        let mut adapter = CuraAdapter::new();
        assert_eq!(
            adapter.on_output(CuraEvent::Mesh, ";MESH:cube_1.stl(1)"),
            vec![Action::start("cube_1.stl(1)")]
        );
    }
}
