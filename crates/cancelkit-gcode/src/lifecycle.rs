//! Object lifecycle state machine
//!
//! Tracks which object is open in the output pass. Every object that gets a
//! START also gets exactly one END: starting a different object closes the
//! open one first, and the stream end closes whatever is still open.

use cancelkit_core::ObjectHandle;

/// Current lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    NoObject,
    InObject(ObjectHandle),
}

/// Markers a transition requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// Object whose END must be emitted
    pub closed: Option<ObjectHandle>,
    /// Object whose START must be emitted
    pub opened: Option<ObjectHandle>,
}

#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    state: LifecycleState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn current(&self) -> Option<ObjectHandle> {
        match self.state {
            LifecycleState::NoObject => None,
            LifecycleState::InObject(h) => Some(h),
        }
    }

    /// Enter `handle`, closing a different open object first
    ///
    /// Starting the object that is already open is a no-op.
    pub fn start(&mut self, handle: ObjectHandle) -> Transition {
        match self.state {
            LifecycleState::InObject(open) if open == handle => Transition::default(),
            LifecycleState::InObject(open) => {
                self.state = LifecycleState::InObject(handle);
                Transition {
                    closed: Some(open),
                    opened: Some(handle),
                }
            }
            LifecycleState::NoObject => {
                self.state = LifecycleState::InObject(handle);
                Transition {
                    closed: None,
                    opened: Some(handle),
                }
            }
        }
    }

    /// Leave the open object, returning it if there was one
    pub fn stop(&mut self) -> Option<ObjectHandle> {
        let open = self.current();
        self.state = LifecycleState::NoObject;
        open
    }

    /// Close whatever is open at end of stream
    pub fn finish(&mut self) -> Option<ObjectHandle> {
        self.stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cancelkit_core::ObjectTable;

    fn handles() -> (ObjectHandle, ObjectHandle) {
        let mut table = ObjectTable::new();
        (table.define("a", "a", false), table.define("b", "b", false))
    }

    #[test]
    fn test_start_from_no_object() {
        let (a, _) = handles();
        let mut lc = Lifecycle::new();
        let t = lc.start(a);
        assert_eq!(t.closed, None);
        assert_eq!(t.opened, Some(a));
        assert_eq!(lc.state(), LifecycleState::InObject(a));
    }

    #[test]
    fn test_restart_closes_previous() {
        let (a, b) = handles();
        let mut lc = Lifecycle::new();
        lc.start(a);
        let t = lc.start(b);
        assert_eq!(t.closed, Some(a));
        assert_eq!(t.opened, Some(b));
    }

    #[test]
    fn test_same_start_is_noop() {
        let (a, _) = handles();
        let mut lc = Lifecycle::new();
        lc.start(a);
        assert_eq!(lc.start(a), Transition::default());
        assert_eq!(lc.current(), Some(a));
    }

    #[test]
    fn test_stop() {
        let (a, _) = handles();
        let mut lc = Lifecycle::new();
        assert_eq!(lc.stop(), None);
        lc.start(a);
        assert_eq!(lc.stop(), Some(a));
        assert_eq!(lc.state(), LifecycleState::NoObject);
        assert_eq!(lc.finish(), None);
    }
}
