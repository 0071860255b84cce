//! Known objects of one file
//!
//! The scan pass discovers objects in the order the slicer first mentions
//! them and the output pass only looks them up. Objects are never removed
//! during a run, so an [`ObjectHandle`] stays valid for the table's lifetime.

use std::collections::HashMap;

use regex::Regex;

use crate::error::GcodeError;
use crate::geometry::{Hull, DEFAULT_PRECISION};

/// Turn a slicer-native identifier into a marker-safe name
///
/// Runs of non-word characters become a single `_`, and leading or
/// trailing underscores are trimmed.
pub fn sanitize_name(id: &str) -> String {
    static NON_WORD: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let re = NON_WORD.get_or_init(|| Regex::new(r"\W+").expect("invalid regex pattern"));
    re.replace_all(id, "_").trim_matches('_').to_string()
}

/// Index of an object inside its [`ObjectTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(usize);

impl ObjectHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A printed object discovered in the scan pass
#[derive(Debug, Clone)]
pub struct KnownObject {
    /// Identifier as the slicer writes it
    pub id: String,
    /// Sanitized name used in markers
    pub name: String,
    /// Extrusion footprint
    pub hull: Hull,
    /// Placeholder id that never gets a definition (M486 `-1`)
    pub reserved: bool,
}

/// Insertion-ordered mapping from slicer id to [`KnownObject`]
#[derive(Debug, Clone)]
pub struct ObjectTable {
    objects: Vec<KnownObject>,
    index: HashMap<String, usize>,
    precision: f64,
}

impl ObjectTable {
    /// Create an empty table whose hulls use [`DEFAULT_PRECISION`]
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_PRECISION)
    }

    /// Create an empty table for hulls with the given grid size
    ///
    /// The precision is validated when creating hulls; an invalid value
    /// leaves new hulls at the default.
    pub fn with_precision(precision: f64) -> Self {
        Self {
            objects: Vec::new(),
            index: HashMap::new(),
            precision,
        }
    }

    /// Get or create the object for `id`
    ///
    /// An existing object keeps its original name and hull; `reserved` is
    /// only applied on creation.
    pub fn define(&mut self, id: &str, name: &str, reserved: bool) -> ObjectHandle {
        if let Some(&idx) = self.index.get(id) {
            return ObjectHandle(idx);
        }

        let hull = match Hull::with_precision(self.precision) {
            Ok(hull) => hull,
            Err(e) => {
                tracing::warn!("{}, using default precision", e);
                Hull::new()
            }
        };

        let idx = self.objects.len();
        let object = KnownObject {
            id: id.to_string(),
            name: sanitize_name(name),
            hull,
            reserved,
        };
        tracing::debug!("Discovered object '{}' as {}", object.id, object.name);
        self.objects.push(object);
        self.index.insert(id.to_string(), idx);
        ObjectHandle(idx)
    }

    /// Look up the handle of an existing object
    pub fn handle(&self, id: &str) -> Result<ObjectHandle, GcodeError> {
        self.index
            .get(id)
            .map(|&idx| ObjectHandle(idx))
            .ok_or_else(|| GcodeError::UnknownObjectReference { id: id.to_string() })
    }

    /// Look up an existing object by id
    pub fn get(&self, id: &str) -> Result<&KnownObject, GcodeError> {
        let handle = self.handle(id)?;
        Ok(&self.objects[handle.0])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn object(&self, handle: ObjectHandle) -> &KnownObject {
        &self.objects[handle.0]
    }

    pub fn hull_mut(&mut self, handle: ObjectHandle) -> &mut Hull {
        &mut self.objects[handle.0].hull
    }

    /// Objects in first-discovery order
    pub fn iter(&self) -> impl Iterator<Item = &KnownObject> {
        self.objects.iter()
    }

    /// Objects that get a definition in the header
    pub fn definable(&self) -> impl Iterator<Item = &KnownObject> {
        self.objects.iter().filter(|o| !o.reserved)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for ObjectTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("cube_1.stl"), "cube_1_stl");
        assert_eq!(sanitize_name("  my part (2)  "), "my_part_2");
        assert_eq!(sanitize_name("test_bed_part0.3mf"), "test_bed_part0_3mf");
        assert_eq!(sanitize_name("___"), "");
    }

    #[test]
    fn test_define_is_get_or_create() {
        let mut table = ObjectTable::new();
        let a = table.define("a.stl", "a.stl", false);
        let b = table.define("b", "b", false);
        let again = table.define("a.stl", "ignored", true);

        assert_eq!(a, again);
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
        assert_eq!(table.object(a).name, "a_stl");
        assert!(!table.object(a).reserved);
    }

    #[test]
    fn test_insertion_order() {
        let mut table = ObjectTable::new();
        for id in ["z", "a", "m"] {
            table.define(id, id, false);
        }
        let ids: Vec<&str> = table.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_unknown_lookup() {
        let table = ObjectTable::new();
        assert_eq!(
            table.get("ghost").unwrap_err(),
            GcodeError::UnknownObjectReference {
                id: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_reserved_not_definable() {
        let mut table = ObjectTable::new();
        table.define("-1", "-1", true);
        table.define("0", "0", false);
        let names: Vec<&str> = table.definable().map(|o| o.id.as_str()).collect();
        assert_eq!(names, vec!["0"]);
    }

    #[test]
    fn test_hull_precision_and_fallback() {
        let mut table = ObjectTable::with_precision(0.5);
        let h = table.define("a", "a", false);
        table.hull_mut(h).add_point(Point::new(1.2, 0.8));
        assert_eq!(table.object(h).hull.points(), vec![Point::new(1.0, 1.0)]);

        let mut table = ObjectTable::with_precision(-1.0);
        let h = table.define("a", "a", false);
        assert_eq!(table.object(h).hull.precision(), DEFAULT_PRECISION);
    }
}
