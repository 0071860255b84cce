//! Cancel-object marker formatting

use cancelkit_core::{Footprint, HullReducer, ObjectTable, Point};

/// Version stamped into the header comment
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Leading text of the header comment, also an already-processed marker
pub const HEADER_MARKER: &str = "; Pre-Processed for Cancel-Object support";

/// Header comment line, newline-terminated
pub fn header_marker() -> String {
    format!("{} by cancelkit v{}\n", HEADER_MARKER, VERSION)
}

/// Decimal places of CENTER and POLYGON coordinates
const DECIMALS: i32 = 3;

fn polygon_json(polygon: &[Point]) -> String {
    let coords: Vec<[f64; 2]> = polygon
        .iter()
        .map(|p| p.rounded(DECIMALS).into())
        .collect();
    // Serializing plain floats cannot fail
    serde_json::to_string(&coords).unwrap_or_else(|_| "[]".to_string())
}

/// `EXCLUDE_OBJECT_DEFINE` line for an object
///
/// CENTER and POLYGON are omitted together when there is no footprint.
pub fn define_object(name: &str, footprint: Option<&Footprint>) -> String {
    match footprint {
        Some(fp) => {
            let center = fp.center.rounded(DECIMALS);
            format!(
                "EXCLUDE_OBJECT_DEFINE NAME={} CENTER={:.3},{:.3} POLYGON={}\n",
                name,
                center.x,
                center.y,
                polygon_json(&fp.polygon)
            )
        }
        None => format!("EXCLUDE_OBJECT_DEFINE NAME={}\n", name),
    }
}

pub fn object_start(name: &str) -> String {
    format!("EXCLUDE_OBJECT_START NAME={}\n", name)
}

pub fn object_end(name: &str) -> String {
    format!("EXCLUDE_OBJECT_END NAME={}\n", name)
}

/// Full definition block written at the top of the output
///
/// Reserved objects are neither counted nor defined.
pub fn header_block(objects: &ObjectTable, reducer: &dyn HullReducer) -> String {
    let mut out = String::from("\n\n");
    out.push_str(&header_marker());
    out.push_str(&format!("; {} known objects\n", objects.definable().count()));

    for object in objects.definable() {
        let footprint = reducer.reduce(&object.hull);
        if footprint.is_none() {
            tracing::debug!("Object {} has no extrusions, defining without geometry", object.name);
        }
        out.push_str(&define_object(&object.name, footprint.as_ref()));
    }
    out
}
