//! Ingestion of layouts produced by the external layout generator.
//!
//! The generator answers with a JSON array of buildings. Its `y` coordinates
//! are unreliable, so every building is stood on the ground here.

use crate::buildings::Building;
use crate::error::LayoutError;

/// Decode a generated layout, grounding each building at `y = height / 2`.
pub fn buildings_from_generated_json(text: &str) -> Result<Vec<Building>, LayoutError> {
    let mut buildings: Vec<Building> = serde_json::from_str(text)?;
    for building in &mut buildings {
        if building.size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(LayoutError::GeneratedLayout(format!(
                "building {} has a non-positive size {:?}",
                building.id, building.size
            )));
        }
        building.position[1] = building.size[1] / 2.0;
    }
    Ok(buildings)
}
