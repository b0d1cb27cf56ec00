//! Material-to-region lookup table.

use atlas_kernel_topo::NULL_BOUNDARY;
use serde::{Deserialize, Serialize};

/// Display name for the [`NULL_BOUNDARY`] material.
const NULL_REGION_NAME: &str = "Null Region";

/// One named, colored region of the atlas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Human-readable region name.
    pub name: String,
    /// Display color as `[r, g, b]`.
    pub color: [u8; 3],
}

impl Region {
    /// Convenience constructor.
    pub fn new(name: &str, color: [u8; 3]) -> Self {
        Self {
            name: name.to_owned(),
            color,
        }
    }
}

/// Lookup table mapping material ids to region names and colors.
///
/// Material id `i` names the region at index `i`. The last entry doubles
/// as the fallback for out-of-range ids and for the color of the
/// [`NULL_BOUNDARY`] material. The table is plain data so that a different
/// atlas can be deserialized and passed in; [`Regions::default`] is the
/// mouse brain atlas the tool ships with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regions {
    regions: Vec<Region>,
}

impl Default for Regions {
    fn default() -> Self {
        Self::brain_atlas()
    }
}

impl Regions {
    /// A table over the given regions, in material-id order.
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// The 18-region mouse brain atlas.
    pub fn brain_atlas() -> Self {
        Self::new(vec![
            Region::new("Cortex", [255, 0, 0]),
            Region::new("Cerebellum", [204, 255, 204]),
            Region::new("Striatum", [255, 0, 255]),
            Region::new("Basal Forebrain", [255, 204, 255]),
            Region::new("Amygdala", [255, 153, 0]),
            Region::new("Hippocampus", [102, 102, 0]),
            Region::new("Hypothalamus", [255, 255, 0]),
            Region::new("Thalamus", [0, 0, 255]),
            Region::new("Olfactory Bulb", [0, 102, 0]),
            Region::new("Midbrain", [0, 0, 0]),
            Region::new("Pons", [255, 204, 204]),
            Region::new("Medulla", [204, 204, 255]),
            Region::new("Ventral Striatum", [102, 0, 102]),
            Region::new("Globus Pallidus", [0, 255, 255]),
            Region::new("Septum", [0, 255, 0]),
            Region::new("Fibers", [204, 204, 204]),
            Region::new("Ventricles", [102, 102, 102]),
            Region::new("Empty Space", [255, 255, 255]),
        ])
    }

    /// Number of regions in the table.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the table has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The region for a material id, if the id is a valid table index.
    pub fn get(&self, material: i32) -> Option<&Region> {
        usize::try_from(material)
            .ok()
            .and_then(|i| self.regions.get(i))
    }

    /// Fallback entry for ids with no region of their own.
    fn default_region(&self) -> Option<&Region> {
        self.regions.last()
    }

    /// Display name for a material id.
    ///
    /// [`NULL_BOUNDARY`] reads as `"Null Region"`; other unknown ids fall
    /// back to the default region's name.
    pub fn name(&self, material: i32) -> &str {
        if material == NULL_BOUNDARY {
            return NULL_REGION_NAME;
        }
        self.get(material)
            .or_else(|| self.default_region())
            .map(|r| r.name.as_str())
            .unwrap_or(NULL_REGION_NAME)
    }

    /// Display color for a material id; unknown ids (including
    /// [`NULL_BOUNDARY`]) take the default region's color.
    pub fn color(&self, material: i32) -> [u8; 3] {
        self.get(material)
            .or_else(|| self.default_region())
            .map(|r| r.color)
            .unwrap_or([255, 255, 255])
    }

    /// Material id for a region name, matched case-insensitively.
    pub fn index_of(&self, name: &str) -> Option<i32> {
        self.regions
            .iter()
            .position(|r| r.name.eq_ignore_ascii_case(name))
            .map(|i| i as i32)
    }

    /// Material id for a region color.
    pub fn index_of_color(&self, color: [u8; 3]) -> Option<i32> {
        self.regions
            .iter()
            .position(|r| r.color == color)
            .map(|i| i as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brain_atlas_layout() {
        let regions = Regions::default();
        assert_eq!(regions.len(), 18);
        assert_eq!(regions.name(0), "Cortex");
        assert_eq!(regions.color(0), [255, 0, 0]);
        assert_eq!(regions.name(17), "Empty Space");
    }

    #[test]
    fn test_null_boundary_reads_as_null_region() {
        let regions = Regions::default();
        assert_eq!(regions.name(NULL_BOUNDARY), "Null Region");
        // Color falls back to the last (default) entry.
        assert_eq!(regions.color(NULL_BOUNDARY), [255, 255, 255]);
    }

    #[test]
    fn test_out_of_range_ids_take_the_default_entry() {
        let regions = Regions::default();
        assert_eq!(regions.name(99), "Empty Space");
        assert_eq!(regions.color(99), [255, 255, 255]);
        assert_eq!(regions.name(-3), "Empty Space");
    }

    #[test]
    fn test_lookup_by_name_is_case_insensitive() {
        let regions = Regions::default();
        assert_eq!(regions.index_of("thalamus"), Some(7));
        assert_eq!(regions.index_of("THALAMUS"), Some(7));
        assert_eq!(regions.index_of("no such region"), None);
    }

    #[test]
    fn test_lookup_by_color() {
        let regions = Regions::default();
        assert_eq!(regions.index_of_color([0, 0, 255]), Some(7));
        assert_eq!(regions.index_of_color([1, 2, 3]), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let regions = Regions::new(vec![
            Region::new("Inside", [10, 20, 30]),
            Region::new("Outside", [200, 200, 200]),
        ]);
        let json = serde_json::to_string(&regions).unwrap();
        let back: Regions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, regions);
        assert_eq!(back.name(0), "Inside");
    }
}
