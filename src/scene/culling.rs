//! Culling mode table
//!
//! Each benchmark mode isolates exactly one culling technique except the two
//! extremes, which bound the measurement (zero techniques vs. all three).

use serde::{Deserialize, Serialize};

/// Culling configuration selected for a frame.
///
/// Ordinal order is the benchmark iteration order and is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullingMode {
    None,
    Orientation,
    Frustum,
    Distance,
    All,
}

impl CullingMode {
    /// Benchmark iteration order
    pub const ORDER: [CullingMode; 5] = [
        CullingMode::None,
        CullingMode::Orientation,
        CullingMode::Frustum,
        CullingMode::Distance,
        CullingMode::All,
    ];

    /// Total mapping to (orientation, frustum, distance) enable flags
    pub fn flags(self) -> (bool, bool, bool) {
        match self {
            CullingMode::None => (false, false, false),
            CullingMode::Orientation => (true, false, false),
            CullingMode::Frustum => (false, true, false),
            CullingMode::Distance => (false, false, true),
            CullingMode::All => (true, true, true),
        }
    }

    /// Report label
    pub fn name(self) -> &'static str {
        match self {
            CullingMode::None => "None",
            CullingMode::Orientation => "Orientation",
            CullingMode::Frustum => "Frustum",
            CullingMode::Distance => "Distance",
            CullingMode::All => "All",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_fixed() {
        assert_eq!(CullingMode::ORDER[0], CullingMode::None);
        assert_eq!(CullingMode::ORDER[4], CullingMode::All);
        assert_eq!(CullingMode::ORDER.len(), 5);
    }

    #[test]
    fn test_single_technique_modes_isolate_one_flag() {
        assert_eq!(CullingMode::Orientation.flags(), (true, false, false));
        assert_eq!(CullingMode::Frustum.flags(), (false, true, false));
        assert_eq!(CullingMode::Distance.flags(), (false, false, true));
    }

    #[test]
    fn test_extremes() {
        assert_eq!(CullingMode::None.flags(), (false, false, false));
        assert_eq!(CullingMode::All.flags(), (true, true, true));
    }

    #[test]
    fn test_names() {
        let names: Vec<&str> = CullingMode::ORDER.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["None", "Orientation", "Frustum", "Distance", "All"]);
    }
}
