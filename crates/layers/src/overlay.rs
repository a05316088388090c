use foundation::GeoPosition;

/// A known fishing ground shown by the auxiliary overlay.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FishingSpot {
    pub species: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl FishingSpot {
    pub fn position(&self) -> GeoPosition {
        GeoPosition::new(self.latitude, self.longitude)
    }

    pub fn label(&self) -> String {
        format!("Ikan {}", self.species)
    }
}

/// Static overlay dataset around the Thousand Islands / Jakarta Bay fleet area.
pub const FISHING_SPOTS: [FishingSpot; 5] = [
    FishingSpot {
        species: "Tembang",
        latitude: -6.0705,
        longitude: 106.7910,
    },
    FishingSpot {
        species: "Cakalang",
        latitude: -6.0260,
        longitude: 106.7550,
    },
    FishingSpot {
        species: "Kakap Merah",
        latitude: -6.0180,
        longitude: 106.8400,
    },
    FishingSpot {
        species: "Tongkol",
        latitude: -6.0100,
        longitude: 106.7800,
    },
    FishingSpot {
        species: "Kerapu",
        latitude: -6.0300,
        longitude: 106.8800,
    },
];

/// Visibility flag for the overlay.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OverlayToggle {
    visible: bool,
}

impl Default for OverlayToggle {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl OverlayToggle {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Flips visibility and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::{FISHING_SPOTS, OverlayToggle};

    #[test]
    fn toggle_starts_on_and_flips() {
        let mut t = OverlayToggle::default();
        assert!(t.visible());
        assert!(!t.toggle());
        assert!(!t.visible());
        assert!(t.toggle());
        assert!(t.visible());
    }

    #[test]
    fn spots_are_labelled_by_species() {
        assert_eq!(FISHING_SPOTS[2].label(), "Ikan Kakap Merah");
        assert!(FISHING_SPOTS.iter().all(|s| s.latitude < 0.0 && s.longitude > 106.0));
    }
}
