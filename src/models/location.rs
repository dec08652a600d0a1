use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Rooms of the ship. Movement is only allowed between adjacent rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Cafeteria,
    Weapons,
    Navigation,
    O2,
    Shields,
    Storage,
    Electrical,
    Engines,
    Security,
    Reactor,
    MedBay,
}

impl Location {
    /// Every player starts here when the session leaves the lobby.
    pub const SPAWN: Location = Location::Cafeteria;

    pub fn neighbors(self) -> &'static [Location] {
        use Location::*;
        match self {
            Cafeteria => &[Weapons, Storage, MedBay],
            Weapons => &[Cafeteria, Navigation, O2],
            Navigation => &[Weapons, Shields],
            O2 => &[Weapons, Shields],
            Shields => &[Navigation, O2, Storage],
            Storage => &[Cafeteria, Shields, Electrical, Engines],
            Electrical => &[Storage, Engines],
            Engines => &[Storage, Electrical, Security, Reactor],
            Security => &[Engines, Reactor, MedBay],
            Reactor => &[Engines, Security],
            MedBay => &[Cafeteria, Security],
        }
    }

    pub fn is_adjacent(self, other: Location) -> bool {
        self.neighbors().contains(&other)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Cafeteria => "Cafeteria",
            Location::Weapons => "Weapons",
            Location::Navigation => "Navigation",
            Location::O2 => "O2",
            Location::Shields => "Shields",
            Location::Storage => "Storage",
            Location::Electrical => "Electrical",
            Location::Engines => "Engines",
            Location::Security => "Security",
            Location::Reactor => "Reactor",
            Location::MedBay => "MedBay",
        };
        write!(f, "{}", name)
    }
}

/// Task id -> room it must be performed in. Completion is bookkeeping only
/// and never affects the win condition.
pub static TASKS: Lazy<HashMap<&'static str, Location>> = Lazy::new(|| {
    use Location::*;
    HashMap::from([
        ("swipe_card", Cafeteria),
        ("empty_garbage", Cafeteria),
        ("clear_asteroids", Weapons),
        ("download_weapon_logs", Weapons),
        ("chart_course", Navigation),
        ("stabilize_steering", Navigation),
        ("clean_o2_filter", O2),
        ("prime_shields", Shields),
        ("sort_crates", Storage),
        ("fix_wiring", Electrical),
        ("calibrate_distributor", Electrical),
        ("fuel_engines", Engines),
        ("align_engine_output", Engines),
        ("review_camera_footage", Security),
        ("unlock_manifolds", Reactor),
        ("start_reactor", Reactor),
        ("submit_scan", MedBay),
        ("inspect_sample", MedBay),
    ])
});

/// Looks up where a task must be performed. Unknown ids return None.
pub fn task_location(task_id: &str) -> Option<Location> {
    TASKS.get(task_id).copied()
}
