use fleet_domain::{default_fleet, Vehicle, VehicleId};

const UNKNOWN_LABEL: &str = "Unknown";

/// Read-only list of vehicles shared by both ledgers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetRegistry {
    vehicles: Vec<Vehicle>,
}

impl Default for FleetRegistry {
    fn default() -> Self {
        Self::new(default_fleet())
    }
}

impl FleetRegistry {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.get(id).is_some()
    }

    /// Display name, or `Unknown` for ids missing from the registry.
    pub fn name_of(&self, id: VehicleId) -> &str {
        self.get(id)
            .map(|vehicle| vehicle.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn plate_of(&self, id: VehicleId) -> &str {
        self.get(id)
            .map(|vehicle| vehicle.plate.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
