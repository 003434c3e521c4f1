//! Vehicle identity and registry entries.

use std::{fmt, str::FromStr};

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Numeric vehicle identifier.
///
/// Snapshots store vehicle references as decimal strings (`"2"`), both as
/// record fields and as mileage map keys. Deserialization accepts either a
/// string or a bare integer so hand-edited snapshots still load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(pub u32);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VehicleId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for VehicleId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        trimmed
            .parse::<u32>()
            .map(VehicleId)
            .map_err(|_| format!("invalid vehicle id `{trimmed}`"))
    }
}

impl Serialize for VehicleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

struct VehicleIdVisitor;

impl<'de> Visitor<'de> for VehicleIdVisitor {
    type Value = VehicleId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a vehicle id as string or integer")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u32::try_from(value)
            .map(VehicleId)
            .map_err(|_| E::custom(format!("vehicle id {value} out of range")))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u32::try_from(value)
            .map(VehicleId)
            .map_err(|_| E::custom(format!("vehicle id {value} out of range")))
    }
}

impl<'de> Deserialize<'de> for VehicleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(VehicleIdVisitor)
    }
}

/// A fleet vehicle as listed in the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub plate: String,
}

impl Vehicle {
    pub fn new(id: u32, name: impl Into<String>, plate: impl Into<String>) -> Self {
        Self {
            id: VehicleId(id),
            name: name.into(),
            plate: plate.into(),
        }
    }

    /// Label used by selectors: `Avtomobil 1 (WD0621V)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.plate)
    }
}

/// The four vehicles shipped with the tool.
pub fn default_fleet() -> Vec<Vehicle> {
    vec![
        Vehicle::new(1, "Avtomobil 1", "WD0621V"),
        Vehicle::new(2, "Avtomobil 2", "WD0156V"),
        Vehicle::new(3, "Avtomobil 3", "WD0027V"),
        Vehicle::new(4, "Avtomobil 4", "WD1123V"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn vehicle_id_serializes_as_string() {
        let json = serde_json::to_string(&VehicleId(2)).unwrap();
        assert_eq!(json, "\"2\"");
    }

    #[test]
    fn vehicle_id_accepts_string_or_integer() {
        let from_str: VehicleId = serde_json::from_str("\"3\"").unwrap();
        let from_int: VehicleId = serde_json::from_str("3").unwrap();
        assert_eq!(from_str, VehicleId(3));
        assert_eq!(from_int, VehicleId(3));
        assert!(serde_json::from_str::<VehicleId>("\"abc\"").is_err());
    }

    #[test]
    fn vehicle_id_works_as_map_key() {
        let mut map = BTreeMap::new();
        map.insert(VehicleId(2), 39_500u64);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2":39500}"#);
        let back: BTreeMap<VehicleId, u64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&VehicleId(2)), Some(&39_500));
    }

    #[test]
    fn default_fleet_has_four_vehicles() {
        let fleet = default_fleet();
        assert_eq!(fleet.len(), 4);
        assert_eq!(fleet[0].label(), "Avtomobil 1 (WD0621V)");
        assert_eq!(fleet[3].plate, "WD1123V");
    }
}
