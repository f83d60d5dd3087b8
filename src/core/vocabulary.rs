use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Whether a label describes a moving-object situation or the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneCategory {
    /// Decisions and moving objects (crossings, turns, vehicles)
    Dynamic,
    /// Infrastructure and conditions (intersections, weather, zones)
    Static,
}

impl SceneCategory {
    pub fn as_str(&self) -> &str {
        match self {
            SceneCategory::Dynamic => "Dynamic",
            SceneCategory::Static => "Static",
        }
    }

    /// Labels belonging to this category, in vocabulary order
    pub fn labels(&self) -> &'static [SceneLabel] {
        match self {
            SceneCategory::Dynamic => &SceneLabel::DYNAMIC,
            SceneCategory::Static => &SceneLabel::STATIC,
        }
    }
}

/// The closed set of scene recognition labels.
///
/// Serialized with the exact upper-case names used by the annotation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneLabel {
    PedCrossing,
    LeftTurn,
    RightTurn,
    ConstructionVehicle,
    AvoidStationary,
    Intersection,
    ParkingLot,
    TrafficLight,
    RainyWeather,
    ConstructionZone,
}

impl SceneLabel {
    pub const DYNAMIC: [SceneLabel; 5] = [
        SceneLabel::PedCrossing,
        SceneLabel::LeftTurn,
        SceneLabel::RightTurn,
        SceneLabel::ConstructionVehicle,
        SceneLabel::AvoidStationary,
    ];

    pub const STATIC: [SceneLabel; 5] = [
        SceneLabel::Intersection,
        SceneLabel::ParkingLot,
        SceneLabel::TrafficLight,
        SceneLabel::RainyWeather,
        SceneLabel::ConstructionZone,
    ];

    pub const ALL: [SceneLabel; 10] = [
        SceneLabel::PedCrossing,
        SceneLabel::LeftTurn,
        SceneLabel::RightTurn,
        SceneLabel::ConstructionVehicle,
        SceneLabel::AvoidStationary,
        SceneLabel::Intersection,
        SceneLabel::ParkingLot,
        SceneLabel::TrafficLight,
        SceneLabel::RainyWeather,
        SceneLabel::ConstructionZone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneLabel::PedCrossing => "PED_CROSSING",
            SceneLabel::LeftTurn => "LEFT_TURN",
            SceneLabel::RightTurn => "RIGHT_TURN",
            SceneLabel::ConstructionVehicle => "CONSTRUCTION_VEHICLE",
            SceneLabel::AvoidStationary => "AVOID_STATIONARY",
            SceneLabel::Intersection => "INTERSECTION",
            SceneLabel::ParkingLot => "PARKING_LOT",
            SceneLabel::TrafficLight => "TRAFFIC_LIGHT",
            SceneLabel::RainyWeather => "RAINY_WEATHER",
            SceneLabel::ConstructionZone => "CONSTRUCTION_ZONE",
        }
    }

    pub fn category(&self) -> SceneCategory {
        match self {
            SceneLabel::PedCrossing
            | SceneLabel::LeftTurn
            | SceneLabel::RightTurn
            | SceneLabel::ConstructionVehicle
            | SceneLabel::AvoidStationary => SceneCategory::Dynamic,
            SceneLabel::Intersection
            | SceneLabel::ParkingLot
            | SceneLabel::TrafficLight
            | SceneLabel::RainyWeather
            | SceneLabel::ConstructionZone => SceneCategory::Static,
        }
    }

    /// Human readable description used in reports
    pub fn description(&self) -> &'static str {
        match self {
            SceneLabel::PedCrossing => "Pedestrian crossing",
            SceneLabel::LeftTurn => "Left turn",
            SceneLabel::RightTurn => "Right turn",
            SceneLabel::ConstructionVehicle => "Construction vehicle present",
            SceneLabel::AvoidStationary => "Avoiding a stationary vehicle",
            SceneLabel::Intersection => "Intersection",
            SceneLabel::ParkingLot => "Parking lot",
            SceneLabel::TrafficLight => "Traffic light present",
            SceneLabel::RainyWeather => "Rainy weather",
            SceneLabel::ConstructionZone => "Construction zone",
        }
    }
}

impl fmt::Display for SceneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneLabel {
    type Err = Error;

    /// Case-sensitive: `"ped_crossing"` is not a label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| Error::UnknownLabel(s.to_string()))
    }
}
