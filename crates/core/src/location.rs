//! The fixed set of survey sites an observation can be logged against.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// A named survey site. The set is closed; anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    AntarcticPeninsula,
    SouthShetlandIslands,
    PortLockroy,
    DeceptionIsland,
    HalfMoonIsland,
    ParadiseHarbor,
    NekoHarbor,
    PetermannIsland,
    LemaireChannel,
    SouthGeorgiaIsland,
    ElephantIsland,
    PauletIsland,
    BrownBluff,
    CuvervilleIsland,
    BoothIsland,
    TorgersenIsland,
}

impl Location {
    /// Every site, in the order they are offered to data-entry clients.
    pub const ALL: [Location; 16] = [
        Self::AntarcticPeninsula,
        Self::SouthShetlandIslands,
        Self::PortLockroy,
        Self::DeceptionIsland,
        Self::HalfMoonIsland,
        Self::ParadiseHarbor,
        Self::NekoHarbor,
        Self::PetermannIsland,
        Self::LemaireChannel,
        Self::SouthGeorgiaIsland,
        Self::ElephantIsland,
        Self::PauletIsland,
        Self::BrownBluff,
        Self::CuvervilleIsland,
        Self::BoothIsland,
        Self::TorgersenIsland,
    ];

    /// Display name, which is also the stored database value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AntarcticPeninsula => "Antarctic Peninsula",
            Self::SouthShetlandIslands => "South Shetland Islands",
            Self::PortLockroy => "Port Lockroy",
            Self::DeceptionIsland => "Deception Island",
            Self::HalfMoonIsland => "Half Moon Island",
            Self::ParadiseHarbor => "Paradise Harbor",
            Self::NekoHarbor => "Neko Harbor",
            Self::PetermannIsland => "Petermann Island",
            Self::LemaireChannel => "Lemaire Channel",
            Self::SouthGeorgiaIsland => "South Georgia Island",
            Self::ElephantIsland => "Elephant Island",
            Self::PauletIsland => "Paulet Island",
            Self::BrownBluff => "Brown Bluff",
            Self::CuvervilleIsland => "Cuverville Island",
            Self::BoothIsland => "Booth Island",
            Self::TorgersenIsland => "Torgersen Island",
        }
    }
}

impl FromStr for Location {
    type Err = CoreError;

    /// Exact, case-sensitive match against the display names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|loc| loc.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown location '{s}'")))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_site_parses_back_from_its_name() {
        for loc in Location::ALL {
            assert_eq!(loc.as_str().parse::<Location>().unwrap(), loc);
        }
    }

    #[test]
    fn unknown_site_is_rejected() {
        assert!("Nowhere".parse::<Location>().is_err());
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!("port lockroy".parse::<Location>().is_err());
        assert!(" Port Lockroy".parse::<Location>().is_err());
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_value(Location::NekoHarbor).unwrap();
        assert_eq!(json, "Neko Harbor");
    }
}
