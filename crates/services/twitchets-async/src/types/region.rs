//! Twickets region codes for the United Kingdom

/// A region listings can be filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// Code used in the configuration document (e.g. `GBLO`)
    pub code: &'static str,
    /// Human-readable region name
    pub name: &'static str,
}

/// Every region known to the Twickets API, ordered by code
pub const REGIONS: &[Region] = &[
    Region { code: "GBEA", name: "East Anglia" },
    Region { code: "GBLO", name: "London" },
    Region { code: "GBMI", name: "Midlands" },
    Region { code: "GBNE", name: "North East" },
    Region { code: "GBNI", name: "Northern Ireland" },
    Region { code: "GBNO", name: "North" },
    Region { code: "GBNW", name: "North West" },
    Region { code: "GBSC", name: "Scotland" },
    Region { code: "GBSE", name: "South East" },
    Region { code: "GBSO", name: "South" },
    Region { code: "GBSW", name: "South West" },
    Region { code: "GBWA", name: "Wales" },
];

impl Region {
    /// Looks up a region by its code
    #[must_use]
    pub fn from_code(code: &str) -> Option<&'static Self> {
        REGIONS.iter().find(|r| r.code == code)
    }
}
