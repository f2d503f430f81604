//! Compiled-in locality dataset
//!
//! Communes of Haute-Corse as published by INSEE, with coordinates taken from
//! their Wikipedia infoboxes. Entries are listed in source order; `Catalog::load`
//! sorts them.

use super::LocalityRecord;

/// One compiled-in record, borrowed from static memory
#[derive(Debug, Clone, Copy)]
pub(super) struct FixtureEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub founded_year: i32,
    pub dissolved_label: Option<&'static str>,
    pub latitude: f64,
    pub longitude: f64,
}

impl FixtureEntry {
    pub fn to_record(&self) -> LocalityRecord {
        LocalityRecord {
            id: self.id.to_string(),
            name: self.name.to_string(),
            founded_year: self.founded_year,
            dissolved_label: self.dissolved_label.map(str::to_string),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

pub(super) const HAUTE_CORSE: &[FixtureEntry] = &[
    FixtureEntry {
        id: "2B002",
        name: "Aghione",
        founded_year: 1864,
        dissolved_label: None,
        latitude: 42.1125,
        longitude: 9.40138888889,
    },
    FixtureEntry {
        id: "2B009",
        name: "Aléria",
        founded_year: 1824,
        dissolved_label: None,
        latitude: 42.1147222222,
        longitude: 9.51333333333,
    },
    FixtureEntry {
        id: "2B075",
        name: "Casevecchie",
        founded_year: 1866,
        dissolved_label: None,
        latitude: 42.1436111111,
        longitude: 9.36083333333,
    },
    FixtureEntry {
        id: "2B366",
        name: "Chisa",
        founded_year: 1946,
        dissolved_label: None,
        latitude: 41.9252777778,
        longitude: 9.26388888889,
    },
    FixtureEntry {
        id: "2B121",
        name: "Galéria",
        founded_year: 1864,
        dissolved_label: None,
        latitude: 42.41,
        longitude: 8.64916666667,
    },
    FixtureEntry {
        id: "2B123",
        name: "Ghisonaccia",
        founded_year: 1845,
        dissolved_label: None,
        latitude: 42.0175,
        longitude: 9.40555555556,
    },
    FixtureEntry {
        id: "2B153",
        name: "Manso",
        founded_year: 1600,
        dissolved_label: None,
        latitude: 42.3666666667,
        longitude: 8.79305555556,
    },
    FixtureEntry {
        id: "2B231",
        name: "Pigna",
        founded_year: 1792,
        dissolved_label: None,
        latitude: 42.6002777778,
        longitude: 8.90277777778,
    },
    FixtureEntry {
        id: "2B365",
        name: "San-Gavino-di-Fiumorbo",
        founded_year: 1939,
        dissolved_label: None,
        latitude: 41.9844444444,
        longitude: 9.26916666667,
    },
    FixtureEntry {
        id: "2B277",
        name: "Serra-di-Fiumorbo",
        founded_year: 1800,
        dissolved_label: None,
        latitude: 41.9861111111,
        longitude: 9.33666666667,
    },
    FixtureEntry {
        id: "2B033",
        name: "Bastia",
        founded_year: 1500,
        dissolved_label: None,
        latitude: 42.697283,
        longitude: 9.450881,
    },
    FixtureEntry {
        id: "2B050",
        name: "Calvi",
        founded_year: 1500,
        dissolved_label: None,
        latitude: 42.567847,
        longitude: 8.757697,
    },
    FixtureEntry {
        id: "2B096",
        name: "Corte",
        founded_year: 1500,
        dissolved_label: None,
        latitude: 42.307093,
        longitude: 9.148857,
    },
    FixtureEntry {
        id: "2B168",
        name: "Morosaglia",
        founded_year: 1500,
        dissolved_label: None,
        latitude: 42.4758,
        longitude: 9.2075,
    },
    FixtureEntry {
        id: "2B247",
        name: "Saint-Florent",
        founded_year: 1500,
        dissolved_label: None,
        latitude: 42.681436,
        longitude: 9.303511,
    },
];
