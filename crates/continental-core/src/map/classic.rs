//! The classic 42-territory, 6-continent world map, shipped as static
//! configuration data.

use crate::map::{ContinentDef, TerritoryDef, WorldMap};

/// Continent definitions with the standard reinforcement bonuses.
pub fn continent_defs() -> Vec<ContinentDef> {
    vec![
        ContinentDef::new("North America", 5),
        ContinentDef::new("South America", 2),
        ContinentDef::new("Europe", 5),
        ContinentDef::new("Africa", 3),
        ContinentDef::new("Asia", 7),
        ContinentDef::new("Australia", 2),
    ]
}

/// Territory definitions for the classic board.
pub fn territory_defs() -> Vec<TerritoryDef> {
    let t = TerritoryDef::new;
    vec![
        t(
            "Alaska",
            "North America",
            &["Alberta", "Northwest Territory", "Kamchatka"],
        ),
        t(
            "Northwest Territory",
            "North America",
            &["Alaska", "Alberta", "Ontario", "Greenland"],
        ),
        t(
            "Greenland",
            "North America",
            &["Northwest Territory", "Ontario", "Eastern Canada", "Iceland"],
        ),
        t(
            "Alberta",
            "North America",
            &["Alaska", "Northwest Territory", "Ontario", "Western United States"],
        ),
        t(
            "Ontario",
            "North America",
            &[
                "Alberta",
                "Northwest Territory",
                "Greenland",
                "Eastern Canada",
                "Eastern United States",
                "Western United States",
            ],
        ),
        t(
            "Eastern Canada",
            "North America",
            &["Ontario", "Greenland", "Eastern United States"],
        ),
        t(
            "Western United States",
            "North America",
            &["Alberta", "Ontario", "Eastern United States", "Central America"],
        ),
        t(
            "Eastern United States",
            "North America",
            &["Central America", "Western United States", "Ontario", "Eastern Canada"],
        ),
        t(
            "Central America",
            "North America",
            &["Western United States", "Eastern United States", "Venezuela"],
        ),
        t("Venezuela", "South America", &["Brazil", "Peru", "Central America"]),
        t("Peru", "South America", &["Venezuela", "Brazil", "Argentina"]),
        t(
            "Brazil",
            "South America",
            &["Argentina", "Peru", "Venezuela", "North Africa"],
        ),
        t("Argentina", "South America", &["Peru", "Brazil"]),
        t("Iceland", "Europe", &["Scandinavia", "Great Brittain", "Greenland"]),
        t(
            "Scandinavia",
            "Europe",
            &["Iceland", "Great Brittain", "Northern Europe", "Russia/Ukraine"],
        ),
        t(
            "Russia/Ukraine",
            "Europe",
            &[
                "Scandinavia",
                "Northern Europe",
                "Southern Europe",
                "Middle East",
                "Afghanistan",
                "Ural",
            ],
        ),
        t(
            "Great Brittain",
            "Europe",
            &["Western Europe", "Northern Europe", "Scandinavia", "Iceland"],
        ),
        t(
            "Northern Europe",
            "Europe",
            &[
                "Great Brittain",
                "Scandinavia",
                "Russia/Ukraine",
                "Southern Europe",
                "Western Europe",
            ],
        ),
        t(
            "Western Europe",
            "Europe",
            &["Great Brittain", "Northern Europe", "Southern Europe", "North Africa"],
        ),
        t(
            "Southern Europe",
            "Europe",
            &[
                "Western Europe",
                "Northern Europe",
                "Russia/Ukraine",
                "Middle East",
                "Egypt",
                "North Africa",
            ],
        ),
        t(
            "North Africa",
            "Africa",
            &[
                "Central Africa",
                "East Africa",
                "Egypt",
                "Southern Europe",
                "Western Europe",
                "Brazil",
            ],
        ),
        t(
            "Egypt",
            "Africa",
            &["East Africa", "North Africa", "Southern Europe", "Middle East"],
        ),
        t(
            "Central Africa",
            "Africa",
            &["South Africa", "East Africa", "North Africa"],
        ),
        t(
            "East Africa",
            "Africa",
            &[
                "Madagascar",
                "South Africa",
                "Central Africa",
                "North Africa",
                "Egypt",
                "Middle East",
            ],
        ),
        t(
            "South Africa",
            "Africa",
            &["Madagascar", "East Africa", "Central Africa"],
        ),
        t("Madagascar", "Africa", &["South Africa", "East Africa"]),
        t("Ural", "Asia", &["Siberia", "China", "Afghanistan", "Russia/Ukraine"]),
        t(
            "Siberia",
            "Asia",
            &["Yakutsk", "Irkutsk", "Mongolia", "China", "Ural"],
        ),
        t("Yakutsk", "Asia", &["Siberia", "Irkutsk", "Kamchatka"]),
        t(
            "Kamchatka",
            "Asia",
            &["Yakutsk", "Irkutsk", "Mongolia", "Japan", "Alaska"],
        ),
        t("Irkutsk", "Asia", &["Siberia", "Mongolia", "Kamchatka", "Yakutsk"]),
        t("Mongolia", "Asia", &["China", "Siberia", "Irkutsk", "Kamchatka"]),
        t("Japan", "Asia", &["Mongolia", "Kamchatka"]),
        t(
            "Afghanistan",
            "Asia",
            &["Ural", "China", "India", "Middle East", "Russia/Ukraine"],
        ),
        t(
            "China",
            "Asia",
            &["Mongolia", "Siberia", "Ural", "Afghanistan", "India", "Southeast Asia"],
        ),
        t(
            "Middle East",
            "Asia",
            &[
                "India",
                "Afghanistan",
                "Russia/Ukraine",
                "Southern Europe",
                "Egypt",
                "East Africa",
            ],
        ),
        t(
            "India",
            "Asia",
            &["Middle East", "Afghanistan", "China", "Southeast Asia"],
        ),
        t("Southeast Asia", "Asia", &["India", "China", "Indonesia"]),
        t(
            "Indonesia",
            "Australia",
            &["Western Australia", "New Guinea", "Southeast Asia"],
        ),
        t(
            "New Guinea",
            "Australia",
            &["Eastern Australia", "Western Australia", "Indonesia"],
        ),
        t(
            "Western Australia",
            "Australia",
            &["Eastern Australia", "New Guinea", "Indonesia"],
        ),
        t("Eastern Australia", "Australia", &["Western Australia", "New Guinea"]),
    ]
}

/// Build the classic world map.
pub fn world_map() -> WorldMap {
    WorldMap::from_defs(&territory_defs(), &continent_defs())
        .expect("classic world data is consistent")
}
