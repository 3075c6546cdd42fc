//! Fixed catalog of CicloPi stations.
//!
//! The fleet's static metadata (id, name, coordinates) changes only when
//! the operator installs or renames a station. It is kept here as an
//! immutable table, built once at first use; live feed data never touches
//! it.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::coordinates::Coordinates;
use super::station::StationId;

/// Static metadata for one catalogued station.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: StationId,
    pub name: &'static str,
    pub coordinates: Coordinates,
}

const ENTRIES: [(u16, &str, f64, f64); 39] = [
    (1, "Aeroporto", 43.699455, 10.400075),
    (2, "Stazione F.S.", 43.708627, 10.399051),
    (3, "Comune Palazzo Blu", 43.715541, 10.400505),
    (4, "Teatro Tribunale", 43.716391, 10.405136),
    (5, "Borgo Stretto", 43.718518, 10.402165),
    (6, "Polo Marzotto", 43.719772, 10.407291),
    (7, "Duomo", 43.722855, 10.391977),
    (8, "Pietrasantina", 43.729020, 10.392726),
    (9, "Paparelli", 43.724449, 10.410438),
    (10, "Pratale", 43.7212554, 10.4180257),
    (11, "Ospedale Cisanello", 43.705752, 10.441740),
    (12, "Sms Biblioteca", 43.706565, 10.419136),
    (13, "Vittorio Emanuele", 43.710182, 10.398751),
    (14, "Palacongressi", 43.710014, 10.410232),
    (15, "Porta a Lucca", 43.724247, 10.402269),
    (16, "Solferino", 43.715698, 10.394999),
    (17, "San Rossore F.S.", 43.718992, 10.384391),
    (18, "Guerrazzi", 43.710358, 10.405337),
    (19, "Livornese", 43.708114, 10.384021),
    (20, "Cavalieri", 43.719856, 10.400194),
    (21, "M. Libertà", 43.719821, 10.403021),
    (22, "Galleria Gerace", 43.710791, 10.420456),
    (23, "C. Marchesi", 43.714971, 10.419322),
    (24, "CNR-Praticelli", 43.719256, 10.424012),
    (25, "Sesta Porta", 43.709162, 10.395837),
    (26, "Qualconia", 43.713011, 10.394458),
    (27, "Donatello", 43.711715, 10.372480),
    (28, "Spadoni", 43.716850, 10.391347),
    (29, "Nievo", 43.738286, 10.400865),
    (30, "Cisanello", 43.701159, 10.438863),
    (31, "Edificio 3", 43.707869, 10.441698),
    (32, "Edificio 6", 43.709046, 10.442541),
    (33, "Frascani", 43.710157, 10.433339),
    (34, "Chiarugi", 43.726244, 10.412882),
    (35, "Praticelli 2", 43.719619, 10.427469),
    (36, "Carducci", 43.726700, 10.420562),
    (37, "Garibaldi", 43.718077, 10.418168),
    (38, "Silvestro", 43.714128, 10.409065),
    (39, "Pardi", 43.702273, 10.399793),
];

static CATALOG: LazyLock<BTreeMap<u16, CatalogEntry>> = LazyLock::new(|| {
    ENTRIES
        .iter()
        .map(|&(id, name, lat, lon)| {
            (
                id,
                CatalogEntry {
                    id: StationId::new(id),
                    name,
                    coordinates: Coordinates::new(lat, lon),
                },
            )
        })
        .collect()
});

/// Look up a station's static metadata by id.
pub fn catalog_lookup(id: StationId) -> Option<&'static CatalogEntry> {
    CATALOG.get(&id.get())
}

/// Number of catalogued stations in the fleet.
pub fn catalog_len() -> usize {
    CATALOG.len()
}
