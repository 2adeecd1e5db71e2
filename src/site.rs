//! Site locations derived from selected cells
//!
//! A site is the point a transmitter is placed at: the centroid of its cell.

use std::fmt;

use crate::cell::{Cell, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier attached to a site or cell-area feature
///
/// Serializes as the string `"transmitter"` or as the integer site id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteId {
    /// The transmitter under study (the serving cell's site)
    Transmitter,
    /// Any other cell, by its tessellation site id
    Cell(usize),
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteId::Transmitter => write!(f, "transmitter"),
            SiteId::Cell(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for SiteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SiteId::Transmitter => serializer.serialize_str("transmitter"),
            SiteId::Cell(id) => serializer.serialize_u64(*id as u64),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SiteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(usize),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Id(id) => Ok(SiteId::Cell(id)),
            Raw::Label(label) if label == "transmitter" => Ok(SiteId::Transmitter),
            Raw::Label(label) => Err(serde::de::Error::custom(format!(
                "unknown site id label: {}",
                label
            ))),
        }
    }
}

/// A transmitter location tagged with its identifier
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub location: Point,
    pub site_id: SiteId,
}

/// Turns selected cells into site points
///
/// Stateless; the centroid is recomputed from each cell's polygon.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteLocator;

impl SiteLocator {
    /// Site of the serving cell, tagged as the transmitter
    pub fn locate(&self, serving: &Cell) -> Site {
        Site {
            location: serving.hexagon.centroid(),
            site_id: SiteId::Transmitter,
        }
    }

    /// Sites of the interfering cells, tagged with their site ids, in input order
    pub fn locate_many<'a, I>(&self, interferers: I) -> Vec<Site>
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        interferers
            .into_iter()
            .map(|cell| Site {
                location: cell.hexagon.centroid(),
                site_id: SiteId::Cell(cell.site_id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tessellation::HexLayout;

    fn cells() -> Vec<Cell> {
        let layout = HexLayout::new(50.0).unwrap();
        vec![
            Cell::new(3, layout.hexagon_at(0.0, 0.0)),
            Cell::new(8, layout.hexagon_at(100.0, 0.0)),
            Cell::new(5, layout.hexagon_at(50.0, 86.602_540_378_443_86)),
        ]
    }

    #[test]
    fn test_locate_serving() {
        let cells = cells();
        let site = SiteLocator.locate(&cells[0]);
        assert_eq!(site.site_id, SiteId::Transmitter);
        assert!(site.location.distance(cells[0].centroid) < 1e-9);
        assert!(cells[0].hexagon.contains(site.location));
    }

    #[test]
    fn test_locate_many_preserves_order_and_ids() {
        let cells = cells();
        let sites = SiteLocator.locate_many(&cells);
        let ids: Vec<SiteId> = sites.iter().map(|s| s.site_id).collect();
        assert_eq!(ids, vec![SiteId::Cell(3), SiteId::Cell(8), SiteId::Cell(5)]);
        for (site, cell) in sites.iter().zip(&cells) {
            assert!(site.location.distance(cell.centroid) < 1e-9);
        }

        assert!(SiteLocator.locate_many(std::iter::empty::<&Cell>()).is_empty());
    }

    #[test]
    fn test_site_id_display() {
        assert_eq!(SiteId::Transmitter.to_string(), "transmitter");
        assert_eq!(SiteId::Cell(42).to_string(), "42");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_site_id_serialization() {
        assert_eq!(serde_json::to_string(&SiteId::Transmitter).unwrap(), "\"transmitter\"");
        assert_eq!(serde_json::to_string(&SiteId::Cell(17)).unwrap(), "17");

        let restored: SiteId = serde_json::from_str("\"transmitter\"").unwrap();
        assert_eq!(restored, SiteId::Transmitter);
        let restored: SiteId = serde_json::from_str("17").unwrap();
        assert_eq!(restored, SiteId::Cell(17));
        assert!(serde_json::from_str::<SiteId>("\"receiver\"").is_err());
    }
}
