//! Dataset field names and the grouping-dimension table.
//!
//! [`FieldMap`] names the properties every export reads. Its defaults match the
//! address-point layer the tool was written for; a JSON file can override any
//! subset:
//!
//! ```json
//! { "owner": "Parcels.OWNER_NAME", "zoning": "Parcels.ZONE" }
//! ```

use crate::naming::{CATEGORY_KEY_LIMIT, YEAR_KEY_LIMIT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Placeholder group key for records missing a dimension field.
pub const UNKNOWN: &str = "Unknown";

/// Property names consumed by the exports and reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub address: String,
    pub owner: String,
    pub zoning: String,
    pub secondary_zoning: String,
    pub route: String,
    pub municipality: String,
    pub neighborhood: String,
    pub year_built: String,
    pub lot_size: String,
    pub recycling: String,
    pub garbage_days: String,
    pub property_type: String,
    pub square_feet: String,
    pub units: String,
    pub condo_flag: String,
    pub historical: String,
    pub total_value: String,
    pub land_value: String,
    pub building_value: String,
    pub mailing_address: String,
    pub legal: String,
    pub flood_zone: String,
    pub folio: String,
    pub feature_id: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        let ap = |name: &str| format!("AddressPoints.{name}");
        Self {
            address: ap("TRUE_SITE_"),
            owner: ap("TRUE_OWNER"),
            zoning: ap("PRIMARY_ZO"),
            secondary_zoning: ap("SECONDARY_"),
            route: "AddressPoints_AddSpatialJoin_10.Route".into(),
            municipality: ap("MUNICIPALI"),
            neighborhood: ap("NEIGHBORHO"),
            year_built: ap("YEAR_BUILT"),
            lot_size: ap("LOT_SIZE"),
            recycling: ap("Recycling"),
            garbage_days: ap("GarbageR"),
            property_type: ap("PROP_TYPE"),
            square_feet: ap("SQ_FT"),
            units: ap("UNITS"),
            condo_flag: ap("CONDO_FLAG"),
            historical: ap("Historical"),
            total_value: ap("TOTAL_VAL1"),
            land_value: ap("LAND_VAL_2"),
            building_value: ap("BUILDING_V"),
            mailing_address: ap("TRUE_MAILI"),
            legal: ap("LEGAL"),
            flood_zone: ap("FLOOD_ZONE"),
            folio: ap("FOLIO"),
            feature_id: ap("FID"),
        }
    }
}

impl FieldMap {
    /// Load overrides from a JSON object; unspecified fields keep their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a JSON object of
    /// string fields.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("open {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse field map {}", path.display()))
    }

    /// The fields the story generator reads.
    #[must_use]
    pub fn narrative_fields(&self) -> Vec<&str> {
        [
            &self.address,
            &self.owner,
            &self.zoning,
            &self.secondary_zoning,
            &self.municipality,
            &self.neighborhood,
            &self.year_built,
            &self.route,
            &self.lot_size,
            &self.recycling,
            &self.garbage_days,
            &self.property_type,
            &self.square_feet,
            &self.units,
            &self.condo_flag,
            &self.historical,
            &self.total_value,
            &self.land_value,
            &self.building_value,
            &self.mailing_address,
            &self.legal,
            &self.flood_zone,
        ]
        .into_iter()
        .map(String::as_str)
        .collect()
    }

    /// The categorical grouping dimensions, in export order.
    #[must_use]
    pub fn dimensions(&self) -> Vec<Dimension> {
        let dim = |label, dir, field: &String, max_len| Dimension {
            label,
            dir,
            field: field.clone(),
            default: UNKNOWN,
            max_len,
        };
        vec![
            dim("owner", "by_owner", &self.owner, CATEGORY_KEY_LIMIT),
            dim("zoning", "by_zoning", &self.zoning, CATEGORY_KEY_LIMIT),
            dim("route", "by_route", &self.route, CATEGORY_KEY_LIMIT),
            dim("municipality", "by_municipality", &self.municipality, CATEGORY_KEY_LIMIT),
            dim("neighborhood", "by_neighborhood", &self.neighborhood, CATEGORY_KEY_LIMIT),
            dim("year_built", "by_year_built", &self.year_built, YEAR_KEY_LIMIT),
        ]
    }

    /// Look up one dimension by label.
    #[must_use]
    pub fn dimension(&self, label: &str) -> Option<Dimension> {
        self.dimensions().into_iter().find(|d| d.label == label)
    }
}

/// One categorical grouping: which field, where its files go, how they are named.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dimension {
    /// Short name; also the file-name prefix (`owner_<key>.json`).
    pub label: &'static str,
    /// Subdirectory used by the full run.
    pub dir: &'static str,
    pub field: String,
    /// Key used when the field is absent.
    pub default: &'static str,
    /// Sanitized key length limit.
    pub max_len: usize,
}
