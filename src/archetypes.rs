//! Estimation of unknown wall properties from archetype tables.
//!
//! The source dataset does not record a wall type or wall U-value for every
//! dwelling. Buildings with missing values are filled in from archetype tables
//! keyed by (dwelling type, period built), derived from the dwellings where the
//! values are known. Every filled value is flagged as estimated.
use crate::units::UValue;
use indexmap::IndexMap;
use log::info;

/// An archetype lookup table keyed by (dwelling type, period built)
pub type ArchetypeMap<T> = IndexMap<(String, String), T>;

/// Archetype tables for wall properties
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WallArchetypes {
    /// Most common wall type per archetype
    pub types: ArchetypeMap<String>,
    /// Default wall U-value per archetype
    pub uvalues: ArchetypeMap<UValue>,
}

/// Wall properties for one building after archetype estimation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WallProperties {
    /// The most significant wall type, if known or estimated
    pub wall_type: Option<String>,
    /// Whether the wall type came from an archetype
    pub wall_type_is_estimated: bool,
    /// The wall U-value, if known or estimated
    pub uvalue: Option<UValue>,
    /// Whether the U-value came from an archetype
    pub uvalue_is_estimated: bool,
}

impl WallArchetypes {
    /// Whether both archetype tables are empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.uvalues.is_empty()
    }

    /// Fill in a building's missing wall properties from the archetype tables.
    ///
    /// Known values are kept as-is and flagged as not estimated. Missing values are
    /// looked up by (dwelling type, period built); if the building's archetype key
    /// is incomplete or absent from a table, the value stays missing.
    pub fn estimate_wall_properties(
        &self,
        known_type: Option<&str>,
        known_uvalue: Option<UValue>,
        dwelling_type: Option<&str>,
        period_built: Option<&str>,
    ) -> WallProperties {
        let key = match (dwelling_type, period_built) {
            (Some(dwelling_type), Some(period_built)) => {
                Some((dwelling_type.to_string(), period_built.to_string()))
            }
            _ => None,
        };

        let (wall_type, wall_type_is_estimated) = match known_type {
            Some(known) => (Some(known.to_string()), false),
            None => match key.as_ref().and_then(|key| self.types.get(key)) {
                Some(estimated) => (Some(estimated.clone()), true),
                None => (None, false),
            },
        };

        let (uvalue, uvalue_is_estimated) = match known_uvalue {
            Some(known) => (Some(known), false),
            None => match key.as_ref().and_then(|key| self.uvalues.get(key)) {
                Some(estimated) => (Some(*estimated), true),
                None => (None, false),
            },
        };

        WallProperties {
            wall_type,
            wall_type_is_estimated,
            uvalue,
            uvalue_is_estimated,
        }
    }
}

/// Log how many buildings had wall properties estimated
pub fn log_estimation_counts(estimated_types: usize, estimated_uvalues: usize) {
    if estimated_types > 0 {
        info!("Estimated wall type for {estimated_types} buildings from archetypes");
    }
    if estimated_uvalues > 0 {
        info!("Estimated wall U-value for {estimated_uvalues} buildings from archetypes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn archetypes() -> WallArchetypes {
        let key = (
            "Semi-detached house".to_string(),
            "1961 - 1970".to_string(),
        );
        WallArchetypes {
            types: [(key.clone(), "Concrete Hollow Block".to_string())]
                .into_iter()
                .collect(),
            uvalues: [(key, UValue(2.4))].into_iter().collect(),
        }
    }

    #[rstest]
    fn known_values_are_kept(archetypes: WallArchetypes) {
        let properties = archetypes.estimate_wall_properties(
            Some("300mm Filled Cavity"),
            Some(UValue(0.3)),
            Some("Semi-detached house"),
            Some("1961 - 1970"),
        );
        assert_eq!(
            properties,
            WallProperties {
                wall_type: Some("300mm Filled Cavity".to_string()),
                wall_type_is_estimated: false,
                uvalue: Some(UValue(0.3)),
                uvalue_is_estimated: false,
            }
        );
    }

    #[rstest]
    fn missing_values_are_estimated(archetypes: WallArchetypes) {
        let properties = archetypes.estimate_wall_properties(
            None,
            None,
            Some("Semi-detached house"),
            Some("1961 - 1970"),
        );
        assert_eq!(
            properties,
            WallProperties {
                wall_type: Some("Concrete Hollow Block".to_string()),
                wall_type_is_estimated: true,
                uvalue: Some(UValue(2.4)),
                uvalue_is_estimated: true,
            }
        );
    }

    #[rstest]
    fn unknown_archetype_key_stays_missing(archetypes: WallArchetypes) {
        let properties = archetypes.estimate_wall_properties(
            None,
            None,
            Some("Detached house"),
            Some("2001 - 2010"),
        );
        assert_eq!(properties, WallProperties::default());
    }

    #[rstest]
    fn incomplete_key_stays_missing(archetypes: WallArchetypes) {
        let properties =
            archetypes.estimate_wall_properties(None, None, Some("Semi-detached house"), None);
        assert_eq!(properties, WallProperties::default());
    }
}
