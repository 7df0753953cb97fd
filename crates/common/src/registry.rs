//! The configured enumeration of shareable room types.

use crate::RoomType;

/// The closed set of room types a conference offers.
///
/// Room types are configuration, not runtime data: projections pre-populate
/// their state for every id in the registry, and queries against ids outside
/// it are rejected.
///
/// Reads from the `ROOM_TYPES` environment variable (comma separated) via
/// [`RoomTypeRegistry::from_env`]; the default set matches the shareable
/// room categories of the original conference setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTypeRegistry {
    ids: Vec<RoomType>,
}

impl RoomTypeRegistry {
    /// Creates a registry from an explicit list of room type ids.
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RoomType>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Loads the registry from the `ROOM_TYPES` environment variable,
    /// falling back to the default set.
    pub fn from_env() -> Self {
        match std::env::var("ROOM_TYPES") {
            Ok(raw) => Self::from_ids(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(RoomType::from),
            ),
            Err(_) => Self::default(),
        }
    }

    /// All configured room type ids, in configuration order.
    pub fn all_room_type_ids(&self) -> &[RoomType] {
        &self.ids
    }

    /// Returns true if the given room type is configured.
    pub fn contains(&self, room_type: &RoomType) -> bool {
        self.ids.contains(room_type)
    }
}

impl Default for RoomTypeRegistry {
    fn default() -> Self {
        Self::from_ids(["single", "bed_in_double", "bed_in_junior", "junior"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_four_room_types() {
        let registry = RoomTypeRegistry::default();
        assert_eq!(registry.all_room_type_ids().len(), 4);
        assert!(registry.contains(&RoomType::new("bed_in_double")));
        assert!(!registry.contains(&RoomType::new("penthouse")));
    }

    #[test]
    fn from_ids_preserves_order() {
        let registry = RoomTypeRegistry::from_ids(["double", "junior"]);
        let ids: Vec<_> = registry
            .all_room_type_ids()
            .iter()
            .map(RoomType::as_str)
            .collect();
        assert_eq!(ids, vec!["double", "junior"]);
    }

    #[test]
    fn from_ids_accepts_room_types() {
        let registry = RoomTypeRegistry::from_ids([RoomType::new("double")]);
        assert!(registry.contains(&RoomType::new("double")));
    }
}
