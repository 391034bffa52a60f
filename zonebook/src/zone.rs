//! Zone types for the hierarchical venue model.
//!
//! Zones form a tree: a main zone represents the whole venue and its
//! children are mutually exclusive subdivisions of the same physical space.
//! Zones are externally managed reference data; this library only reads them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// A unique identifier for a zone.
///
/// Identifiers are opaque non-empty strings chosen by the owning system.
///
/// # Examples
///
/// ```
/// use zonebook::ZoneId;
///
/// let id = ZoneId::new("grand-hall").unwrap();
/// assert_eq!(id.as_str(), "grand-hall");
///
/// // Empty identifiers are invalid
/// assert!(ZoneId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Creates a new zone identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonebook::ZoneId;
    ///
    /// assert!(ZoneId::new("hall-a").is_ok());
    /// assert!(ZoneId::new("  hall-a  ").is_ok());
    /// assert!(ZoneId::new("   ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "zone_id".into(),
                message: "zone id must be non-empty after trimming whitespace".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable zone within a venue.
///
/// A zone with children (`is_main_zone`) stands for the whole venue; a zone
/// with a parent is a sub-division of it. A zone with neither is standalone
/// and conflicts only with itself.
///
/// # Examples
///
/// ```
/// use zonebook::{Zone, ZoneId};
///
/// let venue = ZoneId::new("grand-hall").unwrap();
/// let zone = Zone::builder(ZoneId::new("grand-hall-east").unwrap())
///     .name(Some("East Wing".to_string()))
///     .parent(Some(venue))
///     .build()
///     .unwrap();
///
/// assert!(zone.is_active());
/// assert!(!zone.is_main_zone());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    id: ZoneId,
    name: Option<String>,
    parent_zone_id: Option<ZoneId>,
    is_main_zone: bool,
    is_active: bool,
}

impl Zone {
    /// Creates a new zone builder.
    ///
    /// New zones default to active, not main, with no parent and no name.
    ///
    /// # Examples
    ///
    /// ```
    /// use zonebook::{Zone, ZoneId};
    ///
    /// let zone = Zone::builder(ZoneId::new("studio").unwrap()).build().unwrap();
    /// assert!(zone.is_active());
    /// ```
    #[must_use]
    pub fn builder(id: ZoneId) -> ZoneBuilder {
        ZoneBuilder {
            id,
            name: None,
            parent_zone_id: None,
            is_main_zone: false,
            is_active: true,
        }
    }

    /// Returns the zone identifier.
    #[must_use]
    pub const fn id(&self) -> &ZoneId {
        &self.id
    }

    /// Returns the optional display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the parent zone identifier, if this is a sub-zone.
    #[must_use]
    pub const fn parent_zone_id(&self) -> Option<&ZoneId> {
        self.parent_zone_id.as_ref()
    }

    /// Returns whether this zone represents the whole venue.
    #[must_use]
    pub const fn is_main_zone(&self) -> bool {
        self.is_main_zone
    }

    /// Returns whether this zone is currently bookable.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Builder for creating `Zone` instances.
#[derive(Debug)]
pub struct ZoneBuilder {
    id: ZoneId,
    name: Option<String>,
    parent_zone_id: Option<ZoneId>,
    is_main_zone: bool,
    is_active: bool,
}

impl ZoneBuilder {
    /// Sets the display name.
    ///
    /// The name will be trimmed of leading/trailing whitespace.
    #[must_use]
    pub fn name(mut self, name: Option<String>) -> Self {
        self.name = name.map(|n| n.trim().to_string());
        self
    }

    /// Sets the parent zone.
    #[must_use]
    pub fn parent(mut self, parent: Option<ZoneId>) -> Self {
        self.parent_zone_id = parent;
        self
    }

    /// Sets whether this zone represents the whole venue.
    #[must_use]
    pub const fn main_zone(mut self, is_main_zone: bool) -> Self {
        self.is_main_zone = is_main_zone;
        self
    }

    /// Sets whether this zone is currently bookable.
    #[must_use]
    pub const fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds the zone.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is provided but is empty after trimming
    /// - The zone names itself as its own parent
    ///
    /// # Examples
    ///
    /// ```
    /// use zonebook::{Zone, ZoneId};
    ///
    /// let id = ZoneId::new("hall").unwrap();
    ///
    /// // Invalid: a zone cannot be its own parent
    /// let result = Zone::builder(id.clone()).parent(Some(id)).build();
    /// assert!(result.is_err());
    /// ```
    pub fn build(self) -> Result<Zone, ValidationError> {
        if let Some(ref name) = self.name {
            if name.is_empty() {
                return Err(ValidationError {
                    field: "name".into(),
                    message: "name must be non-empty after trimming whitespace".into(),
                });
            }
        }

        if let Some(ref parent) = self.parent_zone_id {
            if *parent == self.id {
                return Err(ValidationError {
                    field: "parent_zone_id".into(),
                    message: "zone cannot be its own parent".into(),
                });
            }
        }

        Ok(Zone {
            id: self.id,
            name: self.name,
            parent_zone_id: self.parent_zone_id,
            is_main_zone: self.is_main_zone,
            is_active: self.is_active,
        })
    }
}
