//! Accessor classification and its per-type cache
//!
//! An [`AccessorTable`] maps member names of one part type to the property
//! they read or write. Tables are built once per part name and shared through
//! [`AccessorCache`].

use crate::schema::{PartSchema, PropertyDescriptor};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Direction of an accessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// `get_<Prop>`
    Getter,

    /// `set_<Prop>`
    Setter,
}

/// Member-name classification for one part type
#[derive(Debug, Clone)]
pub struct AccessorTable {
    schema: &'static PartSchema,
    members: HashMap<String, (AccessorKind, usize)>,
}

impl AccessorTable {
    /// Build the table for a schema
    #[must_use]
    pub fn build(schema: &'static PartSchema) -> Self {
        let mut members = HashMap::with_capacity(schema.properties.len() * 2);
        for (index, property) in schema.properties.iter().enumerate() {
            members.insert(property.getter_name(), (AccessorKind::Getter, index));
            members.insert(property.setter_name(), (AccessorKind::Setter, index));
        }
        Self { schema, members }
    }

    /// Schema the table was built from
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &'static PartSchema {
        self.schema
    }

    /// Classify a member name
    ///
    /// Returns `None` for members that are not property accessors.
    #[must_use]
    pub fn classify(&self, member: &str) -> Option<(AccessorKind, &'static PropertyDescriptor)> {
        let (kind, index) = *self.members.get(member)?;
        let schema: &'static PartSchema = self.schema;
        schema.properties.get(index).map(|p| (kind, p))
    }

    /// Number of accessor members
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the part declares no properties
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Concurrent cache of accessor tables keyed by part name
///
/// Population is first-writer-wins: a thread that loses the race drops its
/// table and uses the stored one. Entries are inserted whole.
#[derive(Debug, Default)]
pub struct AccessorCache {
    tables: DashMap<&'static str, Arc<AccessorTable>>,
}

impl AccessorCache {
    /// Create empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: DashMap::new(),
        }
    }

    /// Table for a schema, building it on first use
    #[must_use]
    pub fn table(&self, schema: &'static PartSchema) -> Arc<AccessorTable> {
        if let Some(table) = self.tables.get(schema.name) {
            return Arc::clone(table.value());
        }

        // Built outside the shard lock
        let built = Arc::new(AccessorTable::build(schema));
        match self.tables.entry(schema.name) {
            Entry::Occupied(existing) => {
                tracing::trace!(part = schema.name, "accessor table already cached");
                Arc::clone(existing.get())
            }
            Entry::Vacant(slot) => {
                tracing::trace!(
                    part = schema.name,
                    accessors = built.len(),
                    "cached accessor table"
                );
                Arc::clone(slot.insert(built).value())
            }
        }
    }

    /// Check if a part's table is cached
    #[inline]
    #[must_use]
    pub fn contains(&self, part_name: &str) -> bool {
        self.tables.contains_key(part_name)
    }

    /// Number of cached tables
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when nothing is cached
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
