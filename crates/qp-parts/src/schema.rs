//! Static part descriptions
//!
//! A [`PartSchema`] names a part, its base type and the properties whose
//! accessors the proxy redirects to storage.

use qp_codec::{DeclaredType, InfosetValue};

/// Base type every part derives from; its members are never redirected
pub const CONTENT_PART: &str = "ContentPart";

/// Prefix of generated getter member names
pub const GETTER_PREFIX: &str = "get_";

/// Prefix of generated setter member names
pub const SETTER_PREFIX: &str = "set_";

/// A persisted property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Property name, also the attribute name
    pub name: &'static str,

    /// Declared value type
    pub declared: DeclaredType,
}

impl PropertyDescriptor {
    /// Describe a property with an explicit declared type
    #[must_use]
    pub const fn new(name: &'static str, declared: DeclaredType) -> Self {
        Self { name, declared }
    }

    /// Describe a property holding `T`
    #[must_use]
    pub const fn of<T: InfosetValue>(name: &'static str) -> Self {
        Self::new(name, T::DECLARED)
    }

    /// Getter member name (`get_<Name>`)
    #[must_use]
    pub fn getter_name(&self) -> String {
        format!("{GETTER_PREFIX}{}", self.name)
    }

    /// Setter member name (`set_<Name>`)
    #[must_use]
    pub fn setter_name(&self) -> String {
        format!("{SETTER_PREFIX}{}", self.name)
    }
}

/// Description of a part type
///
/// # Example
/// ```rust
/// use qp_parts::{PartSchema, PropertyDescriptor};
///
/// static BLOG: PartSchema = PartSchema::new(
///     "BlogPart",
///     &[
///         PropertyDescriptor::of::<String>("Title"),
///         PropertyDescriptor::of::<Option<i32>>("Views"),
///     ],
/// );
///
/// assert_eq!(BLOG.property("Views").unwrap().declared.to_string(), "int?");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartSchema {
    /// Part name, also the element name in the document
    pub name: &'static str,

    /// Name of the base type declaring non-redirected members
    pub base: &'static str,

    /// Persisted properties
    pub properties: &'static [PropertyDescriptor],
}

impl PartSchema {
    /// Create a schema deriving from [`CONTENT_PART`]
    #[must_use]
    pub const fn new(name: &'static str, properties: &'static [PropertyDescriptor]) -> Self {
        Self {
            name,
            base: CONTENT_PART,
            properties,
        }
    }

    /// Replace the base type name
    #[must_use]
    pub const fn with_base(mut self, base: &'static str) -> Self {
        self.base = base;
        self
    }

    /// Look up a property by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&'static PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Display name: the part name without a trailing `Part`
    ///
    /// `MapPart` → `Map`; a bare `Part` is kept as is.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self.name.strip_suffix("Part") {
            Some(stem) if !stem.is_empty() => stem,
            _ => self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qp_codec::ScalarType;

    static SAMPLE: PartSchema = PartSchema::new(
        "SamplePart",
        &[
            PropertyDescriptor::of::<bool>("Enabled"),
            PropertyDescriptor::of::<Option<f64>>("Ratio"),
        ],
    );

    #[test]
    fn accessor_names() {
        let prop = SAMPLE.property("Enabled").unwrap();
        assert_eq!(prop.getter_name(), "get_Enabled");
        assert_eq!(prop.setter_name(), "set_Enabled");
    }

    #[test]
    fn declared_types_come_from_rust_types() {
        let ratio = SAMPLE.property("Ratio").unwrap();
        assert_eq!(ratio.declared, DeclaredType::nullable(ScalarType::Double));
        assert!(SAMPLE.property("Missing").is_none());
    }

    #[test]
    fn base_defaults_to_content_part() {
        assert_eq!(SAMPLE.base, CONTENT_PART);
        assert_eq!(SAMPLE.with_base("Widget").base, "Widget");
    }

    #[test]
    fn display_name_strips_part_suffix() {
        assert_eq!(SAMPLE.display_name(), "Sample");
        assert_eq!(PartSchema::new("Part", &[]).display_name(), "Part");
        assert_eq!(PartSchema::new("Gallery", &[]).display_name(), "Gallery");
    }
}
