//! Testing utilities for QuickParts workspace
//!
//! Shared sample parts, enums, display logics and manager setup.

#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use qp_codec::{infoset_enum, DeclaredType, Value};
use qp_core::{QuickPartsConfig, QuickPartsManager};
use qp_logic::{ParameterMap, PartLogic, ProviderError};
use qp_parts::{MemberCall, PartError, PartSchema, PartStorage, PropertyDescriptor, QuickPart};
use rust_decimal::Decimal;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapStyle {
    Road,
    Satellite,
    Terrain = 7,
}

infoset_enum!(MapStyle { Road, Satellite, Terrain });

pub static MAP_SCHEMA: PartSchema = PartSchema::new(
    "MapPart",
    &[
        PropertyDescriptor::of::<f64>("Latitude"),
        PropertyDescriptor::of::<f64>("Longitude"),
        PropertyDescriptor::of::<i32>("Zoom"),
        PropertyDescriptor::of::<String>("Label"),
        PropertyDescriptor::of::<MapStyle>("Style"),
        PropertyDescriptor::of::<Option<DateTime<Utc>>>("LastViewed"),
    ],
);

/// Map location part; `Describe` is a real (non-persisted) member
#[derive(Debug, Default)]
pub struct MapPart {
    pub describe_calls: usize,
}

impl QuickPart for MapPart {
    fn schema(&self) -> &'static PartSchema {
        &MAP_SCHEMA
    }

    fn invoke(&mut self, call: &MemberCall, storage: &PartStorage) -> Result<Value, PartError> {
        match call.name.as_str() {
            "Describe" => {
                self.describe_calls += 1;
                let label: String = storage.get("Label")?;
                let zoom: i32 = storage.get("Zoom")?;
                Ok(Value::String(format!("{label} @ {zoom}")))
            }
            _ => Err(PartError::member_not_found(self.schema().name, &call.name)),
        }
    }
}

pub static BLOG_SCHEMA: PartSchema = PartSchema::new(
    "BlogPart",
    &[
        PropertyDescriptor::of::<String>("Title"),
        PropertyDescriptor::of::<Option<i32>>("Rating"),
        PropertyDescriptor::of::<Decimal>("Price"),
        PropertyDescriptor::of::<bool>("Published"),
        PropertyDescriptor::of::<f32>("Score"),
    ],
);

#[derive(Debug, Default)]
pub struct BlogPart;

impl QuickPart for BlogPart {
    fn schema(&self) -> &'static PartSchema {
        &BLOG_SCHEMA
    }
}

pub static GALLERY_SCHEMA: PartSchema = PartSchema::new(
    "GalleryPart",
    &[
        PropertyDescriptor::of::<String>("Caption"),
        PropertyDescriptor::new("Cover", DeclaredType::unsupported("Image")),
    ],
);

/// Part with a property the codec cannot encode
#[derive(Debug, Default)]
pub struct GalleryPart;

impl QuickPart for GalleryPart {
    fn schema(&self) -> &'static PartSchema {
        &GALLERY_SCHEMA
    }
}

/// Provider returning a fixed map
#[derive(Debug, Clone)]
pub struct FixedLogic {
    pub name: &'static str,
    pub parameters: ParameterMap,
}

impl FixedLogic {
    pub fn new(name: &'static str, pairs: &[(&str, serde_json::Value)]) -> Self {
        Self {
            name,
            parameters: params(pairs),
        }
    }
}

impl PartLogic<MapPart> for FixedLogic {
    fn compute_display_parameters(
        &self,
        _part: &MapPart,
        _properties: &PartStorage,
    ) -> Result<Option<ParameterMap>, ProviderError> {
        Ok(Some(self.parameters.clone()))
    }

    fn name(&self) -> &str {
        self.name
    }
}

impl PartLogic<BlogPart> for FixedLogic {
    fn compute_display_parameters(
        &self,
        _part: &BlogPart,
        _properties: &PartStorage,
    ) -> Result<Option<ParameterMap>, ProviderError> {
        Ok(Some(self.parameters.clone()))
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Exposes the map's coordinates and zoom as display parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct MapCoordinatesLogic;

impl PartLogic<MapPart> for MapCoordinatesLogic {
    fn compute_display_parameters(
        &self,
        _part: &MapPart,
        properties: &PartStorage,
    ) -> Result<Option<ParameterMap>, ProviderError> {
        let zoom: i32 = properties.get("Zoom")?;
        if zoom < 0 {
            return Err(ProviderError::invalid_parameter("Zoom", "must not be negative"));
        }
        let latitude: f64 = properties.get("Latitude")?;
        let longitude: f64 = properties.get("Longitude")?;
        Ok(Some(params(&[
            ("Latitude", json!(latitude)),
            ("Longitude", json!(longitude)),
            ("ZoomLevel", json!(zoom)),
        ])))
    }
}

/// Contributes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentLogic;

impl PartLogic<MapPart> for SilentLogic {
    fn compute_display_parameters(
        &self,
        _part: &MapPart,
        _properties: &PartStorage,
    ) -> Result<Option<ParameterMap>, ProviderError> {
        Ok(None)
    }
}

/// Always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingLogic;

impl PartLogic<MapPart> for FailingLogic {
    fn compute_display_parameters(
        &self,
        _part: &MapPart,
        _properties: &PartStorage,
    ) -> Result<Option<ParameterMap>, ProviderError> {
        Err(ProviderError::failed("map service unavailable"))
    }

    fn name(&self) -> &str {
        "FailingLogic"
    }
}

pub fn params(pairs: &[(&str, serde_json::Value)]) -> ParameterMap {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}

/// Manager with the sample parts and no display logic
pub fn setup_test_manager() -> QuickPartsManager {
    setup_test_manager_with_config(QuickPartsConfig::new())
}

pub fn setup_test_manager_with_config(config: QuickPartsConfig) -> QuickPartsManager {
    QuickPartsManager::builder()
        .with_config(config)
        .with_part::<MapPart>()
        .with_part::<BlogPart>()
        .with_part::<GalleryPart>()
        .build()
        .unwrap()
}
