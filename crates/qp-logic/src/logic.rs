//! Display logic providers
//!
//! A [`PartLogic<P>`] contributes display parameters for parts of exactly
//! type `P`. Providers are registered once at startup.

use crate::error::ProviderError;
use indexmap::IndexMap;
use qp_parts::{PartStorage, QuickPart};

/// Ordered display parameters
pub type ParameterMap = IndexMap<String, serde_json::Value>;

/// Display logic for one part type
///
/// # Example
/// ```rust,ignore
/// pub struct MapLogic;
///
/// impl PartLogic<MapPart> for MapLogic {
///     fn compute_display_parameters(
///         &self,
///         _part: &MapPart,
///         properties: &PartStorage,
///     ) -> Result<Option<ParameterMap>, ProviderError> {
///         let zoom: i32 = properties.get("Zoom")?;
///         Ok(Some(ParameterMap::from([("ZoomLevel".into(), zoom.into())])))
///     }
/// }
/// ```
pub trait PartLogic<P: QuickPart>: Send + Sync + 'static {
    /// Compute parameters for a part
    ///
    /// `properties` gives access to the part's persisted properties.
    /// Returning `None` contributes nothing.
    ///
    /// # Errors
    /// Any [`ProviderError`]; the dispatcher decides whether it aborts
    fn compute_display_parameters(
        &self,
        part: &P,
        properties: &PartStorage,
    ) -> Result<Option<ParameterMap>, ProviderError>;

    /// Name used in logs and errors
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
