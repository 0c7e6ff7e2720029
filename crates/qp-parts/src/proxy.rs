//! Property interception
//!
//! [`PropertyInterceptor`] wraps parts into [`PartProxy`] values. A proxy
//! routes every member call: accessors of declared properties go to the
//! document, everything else to the part's own implementation.
//!
//! # Routing
//! 1. Members declared on an excluded base (the part's schema base, or any
//!    configured base) pass through to [`QuickPart::invoke`].
//! 2. Members declared on any other type than the part itself fail with
//!    [`PartError::MemberNotFound`].
//! 3. `set_<Prop>` encodes its single argument and writes the attribute.
//! 4. `get_<Prop>` reads and decodes the attribute, defaulting when absent.
//! 5. Anything else passes through.

use crate::accessor::{AccessorCache, AccessorKind};
use crate::error::PartError;
use crate::part::{MemberCall, QuickPart};
use crate::schema::{PartSchema, CONTENT_PART};
use crate::storage::PartStorage;
use qp_codec::{InfosetValue, Value, ValueCodec};
use qp_infoset::AttributeDocument;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Interceptor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptorConfig {
    /// Declaring types whose members are never redirected
    pub excluded_bases: Vec<String>,
}

impl InterceptorConfig {
    /// Add an excluded base
    #[must_use]
    pub fn with_excluded_base(mut self, base: impl Into<String>) -> Self {
        self.excluded_bases.push(base.into());
        self
    }
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            excluded_bases: vec![CONTENT_PART.to_string()],
        }
    }
}

/// Wraps parts so their declared properties persist to a document
///
/// Owns the accessor cache shared by every proxy it creates.
#[derive(Debug)]
pub struct PropertyInterceptor {
    codec: ValueCodec,
    excluded_bases: Arc<[String]>,
    cache: AccessorCache,
}

impl PropertyInterceptor {
    /// Create interceptor
    #[must_use]
    pub fn new(codec: ValueCodec, config: &InterceptorConfig) -> Self {
        Self {
            codec,
            excluded_bases: config.excluded_bases.clone().into(),
            cache: AccessorCache::new(),
        }
    }

    /// Codec handed to every proxy
    #[inline]
    #[must_use]
    pub fn codec(&self) -> &ValueCodec {
        &self.codec
    }

    /// Configured excluded bases
    #[inline]
    #[must_use]
    pub fn excluded_bases(&self) -> &[String] {
        &self.excluded_bases
    }

    /// Accessor table cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &AccessorCache {
        &self.cache
    }

    /// Wrap a part over a document
    #[must_use]
    pub fn wrap(&self, part: Box<dyn QuickPart>, document: Arc<dyn AttributeDocument>) -> PartProxy {
        let accessors = self.cache.table(part.schema());
        PartProxy {
            inner: part,
            storage: PartStorage::new(accessors, document, self.codec),
            excluded_bases: Arc::clone(&self.excluded_bases),
        }
    }
}

impl Default for PropertyInterceptor {
    fn default() -> Self {
        Self::new(ValueCodec::new(), &InterceptorConfig::default())
    }
}

/// A part whose declared properties live in an attribute document
pub struct PartProxy {
    inner: Box<dyn QuickPart>,
    storage: PartStorage,
    excluded_bases: Arc<[String]>,
}

impl PartProxy {
    /// Route a member call
    ///
    /// Setters return [`Value::Null`]; getters the decoded value.
    ///
    /// # Errors
    /// - [`PartError::MemberNotFound`] for members of unrelated declaring types
    /// - [`PartError::ArgumentCount`] for accessors called with the wrong arity
    /// - codec errors from encoding or decoding; nothing is written on failure
    /// - whatever the part's own implementation returns for other members
    pub fn dispatch(&mut self, call: &MemberCall) -> Result<Value, PartError> {
        if self.is_excluded(&call.declaring_type) {
            tracing::trace!(call = %call, "passing through base member");
            return self.inner.invoke(call, &self.storage);
        }
        if call.declaring_type != self.part_name() {
            return Err(PartError::member_not_found(
                self.part_name(),
                format!("{}.{}", call.declaring_type, call.name),
            ));
        }

        match self.storage.accessors().classify(&call.name) {
            Some((AccessorKind::Setter, property)) => {
                let [value] = call.args.as_slice() else {
                    return Err(PartError::argument_count(&call.name, 1, call.args.len()));
                };
                self.storage.write(property, value)?;
                Ok(Value::Null)
            }
            Some((AccessorKind::Getter, property)) => {
                if !call.args.is_empty() {
                    return Err(PartError::argument_count(&call.name, 0, call.args.len()));
                }
                self.storage.read(property)
            }
            None => self.inner.invoke(call, &self.storage),
        }
    }

    /// Read a declared property as `T`
    ///
    /// # Errors
    /// See [`PartStorage::get`]
    pub fn get<T: InfosetValue>(&self, property: &str) -> Result<T, PartError> {
        self.storage.get(property)
    }

    /// Write a declared property from `T`
    ///
    /// # Errors
    /// See [`PartStorage::set`]
    pub fn set<T: InfosetValue>(&self, property: &str, value: &T) -> Result<(), PartError> {
        self.storage.set(property, value)
    }

    /// Read a property, storing a computed default on first read
    ///
    /// # Errors
    /// See [`PartStorage::retrieve_or_store`]
    pub fn retrieve_or_store<T, F>(&self, property: &str, default: F) -> Result<T, PartError>
    where
        T: InfosetValue,
        F: FnOnce() -> T,
    {
        self.storage.retrieve_or_store(property, default)
    }

    /// Point the proxy at another document
    pub fn attach(&mut self, document: Arc<dyn AttributeDocument>) {
        self.storage.attach(document);
    }

    /// Property storage
    #[inline]
    #[must_use]
    pub fn storage(&self) -> &PartStorage {
        &self.storage
    }

    /// Backing document
    #[inline]
    #[must_use]
    pub fn document(&self) -> &Arc<dyn AttributeDocument> {
        self.storage.document()
    }

    /// Part schema
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &'static PartSchema {
        self.storage.schema()
    }

    /// Part name
    #[inline]
    #[must_use]
    pub fn part_name(&self) -> &'static str {
        self.schema().name
    }

    /// Rust type name of the wrapped part
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Wrapped part
    #[must_use]
    pub fn inner(&self) -> &dyn QuickPart {
        &*self.inner
    }

    /// Wrapped part, mutably
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut dyn QuickPart {
        &mut *self.inner
    }

    /// Wrapped part as its concrete type
    #[must_use]
    pub fn downcast_ref<P: QuickPart>(&self) -> Option<&P> {
        self.inner().as_any().downcast_ref::<P>()
    }

    /// Wrapped part as its concrete type, mutably
    #[must_use]
    pub fn downcast_mut<P: QuickPart>(&mut self) -> Option<&mut P> {
        self.inner_mut().as_any_mut().downcast_mut::<P>()
    }

    /// Unwrap the part
    #[must_use]
    pub fn into_inner(self) -> Box<dyn QuickPart> {
        self.inner
    }

    fn is_excluded(&self, declaring_type: &str) -> bool {
        declaring_type == self.schema().base
            || self.excluded_bases.iter().any(|b| b == declaring_type)
    }
}

impl fmt::Debug for PartProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartProxy")
            .field("part", &self.inner)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyDescriptor;
    use qp_infoset::Infoset;

    static COUNTER: PartSchema = PartSchema::new(
        "CounterPart",
        &[
            PropertyDescriptor::of::<i32>("Count"),
            PropertyDescriptor::of::<String>("Label"),
        ],
    );

    #[derive(Debug, Default)]
    struct CounterPart {
        calls: usize,
    }

    impl QuickPart for CounterPart {
        fn schema(&self) -> &'static PartSchema {
            &COUNTER
        }

        fn invoke(&mut self, call: &MemberCall, storage: &PartStorage) -> Result<Value, PartError> {
            self.calls += 1;
            match call.name.as_str() {
                "Describe" => {
                    let label: String = storage.get("Label")?;
                    let count: i32 = storage.get("Count")?;
                    Ok(Value::String(format!("{label}={count}")))
                }
                "get_ContentItemId" => Ok(Value::Int32(7)),
                _ => Err(PartError::member_not_found(COUNTER.name, &call.name)),
            }
        }
    }

    fn proxy() -> (PartProxy, Arc<Infoset>) {
        let infoset = Arc::new(Infoset::new());
        let proxy = PropertyInterceptor::default().wrap(Box::new(CounterPart::default()), infoset.clone());
        (proxy, infoset)
    }

    #[test]
    fn setter_writes_attribute() {
        let (mut proxy, infoset) = proxy();
        let result = proxy
            .dispatch(&MemberCall::setter("CounterPart", "Count", 5))
            .unwrap();
        assert_eq!(result, Value::Null);
        assert_eq!(infoset.get("CounterPart", "Count").as_deref(), Some("5"));
        assert_eq!(proxy.downcast_ref::<CounterPart>().unwrap().calls, 0);
    }

    #[test]
    fn getter_reads_attribute_or_default() {
        let (mut proxy, infoset) = proxy();
        let call = MemberCall::getter("CounterPart", "Count");
        assert_eq!(proxy.dispatch(&call).unwrap(), Value::Int32(0));
        infoset.set("CounterPart", "Count", "12".to_string());
        assert_eq!(proxy.dispatch(&call).unwrap(), Value::Int32(12));
    }

    #[test]
    fn base_members_pass_through() {
        let (mut proxy, infoset) = proxy();
        let call = MemberCall::new("ContentPart", "get_ContentItemId", Vec::new());
        assert_eq!(proxy.dispatch(&call).unwrap(), Value::Int32(7));

        // Even an accessor-shaped name declared on the base is not redirected
        let call = MemberCall::new("ContentPart", "get_Count", Vec::new());
        assert!(matches!(
            proxy.dispatch(&call),
            Err(PartError::MemberNotFound { .. })
        ));
        assert!(infoset.is_empty());
    }

    #[test]
    fn other_members_reach_the_part() {
        let (mut proxy, _) = proxy();
        proxy.set("Label", &"hits".to_string()).unwrap();
        proxy.set("Count", &3).unwrap();
        let call = MemberCall::new("CounterPart", "Describe", Vec::new());
        assert_eq!(
            proxy.dispatch(&call).unwrap(),
            Value::String("hits=3".to_string())
        );
        assert_eq!(proxy.downcast_ref::<CounterPart>().unwrap().calls, 1);
    }

    #[test]
    fn setter_with_wrong_value_kind_writes_nothing() {
        let (mut proxy, infoset) = proxy();
        let err = proxy
            .dispatch(&MemberCall::setter("CounterPart", "Count", "five"))
            .unwrap_err();
        assert!(matches!(err, PartError::Codec(_)));
        assert!(infoset.is_empty());
    }

    #[test]
    fn accessor_arity_is_checked() {
        let (mut proxy, _) = proxy();
        let call = MemberCall::new("CounterPart", "set_Count", Vec::new());
        assert_eq!(
            proxy.dispatch(&call).unwrap_err(),
            PartError::argument_count("set_Count", 1, 0)
        );
    }

    #[test]
    fn configured_bases_are_excluded() {
        let config = InterceptorConfig::default().with_excluded_base("Widget");
        let interceptor = PropertyInterceptor::new(ValueCodec::new(), &config);
        let infoset = Arc::new(Infoset::new());
        let mut proxy = interceptor.wrap(Box::new(CounterPart::default()), infoset.clone());
        let call = MemberCall::new("Widget", "set_Count", vec![Value::Int32(1)]);
        assert!(proxy.dispatch(&call).is_err());
        assert!(infoset.is_empty());
    }

    #[test]
    fn unrelated_declaring_types_are_rejected() {
        let (mut proxy, infoset) = proxy();
        let err = proxy
            .dispatch(&MemberCall::setter("GaugePart", "Count", 4))
            .unwrap_err();
        assert_eq!(
            err,
            PartError::member_not_found("CounterPart", "GaugePart.set_Count")
        );
        assert!(infoset.is_empty());
        assert_eq!(proxy.downcast_ref::<CounterPart>().unwrap().calls, 0);
    }

    #[test]
    fn attach_switches_documents() {
        let (mut proxy, first) = proxy();
        proxy.set("Count", &1).unwrap();
        let second = Arc::new(Infoset::new());
        proxy.attach(second.clone());
        proxy.set("Count", &2).unwrap();
        assert_eq!(first.get("CounterPart", "Count").as_deref(), Some("1"));
        assert_eq!(second.get("CounterPart", "Count").as_deref(), Some("2"));
    }

    #[test]
    fn proxies_share_cached_tables() {
        let interceptor = PropertyInterceptor::default();
        let a = interceptor.wrap(Box::new(CounterPart::default()), Arc::new(Infoset::new()));
        let b = interceptor.wrap(Box::new(CounterPart::default()), Arc::new(Infoset::new()));
        assert!(Arc::ptr_eq(a.storage().accessors(), b.storage().accessors()));
        assert_eq!(interceptor.cache().len(), 1);
        assert!(a.type_name().ends_with("CounterPart"));
    }
}
