use crate::hap::{
    characteristic_type::CharacteristicType, properties::PropsOverride, value::Value,
};
use futures::{future::BoxFuture, FutureExt};
use serde::Deserialize;
use std::{fmt, future::Future, sync::Arc};

pub type ReadHook = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync>;
pub type WriteHook = Arc<dyn Fn(Value) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
pub const MIN_TIMEOUT_MS: u64 = 500;
pub const MAX_TIMEOUT_MS: u64 = 5000;

/// Construction parameters for a [`CharacteristicDelegate`].
///
/// Everything except the hooks can be loaded from JSON:
///
/// ```json
/// { "key": "brightness", "characteristic": "Brightness", "value": 40,
///   "props": { "maxValue": 80 }, "timeoutMs": 2000 }
/// ```
///
/// [`CharacteristicDelegate`]: super::CharacteristicDelegate
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelegateParams {
    /// Context key, unique within the service.
    pub key: String,
    /// Initial value, used when the context has none yet.
    pub value: Option<Value>,
    /// Log value changes at debug instead of info.
    pub silent: bool,
    pub characteristic: Option<CharacteristicType>,
    pub props: Option<PropsOverride>,
    /// Overrides the unit derived from the props.
    pub unit: Option<String>,
    pub timeout_ms: Option<u64>,
    #[serde(skip)]
    pub read_hook: Option<ReadHook>,
    #[serde(skip)]
    pub write_hook: Option<WriteHook>,
}

impl DelegateParams {
    pub fn new<T: Into<String>>(key: T) -> Self {
        DelegateParams {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn characteristic(mut self, characteristic_type: CharacteristicType) -> Self {
        self.characteristic = Some(characteristic_type);
        self
    }

    pub fn value<V: Into<Value>>(mut self, value: V) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn props(mut self, props: PropsOverride) -> Self {
        self.props = Some(props);
        self
    }

    pub fn unit<T: Into<String>>(mut self, unit: T) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_read_hook<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        self.read_hook = Some(Arc::new(move || hook().boxed()));
        self
    }

    pub fn with_write_hook<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.write_hook = Some(Arc::new(move |value| hook(value).boxed()));
        self
    }
}

impl fmt::Debug for DelegateParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DelegateParams")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("silent", &self.silent)
            .field("characteristic", &self.characteristic)
            .field("props", &self.props)
            .field("unit", &self.unit)
            .field("timeout_ms", &self.timeout_ms)
            .field("read_hook", &self.read_hook.is_some())
            .field("write_hook", &self.write_hook.is_some())
            .finish()
    }
}
