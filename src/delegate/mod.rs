//! Keeps one persisted value and the HAP characteristic exposing it in sync.
//!
//! A [`CharacteristicDelegate`] owns the rules for one key in its service's
//! context. Values reach it from three directions:
//!
//! - the application, through [`CharacteristicDelegate::set`];
//! - a controller reading the characteristic, answered by the read hook;
//! - a controller writing the characteristic, forwarded to the write hook.
//!
//! Each path validates the value against the characteristic's props, writes
//! the context, keeps the characteristic's visible value equal to it and
//! notifies `did_set` listeners. Hooks are raced against a deadline so a slow
//! or failing device never leaves a controller waiting.

mod ingress;
mod listeners;
mod params;
mod validate;

pub use listeners::{DidSetListener, DidTouchListener, ListenerId};
pub use params::{
    DelegateParams, ReadHook, WriteHook, DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS,
};
pub use validate::{validate, Annotation, Validated};

use validate::same_value;

use crate::{
    error::{Error, ErrorType},
    hap::{
        characteristic::{Characteristic, CharacteristicEvent, HandlerId},
        characteristic_type::EndpointKind,
        properties::Props,
        service::Service,
        value::Value,
    },
    store::ValueStore,
};
use futures::FutureExt;
use listeners::Listeners;
use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

pub struct CharacteristicDelegate {
    inner: Arc<Inner>,
    service: Arc<Service>,
}

pub(crate) struct Inner {
    key: String,
    display_name: String,
    log_prefix: String,
    context: Arc<dyn ValueStore>,
    characteristic: Option<Arc<Characteristic>>,
    props: Option<Props>,
    kind: EndpointKind,
    write_only: bool,
    read_hook: Option<ReadHook>,
    write_hook: Option<WriteHook>,
    timeout: Duration,
    unit: String,
    silent: bool,
    listeners: Mutex<Listeners>,
    handler_ids: Mutex<Vec<HandlerId>>,
}

impl CharacteristicDelegate {
    pub fn new(service: &Arc<Service>, params: DelegateParams) -> Result<Self, Error> {
        let DelegateParams {
            key,
            value,
            silent,
            characteristic: characteristic_type,
            props: props_override,
            unit,
            timeout_ms,
            read_hook,
            write_hook,
        } = params;

        if key.trim().is_empty() {
            return Err(Error::new("key", "must be a non-empty string", ErrorType::InvalidKey));
        }
        let timeout_ms = timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&timeout_ms) {
            return Err(Error::from_string(
                format!("timeoutMs: {timeout_ms}: not in [{MIN_TIMEOUT_MS}, {MAX_TIMEOUT_MS}]"),
                ErrorType::InvalidTimeout,
            ));
        }
        // check the override against the type defaults before touching the service
        if let (Some(characteristic_type), Some(props_override)) =
            (characteristic_type, &props_override)
        {
            characteristic_type.default_props().apply(props_override)?;
        }
        service.claim_key(&key)?;

        let characteristic = characteristic_type.map(|characteristic_type| {
            match service.get_characteristic(characteristic_type) {
                Some(existing) => {
                    existing.reset_props();
                    existing
                }
                None => service.add_characteristic(characteristic_type),
            }
        });
        if let Some(characteristic) = &characteristic {
            if let Some(props_override) = &props_override {
                characteristic.set_props(props_override)?;
            }
        } else if props_override.is_some() {
            log::warn!("{}: {key}: props ignored without characteristic", service.name());
        }

        let props = characteristic.as_ref().map(|c| c.props());
        let kind = characteristic
            .as_ref()
            .map(|c| c.characteristic_type().kind())
            .unwrap_or(EndpointKind::Normal);
        let readable = props.as_ref().is_some_and(Props::is_readable);
        let writable = props.as_ref().is_some_and(Props::is_writable);
        let write_only = props.as_ref().is_some_and(Props::is_write_only);
        let unit = unit.unwrap_or_else(|| {
            props
                .as_ref()
                .and_then(|p| p.unit)
                .map(|u| u.suffix().to_string())
                .unwrap_or_default()
        });
        let display_name = characteristic
            .as_ref()
            .map(|c| c.display_name().to_string())
            .unwrap_or_else(|| key.clone());
        let log_prefix = format!("{}: {}", service.name(), display_name);

        let wire_read = read_hook.is_some() && readable;
        if read_hook.is_some() && !wire_read {
            log::warn!("{log_prefix}: read hook ignored: not readable");
        }
        let wire_write = writable && kind != EndpointKind::SingleFire;
        if write_hook.is_some() && !wire_write {
            log::warn!("{log_prefix}: write hook ignored: not writable");
        }

        let inner = Arc::new(Inner {
            key: key.clone(),
            display_name,
            log_prefix,
            context: service.context(),
            characteristic: characteristic.clone(),
            props,
            kind,
            write_only,
            read_hook: read_hook.filter(|_| wire_read),
            write_hook: write_hook.filter(|_| wire_write),
            timeout: Duration::from_millis(timeout_ms),
            unit,
            silent,
            listeners: Mutex::new(Listeners::default()),
            handler_ids: Mutex::new(Vec::new()),
        });

        if let Some(characteristic) = &characteristic {
            let mut handler_ids = Vec::new();
            if wire_read {
                let weak = Arc::downgrade(&inner);
                handler_ids.push(characteristic.on_read(move |req| {
                    let weak = weak.clone();
                    async move {
                        if let Some(inner) = weak.upgrade() {
                            inner.on_read(req).await;
                        }
                    }
                    .boxed()
                }));
            }
            if wire_write {
                let weak = Arc::downgrade(&inner);
                handler_ids.push(characteristic.on_write(move |req| {
                    let weak = weak.clone();
                    async move {
                        if let Some(inner) = weak.upgrade() {
                            inner.on_write(req).await;
                        }
                    }
                    .boxed()
                }));
                let count = characteristic.listener_count(CharacteristicEvent::Write);
                if count > 1 {
                    log::warn!("{}: {count} write listeners", inner.log_prefix);
                }
            }
            *inner.lock_handler_ids() = handler_ids;
        }

        // a persisted value wins over the initial one, both are brought in line
        // with the props without logging or events
        if let Some(initial) = inner.context.get(&key).or(value) {
            let initial = validate(inner.props.as_ref(), initial).value;
            inner.context.set(&key, initial.clone());
            if let Some(characteristic) = &characteristic {
                log::debug!("{}: initial value {initial}{}", inner.log_prefix, inner.unit);
                characteristic.update_value(initial);
            }
        }

        Ok(CharacteristicDelegate {
            inner,
            service: service.clone(),
        })
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    pub fn display_name(&self) -> &str {
        &self.inner.display_name
    }

    pub fn unit(&self) -> &str {
        &self.inner.unit
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    pub fn characteristic(&self) -> Option<&Arc<Characteristic>> {
        self.inner.characteristic.as_ref()
    }

    /// Current value from the context.
    pub fn value(&self) -> Option<Value> {
        self.inner.context.get(&self.inner.key)
    }

    /// Sets the value from the application side.
    pub fn set<V: Into<Value>>(&self, candidate: V) {
        self.inner.set(candidate.into());
    }

    /// Shows `value` on the characteristic without making it the delegate's
    /// value: no context write, no logging, no events.
    pub fn push_only<V: Into<Value>>(&self, value: V) {
        if let Some(characteristic) = &self.inner.characteristic {
            characteristic.update_value(value.into());
        }
    }

    /// `listener(value, by_controller)` runs after every accepted change.
    pub fn on_did_set<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Value, bool) + Send + Sync + 'static,
    {
        self.inner.lock_listeners().add_did_set(Arc::new(listener))
    }

    /// `listener(value)` runs when a controller writes the current value.
    pub fn on_did_touch<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.inner.lock_listeners().add_did_touch(Arc::new(listener))
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.lock_listeners().remove(id)
    }

    /// Tears the delegate down: drops listeners, unhooks and detaches the
    /// characteristic, and removes the key from the context.
    pub fn destroy(self) {
        let inner = &self.inner;
        inner.lock_listeners().clear();
        if let Some(characteristic) = &inner.characteristic {
            for id in inner.lock_handler_ids().drain(..) {
                characteristic.remove_handler(id);
            }
            self.service.remove_characteristic(characteristic);
        }
        inner.context.remove(&inner.key);
        self.service.release_key(&inner.key);
        log::debug!("{}: destroyed", inner.log_prefix);
    }
}

impl fmt::Debug for CharacteristicDelegate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CharacteristicDelegate")
            .field("key", &self.inner.key)
            .field("value", &self.value())
            .field("characteristic", &self.inner.characteristic)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn set(&self, candidate: Value) {
        let validated = validate(self.props.as_ref(), candidate);
        let current = self.context.get(&self.key);
        if self.kind != EndpointKind::SingleFire
            && same_value(current.as_ref(), &validated.value)
        {
            return;
        }

        match self.kind {
            EndpointKind::SingleFire => log::log!(
                self.change_level(),
                "{}: {}{}",
                self.log_prefix,
                switch_event_label(&validated.value),
                validated.suffix()
            ),
            EndpointKind::Normal => match &current {
                Some(current) => log::log!(
                    self.change_level(),
                    "{}: from {current}{} to {}{}{}",
                    self.log_prefix,
                    self.unit,
                    validated.value,
                    self.unit,
                    validated.suffix()
                ),
                None => log::log!(
                    self.change_level(),
                    "{}: set to {}{}{}",
                    self.log_prefix,
                    validated.value,
                    self.unit,
                    validated.suffix()
                ),
            },
        }

        self.context.set(&self.key, validated.value.clone());
        if let Some(characteristic) = &self.characteristic {
            characteristic.update_value(validated.value.clone());
        }
        self.emit_did_set(&validated.value, false);
    }

    fn change_level(&self) -> log::Level {
        if self.silent {
            log::Level::Debug
        } else {
            log::Level::Info
        }
    }

    fn emit_did_set(&self, value: &Value, by_controller: bool) {
        let listeners = self.lock_listeners().did_set();
        for listener in listeners {
            listener(value, by_controller);
        }
    }

    fn emit_did_touch(&self, value: &Value) {
        let listeners = self.lock_listeners().did_touch();
        for listener in listeners {
            listener(value);
        }
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_handler_ids(&self) -> std::sync::MutexGuard<'_, Vec<HandlerId>> {
        self.handler_ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn switch_event_label(value: &Value) -> String {
    match value.as_i64() {
        Some(0) => "Single Press".to_string(),
        Some(1) => "Double Press".to_string(),
        Some(2) => "Long Press".to_string(),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hap::{
        characteristic_type::CharacteristicType,
        properties::{Perm, PropsOverride},
    };

    fn service() -> Arc<Service> {
        let _ = pretty_env_logger::try_init();
        Arc::new(Service::with_memory_context("Lamp", 0x43))
    }

    fn record_did_set(delegate: &CharacteristicDelegate) -> Arc<Mutex<Vec<(Value, bool)>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        delegate.on_did_set(move |value, by_controller| {
            sink.lock().unwrap().push((value.clone(), by_controller))
        });
        seen
    }

    #[test]
    fn test_construction_errors() {
        let service = service();
        let err = CharacteristicDelegate::new(&service, DelegateParams::new("  ")).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidKey);

        for timeout_ms in [499, 5001] {
            let err = CharacteristicDelegate::new(
                &service,
                DelegateParams::new("on").timeout_ms(timeout_ms),
            )
            .unwrap_err();
            assert_eq!(err.error_type(), ErrorType::InvalidTimeout);
        }

        let err = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("brightness")
                .characteristic(CharacteristicType::Brightness)
                .props(PropsOverride {
                    min_value: Some(90.0),
                    max_value: Some(10.0),
                    ..Default::default()
                }),
        )
        .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidProps);
        // nothing was bound by the failed attempts
        assert!(service.characteristics().is_empty());
        CharacteristicDelegate::new(&service, DelegateParams::new("on")).unwrap();
    }

    #[test]
    fn test_duplicate_key_rejected_until_destroyed() {
        let service = service();
        let first = CharacteristicDelegate::new(&service, DelegateParams::new("on")).unwrap();
        let err = CharacteristicDelegate::new(&service, DelegateParams::new("on")).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::DuplicateKey);
        first.destroy();
        CharacteristicDelegate::new(&service, DelegateParams::new("on")).unwrap();
    }

    #[test]
    fn test_timeout_default_and_bounds() {
        let service = service();
        let delegate = CharacteristicDelegate::new(&service, DelegateParams::new("a")).unwrap();
        assert_eq!(delegate.timeout(), Duration::from_millis(1000));
        let delegate =
            CharacteristicDelegate::new(&service, DelegateParams::new("b").timeout_ms(500))
                .unwrap();
        assert_eq!(delegate.timeout(), Duration::from_millis(500));
        let delegate =
            CharacteristicDelegate::new(&service, DelegateParams::new("c").timeout_ms(5000))
                .unwrap();
        assert_eq!(delegate.timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn test_initial_value_pushed_without_events() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("brightness")
                .characteristic(CharacteristicType::Brightness)
                .value(40),
        )
        .unwrap();
        assert_eq!(delegate.value(), Some(Value::Int(40)));
        let characteristic = delegate.characteristic().unwrap();
        assert_eq!(characteristic.value(), Some(Value::Int(40)));
        assert_eq!(delegate.unit(), "%");
        assert_eq!(delegate.display_name(), "Brightness");
    }

    #[test]
    fn test_persisted_value_wins_over_initial() {
        let service = service();
        service.context().set("on", Value::Bool(true));
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("on")
                .characteristic(CharacteristicType::On)
                .value(false),
        )
        .unwrap();
        assert_eq!(delegate.value(), Some(Value::Bool(true)));
        assert_eq!(
            delegate.characteristic().unwrap().value(),
            Some(Value::Bool(true))
        );
    }

    #[test]
    fn test_binds_existing_characteristic_and_resets_props() {
        let service = service();
        let existing = service.add_characteristic(CharacteristicType::Brightness);
        existing
            .set_props(&PropsOverride {
                max_value: Some(10.0),
                ..Default::default()
            })
            .unwrap();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("brightness")
                .characteristic(CharacteristicType::Brightness)
                .props(PropsOverride {
                    min_value: Some(20.0),
                    ..Default::default()
                })
                .unit(" pct"),
        )
        .unwrap();
        assert!(Arc::ptr_eq(delegate.characteristic().unwrap(), &existing));
        let props = existing.props();
        assert_eq!(props.min_value, Some(20.0));
        assert_eq!(props.max_value, Some(100.0));
        assert_eq!(delegate.unit(), " pct");
    }

    #[test]
    fn test_set_emits_once_per_change() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("on").characteristic(CharacteristicType::On),
        )
        .unwrap();
        let seen = record_did_set(&delegate);

        delegate.set(true);
        delegate.set(true);
        delegate.set(false);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(Value::Bool(true), false), (Value::Bool(false), false)]
        );
        assert_eq!(delegate.value(), Some(Value::Bool(false)));
        assert_eq!(
            delegate.characteristic().unwrap().value(),
            Some(Value::Bool(false))
        );
        assert_eq!(service.context().get("on"), Some(Value::Bool(false)));
    }

    #[test]
    fn test_set_is_validated() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("brightness")
                .characteristic(CharacteristicType::Brightness)
                .value(50),
        )
        .unwrap();
        let seen = record_did_set(&delegate);
        delegate.set(150);
        delegate.set(120);
        assert_eq!(delegate.value(), Some(Value::Int(100)));
        // 120 clamps to the current value
        assert_eq!(*seen.lock().unwrap(), vec![(Value::Int(100), false)]);
    }

    #[test]
    fn test_int_initial_on_float_endpoint_is_not_a_change() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("target")
                .characteristic(CharacteristicType::TargetTemperature)
                .value(20),
        )
        .unwrap();
        assert_eq!(delegate.value(), Some(Value::Float(20.0)));
        assert_eq!(
            delegate.characteristic().unwrap().value(),
            Some(Value::Float(20.0))
        );
        let seen = record_did_set(&delegate);

        delegate.set(20);
        delegate.set(20.0);
        assert!(seen.lock().unwrap().is_empty());
        delegate.set(21);
        assert_eq!(*seen.lock().unwrap(), vec![(Value::Float(21.0), false)]);
    }

    #[test]
    fn test_persisted_value_is_brought_in_range() {
        let service = service();
        service.context().set("brightness", Value::Float(140.2));
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("brightness").characteristic(CharacteristicType::Brightness),
        )
        .unwrap();
        let seen = record_did_set(&delegate);
        assert_eq!(delegate.value(), Some(Value::Int(100)));
        assert_eq!(service.context().get("brightness"), Some(Value::Int(100)));
        delegate.set(100);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_set_compares_numbers_by_value() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("target").characteristic(CharacteristicType::TargetTemperature),
        )
        .unwrap();
        // a mirror written behind the delegate's back
        service.context().set("target", Value::Int(20));
        let seen = record_did_set(&delegate);
        delegate.set(20.0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_repeated_nan_is_one_change() {
        let service = service();
        let delegate = CharacteristicDelegate::new(&service, DelegateParams::new("drift")).unwrap();
        let seen = record_did_set(&delegate);
        delegate.set(f64::NAN);
        delegate.set(f64::NAN);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_integer_range_without_integer_rejected() {
        let service = service();
        let err = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("brightness")
                .characteristic(CharacteristicType::Brightness)
                .props(PropsOverride {
                    min_value: Some(0.5),
                    max_value: Some(0.7),
                    ..Default::default()
                }),
        )
        .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidProps);
        assert!(service.characteristics().is_empty());
    }

    #[tokio::test]
    async fn test_single_fire_never_suppressed() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("button")
                .characteristic(CharacteristicType::ProgrammableSwitchEvent),
        )
        .unwrap();
        let mut notifications = delegate.characteristic().unwrap().notifications();
        let seen = record_did_set(&delegate);

        delegate.set(0);
        delegate.set(0);

        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(notifications.recv().await.unwrap(), Value::Int(0));
        assert_eq!(notifications.recv().await.unwrap(), Value::Int(0));
    }

    #[test]
    fn test_single_fire_never_wires_write() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("button")
                .characteristic(CharacteristicType::ProgrammableSwitchEvent)
                .props(PropsOverride {
                    perms: Some(vec![Perm::PairedRead, Perm::PairedWrite, Perm::Notify]),
                    ..Default::default()
                })
                .with_write_hook(|_| async { Ok(()) }),
        )
        .unwrap();
        let characteristic = delegate.characteristic().unwrap();
        assert!(characteristic.props().is_writable());
        assert_eq!(characteristic.listener_count(CharacteristicEvent::Write), 0);
    }

    #[test]
    fn test_write_wired_without_hook() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("on").characteristic(CharacteristicType::On),
        )
        .unwrap();
        let characteristic = delegate.characteristic().unwrap();
        assert_eq!(characteristic.listener_count(CharacteristicEvent::Write), 1);
        assert_eq!(characteristic.listener_count(CharacteristicEvent::Read), 0);
    }

    #[test]
    fn test_read_hook_needs_read_permission() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("identify")
                .characteristic(CharacteristicType::Identify)
                .with_read_hook(|| async { Ok(Value::Bool(true)) }),
        )
        .unwrap();
        let characteristic = delegate.characteristic().unwrap();
        assert_eq!(characteristic.listener_count(CharacteristicEvent::Read), 0);
        assert_eq!(characteristic.listener_count(CharacteristicEvent::Write), 1);
    }

    #[test]
    fn test_push_only_leaves_mirror() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("on")
                .characteristic(CharacteristicType::On)
                .value(false),
        )
        .unwrap();
        let seen = record_did_set(&delegate);
        delegate.push_only(true);
        assert_eq!(
            delegate.characteristic().unwrap().value(),
            Some(Value::Bool(true))
        );
        assert_eq!(delegate.value(), Some(Value::Bool(false)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_delegate_without_characteristic() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("lastSeen").value("never").silent(),
        )
        .unwrap();
        let seen = record_did_set(&delegate);
        delegate.set("today");
        assert!(delegate.characteristic().is_none());
        assert_eq!(delegate.display_name(), "lastSeen");
        assert_eq!(delegate.value(), Some(Value::from("today")));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_listener_removed() {
        let service = service();
        let delegate = CharacteristicDelegate::new(&service, DelegateParams::new("n")).unwrap();
        let seen = Arc::new(Mutex::new(0));
        let sink = seen.clone();
        let id = delegate.on_did_set(move |_, _| *sink.lock().unwrap() += 1);
        delegate.set(1);
        assert!(delegate.remove_listener(id));
        delegate.set(2);
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_destroy_releases_everything() {
        let service = service();
        let delegate = CharacteristicDelegate::new(
            &service,
            DelegateParams::new("on")
                .characteristic(CharacteristicType::On)
                .value(true),
        )
        .unwrap();
        let characteristic = delegate.characteristic().unwrap().clone();
        delegate.destroy();

        assert_eq!(characteristic.listener_count(CharacteristicEvent::Write), 0);
        assert!(!service.test_characteristic(CharacteristicType::On));
        assert_eq!(service.context().get("on"), None);
    }

    #[test]
    fn test_switch_event_labels() {
        assert_eq!(switch_event_label(&Value::Int(0)), "Single Press");
        assert_eq!(switch_event_label(&Value::Int(1)), "Double Press");
        assert_eq!(switch_event_label(&Value::Int(2)), "Long Press");
        assert_eq!(switch_event_label(&Value::Int(7)), "7");
    }
}
