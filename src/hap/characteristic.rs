use super::{
    characteristic_type::CharacteristicType,
    properties::{Props, PropsOverride},
    request::{
        CharacteristicRequest, ReadRequest, ReadRequestResponse, RequestResponse, Responder,
        WriteRequest, WriteRequestResponse,
    },
    value::Value,
};
use crate::error::Error;
use futures::future::BoxFuture;
use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError, RwLock,
    },
};
use tokio::sync::broadcast;
use uuid::Uuid;

pub type ReadHandler = Arc<dyn Fn(ReadRequest) -> BoxFuture<'static, ()> + Send + Sync>;
pub type WriteHandler = Arc<dyn Fn(WriteRequest) -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicEvent {
    Read,
    Write,
}

const NOTIFY_CAPACITY: usize = 16;

/// The protocol-visible value slot of a HAP characteristic.
pub struct Characteristic {
    uuid: Uuid,
    characteristic_type: CharacteristicType,
    display_name: String,
    service: String,
    props: RwLock<Props>,
    value: RwLock<Option<Value>>,
    read_handlers: Mutex<Vec<(HandlerId, ReadHandler)>>,
    write_handlers: Mutex<Vec<(HandlerId, WriteHandler)>>,
    next_handler_id: AtomicU64,
    notify_tx: broadcast::Sender<Value>,
}

impl Characteristic {
    pub fn new(characteristic_type: CharacteristicType, service: &str) -> Self {
        let (notify_tx, _) = broadcast::channel(NOTIFY_CAPACITY);
        Characteristic {
            uuid: characteristic_type.uuid(),
            characteristic_type,
            display_name: characteristic_type.display_name().to_string(),
            service: service.to_string(),
            props: RwLock::new(characteristic_type.default_props()),
            value: RwLock::new(None),
            read_handlers: Mutex::new(Vec::new()),
            write_handlers: Mutex::new(Vec::new()),
            next_handler_id: AtomicU64::new(0),
            notify_tx,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn characteristic_type(&self) -> CharacteristicType {
        self.characteristic_type
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn props(&self) -> Props {
        self.props
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_props(&self, props: &PropsOverride) -> Result<(), Error> {
        let mut current = self.props.write().unwrap_or_else(PoisonError::into_inner);
        current.apply(props)
    }

    /// Restores the type's default props.
    pub fn reset_props(&self) {
        *self.props.write().unwrap_or_else(PoisonError::into_inner) =
            self.characteristic_type.default_props();
    }

    pub fn value(&self) -> Option<Value> {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Pushes `value` as the externally visible value and notifies subscribed
    /// controllers. Request handlers are not involved.
    pub fn update_value(&self, value: Value) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = Some(value.clone());
        // no receivers is fine
        let _ = self.notify_tx.send(value);
    }

    /// Value notifications as a subscribed controller would receive them.
    pub fn notifications(&self) -> broadcast::Receiver<Value> {
        self.notify_tx.subscribe()
    }

    pub fn on_read<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(ReadRequest) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.read_handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        id
    }

    pub fn on_write<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(WriteRequest) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.write_handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        id
    }

    pub fn remove_handler(&self, id: HandlerId) {
        self.read_handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(handler_id, _)| *handler_id != id);
        self.write_handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(handler_id, _)| *handler_id != id);
    }

    pub fn listener_count(&self, event: CharacteristicEvent) -> usize {
        match event {
            CharacteristicEvent::Read => self
                .read_handlers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
            CharacteristicEvent::Write => self
                .write_handlers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
        }
    }

    /// Handles a read from a controller.
    pub async fn handle_read(&self) -> ReadRequestResponse {
        if !self.props().is_readable() {
            return ReadRequestResponse {
                value: None,
                response: RequestResponse::WriteOnly,
            };
        }

        let handlers: Vec<ReadHandler> = self
            .read_handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        if handlers.is_empty() {
            return ReadRequestResponse {
                value: self.value(),
                response: RequestResponse::Success,
            };
        }

        let (responder, res_rx) = Responder::channel();
        for handler in handlers {
            tokio::spawn(handler(ReadRequest {
                request: self.request(),
                responder: responder.clone(),
            }));
        }
        drop(responder);

        match res_rx.await {
            Ok(res) => {
                if res.response == RequestResponse::Success {
                    if let Some(value) = &res.value {
                        self.store_and_notify(value.clone());
                    }
                }
                res
            }
            Err(err) => {
                log::error!("{}: read request dropped: {err}", self.display_name);
                ReadRequestResponse {
                    value: None,
                    response: RequestResponse::CommunicationFailure,
                }
            }
        }
    }

    /// Handles a write from a controller.
    pub async fn handle_write(&self, value: Value) -> WriteRequestResponse {
        if !self.props().is_writable() {
            return WriteRequestResponse::failure(RequestResponse::ReadOnly);
        }
        self.dispatch_write(value).await
    }

    /// Writes `value` as if a controller had, but without the permission
    /// check, so the write handlers still see it.
    pub async fn set_value(&self, value: Value) -> WriteRequestResponse {
        self.dispatch_write(value).await
    }

    async fn dispatch_write(&self, value: Value) -> WriteRequestResponse {
        let handlers: Vec<WriteHandler> = self
            .write_handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        if handlers.is_empty() {
            self.store_and_notify(value.clone());
            return WriteRequestResponse::success(value);
        }

        let (responder, res_rx) = Responder::channel();
        for handler in handlers {
            tokio::spawn(handler(WriteRequest {
                request: self.request(),
                value: value.clone(),
                responder: responder.clone(),
            }));
        }
        drop(responder);

        match res_rx.await {
            Ok(res) => {
                if res.response == RequestResponse::Success {
                    self.store_and_notify(res.value.clone().unwrap_or(value));
                }
                res
            }
            Err(err) => {
                log::error!("{}: write request dropped: {err}", self.display_name);
                WriteRequestResponse::failure(RequestResponse::CommunicationFailure)
            }
        }
    }

    fn store_and_notify(&self, value: Value) {
        let changed = {
            let mut current = self.value.write().unwrap_or_else(PoisonError::into_inner);
            let changed = current.as_ref() != Some(&value);
            *current = Some(value.clone());
            changed
        };
        if changed {
            let _ = self.notify_tx.send(value);
        }
    }

    fn request(&self) -> CharacteristicRequest {
        CharacteristicRequest {
            service: self.service.clone(),
            characteristic: self.uuid,
        }
    }

    fn next_id(&self) -> HandlerId {
        HandlerId(self.next_handler_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Characteristic")
            .field("uuid", &self.uuid)
            .field("characteristic_type", &self.characteristic_type)
            .field("display_name", &self.display_name)
            .field("props", &self.props())
            .field("value", &self.value())
            .finish_non_exhaustive()
    }
}
