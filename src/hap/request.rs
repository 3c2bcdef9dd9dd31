use super::value::Value;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CharacteristicRequest {
    pub service: String,
    pub characteristic: Uuid,
}

#[derive(Debug)]
pub struct ReadRequest {
    pub request: CharacteristicRequest,
    pub responder: Responder<ReadRequestResponse>,
}

#[derive(Debug)]
pub struct WriteRequest {
    pub request: CharacteristicRequest,
    pub value: Value,
    pub responder: Responder<WriteRequestResponse>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadRequestResponse {
    pub value: Option<Value>,
    pub response: RequestResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteRequestResponse {
    /// The value actually accepted, when it differs from what was written.
    pub value: Option<Value>,
    pub response: RequestResponse,
}

impl WriteRequestResponse {
    pub fn success(value: Value) -> Self {
        WriteRequestResponse {
            value: Some(value),
            response: RequestResponse::Success,
        }
    }

    pub fn failure(response: RequestResponse) -> Self {
        WriteRequestResponse {
            value: None,
            response,
        }
    }
}

/// HAP status codes a request can complete with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestResponse {
    Success,
    CommunicationFailure,
    ReadOnly,
    WriteOnly,
    OperationTimedOut,
}

impl RequestResponse {
    pub fn status_code(self) -> i32 {
        match self {
            RequestResponse::Success => 0,
            RequestResponse::CommunicationFailure => -70402,
            RequestResponse::ReadOnly => -70404,
            RequestResponse::WriteOnly => -70405,
            RequestResponse::OperationTimedOut => -70408,
        }
    }
}

/// Single-use reply channel shared between all handlers of one request.
/// The first `send` wins; later ones are dropped.
#[derive(Debug)]
pub struct Responder<T> {
    tx: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for Responder<T> {
    fn clone(&self) -> Self {
        Responder {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Responder<T> {
    pub fn channel() -> (Responder<T>, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Responder {
                tx: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    /// Returns `false` when a response was already sent or nobody is waiting.
    pub fn send(&self, response: T) -> bool {
        let tx = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match tx {
            Some(tx) => tx.send(response).is_ok(),
            None => false,
        }
    }
}
