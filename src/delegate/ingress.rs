//! Read and write requests coming from controllers.
//!
//! Both handlers race the user hook against the delegate's timeout. The
//! request is answered exactly once: by the hook's outcome, or by the
//! fallback when the deadline fires first. A hook that settles after its
//! deadline only gets logged.

use super::{same_value, validate, Inner};
use crate::hap::{
    request::{
        ReadRequest, ReadRequestResponse, RequestResponse, WriteRequest, WriteRequestResponse,
    },
    value::Value,
};
use std::sync::Arc;

impl Inner {
    pub(crate) async fn on_read(self: Arc<Self>, req: ReadRequest) {
        let fallback = self.context.get(&self.key);
        let Some(read_hook) = self.read_hook.clone() else {
            req.responder.send(ReadRequestResponse {
                value: fallback,
                response: RequestResponse::Success,
            });
            return;
        };

        let mut hook = read_hook();
        match tokio::time::timeout(self.timeout, &mut hook).await {
            Ok(Ok(value)) => {
                let validated = validate(self.props.as_ref(), value);
                let current = self.context.get(&self.key);
                let changed = !same_value(current.as_ref(), &validated.value);
                if changed {
                    log::log!(
                        self.change_level(),
                        "{}: read {}{}{}",
                        self.log_prefix,
                        validated.value,
                        self.unit,
                        validated.suffix()
                    );
                    self.context.set(&self.key, validated.value.clone());
                } else {
                    log::debug!(
                        "{}: returned {}{}",
                        self.log_prefix,
                        validated.value,
                        self.unit
                    );
                }
                req.responder.send(ReadRequestResponse {
                    value: Some(validated.value.clone()),
                    response: RequestResponse::Success,
                });
                if changed {
                    self.emit_did_set(&validated.value, false);
                }
            }
            Ok(Err(err)) => {
                log::error!("{}: read error: {err:#}", self.log_prefix);
                log::warn!(
                    "{}: returning previous value {}",
                    self.log_prefix,
                    display_or_none(fallback.as_ref())
                );
                req.responder.send(ReadRequestResponse {
                    value: fallback,
                    response: RequestResponse::Success,
                });
            }
            Err(_) => {
                log::warn!(
                    "{}: read timed out after {}ms, returning previous value {}",
                    self.log_prefix,
                    self.timeout.as_millis(),
                    display_or_none(fallback.as_ref())
                );
                req.responder.send(ReadRequestResponse {
                    value: fallback,
                    response: RequestResponse::Success,
                });
                match hook.await {
                    Ok(value) => log::debug!(
                        "{}: ignored read result {value} - timed out",
                        self.log_prefix
                    ),
                    Err(err) => log::debug!(
                        "{}: ignored read error - timed out: {err:#}",
                        self.log_prefix
                    ),
                }
            }
        }
    }

    pub(crate) async fn on_write(self: Arc<Self>, req: WriteRequest) {
        let validated = validate(self.props.as_ref(), req.value);
        let value = validated.value.clone();
        let current = self.context.get(&self.key);

        match (&current, self.write_only) {
            (Some(current), false) => log::log!(
                self.change_level(),
                "{}: changed from {current}{} to {value}{}{}",
                self.log_prefix,
                self.unit,
                self.unit,
                validated.suffix()
            ),
            _ => log::log!(
                self.change_level(),
                "{}: changed to {value}{}{}",
                self.log_prefix,
                self.unit,
                validated.suffix()
            ),
        }

        if !self.write_only && same_value(current.as_ref(), &value) {
            req.responder.send(WriteRequestResponse::success(value.clone()));
            self.emit_did_touch(&value);
            return;
        }

        let Some(write_hook) = self.write_hook.clone() else {
            self.context.set(&self.key, value.clone());
            req.responder.send(WriteRequestResponse::success(value.clone()));
            self.emit_did_set(&value, true);
            return;
        };

        let mut hook = write_hook(value.clone());
        match tokio::time::timeout(self.timeout, &mut hook).await {
            Ok(Ok(())) => {
                self.context.set(&self.key, value.clone());
                req.responder.send(WriteRequestResponse::success(value.clone()));
                self.emit_did_set(&value, true);
            }
            Ok(Err(err)) => {
                log::error!("{}: write error: {err:#}", self.log_prefix);
                req.responder.send(WriteRequestResponse::failure(
                    RequestResponse::CommunicationFailure,
                ));
            }
            Err(_) => {
                log::warn!(
                    "{}: write timed out after {}ms",
                    self.log_prefix,
                    self.timeout.as_millis()
                );
                req.responder.send(WriteRequestResponse::failure(
                    RequestResponse::OperationTimedOut,
                ));
                match hook.await {
                    Ok(()) => log::debug!(
                        "{}: ignored write of {value} - timed out",
                        self.log_prefix
                    ),
                    Err(err) => log::debug!(
                        "{}: ignored write error - timed out: {err:#}",
                        self.log_prefix
                    ),
                }
            }
        }
    }
}

fn display_or_none(value: Option<&Value>) -> String {
    value.map_or_else(|| "none".to_string(), Value::to_string)
}
