//! Context passed to command handlers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;
use crate::vote::Actor;

/// Everything a handler sees: the command name, its JSON input, the session and
/// the shared application state `S`.
pub struct Context<'a, S> {
    command_name: String,
    input: Value,
    session: Session,
    state: &'a S,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(command_name: String, input: Value, session: Session, state: &'a S) -> Self {
        Self {
            command_name,
            input,
            session,
            state,
        }
    }

    /// Deserialize the input into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(format!("{}: {}", self.command_name, e)))
    }

    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    /// The acting user. `Unauthorized` without a usable user id.
    pub fn actor(&self) -> Result<Actor, HandlerError> {
        self.session
            .actor()
            .ok_or_else(|| HandlerError::Unauthorized("missing or invalid user id".into()))
    }

    pub fn state(&self) -> &S {
        self.state
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some_and(|v| !v.is_null())
    }
}
