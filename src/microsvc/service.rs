//! Command handler registry and dispatch.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;

type Guard<S> = Box<dyn Fn(&Context<S>) -> bool + Send + Sync>;
type Handle<S> = Box<dyn Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync>;

struct CommandHandler<S> {
    guard: Guard<S>,
    handle: Handle<S>,
}

/// Routes named commands to handler functions over shared state `S`.
///
/// ```ignore
/// let service = Service::new(app)
///     .command_guarded("review.get", handlers::review_get::guard, handlers::review_get::handle);
/// let reply = service.dispatch("review.get", json!({ "reviewId": id }), Session::new())?;
/// ```
pub struct Service<S> {
    state: S,
    handlers: HashMap<String, CommandHandler<S>>,
}

impl<S: Send + Sync + 'static> Service<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            handlers: HashMap::new(),
        }
    }

    /// Register a handler behind a guard. A guard returning `false` rejects the
    /// command with `GuardRejected` before the handler runs.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<S>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Box::new(guard),
                handle: Box::new(handler),
            },
        );
        self
    }

    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(command.to_string(), input, session, &self.state);

        if !(handler.guard)(&ctx) {
            debug!(command, "guard rejected");
            return Err(HandlerError::GuardRejected(command.to_string()));
        }

        let result = (handler.handle)(&ctx);
        if let Err(err) = &result {
            if err.status_code() >= 500 {
                warn!(command, error = ?err, "command failed");
            } else {
                debug!(command, error = %err, "command rejected");
            }
        }
        result
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}
