//! Command dispatch layer.
//!
//! A [`Service`] maps command names to handlers. Each handler module under
//! `crate::handlers` follows one convention:
//!
//! ```ignore
//! pub const COMMAND: &str = "review.get";
//!
//! pub fn guard(ctx: &Context<App>) -> bool {
//!     ctx.has_field("reviewId")
//! }
//!
//! pub fn handle(ctx: &Context<App>) -> Result<Value, HandlerError> {
//!     let input = ctx.input::<GetReviewInput>()?;
//!     // ...
//! }
//! ```
//!
//! and is wired in with [`register_handlers!`](crate::register_handlers).

mod context;
mod error;
pub mod guards;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use service::Service;
pub use session::{Session, ROLE_HEADER, USER_ID_HEADER};

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register handler modules that export `COMMAND`, `guard` and `handle`.
///
/// ```ignore
/// let service = bookshelf::register_handlers!(
///     microsvc::Service::new(app),
///     handlers::review_create,
///     handlers::review_get,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
