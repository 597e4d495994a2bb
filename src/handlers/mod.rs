//! One module per command.

pub mod review_create;
pub mod review_get;
pub mod review_remove;
pub mod review_update;
pub mod reviews_by_book;
pub mod reviews_by_user;
pub mod reviews_page;

use crate::app::App;
use crate::microsvc::Service;

/// The review service with every command registered.
pub fn service(app: App) -> Service<App> {
    crate::register_handlers!(
        Service::new(app),
        review_create,
        review_update,
        review_remove,
        review_get,
        reviews_by_book,
        reviews_by_user,
        reviews_page,
    )
}
