use serde::Deserialize;
use serde_json::Value;

use crate::app::App;
use crate::cache::keys;
use crate::microsvc::{guards, Context, HandlerError};
use crate::review::BookId;

pub const COMMAND: &str = "reviews.byBook";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ByBookInput {
    book_id: BookId,
}

pub fn guard(ctx: &Context<App>) -> bool {
    guards::integer(ctx, "bookId")
}

/// `{reviews, totalVotes, meanRating}` for one book.
pub fn handle(ctx: &Context<App>) -> Result<Value, HandlerError> {
    let input = ctx.input::<ByBookInput>()?;
    let app = ctx.state();
    let listing = app
        .cache()
        .get_or_load(&keys::book_reviews(input.book_id), || {
            app.engine().find_by_book_id(input.book_id)
        })?;
    Ok(serde_json::to_value(listing)?)
}
