use serde::Deserialize;
use serde_json::Value;

use crate::app::App;
use crate::cache::keys;
use crate::microsvc::{guards, Context, HandlerError};
use crate::review::DEFAULT_PAGE_SIZE;

pub const COMMAND: &str = "reviews.page";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInput {
    limit: Option<usize>,
    page: Option<usize>,
    offset: Option<usize>,
    /// A `lastEvaluatedKey` from an earlier page.
    cursor: Option<String>,
}

pub fn guard(ctx: &Context<App>) -> bool {
    guards::optional_integer(ctx, "limit")
        && guards::optional_integer(ctx, "page")
        && guards::optional_integer(ctx, "offset")
        && guards::optional_string(ctx, "cursor")
}

/// `{reviews, totalReviews, lastEvaluatedKey, firstEvaluatedKey}`.
///
/// Cursor requests go straight to the store; numbered pages are cached.
pub fn handle(ctx: &Context<App>) -> Result<Value, HandlerError> {
    let input = ctx.input::<PageInput>()?;
    let limit = input.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let engine = ctx.state().engine();

    let page = match input.cursor.as_deref() {
        Some(cursor) => engine.scan_after(limit, Some(cursor))?,
        None => ctx.state().cache().get_or_load(
            &keys::review_page(input.page, limit, input.offset),
            || engine.scan_reviews(limit, input.page, input.offset),
        )?,
    };
    Ok(serde_json::to_value(page)?)
}
