use serde::Deserialize;
use serde_json::Value;

use crate::app::App;
use crate::cache::keys;
use crate::microsvc::{guards, Context, HandlerError};
use crate::review::validate_review_id;

pub const COMMAND: &str = "review.get";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetReviewInput {
    review_id: String,
}

pub fn guard(ctx: &Context<App>) -> bool {
    guards::string(ctx, "reviewId")
}

pub fn handle(ctx: &Context<App>) -> Result<Value, HandlerError> {
    let input = ctx.input::<GetReviewInput>()?;
    validate_review_id(&input.review_id)?;

    let app = ctx.state();
    let review = app
        .cache()
        .get_or_load(&keys::review(&input.review_id), || {
            app.engine().find_by_review_id(&input.review_id)
        })?;
    Ok(serde_json::to_value(review)?)
}
