use serde::Deserialize;
use serde_json::Value;

use crate::activity::ActivityType;
use crate::app::App;
use crate::microsvc::{guards, Context, HandlerError};
use crate::review::validate_review_id;

pub const COMMAND: &str = "review.remove";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveReviewInput {
    review_id: String,
}

pub fn guard(ctx: &Context<App>) -> bool {
    guards::string(ctx, "reviewId")
}

/// Responds with `true`; an unknown id is a 404.
pub fn handle(ctx: &Context<App>) -> Result<Value, HandlerError> {
    let actor = ctx.actor()?;
    let input = ctx.input::<RemoveReviewInput>()?;
    validate_review_id(&input.review_id)?;

    let app = ctx.state();
    let removed = app.engine().delete_by_id(&input.review_id, &actor)?;

    app.cache().invalidate_review(&input.review_id);
    app.notifier().notify(ActivityType::ReviewRemoved, actor.user_id);
    Ok(Value::Bool(removed))
}
