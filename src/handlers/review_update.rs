use serde::Deserialize;
use serde_json::Value;

use crate::activity::ActivityType;
use crate::app::App;
use crate::microsvc::{guards, Context, HandlerError};
use crate::review::{parse_rating, validate_comment, validate_review_id, ReviewPatch};

pub const COMMAND: &str = "review.update";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateReviewInput {
    review_id: String,
    rating: Option<i64>,
    comment: Option<String>,
}

pub fn guard(ctx: &Context<App>) -> bool {
    guards::string(ctx, "reviewId")
        && guards::optional_integer(ctx, "rating")
        && guards::optional_string(ctx, "comment")
}

pub fn handle(ctx: &Context<App>) -> Result<Value, HandlerError> {
    let actor = ctx.actor()?;
    let input = ctx.input::<UpdateReviewInput>()?;
    validate_review_id(&input.review_id)?;

    let patch = ReviewPatch {
        rating: input.rating.map(parse_rating).transpose()?,
        comment: match input.comment {
            Some(comment) => {
                validate_comment(&comment)?;
                Some(comment.trim().to_string())
            }
            None => None,
        },
    };
    if patch.is_empty() {
        return Err(HandlerError::BadInput(
            "nothing to update: give a rating or a comment".into(),
        ));
    }

    let app = ctx.state();
    let review = app.engine().update(&input.review_id, &patch, &actor)?;

    app.cache().invalidate_review(&review.review_id);
    app.notifier().notify(ActivityType::ReviewUpdated, actor.user_id);
    Ok(serde_json::to_value(review)?)
}
