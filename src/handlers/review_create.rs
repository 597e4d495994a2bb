use serde::Deserialize;
use serde_json::Value;

use crate::activity::ActivityType;
use crate::app::App;
use crate::microsvc::{guards, Context, HandlerError};
use crate::review::{parse_rating, validate_comment, BookId, NewReview};

pub const COMMAND: &str = "review.create";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateReviewInput {
    book_id: BookId,
    rating: i64,
    comment: String,
}

pub fn guard(ctx: &Context<App>) -> bool {
    guards::integer(ctx, "bookId") && guards::integer(ctx, "rating") && guards::string(ctx, "comment")
}

/// Vote on a book: creates the caller's review, or updates it if one exists.
pub fn handle(ctx: &Context<App>) -> Result<Value, HandlerError> {
    let actor = ctx.actor()?;
    let input = ctx.input::<CreateReviewInput>()?;
    let rating = parse_rating(input.rating)?;
    validate_comment(&input.comment)?;

    let app = ctx.state();
    let vote = NewReview {
        book_id: input.book_id,
        rating,
        comment: input.comment.trim().to_string(),
    };
    let review = app.engine().create_or_update_vote(&vote, actor.user_id)?;

    app.cache().invalidate_review(&review.review_id);
    app.notifier().notify(ActivityType::ReviewVoted, actor.user_id);
    Ok(serde_json::to_value(review)?)
}
