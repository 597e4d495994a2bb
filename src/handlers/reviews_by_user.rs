use serde::Deserialize;
use serde_json::Value;

use crate::app::App;
use crate::cache::keys;
use crate::microsvc::{guards, Context, HandlerError};
use crate::review::UserId;

pub const COMMAND: &str = "reviews.byUser";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ByUserInput {
    user_id: UserId,
}

pub fn guard(ctx: &Context<App>) -> bool {
    guards::integer(ctx, "userId")
}

pub fn handle(ctx: &Context<App>) -> Result<Value, HandlerError> {
    let input = ctx.input::<ByUserInput>()?;
    let app = ctx.state();
    let reviews = app
        .cache()
        .get_or_load(&keys::user_reviews(input.user_id), || {
            app.engine().find_by_user_id(input.user_id)
        })?;
    Ok(serde_json::to_value(reviews)?)
}
