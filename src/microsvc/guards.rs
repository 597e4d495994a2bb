//! Plain predicates that handler guards chain with `&&`.

use super::Context;

/// The field is present and a JSON integer.
pub fn integer<S>(ctx: &Context<S>, field: &str) -> bool {
    ctx.raw_input().get(field).is_some_and(|v| v.is_i64())
}

/// The field is present and a JSON string.
pub fn string<S>(ctx: &Context<S>, field: &str) -> bool {
    ctx.raw_input().get(field).is_some_and(|v| v.is_string())
}

/// The field is absent, null, or an integer.
pub fn optional_integer<S>(ctx: &Context<S>, field: &str) -> bool {
    !ctx.has_field(field) || integer(ctx, field)
}

/// The field is absent, null, or a string.
pub fn optional_string<S>(ctx: &Context<S>, field: &str) -> bool {
    !ctx.has_field(field) || string(ctx, field)
}
