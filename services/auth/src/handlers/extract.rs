use axum::extract::FromRequest;

use crate::error::AuthServiceError;

/// `axum::Json` whose rejection renders through [`AuthServiceError`], so a
/// malformed body still gets the `{success, message}` envelope with a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthServiceError))]
pub struct JsonBody<T>(pub T);
