//! HTTP front end: maps the two proxy routes onto the fetch executor.
//!
//! | Route    | Query            | Success                                        |
//! |----------|------------------|------------------------------------------------|
//! | `/`      | `url`, `header`  | 200, fetched text                              |
//! | `/image` | `url`            | 200, `image/jpeg`, `data:image/jpg;base64,...` |
//!
//! Malformed input is 400, allow-list refusal 403, upstream failure 502.
//! Missing query parameters are rejected by the extractor with 400.

mod response;
mod routes;

use axum::routing::get;
use axum::Router;
use guardfetch_core::fetch::ProxyFetcher;

pub use response::ProxyError;

pub fn router(fetcher: ProxyFetcher) -> Router {
    Router::new()
        .route("/", get(routes::proxy_text))
        .route("/image", get(routes::proxy_image))
        .with_state(fetcher)
}
