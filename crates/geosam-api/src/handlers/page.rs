use axum::response::Html;

use crate::ui::INDEX_HTML;

/// The single UI page; all interaction happens through the JSON API.
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
