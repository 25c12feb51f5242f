//! Static assets compiled into the binary and served under `/static/`.

use actix_web::http::header::CACHE_CONTROL;
use actix_web::{HttpResponse, get, web};

const ARTICLE_JS: &str = include_str!("../../../static/js/article.js");
const MAIN_CSS: &str = include_str!("../../../static/css/main.css");

fn lookup(path: &str) -> Option<(&'static str, &'static str)> {
    match path {
        "js/article.js" => Some(("text/javascript; charset=utf-8", ARTICLE_JS)),
        "css/main.css" => Some(("text/css; charset=utf-8", MAIN_CSS)),
        _ => None,
    }
}

#[get("/static/{path:.*}")]
async fn static_asset(path: web::Path<String>) -> HttpResponse {
    let Some((content_type, body)) = lookup(path.as_str()) else {
        return HttpResponse::NotFound().finish();
    };

    HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((CACHE_CONTROL, "public, max-age=3600"))
        .body(body)
}

#[cfg(test)]
mod tests {
    use super::lookup;

    #[test]
    fn known_assets_resolve() {
        let (content_type, body) = lookup("js/article.js").unwrap();
        assert!(content_type.starts_with("text/javascript"));
        assert!(body.contains("/api/articles"));
        assert!(lookup("css/main.css").is_some());
    }

    #[test]
    fn unknown_assets_do_not_resolve() {
        assert!(lookup("../Cargo.toml").is_none());
        assert!(lookup("js/missing.js").is_none());
    }
}
