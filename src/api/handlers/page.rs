use std::fs;
use std::sync::LazyLock;

use rocket::get;
use rocket::response::content;

pub static INDEX_HTML: LazyLock<String> = LazyLock::new(|| {
    fs::read_to_string("./static/index.html").expect("Unable to read index.html")
});

#[get("/")]
pub fn index() -> content::RawHtml<String> {
    content::RawHtml(INDEX_HTML.to_string())
}

pub fn generate_page_routes() -> Vec<rocket::Route> {
    routes![index]
}
