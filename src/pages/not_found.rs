//! Not found page

use maud::{Markup, html};

use crate::components::layout::page_wrapper;

/// Generates the 404 page for `path`
pub fn generate(path: &str, signed_in: bool) -> Markup {
    page_wrapper(
        "Not found",
        &[],
        signed_in,
        html! {
            main class="card empty-state" {
                h1 class="page-title" { "Page not found" }
                p { "Nothing lives at " code { (path) } "." }
                a href="/" { "Back to posts" }
            }
        },
    )
}
