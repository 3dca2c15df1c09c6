//! Post index page

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::components::post_list::post_list;
use crate::posts::Post;

/// Generates the public post index
///
/// # Arguments
///
/// * `posts`: Posts ordered newest first
/// * `now`: Reference Unix time for relative dates
/// * `signed_in`: Whether the visitor holds a valid admin session
///
/// # Returns
///
/// Complete HTML page as Markup
pub fn generate(posts: &[Post], now: u64, signed_in: bool) -> Markup {
    page_wrapper(
        "Posts",
        &["/assets/posts.css"],
        signed_in,
        html! {
            main class="card" {
                div class="card-header" {
                    h1 class="page-title" { "Posts" }
                    span class="badge" { (posts.len()) " posts" }
                }
                (post_list(posts, now))
            }
        },
    )
}
