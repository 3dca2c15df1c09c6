//! Article page

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::posts::Post;
use crate::util::format_relative;

/// Generates a single article page
///
/// # Arguments
///
/// * `post`: Article metadata
/// * `content`: Rendered Markdown body
/// * `now`: Reference Unix time for the relative date
/// * `signed_in`: Whether the visitor holds a valid admin session
///
/// # Returns
///
/// Complete HTML page as Markup
pub fn generate(post: &Post, content: Markup, now: u64, signed_in: bool) -> Markup {
    page_wrapper(
        &post.title,
        &["/assets/markdown.css"],
        signed_in,
        html! {
            article class="card article" {
                div class="article-meta" {
                    a href="/" class="back-link" { "All posts" }
                    span class="post-date" { "Updated " (format_relative(post.updated_at, now)) }
                }
                div class="markdown-body" {
                    (content)
                }
            }
        },
    )
}
