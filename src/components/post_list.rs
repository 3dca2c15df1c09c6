//! Post listing table components

use maud::{Markup, html};

use crate::posts::Post;
use crate::util::format_relative;

/// Wraps post rows in table container
///
/// # Arguments
///
/// * `rows`: Markup containing individual post row elements
///
/// # Returns
///
/// Post table wrapper with rows
pub fn post_table(rows: Markup) -> Markup {
    html! {
        div class="post-table" {
            (rows)
        }
    }
}

/// Renders single post row in table
///
/// Displays title, excerpt, and relative update time in a grid layout.
/// The whole row links to the article.
///
/// # Arguments
///
/// * `post`: Post to display
/// * `now`: Reference Unix time for the relative date
///
/// # Returns
///
/// Clickable post row
pub fn post_row(post: &Post, now: u64) -> Markup {
    html! {
        a href=(format!("/posts/{}", post.slug)) class="post-row" {
            div class="post-title" { (post.title) }
            div class="post-excerpt" { (post.excerpt) }
            div class="post-date" { (format_relative(post.updated_at, now)) }
        }
    }
}

/// Renders all posts, or an empty state when there are none
pub fn post_list(posts: &[Post], now: u64) -> Markup {
    html! {
        @if posts.is_empty() {
            div class="empty-state" {
                p { "No posts published yet." }
            }
        } @else {
            (post_table(html! {
                @for post in posts {
                    (post_row(post, now))
                }
            }))
        }
    }
}
