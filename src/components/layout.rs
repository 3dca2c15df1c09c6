//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use super::footer::footer;
use super::nav::site_header;

/// Wraps page content with standard HTML structure
///
/// Provides consistent DOCTYPE, head, site header, and footer across all
/// pages. The caller provides page-specific body content and any extra
/// stylesheets beyond the shared base sheet.
///
/// # Arguments
///
/// * `title`: Page title text (without suffix)
/// * `stylesheets`: Extra CSS paths to include after the base sheet
/// * `signed_in`: Whether the visitor holds a valid admin session
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(title: &str, stylesheets: &[&str], signed_in: bool, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Blogkyl" }
                link rel="stylesheet" href="/assets/base.css";
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                (site_header(signed_in))
                div class="container" {
                    (body)
                }
                (footer())
            }
        }
    }
}
