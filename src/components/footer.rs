//! Site footer component

use maud::{Markup, html};

/// Renders the page footer
pub fn footer() -> Markup {
    html! {
        footer class="site-footer" {
            span { "Powered by Blogkyl" }
        }
    }
}
