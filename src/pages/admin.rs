//! Admin dashboard page

use maud::{Markup, PreEscaped, html};

use crate::auth::Identity;
use crate::components::layout::page_wrapper;
use crate::components::post_list::post_list;
use crate::posts::Post;

/// Posts the editor content to the preview API and shows the result.
const PREVIEW_SCRIPT: &str = r#"
document.getElementById("preview-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const markdown = document.getElementById("preview-source").value;
  const target = document.getElementById("preview-output");
  const response = await fetch("/api/admin/preview", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    credentials: "same-origin",
    body: JSON.stringify({ markdown }),
  });
  const body = await response.json();
  target.innerHTML = body.success ? body.data.html : "";
  target.dataset.error = body.success ? "" : body.error;
});
"#;

/// Generates the admin dashboard
///
/// Lists published posts and offers a Markdown preview pane backed by the
/// preview API.
///
/// # Arguments
///
/// * `identity`: Signed in admin
/// * `posts`: Posts ordered newest first
/// * `now`: Reference Unix time for relative dates
///
/// # Returns
///
/// Complete HTML page as Markup
pub fn generate(identity: &Identity, posts: &[Post], now: u64) -> Markup {
    page_wrapper(
        "Dashboard",
        &["/assets/admin.css", "/assets/posts.css", "/assets/markdown.css"],
        true,
        html! {
            main class="card" {
                div class="card-header" {
                    h1 class="page-title" { "Dashboard" }
                    span class="badge" { "Signed in as " (identity.username) }
                }
                h2 class="section-title" { "Published posts" }
                (post_list(posts, now))
            }
            section class="card preview" {
                h2 class="section-title" { "Preview" }
                form id="preview-form" {
                    textarea id="preview-source" name="markdown" rows="12"
                        placeholder="# Draft title" {}
                    button type="submit" class="primary-button" { "Render" }
                }
                div id="preview-output" class="markdown-body" {}
            }
            script { (PreEscaped(PREVIEW_SCRIPT)) }
        },
    )
}
