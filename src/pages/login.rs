//! Admin login page

use maud::{Markup, html};

use crate::components::layout::page_wrapper;

/// Generates the login form
///
/// The form posts back to `/login`, carrying the post-login target in a
/// hidden field.
///
/// # Arguments
///
/// * `redirect`: Local path to return to after login
/// * `username`: Value to prefill after a failed attempt
/// * `error`: Message shown above the form, if any
///
/// # Returns
///
/// Complete HTML page as Markup
pub fn generate(redirect: &str, username: &str, error: Option<&str>) -> Markup {
    page_wrapper(
        "Log in",
        &["/assets/admin.css"],
        false,
        html! {
            main class="card login-card" {
                h1 class="page-title" { "Log in" }
                @if let Some(message) = error {
                    div class="form-error" role="alert" { (message) }
                }
                form method="post" action="/login" class="login-form" {
                    input type="hidden" name="redirect" value=(redirect);
                    label for="username" { "Username" }
                    input type="text" id="username" name="username" value=(username)
                        autocomplete="username" required autofocus;
                    label for="password" { "Password" }
                    input type="password" id="password" name="password"
                        autocomplete="current-password" required;
                    button type="submit" class="primary-button" { "Log in" }
                }
            }
        },
    )
}
