//! Site navigation component

use maud::{Markup, html};

/// Renders the site header with navigation links
///
/// Signed in visitors see the dashboard link and a logout button; others
/// see a login link. Logout is a form POST so following a link cannot end
/// the session.
///
/// # Arguments
///
/// * `signed_in`: Whether the visitor holds a valid admin session
///
/// # Returns
///
/// Header markup with brand link and navigation
pub fn site_header(signed_in: bool) -> Markup {
    html! {
        header class="site-header" {
            a href="/" class="site-brand" { "Blogkyl" }
            nav class="site-nav" {
                a href="/" class="nav-link" { "Posts" }
                @if signed_in {
                    a href="/admin" class="nav-link" { "Dashboard" }
                    form method="post" action="/logout" class="nav-form" {
                        button type="submit" class="nav-button" { "Log out" }
                    }
                } @else {
                    a href="/login" class="nav-link" { "Log in" }
                }
            }
        }
    }
}
