//! Bundled CSS assets

const BASE: &str = include_str!("../assets/base.css");
const POSTS: &str = include_str!("../assets/posts.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");
const ADMIN: &str = include_str!("../assets/admin.css");

/// Stylesheets served under `/assets/`, by file name.
const STYLESHEETS: &[(&str, &str)] = &[
    ("base.css", BASE),
    ("posts.css", POSTS),
    ("markdown.css", MARKDOWN),
    ("admin.css", ADMIN),
];

/// Returns the bundled stylesheet named `name`.
pub fn stylesheet(name: &str) -> Option<&'static str> {
    STYLESHEETS
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, css)| *css)
}
