//! Reusable HTML components for page rendering
//!
//! This module provides Maud component functions shared across page types
//! (index, post, login, admin). Components handle specific UI elements with
//! consistent styling, eliminating duplication across page functions.

pub mod footer;
pub mod layout;
pub mod nav;
pub mod post_list;
