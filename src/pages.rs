//! Page rendering modules for different view types
//!
//! This module organizes HTML page functions by page type (index, post,
//! login, admin). Each page module handles its specific view logic and
//! utilizes shared components from the components module.

pub mod admin;
pub mod index;
pub mod login;
pub mod not_found;
pub mod post;
