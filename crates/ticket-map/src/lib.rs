//! Classification lookups.
//!
//! The queue table feeds two derived structures, both built once per run:
//! a [`CategoryMatcher`] for classification and the [`OutputGroups`] used for
//! routing.
//!
//! [`OutputGroups`]: ticket_model::OutputGroups

#![deny(unsafe_code)]

pub mod groups;
pub mod matcher;

pub use groups::build_output_groups;
pub use matcher::{CategoryMatcher, match_category};
