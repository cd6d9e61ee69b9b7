pub mod api;
pub mod cli;
pub mod config;
mod error;
pub mod humanize;
pub mod logging;
pub mod model;
pub mod paginate;
pub mod report;
pub mod target;

#[cfg(test)]
mod fake;

pub use api::{AccessToken, Client, GitHubApi};
pub use error::{Error, Result};
pub use humanize::humanize;
pub use paginate::PageOptions;
pub use report::report;
pub use target::RepoTarget;
