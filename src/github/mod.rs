use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

mod api;
mod client;

pub use api::*;
pub use client::{GithubClientImpl, DEFAULT_API_URL};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GithubClient {
    /// List all tags of a repository in the order GitHub returns them.
    async fn list_tags(&self, repo: &Repository) -> Result<Vec<Tag>>;
}
