use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

use reqwest::{
    header::{HeaderMap, ACCEPT, USER_AGENT},
    Client, ClientBuilder,
};

use super::{GithubClient, Repository, Tag};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub struct GithubClientImpl {
    client: Client,
    api_url: String,
}

impl GithubClientImpl {
    pub fn new(api_url: impl AsRef<str>) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        log::debug!("{}: {}", USER_AGENT.as_str(), user_agent);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, "application/vnd.github.v3+json".try_into()?);
        headers.insert(USER_AGENT, user_agent.try_into()?);

        let client = ClientBuilder::new().default_headers(headers).build()?;
        Ok(Self {
            client,
            api_url: api_url.as_ref().to_string(),
        })
    }
}

fn tags_url(api_url: &str, repo: &Repository) -> String {
    // `prop=value` has no effect on the tags endpoint.
    format!(
        "{api}/repos/{owner}/{name}/tags?prop=value",
        api = api_url.trim_end_matches('/'),
        owner = repo.owner,
        name = repo.name,
    )
}

#[async_trait]
impl GithubClient for GithubClientImpl {
    async fn list_tags(&self, repo: &Repository) -> Result<Vec<Tag>> {
        let url = tags_url(&self.api_url, repo);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        if response.status().as_u16() == 404 {
            return Err(anyhow!("Repository {} does not exist", repo));
        } else if !response.status().is_success() {
            return Err(anyhow!("Server returned status {}", response.status()));
        }

        let tags = response
            .json()
            .await
            .context("Failed to parse reply as json")?;

        Ok(tags)
    }
}
