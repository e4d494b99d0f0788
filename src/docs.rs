use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::{sync::watch, task::JoinHandle};

use crate::github::{GithubClient, Repository, Tag};

#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Pending,
    Resolved,
    Failed(String),
}

/// Tag list of one repository as seen by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoState {
    pub repository: Option<Repository>,
    pub tag_list: Vec<Tag>,
    pub status: FetchStatus,
    pub(crate) session: u64,
}

impl Default for RepoState {
    fn default() -> Self {
        Self {
            repository: None,
            tag_list: Vec::new(),
            status: FetchStatus::Pending,
            session: 0,
        }
    }
}

impl RepoState {
    /// True once the tag list has been fetched successfully.
    pub fn completed(&self) -> bool {
        self.status == FetchStatus::Resolved
    }

    pub fn is_pending(&self) -> bool {
        self.status == FetchStatus::Pending
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// True if the repo has tags right now. A pending fetch has none.
    pub fn has_tags(&self) -> bool {
        !self.tag_list.is_empty()
    }
}

/// Owns the tag retrieval session of exactly one repository at a time.
///
/// `initialize` returns immediately and the fetch runs in a background task.
/// Initializing again aborts the previous fetch, and dropping the state tears
/// the session down.
pub struct DocsState<C> {
    client: Arc<C>,
    state: Arc<watch::Sender<RepoState>>,
    session: u64,
    fetch: Option<JoinHandle<()>>,
}

impl<C> DocsState<C>
where
    C: GithubClient + Send + Sync + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        let (state, _) = watch::channel(RepoState::default());
        Self {
            client,
            state: Arc::new(state),
            session: 0,
            fetch: None,
        }
    }

    /// Start fetching the tags of `owner/name` and return at once.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn initialize(&mut self, owner: impl Into<String>, name: impl Into<String>) -> RepoHandle {
        self.cancel();
        self.session += 1;

        let session = self.session;
        let repo = Repository::new(owner, name);
        log::debug!("Fetching tags of {} (session {})", repo, session);

        self.state.send_replace(RepoState {
            repository: Some(repo.clone()),
            tag_list: Vec::new(),
            status: FetchStatus::Pending,
            session,
        });

        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        self.fetch = Some(tokio::spawn(async move {
            let result = client.list_tags(&repo).await;

            state.send_if_modified(move |current| {
                if current.session != session {
                    log::debug!("Dropping stale tag list of {} (session {})", repo, session);
                    return false;
                }

                match result {
                    Ok(tags) => {
                        log::debug!("Fetched {} tags of {}", tags.len(), repo);
                        current.tag_list = tags;
                        current.status = FetchStatus::Resolved;
                    }
                    Err(error) => {
                        log::warn!("Failed to fetch tags of {}: {:?}", repo, error);
                        current.status = FetchStatus::Failed(format!("{:#}", error));
                    }
                }
                true
            });
        }));

        self.handle()
    }
}

impl<C> DocsState<C> {
    pub fn handle(&self) -> RepoHandle {
        RepoHandle {
            state: self.state.subscribe(),
        }
    }

    pub fn state(&self) -> RepoState {
        self.state.borrow().clone()
    }

    pub fn has_tags(&self) -> bool {
        self.state.borrow().has_tags()
    }

    fn cancel(&mut self) {
        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
        }
    }
}

impl<C> Drop for DocsState<C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Clone)]
pub struct RepoHandle {
    state: watch::Receiver<RepoState>,
}

impl RepoHandle {
    /// Wait until the current fetch has either resolved or failed.
    pub async fn settled(&mut self) -> Result<RepoState> {
        let state = self
            .state
            .wait_for(|state| !state.is_pending())
            .await
            .map_err(|_| anyhow!("Docs session was torn down before the tag list settled"))?;
        Ok(state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::MockGithubClient;

    fn tags(names: &[&str]) -> Vec<Tag> {
        names.iter().map(|name| Tag::new(*name)).collect()
    }

    #[tokio::test]
    async fn test_initialize_resolves_tag_list() {
        let mut client = MockGithubClient::new();
        client
            .expect_list_tags()
            .withf(|repo| repo.owner == "mojohaus" && repo.name == "jaxb2-maven-plugin")
            .times(1)
            .returning(|_| {
                Ok(tags(&[
                    "jaxb2-maven-plugin-3.1.0",
                    "jaxb2-maven-plugin-2.5.0",
                    "jaxb2-maven-plugin-3.0.0",
                ]))
            });

        let mut docs = DocsState::new(Arc::new(client));
        let mut handle = docs.initialize("mojohaus", "jaxb2-maven-plugin");

        // Nothing has run yet on the current thread runtime
        let state = docs.state();
        assert!(!state.completed());
        assert!(state.is_pending());
        assert!(state.tag_list.is_empty());
        assert!(!docs.has_tags());
        assert_eq!(
            state.repository,
            Some(Repository::new("mojohaus", "jaxb2-maven-plugin")),
        );

        let state = handle.settled().await.unwrap();
        assert!(state.completed());
        assert!(docs.state().completed());
        assert!(docs.has_tags());
        let names: Vec<_> = state.tag_list.iter().map(|tag| tag.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "jaxb2-maven-plugin-3.1.0",
                "jaxb2-maven-plugin-2.5.0",
                "jaxb2-maven-plugin-3.0.0",
            ],
        );
    }

    #[tokio::test]
    async fn test_initialize_resolves_empty_tag_list() {
        let mut client = MockGithubClient::new();
        client.expect_list_tags().returning(|_| Ok(vec![]));

        let mut docs = DocsState::new(Arc::new(client));
        let mut handle = docs.initialize("mojohaus", "empty");

        let state = handle.settled().await.unwrap();
        assert!(state.completed());
        assert!(!state.has_tags());
        assert!(!docs.has_tags());
    }

    #[tokio::test]
    async fn test_failed_fetch_never_completes() {
        let mut client = MockGithubClient::new();
        client
            .expect_list_tags()
            .returning(|repo| Err(anyhow!("Repository {} does not exist", repo)));

        let mut docs = DocsState::new(Arc::new(client));
        let mut handle = docs.initialize("mojohaus", "missing");

        let state = handle.settled().await.unwrap();
        assert!(!state.completed());
        assert!(!state.has_tags());
        assert_eq!(
            state.failure(),
            Some("Repository mojohaus/missing does not exist"),
        );
        assert_eq!(docs.state(), state);
    }

    #[tokio::test]
    async fn test_reinitialize_replaces_session() {
        let mut client = MockGithubClient::new();
        client
            .expect_list_tags()
            .withf(|repo| repo.name == "first")
            .times(0..=1)
            .returning(|_| Ok(tags(&["first-1.0"])));
        client
            .expect_list_tags()
            .withf(|repo| repo.name == "second")
            .times(1)
            .returning(|_| Ok(tags(&["second-2.0", "second-2.1"])));

        let mut docs = DocsState::new(Arc::new(client));
        let mut first = docs.initialize("mojohaus", "first");
        let mut second = docs.initialize("mojohaus", "second");

        let state = second.settled().await.unwrap();
        assert_eq!(state.repository, Some(Repository::new("mojohaus", "second")));
        assert_eq!(state.tag_list, tags(&["second-2.0", "second-2.1"]));

        // Old handles observe the replaced state
        assert_eq!(first.settled().await.unwrap(), state);
    }

    #[tokio::test]
    async fn test_drop_tears_down_session() {
        let mut client = MockGithubClient::new();
        client.expect_list_tags().never();

        let mut docs = DocsState::new(Arc::new(client));
        let mut handle = docs.initialize("mojohaus", "jaxb2-maven-plugin");
        drop(docs);

        assert!(handle.settled().await.is_err());
    }

    #[test]
    #[should_panic]
    fn test_initialize_outside_runtime_panics() {
        let client = MockGithubClient::new();
        let mut docs = DocsState::new(Arc::new(client));
        docs.initialize("mojohaus", "jaxb2-maven-plugin");
    }
}
