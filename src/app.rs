use std::sync::Arc;

use anyhow::Result;
use termcolor::WriteColor;

use crate::{
    docs::{DocsState, RepoHandle},
    github::GithubClient,
    render::{self, TagFilter},
    theme::ThemeRegistry,
};

/// Everything the tag view needs: theme selection, the docs session and the filter.
pub struct AppState<C> {
    pub themes: ThemeRegistry,
    pub docs: DocsState<C>,
    pub filter: TagFilter,
}

impl<C> AppState<C>
where
    C: GithubClient + Send + Sync + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        Self {
            themes: ThemeRegistry::default(),
            docs: DocsState::new(client),
            filter: TagFilter::default(),
        }
    }

    pub fn open(&mut self, owner: &str, name: &str) -> RepoHandle {
        let theme = self.themes.active();
        log::debug!(
            "Opening {}/{} with theme {} (top navbar {}, footer {})",
            owner,
            name,
            theme.name,
            theme.top_nav_bar(),
            theme.footer(),
        );
        self.docs.initialize(owner, name)
    }
}

impl<C> AppState<C> {
    pub fn render(&self, out: &mut impl WriteColor, json: bool) -> Result<()> {
        let state = self.docs.state();
        if json {
            return render::render_json(out, &state, &self.filter);
        }

        render::render_text(out, &state, &self.filter, &self.themes.active().palette)
    }
}

#[cfg(test)]
mod tests {
    use termcolor::Buffer;

    use super::*;
    use crate::github::{MockGithubClient, Tag};

    #[tokio::test]
    async fn test_open_and_render() {
        let mut client = MockGithubClient::new();
        client
            .expect_list_tags()
            .times(1)
            .returning(|_| Ok(vec![Tag::new("jaxb2-maven-plugin-3.1.0"), Tag::new("jaxb2-maven-plugin-2.5.0")]));

        let mut app = AppState::new(Arc::new(client));
        app.themes.set_theme("pink");
        app.filter = TagFilter::new(Some("3.1"));

        let mut handle = app.open("mojohaus", "jaxb2-maven-plugin");
        handle.settled().await.unwrap();

        let mut out = Buffer::no_color();
        app.render(&mut out, false).unwrap();
        assert_eq!(
            String::from_utf8(out.into_inner()).unwrap(),
            "mojohaus/jaxb2-maven-plugin\n  3.1.0  jaxb2-maven-plugin-3.1.0\n",
        );

        let mut out = Buffer::ansi();
        app.render(&mut out, false).unwrap();
        assert!(String::from_utf8(out.into_inner())
            .unwrap()
            .contains("\x1b[38;5;211m3.1.0\x1b[0m"));
    }
}
