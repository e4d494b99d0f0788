use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use termcolor::{ColorSpec, WriteColor};

use crate::{
    docs::{FetchStatus, RepoState},
    format::release_number,
    github::Tag,
    theme::Palette,
};

/// Case insensitive substring filter over tag labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    query: Option<String>,
}

impl TagFilter {
    pub fn new(query: Option<&str>) -> Self {
        let query = query
            .map(|query| query.trim().to_lowercase())
            .filter(|query| !query.is_empty());
        Self { query }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn matches(&self, tag: &Tag) -> bool {
        match &self.query {
            Some(query) => tag.name.to_lowercase().contains(query),
            None => true,
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct TagRow<'a> {
    pub label: &'a str,
    pub release: &'a str,
}

pub fn rows<'a>(state: &'a RepoState, filter: &TagFilter) -> Vec<TagRow<'a>> {
    state
        .tag_list
        .iter()
        .filter(|tag| filter.matches(tag))
        .map(|tag| TagRow {
            label: &tag.name,
            release: release_number(tag.name.as_str()),
        })
        .collect()
}

pub fn render_json(out: &mut impl Write, state: &RepoState, filter: &TagFilter) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &rows(state, filter))
        .context("Failed to serialize tag rows")?;
    writeln!(out)?;
    Ok(())
}

fn write_colored(out: &mut impl WriteColor, spec: &ColorSpec, text: &str) -> io::Result<()> {
    out.set_color(spec)?;
    write!(out, "{}", text)?;
    out.reset()
}

/// Render the tag list as text in the colors of `palette`.
///
/// Writers without color support get plain text.
pub fn render_text(
    out: &mut impl WriteColor,
    state: &RepoState,
    filter: &TagFilter,
    palette: &Palette,
) -> Result<()> {
    let accent = palette.accent_spec();
    let text = palette.text_spec();

    let repo = match &state.repository {
        Some(repo) => repo.to_string(),
        None => "(no repository)".to_string(),
    };
    write_colored(out, &accent, &repo)?;
    writeln!(out)?;

    match &state.status {
        FetchStatus::Pending => {
            writeln!(out, "Loading tags...")?;
            return Ok(());
        }
        FetchStatus::Failed(reason) => {
            writeln!(out, "Could not load tags: {}", reason)?;
            return Ok(());
        }
        FetchStatus::Resolved => {}
    }

    if !state.has_tags() {
        writeln!(out, "This repository has no tags.")?;
        return Ok(());
    }

    let rows = rows(state, filter);
    if rows.is_empty() {
        writeln!(
            out,
            "No tags match '{}'.",
            filter.query().unwrap_or_default(),
        )?;
        return Ok(());
    }

    let width = rows
        .iter()
        .map(|row| row.release.chars().count())
        .max()
        .unwrap_or(0);
    for row in rows {
        write!(out, "  ")?;
        write_colored(out, &accent, &format!("{:<width$}", row.release, width = width))?;
        write!(out, "  ")?;
        write_colored(out, &text, row.label)?;
        writeln!(out)?;
    }

    Ok(())
}
