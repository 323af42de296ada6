//! Tag operations

use regex::Regex;
use semver::Version;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use herald_core::error::GitError;

impl GitRepo {
    /// Get all tags, peeled to the commits they point at
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            if let Ok(commit) = reference.peel_to_commit() {
                tags.push(TagInfo::new(name, commit.id().to_string()));
            }
        }

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Get tags matching a pattern
    pub fn tags_matching(&self, pattern: &str) -> Result<Vec<TagInfo>> {
        let regex = Regex::new(pattern).map_err(|e| GitError::InvalidTagPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(self
            .tags()?
            .into_iter()
            .filter(|t| regex.is_match(&t.name))
            .collect())
    }

    /// Release tags ordered by semantic version, newest first
    fn release_tags(&self, pattern: Option<&str>) -> Result<Vec<(TagInfo, Version)>> {
        let tags = match pattern {
            Some(p) => self.tags_matching(p)?,
            None => self.tags()?,
        };

        let mut versioned: Vec<_> = tags
            .into_iter()
            .filter_map(|t| {
                let version = t.version.as_deref().and_then(|v| Version::parse(v).ok())?;
                Some((t, version))
            })
            .collect();

        versioned.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(versioned)
    }

    /// Find the latest tag by semantic version
    #[instrument(skip(self), fields(pattern))]
    pub fn find_latest_tag(&self, pattern: Option<&str>) -> Result<Option<TagInfo>> {
        let result = self.release_tags(pattern)?.into_iter().next().map(|(t, _)| t);
        debug!(latest = ?result.as_ref().map(|t| &t.name), "found latest tag");
        Ok(result)
    }

    /// Find the release tag preceding `tag_name` by semantic version.
    ///
    /// When `tag_name` carries no version, the latest release tag other than
    /// `tag_name` itself is returned.
    #[instrument(skip(self), fields(tag_name, pattern))]
    pub fn previous_tag(&self, tag_name: &str, pattern: Option<&str>) -> Result<Option<TagInfo>> {
        let current = TagInfo::new(tag_name, "")
            .version
            .and_then(|v| Version::parse(&v).ok());

        let result = self
            .release_tags(pattern)?
            .into_iter()
            .filter(|(t, _)| t.name != tag_name)
            .find(|(_, version)| current.as_ref().is_none_or(|c| version < c))
            .map(|(t, _)| t);

        debug!(previous = ?result.as_ref().map(|t| &t.name), "found previous tag");
        Ok(result)
    }

    /// Find a specific tag by name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        let tag_ref = format!("refs/tags/{}", name);

        match self.repo.find_reference(&tag_ref) {
            Ok(reference) => {
                let target = reference.peel_to_commit()?;
                Ok(Some(TagInfo::new(name, target.id().to_string())))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Git2(e)),
        }
    }
}
