use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::resources::{Website, WebsiteProps};
use crate::template::{SavedTemplate, Stack};

pub const DEFAULT_WEBSITE_ID: &str = "website";

fn default_website_id() -> String {
    DEFAULT_WEBSITE_ID.to_string()
}

fn default_outputs() -> bool {
    true
}

/// the contents of a site config file, eg:
///
/// ```toml
/// stack_name = "my-site"
///
/// [website]
/// domain_name = "www.example.com"
/// certificate_arn = "arn:aws:acm:us-east-1:123456789012:certificate/abc"
/// log_expiration = "31d"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    pub stack_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// the construct id of the website. All logical ids are derived from it.
    #[serde(default = "default_website_id")]
    pub id: String,
    /// add stack outputs for the distribution and bucket.
    #[serde(default = "default_outputs")]
    pub outputs: bool,
    #[serde(default)]
    pub website: WebsiteProps,
}

impl SiteConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(?path, "loaded config file");
        contents.parse()
    }

    /// builds the stack described by this config.
    pub fn build_stack(&self) -> Result<(Stack, Website)> {
        let mut stack = Stack::new(&self.stack_name)?;
        stack.description = self.description.clone();
        let website = Website::new(&mut stack, &self.id, &self.website)?;
        if self.outputs {
            website.export_outputs(&mut stack)?;
        }
        Ok((stack, website))
    }

    pub fn synth(&self) -> Result<SavedTemplate> {
        let (stack, _) = self.build_stack()?;
        stack.synth()
    }
}

impl std::str::FromStr for SiteConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
