//! Synthesizes cloudformation templates for static websites: a private
//! S3 bucket served through a cloudfront distribution, with access logging,
//! an optional custom domain, and an optional lambda@edge origin handler.
//!
//! ```no_run
//! use cfn_website::{Stack, Website, WebsiteProps};
//!
//! let mut stack = Stack::new("my-site")?;
//! let website = Website::new(&mut stack, "website", &WebsiteProps::default())?;
//! website.export_outputs(&mut stack)?;
//! println!("{}", stack.synth()?.to_json_pretty()?);
//! # Ok::<(), cfn_website::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod duration;
pub mod error;
pub mod intrinsics;
pub mod logical_id;
pub mod resources;
pub mod template;


pub use config::SiteConfig;
pub use duration::Duration;
pub use error::{Error, Result};
pub use resources::{EdgeFunctionRef, EdgeHandler, Website, WebsiteProps};
pub use template::{SavedTemplate, Stack};
