use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::SiteConfig;
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(name = "cfn-website", version, about = "Generate cloudformation templates for static websites")]
pub struct Cli {
    /// increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// write the template for a site config
    Synth {
        #[arg(short, long)]
        config: PathBuf,
        /// write the template to a file instead of stdout
        #[arg(short, long = "out")]
        output: Option<PathBuf>,
        /// override the stack name from the config file
        #[arg(long)]
        stack_name: Option<String>,
        /// emit json on a single line
        #[arg(long)]
        compact: bool,
    },
    /// validate a site config without writing a template
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

impl Cli {
    /// runs the command. Templates that are not written to a file go to `out`.
    pub fn run(self, out: &mut impl Write) -> Result<()> {
        match self.command {
            Command::Synth { config, output, stack_name, compact } => {
                let mut conf = SiteConfig::load(&config)?;
                if let Some(name) = stack_name {
                    conf.stack_name = name;
                }
                let template = conf.synth()?;
                let body = if compact { template.to_json()? } else { template.to_json_pretty()? };
                match output {
                    Some(path) => {
                        std::fs::write(&path, body)?;
                        info!(path = %path.display(), "wrote template");
                    }
                    None => writeln!(out, "{body}")?,
                }
            }
            Command::Check { config } => {
                let conf = SiteConfig::load(&config)?;
                let template = conf.synth()?;
                for (name, resource) in template.resources.iter() {
                    info!(logical_id = %name, ty = %resource.ty, "ok");
                }
                info!(stack = %conf.stack_name, "config is valid");
            }
        }
        Ok(())
    }
}
