//! Command execution logic

use super::Commands;
use crate::config::Config;

impl Commands {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        match self {
            Commands::ImportScap {
                source,
                output,
                layout,
                character,
                no_sidecar,
            } => super::scap::import(
                source,
                output.as_deref(),
                layout.map(|arg| arg.0),
                character.as_deref(),
                *no_sidecar,
                config,
            ),

            Commands::ExportScap {
                sources,
                output,
                variant,
            } => super::scap::export(sources, output, *variant, config),

            Commands::ExportCsv { sources, output } => super::voice_lines::export(sources, output),

            Commands::ImportCsv {
                csv,
                trees,
                audio_dir,
            } => super::voice_lines::import(csv, trees, audio_dir.as_deref()),

            Commands::Layout {
                tree,
                policy,
                output,
            } => super::tree::layout(tree, *policy, output.as_deref(), config),

            Commands::Name {
                tree,
                scheme,
                output,
            } => super::tree::name(tree, *scheme, output.as_deref()),

            Commands::Inspect { source } => super::inspect::execute(source, config),
        }
    }
}
