//! Minimal CLI: schema registry → (artifacts | resolved model)
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::schema::SchemaRegistry;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate node-type declarations, a typed API stub and a delegating runtime wrapper from a node schema registry
#[derive(Parser, Debug)]
#[command(name = "nodegen")]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// resolve the schema and write all three artifacts
    Generate(GenerateOut),
    /// resolve the schema and print the resolved model as JSON
    Model(ModelOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more schema registry files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// generator config (.json); built-in defaults if omitted
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// directory the artifact paths are relative to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// write nothing; fail if any artifact on disk is out of date
    #[arg(long)]
    check: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ModelOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> anyhow::Result<(SchemaRegistry, GeneratorConfig)> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve schema file paths")?;
        let schema = SchemaRegistry::load(source_paths.as_slice())?;
        let config = GeneratorConfig::load(self.config.as_deref())?;
        Ok((schema, config))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let (schema, config) = target.input_settings.load()?;
                let generation = crate::pipeline::generate(&schema, &config)?;

                if target.check {
                    generation.artifacts.check(&target.out_dir, &config)?;
                    println!("{} {} artifacts up to date", "✓".green(), config.engine_class);
                    return Ok(());
                }

                let written = generation.artifacts.write(&target.out_dir, &config)?;
                for path in &written {
                    println!("  {} {}", "✓".green(), path.display());
                }
                println!(
                    "{} {} node kinds, {} alias groups",
                    "✅".green(),
                    generation.model.kinds.len(),
                    generation.model.aliases.len()
                );
            }
            Command::Model(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let (schema, config) = target.input_settings.load()?;
                let model = crate::index::build_model(&schema, &config)?;
                let model_src = serde_json::to_string_pretty(&model)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &model_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{model_src}");
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, GenError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let entries = glob::glob(pattern).map_err(|e| GenError::Glob(e.to_string()))?;
            let mut matched = entries
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| GenError::Glob(e.to_string()))?;
            if matched.is_empty() {
                return Err(GenError::Glob(format!("glob pattern matched no files: {pattern}")));
            }
            // glob yields alphabetical order already; keep it explicit for stable merges
            matched.sort();
            out.extend(matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
