//! load → index → render → persist.
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::emit::{self, Artifacts};
use crate::error::{GenError, Result};
use crate::index::{self, ResolvedModel};
use crate::schema::SchemaRegistry;

pub struct Generation {
    pub model: ResolvedModel,
    pub artifacts: Artifacts,
}

/// Build the model and render every artifact. Nothing touches the disk here.
pub fn generate(schema: &SchemaRegistry, config: &GeneratorConfig) -> Result<Generation> {
    let model = index::build_model(schema, config)?;
    let artifacts = emit::render_all(&model, config);
    Ok(Generation { model, artifacts })
}

impl Artifacts {
    /// (destination, contents), in write order.
    pub fn targets(&self, out_dir: &Path, config: &GeneratorConfig) -> Vec<(PathBuf, &str)> {
        vec![
            (out_dir.join(&config.outputs.catalogue), self.catalogue.as_str()),
            (out_dir.join(&config.outputs.stub), self.stub.as_str()),
            (out_dir.join(&config.outputs.wrapper), self.wrapper.as_str()),
        ]
    }

    /// Write all artifacts. Each file is written beside its destination and
    /// renamed into place, so a failed write never leaves a half file.
    pub fn write(&self, out_dir: &Path, config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (path, contents) in self.targets(out_dir, config) {
            write_atomic(&path, contents)?;
            tracing::debug!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// Compare against what is on disk; stale or missing files are an error.
    pub fn check(&self, out_dir: &Path, config: &GeneratorConfig) -> Result<()> {
        let mut stale = Vec::new();
        for (path, contents) in self.targets(out_dir, config) {
            match std::fs::read_to_string(&path) {
                Ok(current) if current == contents => {}
                Ok(_) => stale.push(path.display().to_string()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => stale.push(path.display().to_string()),
                Err(e) => return Err(GenError::io(&path, e)),
            }
        }
        if stale.is_empty() { Ok(()) } else { Err(GenError::Stale(stale)) }
    }
}

/// The temp file is created in the destination directory so the final
/// rename never crosses filesystems; it is removed if anything fails.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| GenError::io(parent, e))?;
    tmp.write_all(contents.as_bytes()).map_err(|e| GenError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| GenError::io(path, e.error))?;
    Ok(())
}
