//! Artifact emitters. Each one is a pure `render(model, config) -> String`.
pub mod catalogue;
pub mod stub;
pub mod wrapper;

use crate::config::GeneratorConfig;
use crate::index::ResolvedModel;

pub const GENERATED_BY: &str = "// generated by nodegen";

/// All three artifacts, rendered up front so nothing is written unless every
/// one of them rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub catalogue: String,
    pub stub: String,
    pub wrapper: String,
}

pub fn render_all(model: &ResolvedModel, config: &GeneratorConfig) -> Artifacts {
    Artifacts {
        catalogue: catalogue::render(model, config),
        stub: stub::render(model, config),
        wrapper: wrapper::render(model, config),
    }
}

/// `Identifier` → `identifier`. Builder, switcher member and runtime dispatch
/// names all go through this.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// LINE WRITER
// ————————————————————————————————————————————————————————————————————————————

/// Line-oriented output buffer with two-space indentation.
#[derive(Debug, Default)]
pub struct Codegen {
    out: String,
    indent: usize,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str("  ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Emit `open`, run `body` one level deeper, then emit `close`.
    pub fn block(&mut self, open: impl AsRef<str>, close: &str, body: impl FnOnce(&mut Self)) {
        self.line(open);
        self.indent += 1;
        body(self);
        self.indent -= 1;
        self.line(close);
    }

    pub fn into_string(self) -> String {
        self.out
    }
}
