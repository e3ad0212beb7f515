use anyhow::{Context, Result};
use argscan::Registry;
use argscan_schema::GrammarSpec;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub struct LoadedGrammar {
    pub spec: GrammarSpec,
    pub registry: Registry,
}

impl LoadedGrammar {
    /// Name shown in usage text: the override, the grammar's `program`, or the file stem.
    pub fn program_name(&self, path: &Path, program: Option<&str>) -> String {
        if let Some(p) = program {
            return p.to_string();
        }
        if !self.spec.program.trim().is_empty() {
            return self.spec.program.trim().to_string();
        }
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "program".to_string())
    }
}

pub fn load_grammar(path: &Path) -> Result<LoadedGrammar> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read grammar: {}", path.display()))?;
    let spec = GrammarSpec::from_json(&text)
        .with_context(|| format!("failed to parse grammar: {}", path.display()))?;
    let registry = spec
        .build()
        .with_context(|| format!("invalid grammar: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded grammar");
    Ok(LoadedGrammar { spec, registry })
}
