//! YAML prompt files

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{PromptRenderer, CONTEXT_PLACEHOLDER};
use crate::core::{FrameworkError, FrameworkResult};

/// Contents of one prompt file
#[derive(Debug, Clone, Deserialize)]
pub struct PromptTemplate {
    /// Instruction text, may contain `{context}`
    pub instructions: String,
}

impl PromptTemplate {
    /// Substitute the context placeholder
    ///
    /// An empty context leaves the text untouched.
    pub fn render(&self, context: &str) -> String {
        if context.is_empty() {
            self.instructions.clone()
        } else {
            self.instructions.replace(CONTEXT_PLACEHOLDER, context)
        }
    }
}

/// Loads `<dir>/<template_id>` as YAML with an `instructions` key
#[derive(Debug, Clone)]
pub struct YamlPromptLoader {
    dir: PathBuf,
}

impl YamlPromptLoader {
    /// Create a loader rooted at a directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load and parse a template
    pub fn load(&self, template_id: &str) -> FrameworkResult<PromptTemplate> {
        let path = self.dir.join(template_id);
        let content = std::fs::read_to_string(&path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            FrameworkError::other(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl PromptRenderer for YamlPromptLoader {
    fn render(&self, template_id: &str, context: &str) -> String {
        match self.load(template_id) {
            Ok(template) => template.render(context),
            Err(e) => {
                tracing::error!("[Prompts] Failed to load '{}': {}", template_id, e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader_with(files: &[(&str, &str)]) -> (TempDir, YamlPromptLoader) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }
        let loader = YamlPromptLoader::new(dir.path());
        (dir, loader)
    }

    #[test]
    fn test_render_with_context() {
        let (_dir, loader) = loader_with(&[(
            "agents/med_info.yaml",
            "instructions: |\n  Ask about history.\n  Known data:\n  {context}\n",
        )]);

        let rendered = loader.render("agents/med_info.yaml", "{\"a\": 1}");
        assert_eq!(rendered, "Ask about history.\nKnown data:\n{\"a\": 1}\n");
    }

    #[test]
    fn test_empty_context_keeps_placeholder() {
        let (_dir, loader) = loader_with(&[("p.yaml", "instructions: \"Hi {context}\"\n")]);
        assert_eq!(loader.render("p.yaml", ""), "Hi {context}");
    }

    #[test]
    fn test_missing_file_renders_empty() {
        let (_dir, loader) = loader_with(&[]);
        assert_eq!(loader.render("agents/missing.yaml", "{}"), "");
    }

    #[test]
    fn test_malformed_yaml_renders_empty() {
        let (_dir, loader) = loader_with(&[
            ("bad.yaml", "instructions: [unclosed\n"),
            ("nokey.yaml", "prompt: hello\n"),
        ]);
        assert_eq!(loader.render("bad.yaml", ""), "");
        assert_eq!(loader.render("nokey.yaml", ""), "");
        assert!(loader.load("nokey.yaml").is_err());
    }
}
