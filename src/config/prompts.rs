//! Prompt templates for Libris.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub recommend: RecommendPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for book recommendation.
///
/// Available variables: `{{input}}` (the reader's description) and
/// `{{genre}}` (the pre-classified genre).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendPrompts {
    /// Optional system message. Skipped when empty.
    pub system: String,
    pub user: String,
}

impl Default for RecommendPrompts {
    fn default() -> Self {
        Self {
            system: String::new(),
            user: "Actúa como un experto bibliotecario. El usuario busca libros basados en: '{{input}}'. \
El sistema ha pre-clasificado esto como el género: {{genre}}. \
1. Confirma si el género es correcto o ajústalo si es necesario. \
2. Recomienda 3 libros específicos (título y autor) que encajen perfectamente. \
3. Explica en una sola frase breve y atractiva por qué debería leer cada uno. \
Usa un formato limpio con viñetas."
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let recommend_path = custom_path.join("recommend.toml");
            if recommend_path.exists() {
                let content = std::fs::read_to_string(&recommend_path)?;
                prompts.recommend = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are filled in a single pass, so substituted values are
    /// inserted verbatim. Unknown placeholders are left untouched.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
