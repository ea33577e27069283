//! Doctor command - verify system requirements and configuration.

use crate::classifier::GenreClassifier;
use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Libris Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    let mut section = |title: &str, results: Vec<CheckResult>| {
        println!("{}", style(title).bold());
        for check in &results {
            check.print();
        }
        println!();
        checks.extend(results);
    };

    section("External Tools", vec![check_ocr_tool(&settings.ocr.command)]);

    section(
        "API Configuration",
        vec![
            check_api_key(&settings.generation.api_key_env, true, "text, image and audio recommendations"),
            check_api_key(&settings.speech.api_key_env, false, "audio recommendations"),
        ],
    );

    section("Genre Model", vec![check_model(settings)]);

    section("Configuration", vec![check_config_file()]);

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Libris.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Libris is ready to use.");
    }

    Ok(())
}

/// Check if the OCR tool is available.
fn check_ocr_tool(command: &str) -> CheckResult {
    match Command::new(command).arg("--version").output() {
        Ok(output) if output.status.success() => {
            // tesseract prints its version on stdout or stderr depending on the build
            let text = if output.stdout.is_empty() {
                output.stderr
            } else {
                output.stdout
            };
            let version = String::from_utf8_lossy(&text)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok(command, &version)
        }
        Ok(_) => CheckResult::warning(command, "installed but not working", install_hint_ocr()),
        Err(_) => CheckResult::warning(
            command,
            "not found (image input disabled)",
            install_hint_ocr(),
        ),
    }
}

/// Check if an API key is configured.
fn check_api_key(env_var: &str, required: bool, used_for: &str) -> CheckResult {
    let hint = format!("Set {} in your environment or a .env file", env_var);
    let value = std::env::var(env_var).ok();
    match value.as_deref().map(str::trim) {
        Some(key) if key.chars().count() > 8 => {
            CheckResult::ok(env_var, &format!("configured ({})", mask_key(key)))
        }
        Some(key) if !key.is_empty() => {
            CheckResult::warning(env_var, "set but looks too short", &hint)
        }
        _ if required => {
            CheckResult::error(env_var, &format!("not set (needed for {})", used_for), &hint)
        }
        _ => CheckResult::warning(env_var, &format!("not set ({} disabled)", used_for), &hint),
    }
}

/// First and last four characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Check the trained classifier model.
fn check_model(settings: &Settings) -> CheckResult {
    let path = settings.model_path();
    match GenreClassifier::load(&path) {
        Ok(model) => CheckResult::ok(
            "Model",
            &format!(
                "{} ({} genres, trained {})",
                path.display(),
                model.genres().len(),
                model.trained_at().format("%Y-%m-%d %H:%M")
            ),
        ),
        Err(e) if !path.exists() => CheckResult::warning(
            "Model",
            &e.to_string(),
            "Run 'libris train' to build it",
        ),
        Err(e) => CheckResult::error("Model", &e.to_string(), "Run 'libris train' to rebuild it"),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: libris config edit",
        )
    }
}

/// Platform-specific install hint for tesseract.
fn install_hint_ocr() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install tesseract tesseract-lang"
    } else if cfg!(target_os = "linux") {
        "Install with: sudo apt install tesseract-ocr tesseract-ocr-spa"
    } else {
        "Install from: https://github.com/tesseract-ocr/tesseract"
    }
}
