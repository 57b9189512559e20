//! Interactive configuration wizard.
//! Asks the questions needed to produce a [`Config`] for `craft init`.

use crate::config::{Ci, CiName, CiOption, Config, Docker, Maintainer, Release};
use crate::error::{Error, Result};
use dialoguer::{Confirm, Input, MultiSelect, Select};

/// Trait for user interaction.
pub trait Prompter {
    /// Asks a yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Asks for free text, an empty answer meaning none.
    fn input(&self, prompt: &str, default: &str) -> Result<String>;

    /// Asks to choose one of `choices`, returning its index.
    fn select(&self, prompt: &str, choices: &[&str], default: usize) -> Result<usize>;

    /// Asks to choose any of `choices`, returning their indexes.
    fn multi_select(&self, prompt: &str, choices: &[&str]) -> Result<Vec<usize>>;
}

/// Dialoguer-based terminal prompter.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::ConfigError(format!("prompt failed: {e}"))
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new().with_prompt(prompt).default(default).interact().map_err(prompt_error)
    }

    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        Input::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn select(&self, prompt: &str, choices: &[&str], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(choices)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn multi_select(&self, prompt: &str, choices: &[&str]) -> Result<Vec<usize>> {
        MultiSelect::new().with_prompt(prompt).items(choices).interact().map_err(prompt_error)
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

const CI_OPTIONS: [(&str, CiOption); 4] = [
    ("codecov", CiOption::Codecov),
    ("codeql", CiOption::Codeql),
    ("labeler", CiOption::Labeler),
    ("sonar", CiOption::Sonar),
];

/// Asks every configuration question.
pub fn ask_config(prompt: &dyn Prompter) -> Result<Config> {
    let mut config = Config::default();

    if let Some(name) = non_empty(prompt.input("Maintainer name", "")?) {
        let email = non_empty(prompt.input("Maintainer email", "")?);
        config.maintainers.push(Maintainer { name, email, url: None });
    }
    config.description = non_empty(prompt.input("Project description", "")?);
    config.license = non_empty(prompt.input("License (e.g. mit, apache-2.0)", "")?)
        .map(|license| license.to_lowercase());

    let ci = prompt.select("CI provider", &["none", "github", "gitlab"], 0)?;
    let ci_name = match ci {
        1 => Some(CiName::Github),
        2 => Some(CiName::Gitlab),
        _ => None,
    };
    if let Some(name) = ci_name {
        let labels: Vec<&str> = CI_OPTIONS.iter().map(|(label, _)| *label).collect();
        let options = prompt
            .multi_select("CI options", &labels)?
            .into_iter()
            .filter_map(|index| CI_OPTIONS.get(index).map(|(_, option)| *option))
            .collect();
        let release = prompt.confirm("Enable releases?", true)?.then(Release::default);
        config.ci = Some(Ci { name, options, release, static_site: None });
    }

    if prompt.confirm("Build a Docker image?", false)? {
        let registry = non_empty(prompt.input("Docker registry", "")?);
        config.docker = Some(Docker { registry, port: None });
    }
    config.no_chart = !prompt.confirm("Generate a Helm chart?", true)?;

    Ok(config)
}
