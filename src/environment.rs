use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::dsl::ast::{Statement, StatementKind};
use crate::dsl::{self, DslError, SyntaxError};
use crate::platform::OsClass;
use crate::script::quote;

static VARIABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

static ALIAS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.:+@%,][A-Za-z0-9_.:+@%,-]*$").expect("valid regex")
});

/// Variables, aliases and startup commands for one variant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    environment_variables: BTreeMap<String, String>,
    aliases: BTreeMap<String, String>,
    commands: Vec<String>,
}

impl Configuration {
    pub fn environment_variables(&self) -> &BTreeMap<String, String> {
        &self.environment_variables
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// Startup commands in declaration order
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.environment_variables.is_empty() && self.aliases.is_empty() && self.commands.is_empty()
    }

    /// Apply statements in source order. Conditional bodies are spliced in
    /// place when their guard matches `os` and skipped entirely otherwise.
    fn apply(&mut self, statements: &[Statement], os: OsClass) -> Result<(), SyntaxError> {
        for statement in statements {
            match &statement.kind {
                StatementKind::SetVar { key, value } => {
                    if !VARIABLE_NAME.is_match(key) {
                        return Err(SyntaxError::new(
                            statement.span,
                            format!("invalid environment variable name {key:?}"),
                        ));
                    }
                    self.environment_variables.insert(key.clone(), value.clone());
                }
                StatementKind::SetAlias { key, value } => {
                    if !ALIAS_NAME.is_match(key) {
                        return Err(SyntaxError::new(
                            statement.span,
                            format!("invalid alias name {key:?}"),
                        ));
                    }
                    self.aliases.insert(key.clone(), value.clone());
                }
                StatementKind::Echo { text } => {
                    self.commands.push(format!("echo {}", quote(text)));
                }
                StatementKind::RunCommand { command } => {
                    self.commands.push(command.clone());
                }
                StatementKind::Conditional { tags, body } => {
                    if tags.iter().any(|tag| os.matches(tag)) {
                        self.apply(body, os)?;
                    } else {
                        debug!(?tags, %os, "skipping os block");
                    }
                }
            }
        }
        Ok(())
    }
}

/// All variants declared by one Desktopfile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    configurations: BTreeMap<String, Configuration>,
}

impl Environment {
    /// Evaluate Desktopfile source for the current host
    pub fn evaluate(source: &str, origin: &str) -> Result<Self, DslError> {
        Self::evaluate_for(source, origin, OsClass::current())
    }

    /// Evaluate Desktopfile source as if running on `os`
    pub fn evaluate_for(source: &str, origin: &str, os: OsClass) -> Result<Self, DslError> {
        let document = dsl::parse(source, origin)?;

        let mut configurations = BTreeMap::new();
        for variant in document.variants {
            let mut config = Configuration::default();
            config
                .apply(&variant.body, os)
                .map_err(|e| e.with_origin(origin))?;

            if configurations.insert(variant.name.clone(), config).is_some() {
                debug!(variant = %variant.name, "variant redeclared, keeping the later one");
            }
        }

        Ok(Self { configurations })
    }

    pub fn configuration(&self, name: &str) -> Option<&Configuration> {
        self.configurations.get(name)
    }

    /// Take ownership of one variant, discarding the rest
    pub fn into_configuration(mut self, name: &str) -> Option<Configuration> {
        self.configurations.remove(name)
    }

    /// Declared variants, sorted by name
    pub fn configurations(&self) -> impl Iterator<Item = (&str, &Configuration)> {
        self.configurations
            .iter()
            .map(|(name, config)| (name.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}
