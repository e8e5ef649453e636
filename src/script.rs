use std::fmt;

use crate::environment::Configuration;

/// Files bash reads for an interactive login shell. `--init-file` replaces
/// them, so the rendered script sources them itself.
const STARTUP_FILES: &[&str] = &[
    "/etc/profile",
    "~/.bash_profile",
    "~/.bash_login",
    "~/.profile",
    "~/.bashrc",
];

const RED: &str = r"\[\e[31m\]";
const BLUE: &str = r"\[\e[34m\]";
const RESET: &str = r"\[\e[m\]";

/// Variable holding the active workspace name inside the session
pub const WORKSPACE_VAR: &str = "DESKTOP_WORKSPACE";
/// Variable holding the active configuration name inside the session
pub const VARIANT_VAR: &str = "DESKTOP_CONFIGURATION";

/// Rendered shell initialization script, one statement per line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellScript {
    lines: Vec<String>,
}

impl ShellScript {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl fmt::Display for ShellScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Quote a value as a single POSIX shell word
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Quote a variable value in double quotes. Parameter references such as
/// `$PATH` or `${HOME}` still expand; command substitution does not.
pub fn quote_expanding(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\\' | '`' => quoted.push('\\'),
            '$' if chars.peek() == Some(&'(') => quoted.push('\\'),
            _ => {}
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Render a configuration into a bash init script.
///
/// Order is fixed: startup files, session name variables, prompt, exports,
/// aliases, then commands exactly as declared. The prompt reads the workspace and variant names
/// from [`WORKSPACE_VAR`] and [`VARIANT_VAR`], so their text is never
/// decoded as prompt escapes.
pub fn render(config: &Configuration, workspace_name: &str, variant_name: &str) -> ShellScript {
    let mut script = ShellScript::default();

    for file in STARTUP_FILES {
        script.push(format!("if [ -f {file} ]; then . {file}; fi"));
    }

    script.push(format!("export {WORKSPACE_VAR}={}", quote(workspace_name)));
    script.push(format!("export {VARIANT_VAR}={}", quote(variant_name)));
    script.push(format!(
        "export PS1='({RED}${{{WORKSPACE_VAR}}}{RESET}/{BLUE}${{{VARIANT_VAR}}}{RESET}) '\"$PS1\""
    ));

    for (name, value) in config.environment_variables() {
        script.push(format!("export {name}={}", quote_expanding(value)));
    }

    for (name, expansion) in config.aliases() {
        script.push(format!("alias {name}={}", quote(expansion)));
    }

    for command in config.commands() {
        script.push(command.clone());
    }

    script
}
