//! Help request value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A validated CLI tool name (Value Object)
///
/// A tool name is a single word: it is passed verbatim as the program name
/// of a child process, so whitespace and control characters are rejected.
/// A leading `-` is rejected too, since `man` would read it as an option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolQuery(String);

impl ToolQuery {
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyToolName);
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DomainError::InvalidToolName(name.to_string()));
        }
        if name.starts_with('-') {
            return Err(DomainError::OptionLikeToolName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToolQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ToolQuery {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ToolQuery> for String {
    fn from(value: ToolQuery) -> Self {
        value.0
    }
}

/// Which flag asks a tool for its help text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HelpFlag {
    /// `-h`
    #[default]
    #[serde(rename = "-h")]
    Short,
    /// `--help`
    #[serde(rename = "--help")]
    Long,
}

impl HelpFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            HelpFlag::Short => "-h",
            HelpFlag::Long => "--help",
        }
    }
}

impl std::fmt::Display for HelpFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HelpFlag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-h" | "short" => Ok(HelpFlag::Short),
            "--help" | "long" => Ok(HelpFlag::Long),
            other => Err(DomainError::InvalidHelpFlag(other.to_string())),
        }
    }
}

/// What kind of documentation to harvest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestKind {
    /// The tool's own help output, requested with the given flag
    Help(HelpFlag),
    /// The tool's manual page via `man`
    Manpage,
}

/// A single harvester invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRequest {
    tool: ToolQuery,
    subcommand: Option<String>,
    kind: HarvestKind,
}

impl HelpRequest {
    /// Request help output for a tool or one of its subcommands.
    ///
    /// A blank subcommand is treated as absent.
    pub fn help(tool: ToolQuery, subcommand: Option<&str>) -> Self {
        let subcommand = subcommand
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            tool,
            subcommand,
            kind: HarvestKind::Help(HelpFlag::default()),
        }
    }

    /// Request the manual page of a tool
    pub fn manpage(tool: ToolQuery) -> Self {
        Self {
            tool,
            subcommand: None,
            kind: HarvestKind::Manpage,
        }
    }

    /// Override the help flag. Has no effect on man page requests.
    pub fn with_flag(mut self, flag: HelpFlag) -> Self {
        if let HarvestKind::Help(_) = self.kind {
            self.kind = HarvestKind::Help(flag);
        }
        self
    }

    pub fn tool(&self) -> &ToolQuery {
        &self.tool
    }

    pub fn subcommand(&self) -> Option<&str> {
        self.subcommand.as_deref()
    }

    pub fn kind(&self) -> HarvestKind {
        self.kind
    }

    /// Subcommand words; `"remote add"` becomes `["remote", "add"]`
    pub fn subcommand_words(&self) -> impl Iterator<Item = &str> {
        self.subcommand
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
    }

    /// Full argument vector, program first.
    ///
    /// `man_command` is the program used for [`HarvestKind::Manpage`].
    pub fn argv(&self, man_command: &str) -> Vec<String> {
        match self.kind {
            HarvestKind::Help(flag) => std::iter::once(self.tool.as_str())
                .chain(self.subcommand_words())
                .chain(std::iter::once(flag.as_str()))
                .map(str::to_string)
                .collect(),
            HarvestKind::Manpage => vec![man_command.to_string(), self.tool.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(name: &str) -> ToolQuery {
        ToolQuery::parse(name).unwrap()
    }

    #[test]
    fn test_tool_query_trims() {
        assert_eq!(tool("  git ").as_str(), "git");
    }

    #[test]
    fn test_tool_query_rejects_empty_and_whitespace() {
        assert_eq!(ToolQuery::parse("  "), Err(DomainError::EmptyToolName));
        assert_eq!(
            ToolQuery::parse("git commit"),
            Err(DomainError::InvalidToolName("git commit".to_string()))
        );
        assert!(ToolQuery::parse("ls\u{7}").is_err());
    }

    #[test]
    fn test_tool_query_rejects_option_like_names() {
        assert_eq!(
            ToolQuery::parse("-k"),
            Err(DomainError::OptionLikeToolName("-k".to_string()))
        );
        assert!(ToolQuery::parse("--help").is_err());
        assert_eq!(tool("git-lfs").as_str(), "git-lfs");
    }

    #[test]
    fn test_tool_query_serde() {
        let json = serde_json::to_string(&tool("docker")).unwrap();
        assert_eq!(json, "\"docker\"");
        assert!(serde_json::from_str::<ToolQuery>("\"a b\"").is_err());
    }

    #[test]
    fn test_help_flag_parse() {
        assert_eq!("-h".parse::<HelpFlag>().unwrap(), HelpFlag::Short);
        assert_eq!("--help".parse::<HelpFlag>().unwrap(), HelpFlag::Long);
        assert_eq!("long".parse::<HelpFlag>().unwrap(), HelpFlag::Long);
        assert!("-?".parse::<HelpFlag>().is_err());
    }

    #[test]
    fn test_help_argv_without_subcommand() {
        let request = HelpRequest::help(tool("git"), None);
        assert_eq!(request.argv("man"), vec!["git", "-h"]);
    }

    #[test]
    fn test_help_argv_with_subcommand_and_long_flag() {
        let request = HelpRequest::help(tool("git"), Some("commit")).with_flag(HelpFlag::Long);
        assert_eq!(request.argv("man"), vec!["git", "commit", "--help"]);
    }

    #[test]
    fn test_nested_subcommand_is_split() {
        let request = HelpRequest::help(tool("git"), Some(" remote   add "));
        assert_eq!(request.subcommand(), Some("remote   add"));
        assert_eq!(request.argv("man"), vec!["git", "remote", "add", "-h"]);
    }

    #[test]
    fn test_blank_subcommand_is_absent() {
        let request = HelpRequest::help(tool("ls"), Some("   "));
        assert!(request.subcommand().is_none());
        assert_eq!(request.argv("man"), vec!["ls", "-h"]);
    }

    #[test]
    fn test_manpage_argv_ignores_flag() {
        let request = HelpRequest::manpage(tool("tar")).with_flag(HelpFlag::Long);
        assert_eq!(request.kind(), HarvestKind::Manpage);
        assert_eq!(request.argv("/usr/bin/man"), vec!["/usr/bin/man", "tar"]);
    }
}
