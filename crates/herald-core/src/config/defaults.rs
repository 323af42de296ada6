//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "herald.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "herald.yaml";

/// Get list of config file names to search for, in priority order
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        "herald.yml",
        ".herald.toml",
        ".herald.yaml",
        ".herald.yml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Herald configuration

[repository]
remote = "origin"
# url = "https://github.com/owner/repo"

[git]
# tag_pattern = "^v\\d+"

[changelog]
file = "CHANGELOG.md"
exclude_types = []
include_invalid = true
"#;
