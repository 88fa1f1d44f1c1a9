use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Project config directory, relative to the project root.
pub const PROJECT_CONFIG_DIR: &str = ".volmatch";

/// Snapshot file used when neither `--file` nor config names one.
pub const DEFAULT_SNAPSHOT_FILE: &str = "volmatch.txt";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
            create_if_missing: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

impl EffectiveConfig {
    /// Snapshot path, with relative config paths anchored at `project_root`.
    #[must_use]
    pub fn snapshot_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.project.snapshot.path)
    }
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_DIR).join("config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("volmatch/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn resolve_config(project_root: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, user.output.clone(), env_format);
    tracing::debug!(
        output = %resolved_output,
        snapshot = %project.snapshot.path.display(),
        "resolved config"
    );

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

/// Canonical output mode name for `raw`, accepting legacy aliases.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output(cli_json: bool, user_output: Option<String>, env_format: Option<String>) -> String {
    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

const fn default_true() -> bool {
    true
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn make_temp_dir(label: &str) -> std::path::PathBuf {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("volmatch-config-test-{label}-{id}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("temp dir must be created");
        dir
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = make_temp_dir("project-default");
        let cfg = load_project_config(&root).expect("load should succeed");
        assert_eq!(cfg.snapshot.path, PathBuf::from("volmatch.txt"));
        assert!(cfg.snapshot.create_if_missing);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn project_config_overrides_snapshot_settings() {
        let root = make_temp_dir("project-override");
        std::fs::create_dir_all(root.join(".volmatch")).expect("create config dir");
        std::fs::write(
            root.join(".volmatch/config.toml"),
            "[snapshot]\npath = \"data/evm.txt\"\ncreate_if_missing = false\n",
        )
        .expect("write config");

        let cfg = load_project_config(&root).expect("load should succeed");
        assert_eq!(cfg.snapshot.path, PathBuf::from("data/evm.txt"));
        assert!(!cfg.snapshot.create_if_missing);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn partial_snapshot_section_keeps_defaults() {
        let cfg: ProjectConfig =
            toml::from_str("[snapshot]\ncreate_if_missing = false\n").expect("parse");
        assert_eq!(cfg.snapshot.path, PathBuf::from("volmatch.txt"));
        assert!(!cfg.snapshot.create_if_missing);
    }

    #[test]
    fn malformed_project_config_is_an_error() {
        let root = make_temp_dir("project-malformed");
        std::fs::create_dir_all(root.join(".volmatch")).expect("create config dir");
        std::fs::write(root.join(".volmatch/config.toml"), "[snapshot\npath = 3")
            .expect("write config");

        let err = load_project_config(&root).expect_err("must fail");
        assert!(err.to_string().starts_with("Failed to parse"));
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn snapshot_path_is_anchored_at_project_root() {
        let cfg = EffectiveConfig {
            project: ProjectConfig::default(),
            user: UserConfig::default(),
            resolved_output: "text".to_string(),
        };
        assert_eq!(
            cfg.snapshot_path(Path::new("/srv/evm")),
            PathBuf::from("/srv/evm/volmatch.txt")
        );
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        let output = resolve_output(true, Some("pretty".to_string()), Some("text".to_string()));
        assert_eq!(output, "json");
    }

    #[test]
    fn env_format_overrides_user_config() {
        let output = resolve_output(false, Some("json".to_string()), Some("text".to_string()));
        assert_eq!(output, "text");
    }

    #[test]
    fn legacy_aliases_are_normalized() {
        let pretty = resolve_output(false, Some("table".to_string()), Some("human".to_string()));
        assert_eq!(pretty, "pretty");

        let text = resolve_output(false, Some("human".to_string()), Some("table".to_string()));
        assert_eq!(text, "text");
    }

    #[test]
    fn unknown_modes_fall_through() {
        assert_eq!(normalize_output_mode("yaml"), None);
        let output = resolve_output(false, Some("json".to_string()), Some("yaml".to_string()));
        assert_eq!(output, "json");
    }
}
