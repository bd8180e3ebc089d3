// SPDX-License-Identifier: MPL-2.0
//! Location of `settings.toml`.
//!
//! The directory is picked from, in order: an explicit override (tests), the
//! `--config-dir` flag recorded by [`init_cli_overrides`], the
//! `LUMEN_SEARCH_CONFIG_DIR` environment variable, and finally the platform
//! config directory from `dirs` with [`APP_NAME`] appended.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const APP_NAME: &str = "LumenSearch";

pub const ENV_CONFIG_DIR: &str = "LUMEN_SEARCH_CONFIG_DIR";

pub const SETTINGS_FILE: &str = "settings.toml";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Where a resolved config directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirSource {
    Override,
    Cli,
    Env,
    Platform,
}

impl fmt::Display for DirSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DirSource::Override => "override",
            DirSource::Cli => "--config-dir",
            DirSource::Env => ENV_CONFIG_DIR,
            DirSource::Platform => "platform default",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    pub path: PathBuf,
    pub source: DirSource,
}

impl ConfigDir {
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.path.join(SETTINGS_FILE)
    }
}

/// Records the `--config-dir` argument. Must run before the first lookup;
/// later calls are ignored.
pub fn init_cli_overrides(config_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        tracing::warn!("config dir override already initialized, ignoring");
    }
}

/// Resolves the config directory, `None` when the platform has none.
#[must_use]
pub fn config_dir(override_path: Option<PathBuf>) -> Option<ConfigDir> {
    let env = std::env::var_os(ENV_CONFIG_DIR).filter(|value| !value.is_empty());
    resolve(
        override_path,
        CLI_CONFIG_DIR.get().cloned().flatten(),
        env.map(PathBuf::from),
        dirs::config_dir().as_deref(),
    )
}

/// Path of `settings.toml` inside [`config_dir`].
#[must_use]
pub fn settings_file(override_path: Option<PathBuf>) -> Option<PathBuf> {
    config_dir(override_path).map(|dir| {
        tracing::trace!(path = %dir.path.display(), source = %dir.source, "config dir");
        dir.settings_file()
    })
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: Option<PathBuf>,
    env: Option<PathBuf>,
    platform: Option<&Path>,
) -> Option<ConfigDir> {
    let candidates = [
        (override_path, DirSource::Override),
        (cli, DirSource::Cli),
        (env, DirSource::Env),
        (platform.map(|dir| dir.join(APP_NAME)), DirSource::Platform),
    ];
    candidates
        .into_iter()
        .find_map(|(path, source)| path.map(|path| ConfigDir { path, source }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(path: &str) -> Option<PathBuf> {
        Some(PathBuf::from(path))
    }

    #[test]
    fn override_beats_everything() {
        let dir = resolve(p("/o"), p("/cli"), p("/env"), Some(Path::new("/home"))).unwrap();
        assert_eq!(dir.path, PathBuf::from("/o"));
        assert_eq!(dir.source, DirSource::Override);
    }

    #[test]
    fn cli_beats_env() {
        let dir = resolve(None, p("/cli"), p("/env"), Some(Path::new("/home"))).unwrap();
        assert_eq!(dir.source, DirSource::Cli);
    }

    #[test]
    fn env_beats_platform() {
        let dir = resolve(None, None, p("/env"), Some(Path::new("/home"))).unwrap();
        assert_eq!(dir.path, PathBuf::from("/env"));
        assert_eq!(dir.source, DirSource::Env);
    }

    #[test]
    fn platform_dir_gets_app_name() {
        let dir = resolve(None, None, None, Some(Path::new("/home/.config"))).unwrap();
        assert_eq!(dir.path, PathBuf::from("/home/.config").join(APP_NAME));
        assert_eq!(
            dir.settings_file(),
            PathBuf::from("/home/.config/LumenSearch/settings.toml")
        );
    }

    #[test]
    fn nothing_resolves_to_none() {
        assert_eq!(resolve(None, None, None, None), None);
    }

    #[test]
    fn public_lookup_honours_override() {
        let file = settings_file(p("/custom")).unwrap();
        assert_eq!(file, PathBuf::from("/custom").join(SETTINGS_FILE));
    }
}
