//! Shared helpers for the CLI integration tests.
//!
//! - [`run_cli`] calls `setgame_cli::run` in-process and captures both streams.
//! - [`EnvGuard`] clears the `SETGAME_*` variables, applies overrides, and
//!   restores everything on drop. Tests using it must be `#[serial]`.
//! - [`write_config`] writes a TOML file into a fresh temp dir.

use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str]) -> CliResult {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let argv = std::iter::once("setgame").chain(args.iter().copied());
    let exit_code = setgame_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

const SETGAME_VARS: &[&str] = &[
    "SETGAME_CONFIG",
    "SETGAME_SEED",
    "SETGAME_AI",
    "SETGAME_INITIAL_DEAL",
    "SETGAME_PLAY_AREA_MAX",
];

#[derive(Debug)]
pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in SETGAME_VARS {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
        for (key, value) in pairs {
            if !SETGAME_VARS.contains(key) {
                restores.push((key.to_string(), std::env::var(key).ok()));
            }
            unsafe {
                std::env::set_var(key, value);
            }
        }
        EnvGuard { restores }
    }

    pub fn clean() -> Self {
        Self::apply(&[])
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            unsafe {
                match previous {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

#[allow(dead_code)]
pub fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("setgame.toml");
    std::fs::write(&path, contents).expect("write config");
    (dir, path)
}
