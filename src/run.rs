//! External command execution with a per-run memo.
//!
//! A gate run may ask for the same command more than once (a pre-push run
//! includes every pre-commit check). Results are cached by the literal
//! command line for the lifetime of one [`CommandRunner`], so repeats are
//! answered without spawning again. Nothing survives the process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GateError, Result};

#[derive(Debug, Clone)]
struct CachedRun {
    lines: Vec<String>,
    code: Option<i32>,
    success: bool,
}

/// Runs external commands, remembering each command line's outcome
#[derive(Debug, Default)]
pub struct CommandRunner {
    cache: HashMap<String, CachedRun>,
    dir: Option<PathBuf>,
}

impl CommandRunner {
    /// Runner that executes in the current working directory
    pub fn new() -> Self {
        CommandRunner::default()
    }

    /// Runner that executes every command inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        CommandRunner {
            cache: HashMap::new(),
            dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    /// Execute `command` (program then arguments) and return its non-empty
    /// output lines, stdout first then stderr.
    ///
    /// # Returns
    /// * `Ok(lines)` - The command exited with status 0
    /// * `Err(GateError::Command)` - Non-zero exit; the output travels in the error
    /// * `Err(GateError::Io)` - The program could not be started
    pub fn exec(&mut self, command: &[String]) -> Result<Vec<String>> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| GateError::config("empty command"))?;
        let cli = command.join(" ");

        if let Some(cached) = self.cache.get(&cli) {
            tracing::debug!(command = %cli, "using cached command result");
            return to_result(&cli, cached);
        }

        tracing::debug!(command = %cli, "running command");
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            GateError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to run `{}`: {}", cli, e),
            ))
        })?;

        let mut lines = non_empty_lines(&output.stdout);
        lines.extend(non_empty_lines(&output.stderr));

        let run = CachedRun {
            lines,
            code: output.status.code(),
            success: output.status.success(),
        };
        if !run.success {
            tracing::warn!(command = %cli, code = ?run.code, "command failed");
        }

        let result = to_result(&cli, &run);
        self.cache.insert(cli, run);
        result
    }

    /// Whether `command_line` (space-joined) already ran in this session
    pub fn has_run(&self, command_line: &str) -> bool {
        self.cache.contains_key(command_line)
    }

    /// Number of distinct command lines executed so far
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

fn to_result(cli: &str, run: &CachedRun) -> Result<Vec<String>> {
    if run.success {
        Ok(run.lines.clone())
    } else {
        Err(GateError::Command {
            command: cli.to_string(),
            code: run.code,
            output: run.lines.clone(),
        })
    }
}

fn non_empty_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
