//! Launching vim for play sessions and diffs.

use crate::error::CliError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Suffixes stripped from the editor's file name before picking a flavor.
const EXECUTABLE_SUFFIXES: [&str; 5] = [".appimage", ".exe", ".bat", ".cmd", ".com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Vim,
    Nvim,
    NvimQt,
}

impl Flavor {
    /// Guess the flavor from the (resolved) program path.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let name = EXECUTABLE_SUFFIXES
            .iter()
            .find_map(|suffix| name.strip_suffix(suffix))
            .unwrap_or(&name);
        match name {
            "nvim" => Flavor::Nvim,
            "nvim-qt" => Flavor::NvimQt,
            _ => Flavor::Vim,
        }
    }

    /// Arguments placed before the vim arguments.
    fn leading_args(self) -> &'static [&'static str] {
        match self {
            // keeps gvim and friends in the foreground
            Flavor::Vim => &["--nofork"],
            Flavor::Nvim => &[],
            // arguments after `--` go to nvim
            Flavor::NvimQt => &["--nofork", "--"],
        }
    }
}

/// Files of a play session, relative to the workspace.
#[derive(Debug, Clone)]
pub struct PlayFiles<'a> {
    pub vimrc: &'a str,
    pub log: &'a str,
    pub script: Option<&'a str>,
    pub input: &'a str,
}

#[derive(Debug, Clone)]
pub struct Editor {
    program: PathBuf,
    flavor: Flavor,
}

impl Editor {
    pub fn new(program: PathBuf, flavor: Flavor) -> Self {
        Self { program, flavor }
    }

    /// Find `name` on the PATH.
    pub fn resolve(name: &str) -> Result<Self, CliError> {
        let program =
            which::which(name).map_err(|_| CliError::EditorNotFound(name.to_string()))?;
        // symlinks such as `vi -> nvim` name the real flavor
        let real = std::fs::canonicalize(&program).unwrap_or_else(|_| program.clone());
        let flavor = Flavor::from_path(&real);
        tracing::debug!(program = %program.display(), ?flavor, "editor resolved");
        Ok(Self::new(program, flavor))
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// nvim-qt on Windows may not wait for the session to end.
    pub fn is_unreliable(&self) -> bool {
        cfg!(windows) && self.flavor == Flavor::NvimQt
    }

    pub fn play_args(files: &PlayFiles<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-Z",         // restricted mode
            "-n",         // no swap file
            "--noplugin", // no plugins
            "-i",
            "NONE", // no viminfo, so no saved registers or macros
            "+0",   // start on the first line
            "-u",
            files.vimrc,
            "-U",
            "NONE", // no gvimrc
            "-W",
            files.log,
        ]
        .iter()
        .map(OsString::from)
        .collect();
        if let Some(script) = files.script {
            args.push("-s".into());
            args.push(script.into());
        }
        args.push(files.input.into());
        args
    }

    /// Vertical diff of `input` against `output`.
    pub fn diff_args(output: &str, input: &str) -> Vec<OsString> {
        vec![
            "-n".into(),
            output.into(),
            "-c".into(),
            format!("vertical diffsplit {}", input).into(),
        ]
    }

    /// Full argument list for this editor.
    pub fn command_args(&self, args: Vec<OsString>) -> Vec<OsString> {
        self.flavor
            .leading_args()
            .iter()
            .map(OsString::from)
            .chain(args)
            .collect()
    }

    /// Run the editor in `dir` and wait for it to exit.
    pub fn run(&self, dir: &Path, args: Vec<OsString>) -> Result<(), CliError> {
        let args = self.command_args(args);
        tracing::info!(program = %self.program.display(), ?args, "launching editor");

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(dir)
            .status()?;
        if !status.success() {
            tracing::warn!(%status, "editor failed");
            return Err(CliError::EditorFailed(status));
        }
        Ok(())
    }
}
