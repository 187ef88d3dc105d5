//! The interactive play loop: edit, score, then diff, upload, retry or quit.

use crate::editor::{Editor, PlayFiles};
use crate::error::CliError;
use crate::{output, prompt};
use color_eyre::eyre::Result;
use std::io;
use std::path::Path;
use tempfile::TempDir;
use vimgolf_api::GolfClient;
use vimgolf_core::{AttemptRecorder, Challenge, ChallengeStore, Evaluation, Keys};
use vimgolf_store::ApiKey;

const VIMRC: &str = include_str!("../assets/vimgolf.vimrc");
const VIMRC_FILE: &str = "vimgolf.vimrc";
const LOG_FILE: &str = "log";
const SCRIPT_FILE: &str = "script";

/// Scratch directory with the files of one session. Removed on drop.
pub struct Workspace {
    dir: TempDir,
    input: String,
    output: String,
}

impl Workspace {
    pub fn new(challenge: &Challenge) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("vimgolf-").tempdir()?;
        let workspace = Self {
            dir,
            input: challenge.input.file_name("in"),
            output: challenge.output.file_name("out"),
        };
        workspace.reset_input(challenge)?;
        std::fs::write(workspace.path().join(&workspace.output), &challenge.output.text)?;
        Ok(workspace)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Input file name, relative to the workspace.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Restore the start file before a new session.
    pub fn reset_input(&self, challenge: &Challenge) -> io::Result<()> {
        std::fs::write(self.path().join(&self.input), &challenge.input.text)
    }

    pub fn write_vimrc(&self) -> io::Result<()> {
        std::fs::write(self.path().join(VIMRC_FILE), VIMRC)
    }

    pub fn write_script(&self, keys: &Keys) -> io::Result<()> {
        std::fs::write(self.path().join(SCRIPT_FILE), keys.raw())
    }

    /// The edited start file.
    pub fn read_input(&self) -> io::Result<Vec<u8>> {
        std::fs::read(self.path().join(&self.input))
    }

    /// Keylog of the last session. Vim leaves no log when nothing was typed.
    pub fn read_log(&self) -> io::Result<Vec<u8>> {
        match std::fs::read(self.path().join(LOG_FILE)) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            other => other,
        }
    }

    pub fn clear_log(&self) -> io::Result<()> {
        match std::fs::remove_file(self.path().join(LOG_FILE)) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Where correct entries can be uploaded.
pub struct Uploader<'a> {
    pub client: &'a GolfClient,
    pub api_key: &'a ApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Diff,
    Upload,
    Retry,
    Quit,
}

impl Choice {
    pub fn key(self) -> char {
        match self {
            Choice::Diff => 'd',
            Choice::Upload => 'w',
            Choice::Retry => 'r',
            Choice::Quit => 'q',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Choice::Diff => "Show diff",
            Choice::Upload => "Upload result",
            Choice::Retry => "Retry the current challenge",
            Choice::Quit => "Quit vimgolf",
        }
    }
}

/// Options offered after a session. Diffs only make sense for incorrect
/// output, uploads only for correct output that was not uploaded yet.
pub fn menu_choices(evaluation: &Evaluation, can_upload: bool) -> Vec<Choice> {
    let mut choices = Vec::new();
    if !evaluation.correct() {
        choices.push(Choice::Diff);
    }
    if can_upload && evaluation.can_submit() {
        choices.push(Choice::Upload);
    }
    choices.push(Choice::Retry);
    choices.push(Choice::Quit);
    choices
}

pub fn parse_choice(answer: &str, choices: &[Choice]) -> Option<Choice> {
    let mut chars = answer.chars();
    let key = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    choices.iter().copied().find(|choice| choice.key() == key)
}

pub struct Session<'a, S> {
    challenge: &'a Challenge,
    editor: &'a Editor,
    recorder: AttemptRecorder<'a, S>,
    uploader: Option<Uploader<'a>>,
    script: Option<Keys>,
}

impl<'a, S: ChallengeStore> Session<'a, S> {
    pub fn new(challenge: &'a Challenge, editor: &'a Editor, store: &'a S) -> Self {
        Self {
            challenge,
            editor,
            recorder: AttemptRecorder::new(store),
            uploader: None,
            script: None,
        }
    }

    pub fn with_uploads(mut self, uploader: Option<Uploader<'a>>) -> Self {
        self.uploader = uploader;
        self
    }

    /// Keys replayed at the start of the first session.
    pub fn with_script(mut self, script: Option<Keys>) -> Self {
        self.script = script;
        self
    }

    pub async fn run(mut self) -> Result<()> {
        if self.editor.is_unreliable() {
            output::error("vimgolf with nvim-qt on Windows may not function properly");
            output::info("If there are issues, please try using a different version of vim");
            if !prompt::confirm("Continue trying to launch?")? {
                return Err(CliError::Aborted.into());
            }
        }

        let workspace = Workspace::new(self.challenge)?;
        workspace.write_vimrc()?;
        tracing::info!(
            challenge = %self.challenge.id,
            workspace = %workspace.path().display(),
            uploads = self.uploader.is_some(),
            "session started"
        );

        output::info("Launching vimgolf session");
        loop {
            let evaluation = self.play_once(&workspace)?;
            if !self.review(&workspace, evaluation).await? {
                break;
            }
            output::info("Retrying vimgolf challenge");
        }

        output::success("Thanks for playing!");
        Ok(())
    }

    fn play_once(&mut self, workspace: &Workspace) -> Result<Evaluation> {
        workspace.reset_input(self.challenge)?;
        workspace.clear_log()?;

        let script = self.script.take();
        if let Some(keys) = &script {
            workspace.write_script(keys)?;
        }
        let files = PlayFiles {
            vimrc: VIMRC_FILE,
            log: LOG_FILE,
            script: script.as_ref().map(|_| SCRIPT_FILE),
            input: workspace.input(),
        };
        self.editor
            .run(workspace.path(), Editor::play_args(&files))?;

        let keys = Keys::from_raw(workspace.read_log()?);
        let actual = workspace.read_input()?;
        let evaluation = Evaluation::new(keys, self.challenge.output.text.as_bytes(), &actual);
        tracing::info!(
            keys = %evaluation.keys(),
            score = evaluation.score(),
            correct = evaluation.correct(),
            "session finished"
        );

        output::success("Here are your keystrokes:");
        output::print_keys(evaluation.keys().reprs());
        if evaluation.correct() {
            output::success("Success! Your output matches.");
            output::success("Your score:");
        } else {
            output::error("Uh oh, looks like your entry does not match the desired output.");
            output::error("Your score for this failed attempt:");
        }
        output::plain(evaluation.score().to_string());

        Ok(evaluation)
    }

    /// Run the menu for one session and record it. Returns whether to retry.
    async fn review(&self, workspace: &Workspace, mut evaluation: Evaluation) -> Result<bool> {
        let choice = self.menu(workspace, &mut evaluation).await;
        // recorded whatever happened in the menu
        self.recorder.record(&self.challenge.id, &evaluation)?;
        Ok(choice? == Choice::Retry)
    }

    async fn menu(&self, workspace: &Workspace, evaluation: &mut Evaluation) -> Result<Choice> {
        loop {
            let choices = menu_choices(evaluation, self.uploader.is_some());
            for choice in &choices {
                output::info(format!("[{}] {}", choice.key(), choice.label()));
            }
            let answer = prompt::input_loop("Choice> ")?;
            match parse_choice(&answer, &choices) {
                None => output::error(format!("Invalid selection: {}", answer)),
                Some(Choice::Diff) => {
                    self.editor.run(
                        workspace.path(),
                        Editor::diff_args(workspace.output(), workspace.input()),
                    )?;
                }
                Some(Choice::Upload) => self.upload(evaluation).await,
                Some(choice) => return Ok(choice),
            }
        }
    }

    /// Upload failures are reported, never fatal.
    async fn upload(&self, evaluation: &mut Evaluation) {
        let Some(uploader) = &self.uploader else {
            return;
        };
        let id = &self.challenge.id;
        match uploader
            .client
            .submit_entry(id, uploader.api_key.as_str(), evaluation.keys().raw())
            .await
        {
            Ok(()) => {
                evaluation.mark_submitted();
                output::success("Uploaded entry!");
                output::success(format!(
                    "View the leaderboard: {}",
                    uploader.client.challenge_url(id)
                ));
            }
            Err(err) => {
                tracing::warn!(challenge = %id, "upload failed: {}", err);
                output::error("The entry upload has failed");
                output::error("Please check your API key on vimgolf.com");
            }
        }
    }
}
