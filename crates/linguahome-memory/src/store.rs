// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Markdown-file memory store: one log per calendar day plus a long-term
//! preference file, all under `<workspace>/memory/`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Days, Local, NaiveDate};
use linguahome_core::LinguaError;
use tracing::debug;

use crate::types::MemoryKind;

/// File name of the long-term preference record.
pub const LONG_TERM_FILE: &str = "MEMORY.md";

const RECENT_SEPARATOR: &str = "\n\n---\n\n";
const COMMAND_RESULT_LIMIT: usize = 100;

/// Durable append-only memory scoped to a workspace directory.
///
/// Files are only ever appended to, except for [`MemoryStore::write_long_term`]
/// which replaces the long-term file wholesale. Writers sharing a store (or
/// any clone of it) are serialised; there is no cross-process locking.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    memory_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl MemoryStore {
    /// Opens (and creates if needed) `<workspace>/memory`.
    pub fn open(workspace: impl AsRef<Path>) -> Result<Self, LinguaError> {
        let memory_dir = workspace.as_ref().join("memory");
        fs::create_dir_all(&memory_dir)?;
        debug!(path = %memory_dir.display(), "memory directory ready");
        Ok(Self {
            memory_dir,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Directory holding every memory file.
    pub fn memory_dir(&self) -> &Path {
        &self.memory_dir
    }

    /// Path of the daily log for `date`.
    pub fn daily_path(&self, date: NaiveDate) -> PathBuf {
        self.memory_dir.join(format!("{}.md", date.format("%Y-%m-%d")))
    }

    fn long_term_path(&self) -> PathBuf {
        self.memory_dir.join(LONG_TERM_FILE)
    }

    fn path_for(&self, kind: MemoryKind) -> PathBuf {
        match kind {
            MemoryKind::Daily => self.daily_path(today()),
            MemoryKind::LongTerm => self.long_term_path(),
        }
    }

    /// Appends `content` to the file for `kind`.
    ///
    /// A missing file is created with the kind's header; an existing one
    /// gets a newline separator before the new content.
    pub fn append(&self, kind: MemoryKind, content: &str) -> Result<(), LinguaError> {
        let path = self.path_for(kind);
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        let entry = if file.metadata()?.len() == 0 {
            format!("{}{content}", kind.header(today()))
        } else {
            format!("\n{content}")
        };
        file.write_all(entry.as_bytes())?;
        debug!(kind = %kind, bytes = content.len(), "memory entry appended");
        Ok(())
    }

    /// Today's log, or an empty string if nothing was recorded today.
    pub fn read_today(&self) -> Result<String, LinguaError> {
        read_or_empty(&self.daily_path(today()))
    }

    pub fn append_today(&self, content: &str) -> Result<(), LinguaError> {
        self.append(MemoryKind::Daily, content)
    }

    /// Concatenates up to `days` daily logs, most recent first.
    ///
    /// Days without a log are skipped silently.
    pub fn get_recent(&self, days: u32) -> Result<String, LinguaError> {
        let today = today();
        let mut logs = Vec::new();
        for offset in 0..days {
            let Some(date) = today.checked_sub_days(Days::new(u64::from(offset))) else {
                break;
            };
            let path = self.daily_path(date);
            if path.exists() {
                logs.push(fs::read_to_string(&path)?);
            }
        }
        Ok(logs.join(RECENT_SEPARATOR))
    }

    pub fn read_long_term(&self) -> Result<String, LinguaError> {
        read_or_empty(&self.long_term_path())
    }

    /// Replaces the long-term file with `content`.
    pub fn write_long_term(&self, content: &str) -> Result<(), LinguaError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        fs::write(self.long_term_path(), content)?;
        Ok(())
    }

    pub fn append_long_term(&self, content: &str) -> Result<(), LinguaError> {
        self.append(MemoryKind::LongTerm, content)
    }

    /// Records a user command and its (truncated) result in today's log.
    pub fn remember_command(&self, command: &str, result: &str) -> Result<(), LinguaError> {
        let result: String = result.chars().take(COMMAND_RESULT_LIMIT).collect();
        let entry = format!("- [{}] Command: {command}\n  Result: {result}", clock());
        self.append_today(&entry)
    }

    /// Records a notable sensor reading in today's log.
    pub fn remember_sensor_event(
        &self,
        sensor_name: &str,
        value: &str,
        status: &str,
    ) -> Result<(), LinguaError> {
        let entry = format!("- [{}] {sensor_name}: {value} ({status})", clock());
        self.append_today(&entry)
    }

    /// Records a user preference in long-term memory.
    pub fn remember_preference(&self, preference: &str) -> Result<(), LinguaError> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M");
        self.append_long_term(&format!("- [{stamp}] {preference}"))
    }

    /// Prompt-ready memory section: preferences first, then today's activity.
    ///
    /// Returns an empty string when nothing has been recorded.
    pub fn get_memory_context(&self) -> Result<String, LinguaError> {
        let mut parts = Vec::new();

        let long_term = self.read_long_term()?;
        if !long_term.is_empty() {
            parts.push(format!("## User Preferences\n{long_term}"));
        }

        let recent = self.get_recent(1)?;
        if !recent.is_empty() {
            parts.push(format!("## Recent Activity\n{recent}"));
        }

        Ok(parts.join("\n\n"))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn clock() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn read_or_empty(path: &Path) -> Result<String, LinguaError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}
