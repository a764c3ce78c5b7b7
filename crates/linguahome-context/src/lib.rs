// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly for LinguaHome.
//!
//! The system prompt is the static capability description, the device
//! table, coding rules, and worked examples, followed by whatever the
//! memory store has recorded. Assembly never writes to memory.

mod prompt;

use std::sync::Arc;

use linguahome_core::LinguaError;
use linguahome_memory::MemoryStore;
use tracing::debug;

/// Heading that introduces recalled memory in the system prompt.
pub const MEMORY_HEADING: &str = "## Context from Previous Sessions";

/// Builds the system and user prompts for code generation.
#[derive(Debug, Clone, Default)]
pub struct ContextAssembler {
    memory: Option<Arc<MemoryStore>>,
}

impl ContextAssembler {
    pub fn new(memory: Option<Arc<MemoryStore>>) -> Self {
        Self { memory }
    }

    /// Returns the static part of the system prompt (no memory section).
    pub fn static_prompt() -> String {
        [
            prompt::PREAMBLE,
            prompt::device_section().as_str(),
            prompt::RULES,
            prompt::EXAMPLES,
        ]
        .join("\n")
    }

    /// Full system prompt, including recalled memory when any exists.
    ///
    /// Identical memory contents always produce an identical prompt.
    pub fn build_system_prompt(&self) -> Result<String, LinguaError> {
        let mut system = Self::static_prompt();

        if let Some(memory) = &self.memory {
            let recalled = memory.get_memory_context()?;
            if !recalled.is_empty() {
                debug!(chars = recalled.len(), "memory context appended to system prompt");
                system.push_str("\n\n");
                system.push_str(MEMORY_HEADING);
                system.push_str("\n\n");
                system.push_str(&recalled);
            }
        }

        Ok(system)
    }

    /// Wraps the raw request with output-formatting directives.
    pub fn build_user_prompt(&self, user_text: &str) -> String {
        format!("User request: {user_text}\n\n{}", prompt::USER_DIRECTIVES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_memory() -> (tempfile::TempDir, Arc<MemoryStore>, ContextAssembler) {
        let dir = tempfile::tempdir().unwrap();
        let memory = Arc::new(MemoryStore::open(dir.path()).unwrap());
        let assembler = ContextAssembler::new(Some(memory.clone()));
        (dir, memory, assembler)
    }

    #[test]
    fn system_prompt_contains_device_mapping() {
        let prompt = ContextAssembler::default().build_system_prompt().unwrap();
        assert!(prompt.contains("Robot Corner"));
        assert!(prompt.contains("1078"));
        assert!(prompt.contains("sensors.get_sensor"));
        assert!(prompt.contains("actuator.set_value"));
        assert!(prompt.contains("history.get_history"));
        assert!(!prompt.contains(MEMORY_HEADING));
    }

    #[test]
    fn empty_memory_adds_no_section() {
        let (_dir, _memory, assembler) = with_memory();
        let prompt = assembler.build_system_prompt().unwrap();
        assert_eq!(prompt, ContextAssembler::static_prompt());
    }

    #[test]
    fn recorded_memory_is_appended_last() {
        let (_dir, memory, assembler) = with_memory();
        memory.remember_preference("prefers Celsius").unwrap();
        memory.append_today("plug_1 turned on").unwrap();

        let prompt = assembler.build_system_prompt().unwrap();
        let heading = prompt.find(MEMORY_HEADING).unwrap();
        let examples = prompt.find("## Example Interactions").unwrap();
        assert!(examples < heading);
        assert!(prompt[heading..].contains("## User Preferences"));
        assert!(prompt[heading..].contains("prefers Celsius"));
        assert!(prompt[heading..].contains("plug_1 turned on"));
    }

    #[test]
    fn system_prompt_is_deterministic_and_read_only() {
        let (_dir, memory, assembler) = with_memory();
        memory.append_today("door_1 opened").unwrap();
        let before = memory.read_today().unwrap();

        let first = assembler.build_system_prompt().unwrap();
        let second = assembler.build_system_prompt().unwrap();
        assert_eq!(first, second);
        assert_eq!(memory.read_today().unwrap(), before);
    }

    #[test]
    fn user_prompt_wraps_request() {
        let prompt = ContextAssembler::default().build_user_prompt("Turn on plug_1");
        assert!(prompt.starts_with("User request: Turn on plug_1\n\n"));
        assert!(prompt.contains("Use print() for all output"));
        assert!(prompt.contains("correct sensor/device IDs"));
        assert!(prompt.contains("Handle potential errors"));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn user_text_is_embedded_verbatim(text in ".{0,200}") {
                let prompt = ContextAssembler::default().build_user_prompt(&text);
                let expected_prefix = format!("User request: {text}\n\n");
                prop_assert!(prompt.starts_with(&expected_prefix));
            }
        }
    }
}
