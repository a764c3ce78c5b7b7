// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pulls generated code out of a model reply.

const FENCE: &str = "```";
const TAGGED_FENCE: &str = "```rhai";

/// Returns the code the model meant to run, if any.
///
/// The first ```` ```rhai ```` block wins. Otherwise the first generic
/// fenced block is used, minus a bare language word on its first line.
/// Later blocks are ignored. An empty block counts as no code.
pub fn extract_code(model_output: &str) -> Option<String> {
    tagged_block(model_output)
        .or_else(|| generic_block(model_output))
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}

fn tagged_block(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(pos) = text[search_from..].find(TAGGED_FENCE) {
        let body_start = search_from + pos + TAGGED_FENCE.len();
        let rest = &text[body_start..];
        // ```rhaiscript and similar are not the tag.
        if rest.starts_with(char::is_whitespace) {
            return rest.find(FENCE).map(|end| &rest[..end]);
        }
        search_from = body_start;
    }
    None
}

fn generic_block(text: &str) -> Option<&str> {
    let start = text.find(FENCE)? + FENCE.len();
    let rest = &text[start..];
    let block = &rest[..rest.find(FENCE)?];
    match block.split_once('\n') {
        Some((first, body)) if is_info_string(first) => Some(body),
        _ => Some(block),
    }
}

/// An empty line or a bare language word such as `js` or `c++`.
fn is_info_string(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.' | '#'))
}
