// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model aliases and provider selection by model-name prefix.

use strum::{Display, EnumIter, IntoEnumIterator};

/// Which upstream API serves a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ProviderKind {
    #[strum(serialize = "openai")]
    OpenAi,
    #[strum(serialize = "anthropic")]
    Anthropic,
    #[strum(serialize = "google")]
    Google,
}

impl ProviderKind {
    /// Picks the provider from the canonical model identifier's prefix.
    pub fn for_model(model: &str) -> Option<Self> {
        let model = model.to_ascii_lowercase();
        if model.starts_with("gpt") || model.starts_with("o1") {
            Some(Self::OpenAi)
        } else if model.starts_with("claude") {
            Some(Self::Anthropic)
        } else if model.starts_with("gemini") {
            Some(Self::Google)
        } else {
            None
        }
    }

    /// Display name used when listing models.
    pub fn label(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Google => "Google Gemini",
        }
    }

    /// Canonical models known to work with this provider.
    pub fn models(self) -> &'static [&'static str] {
        match self {
            Self::OpenAi => &["gpt-4o", "gpt-4o-mini", "gpt-4-turbo"],
            Self::Anthropic => &[
                "claude-3-5-sonnet-20241022",
                "claude-3-5-haiku-20241022",
                "claude-3-opus-20240229",
            ],
            Self::Google => &[
                "gemini/gemini-2.0-flash",
                "gemini/gemini-1.5-pro",
                "gemini/gemini-1.5-flash",
            ],
        }
    }
}

/// Short names accepted in configuration, mapped to canonical identifiers.
pub const MODEL_ALIASES: &[(&str, &str)] = &[
    ("gpt-4o", "gpt-4o"),
    ("gpt4o", "gpt-4o"),
    ("gpt-4o-mini", "gpt-4o-mini"),
    ("gpt4", "gpt-4-turbo"),
    ("claude", "claude-3-5-sonnet-20241022"),
    ("claude-sonnet", "claude-3-5-sonnet-20241022"),
    ("claude-haiku", "claude-3-5-haiku-20241022"),
    ("claude-opus", "claude-3-opus-20240229"),
    ("gemini", "gemini/gemini-2.0-flash"),
    ("gemini-flash", "gemini/gemini-2.0-flash"),
    ("gemini-pro", "gemini/gemini-1.5-pro"),
    ("gemini-2", "gemini/gemini-2.0-flash"),
    ("gemini-1.5", "gemini/gemini-1.5-pro"),
];

/// Resolves an alias (case-insensitive) to its canonical identifier.
/// Unknown names pass through unchanged.
pub fn resolve_model(name: &str) -> String {
    let lowered = name.to_ascii_lowercase();
    MODEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Supported models grouped by provider, in display order.
pub fn list_supported_models() -> Vec<(ProviderKind, &'static [&'static str])> {
    ProviderKind::iter().map(|kind| (kind, kind.models())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_case_insensitively() {
        assert_eq!(resolve_model("claude"), "claude-3-5-sonnet-20241022");
        assert_eq!(resolve_model("GPT4"), "gpt-4-turbo");
        assert_eq!(resolve_model("gemini"), "gemini/gemini-2.0-flash");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(resolve_model("gpt-4.1-nano"), "gpt-4.1-nano");
    }

    #[test]
    fn provider_by_prefix() {
        assert_eq!(ProviderKind::for_model("gpt-4o"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::for_model("o1-preview"), Some(ProviderKind::OpenAi));
        assert_eq!(
            ProviderKind::for_model("claude-3-opus-20240229"),
            Some(ProviderKind::Anthropic)
        );
        assert_eq!(
            ProviderKind::for_model("gemini/gemini-1.5-pro"),
            Some(ProviderKind::Google)
        );
        assert_eq!(ProviderKind::for_model("llama3"), None);
    }

    #[test]
    fn every_alias_targets_a_known_provider() {
        for (alias, canonical) in MODEL_ALIASES {
            assert!(ProviderKind::for_model(canonical).is_some(), "{alias}");
        }
    }

    #[test]
    fn listing_covers_all_providers() {
        let listing = list_supported_models();
        assert_eq!(listing.len(), 3);
        assert_eq!(listing[0].0.to_string(), "openai");
        assert!(listing[2].1.contains(&"gemini/gemini-2.0-flash"));
    }
}
