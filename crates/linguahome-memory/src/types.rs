// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::NaiveDate;
use strum::Display;

/// Which memory file an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MemoryKind {
    /// Per-day activity log (`memory/YYYY-MM-DD.md`).
    Daily,
    /// Cross-session user preferences (`memory/MEMORY.md`).
    LongTerm,
}

impl MemoryKind {
    /// Header written when the file is first created.
    pub fn header(self, date: NaiveDate) -> String {
        match self {
            Self::Daily => format!("# LinguaHome Log - {}\n\n", date.format("%Y-%m-%d")),
            Self::LongTerm => "# LinguaHome User Preferences\n\n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(
            MemoryKind::Daily.header(date),
            "# LinguaHome Log - 2026-03-14\n\n"
        );
        assert_eq!(
            MemoryKind::LongTerm.header(date),
            "# LinguaHome User Preferences\n\n"
        );
        assert_eq!(MemoryKind::LongTerm.to_string(), "long_term");
    }
}
