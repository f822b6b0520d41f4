use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    /// Building a closed instantiation from an open type failed.
    pub const INSTANTIATION_FAILED: u32 = 1001;
    /// The registry raised an error while checking an instantiation.
    pub const VALIDITY_CHECK_FAILED: u32 = 1002;
    /// An open type had no argument that passed every check.
    pub const NO_VALID_ARGUMENT: u32 = 2001;
    /// The configured category path does not exist in the tree.
    pub const CATEGORY_NOT_FOUND: u32 = 3001;
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::INSTANTIATION_FAILED,
        category: DiagnosticCategory::Message,
        message: "Cannot instantiate '{0}' with '{1}': {2}",
    },
    DiagnosticMessage {
        code: diagnostic_codes::VALIDITY_CHECK_FAILED,
        category: DiagnosticCategory::Message,
        message: "Validity check for '{0}' failed: {1}",
    },
    DiagnosticMessage {
        code: diagnostic_codes::NO_VALID_ARGUMENT,
        category: DiagnosticCategory::Warning,
        message: "No valid generic argument found for '{0}'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::CATEGORY_NOT_FOUND,
        category: DiagnosticCategory::Warning,
        message: "Category '{0}' not found, flattening the whole catalog",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Name of the type (or category path) the diagnostic is about.
    pub subject: String,
    pub message_text: String,
}

impl Diagnostic {
    /// Build a diagnostic from the message table, substituting `args` into
    /// the `{n}` placeholders. Unknown codes keep the raw arguments joined.
    pub fn from_code(code: u32, subject: impl Into<String>, args: &[&str]) -> Self {
        let (category, message_text) = match lookup_message(code) {
            Some(m) => (m.category, format_message(m.message, args)),
            None => (DiagnosticCategory::Message, args.join(": ")),
        };
        Self {
            category,
            code,
            subject: subject.into(),
            message_text,
        }
    }
}

pub(crate) fn lookup_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Substitute `{n}` placeholders in a single left-to-right scan.
///
/// Substituted text is never rescanned, and placeholders without a matching
/// argument are kept as written.
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let tail = &rest[open..];
        let arg = tail[1..].find('}').and_then(|close| {
            let index = tail[1..=close].parse::<usize>().ok()?;
            Some((args.get(index)?, close + 2))
        });
        match arg {
            Some((value, consumed)) => {
                result.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                result.push('{');
                rest = &tail[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
