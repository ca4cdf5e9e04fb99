//! Error collection for a single pack or unpack call.
//!
//! Every check records into a [`Diagnostics`] value owned by the call instead
//! of returning at the first failure. The call fails as a whole when the
//! collection is non-empty, and the caller sees the full batch.

use std::fmt;

/// Category of a reported error.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorKind {
    /// Bad magic, unsupported version, truncated buffer or table.
    Format,
    /// Unrecognized property kind, platform tag, key or orientation code.
    UnknownKind,
    /// Wrong type or shape for a property value.
    Value,
    /// A value or address does not fit its fixed-width field.
    Overflow,
    /// More than one value for a single-valued property.
    Multiplicity,
    /// Inconsistent internal state (a reference to a segment that was never
    /// planned). Indicates a bug, not bad input.
    Internal,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::UnknownKind => "unknown-kind",
            Self::Value => "value",
            Self::Overflow => "overflow",
            Self::Multiplicity => "multiplicity",
            Self::Internal => "internal",
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            Self::Format => "malformed CBF file",
            Self::UnknownKind => "unknown code",
            Self::Value => "invalid property value",
            Self::Overflow => "value does not fit its field",
            Self::Multiplicity => "too many values for property",
            Self::Internal => "internal layout error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One reported error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    /// Byte offset in the file the error refers to, when there is one.
    pub offset: Option<usize>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.kind, self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " (at {offset:#06x})")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    diagnostic: Diagnostic,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Start a diagnostic of the given kind.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(&mut self, kind: ErrorKind) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            diagnostic: Diagnostic {
                kind,
                message: kind.default_message().to_string(),
                offset: None,
            },
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.messages.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.messages
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.messages
    }

    /// Whether any diagnostic of `kind` was reported.
    pub fn has(&self, kind: ErrorKind) -> bool {
        self.messages.iter().any(|d| d.kind == kind)
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.messages.iter().filter(|d| d.kind == kind).count()
    }

    /// Distinct kinds in report order.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        let mut kinds = Vec::new();
        for d in &self.messages {
            if !kinds.contains(&d.kind) {
                kinds.push(d.kind);
            }
        }
        kinds
    }

    /// One line per diagnostic.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for d in &self.messages {
            out.push_str(&d.to_string());
            out.push('\n');
        }
        out
    }

    /// `Ok(value)` when nothing was reported, otherwise the whole batch.
    pub fn into_result<T>(self, value: T) -> Result<T, Diagnostics> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl DiagnosticBuilder<'_> {
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.diagnostic.message = msg.into();
        self
    }

    /// Attach the byte offset the diagnostic refers to.
    pub fn at(mut self, offset: usize) -> Self {
        self.diagnostic.offset = Some(offset);
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.diagnostic);
    }
}

impl std::error::Error for Diagnostics {}
