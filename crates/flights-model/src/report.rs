#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

/// Kind of data-quality check that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    NullTolerance,
    KeyDuplicates,
}

/// A finding from a data-quality check.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub check: CheckKind,
    pub severity: IssueSeverity,
    /// Column the finding is about (None for multi-column checks).
    pub column: Option<String>,
    /// Offending row count.
    pub count: Option<u64>,
    pub message: String,
}

/// Findings of one validation pass over the record table.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub row_count: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(row_count: usize) -> Self {
        Self {
            row_count,
            issues: Vec::new(),
        }
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn error_count(&self) -> usize {
        self.count_severity(IssueSeverity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_severity(IssueSeverity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Issues of the given check kind.
    pub fn issues_for(&self, check: CheckKind) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| issue.check == check)
    }

    fn count_severity(&self, severity: IssueSeverity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}
