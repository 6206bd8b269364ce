//! Layout configuration

/// Labels used when rendering persons with missing data.
///
/// This is passed to every rendering and detail call so that the view layer
/// controls wording (and language) without touching the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Shown on a tree node in place of an absent birth date
    pub unknown_date_label: String,

    /// Placeholder for absent fields in the person detail view
    pub unknown_label: String,

    /// Placeholder for absent notes in the person detail view
    pub no_notes_label: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            unknown_date_label: "Unknown date".to_string(),
            unknown_label: "Unknown".to_string(),
            no_notes_label: "None".to_string(),
        }
    }
}

impl LayoutOptions {
    /// Create options with the default English labels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the label shown for an absent birth date.
    pub fn with_unknown_date_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_date_label = label.into();
        self
    }

    /// Override the placeholder for absent detail fields.
    pub fn with_unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = label.into();
        self
    }

    /// Override the placeholder for absent notes.
    pub fn with_no_notes_label(mut self, label: impl Into<String>) -> Self {
        self.no_notes_label = label.into();
        self
    }
}
