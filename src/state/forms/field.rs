//! Form field value objects

/// Kind of input a field represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Telephone,
    Select,
    Textarea,
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub required: bool,
    pub kind: FieldKind,
    /// Choices for select fields, empty for every other kind
    pub options: Vec<String>,
}

impl FormField {
    /// Create a new free-text field
    pub fn text(name: &str, label: &str, required: bool) -> Self {
        Self::with_kind(name, label, required, FieldKind::Text)
    }

    /// Create a new email field
    pub fn email(name: &str, label: &str, required: bool) -> Self {
        Self::with_kind(name, label, required, FieldKind::Email)
    }

    /// Create a new telephone field
    pub fn telephone(name: &str, label: &str, required: bool) -> Self {
        Self::with_kind(name, label, required, FieldKind::Telephone)
    }

    /// Create a new multiline field
    pub fn textarea(name: &str, label: &str, required: bool) -> Self {
        Self::with_kind(name, label, required, FieldKind::Textarea)
    }

    /// Create a new select field. The first option is selected initially.
    pub fn select(name: &str, label: &str, required: bool, options: &[&str]) -> Self {
        let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
        Self {
            value: options.first().cloned().unwrap_or_default(),
            options,
            ..Self::with_kind(name, label, required, FieldKind::Select)
        }
    }

    fn with_kind(name: &str, label: &str, required: bool, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            required,
            kind,
            options: Vec::new(),
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.kind == FieldKind::Textarea
    }

    /// Get the text value
    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Set the text value
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Push a character to the field value. Select fields ignore typing.
    pub fn push_char(&mut self, c: char) {
        if self.kind != FieldKind::Select {
            self.value.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if self.kind != FieldKind::Select {
            self.value.pop();
        }
    }

    /// Step a select field to the next option (wraps around)
    pub fn next_option(&mut self) {
        self.step_option(1);
    }

    /// Step a select field to the previous option (wraps around)
    pub fn prev_option(&mut self) {
        self.step_option(-1);
    }

    fn step_option(&mut self, delta: isize) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len() as isize;
        let current = self
            .options
            .iter()
            .position(|o| o == &self.value)
            .map(|i| i as isize)
            .unwrap_or(0);
        let next = (current + delta).rem_euclid(len) as usize;
        self.value = self.options[next].clone();
    }

    /// Reset the field to its initial value
    pub fn clear(&mut self) {
        self.value = match self.kind {
            FieldKind::Select => self.options.first().cloned().unwrap_or_default(),
            _ => String::new(),
        };
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Select => format!("◀ {} ▶", self.value),
            _ => self.value.clone(),
        }
    }
}
