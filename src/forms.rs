use crate::types::{AuthMode, NewRecipe};
use thiserror::Error;

pub const TITLE_MAX: usize = 80;
pub const DESCRIPTION_MAX: usize = 140;

pub const SUBMIT_FAILED: &str = "Failed to submit recipe. Try again!";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("A request is already in progress.")]
    Busy,
}

/// Split comma separated tags, trimming each and dropping empties.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split text into one entry per line, trimming each and dropping blank lines.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn push_limited(field: &mut String, c: char, max: Option<usize>) {
    if max.is_none_or(|max| field.chars().count() < max) {
        field.push(c);
    }
}

// ============================================================
// AUTH FORM
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            email: String::new(),
            password: String::new(),
            focus: AuthField::Email,
            error: None,
            loading: false,
        }
    }
}

impl AuthForm {
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            AuthField::Email => self.email.push(c),
            AuthField::Password => self.password.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            AuthField::Email => self.email.pop(),
            AuthField::Password => self.password.pop(),
        };
    }

    /// Validate the form and mark it in flight. Returns the credentials to send.
    pub fn begin_submit(&mut self) -> Result<(String, String), FormError> {
        if self.loading {
            return Err(FormError::Busy);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(FormError::Required("Email"));
        }
        if !email.contains('@') {
            return Err(FormError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }
        self.loading = true;
        self.error = None;
        Ok((email.to_string(), self.password.clone()))
    }
}

// ============================================================
// SUBMIT FORM
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitField {
    Title,
    Description,
    Tags,
    Ingredients,
    Instructions,
}

impl SubmitField {
    pub const ORDER: [Self; 5] = [
        Self::Title,
        Self::Description,
        Self::Tags,
        Self::Ingredients,
        Self::Instructions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Short Description",
            Self::Tags => "Tags (comma separated)",
            Self::Ingredients => "Ingredients (one per line)",
            Self::Instructions => "Instructions (one step per line)",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, Self::Ingredients | Self::Instructions)
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

#[derive(Debug, Clone)]
pub struct SubmitForm {
    pub title: String,
    pub short_description: String,
    pub tags: String,
    pub ingredients: String,
    pub instructions: String,
    pub focus: SubmitField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl Default for SubmitForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            short_description: String::new(),
            tags: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            focus: SubmitField::Title,
            error: None,
            submitting: false,
        }
    }
}

impl SubmitForm {
    pub fn value(&self, field: SubmitField) -> &str {
        match field {
            SubmitField::Title => &self.title,
            SubmitField::Description => &self.short_description,
            SubmitField::Tags => &self.tags,
            SubmitField::Ingredients => &self.ingredients,
            SubmitField::Instructions => &self.instructions,
        }
    }

    fn focused_mut(&mut self) -> (&mut String, Option<usize>) {
        match self.focus {
            SubmitField::Title => (&mut self.title, Some(TITLE_MAX)),
            SubmitField::Description => (&mut self.short_description, Some(DESCRIPTION_MAX)),
            SubmitField::Tags => (&mut self.tags, None),
            SubmitField::Ingredients => (&mut self.ingredients, None),
            SubmitField::Instructions => (&mut self.instructions, None),
        }
    }

    pub fn push_char(&mut self, c: char) {
        let (field, max) = self.focused_mut();
        push_limited(field, c, max);
    }

    /// Enter starts a new line in list fields and moves on elsewhere.
    pub fn newline(&mut self) {
        if self.focus.is_multiline() {
            self.push_char('\n');
        } else {
            self.focus = self.focus.next();
        }
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().0.pop();
    }

    /// Normalize the free text into the payload sent to the backend.
    pub fn to_new_recipe(&self) -> Result<NewRecipe, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::Required("Title"));
        }
        let short_description = self.short_description.trim();
        if short_description.is_empty() {
            return Err(FormError::Required("Short description"));
        }
        let ingredients = split_lines(&self.ingredients);
        if ingredients.is_empty() {
            return Err(FormError::Required("At least one ingredient"));
        }
        let instructions = split_lines(&self.instructions);
        if instructions.is_empty() {
            return Err(FormError::Required("At least one instruction"));
        }
        Ok(NewRecipe {
            title: title.to_string(),
            short_description: short_description.to_string(),
            tags: split_tags(&self.tags),
            ingredients,
            instructions,
        })
    }

    /// Validate and mark the form in flight.
    pub fn begin_submit(&mut self) -> Result<NewRecipe, FormError> {
        if self.submitting {
            return Err(FormError::Busy);
        }
        let recipe = self.to_new_recipe()?;
        self.submitting = true;
        self.error = None;
        Ok(recipe)
    }

    /// Keep the entered text so the user can retry.
    pub fn fail(&mut self) {
        self.submitting = false;
        self.error = Some(SUBMIT_FAILED.to_string());
    }
}
