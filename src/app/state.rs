//! Screen state for the terminal front end.

use crate::models::ProgressSnapshot;

/// Longest username or password the forms accept.
pub const MAX_FIELD_LENGTH: usize = 24;

/// Which field of a credentials form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Username,
    Password,
}

/// Username/password form shared by the login and register screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
    pub focus: Field,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl CredentialsForm {
    pub fn with_notice(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..Self::default()
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Username => Field::Password,
            Field::Password => Field::Username,
        };
    }

    pub fn push(&mut self, c: char) {
        let field = self.focused_mut();
        if field.chars().count() < MAX_FIELD_LENGTH {
            field.push(c);
        }
        self.error = None;
    }

    pub fn pop(&mut self) {
        self.focused_mut().pop();
        self.error = None;
    }

    /// Trimmed username and password.
    pub fn credentials(&self) -> (String, String) {
        (
            self.username.trim().to_string(),
            self.password.trim().to_string(),
        )
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }
}

/// Entries of the main menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    StartGame,
    Logout,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::StartGame, MenuItem::Logout];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::StartGame => "Start game",
            MenuItem::Logout => "Log out",
        }
    }
}

/// Choices of the pause dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseChoice {
    #[default]
    Continue,
    SaveAndQuit,
}

/// Choices of the end-of-game dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndChoice {
    #[default]
    Retry,
    Exit,
}

/// How a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    WrongAnswer { expected: u32 },
    TimeExpired,
    Completed,
}

impl SessionEnd {
    pub fn headline(self) -> &'static str {
        match self {
            SessionEnd::WrongAnswer { .. } => "Wrong answer!",
            SessionEnd::TimeExpired => "Time's up!",
            SessionEnd::Completed => "All levels cleared!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Login(CredentialsForm),
    Register(CredentialsForm),
    Menu {
        selected: usize,
    },
    /// A saved session exists; asking whether to continue it.
    ResumePrompt {
        saved: ProgressSnapshot,
    },
    Playing,
    Paused {
        choice: PauseChoice,
    },
    GameEnd {
        end: SessionEnd,
        score: u32,
        choice: EndChoice,
    },
}

impl Default for AppState {
    fn default() -> Self {
        Self::Login(CredentialsForm::default())
    }
}

impl AppState {
    pub fn menu() -> Self {
        Self::Menu { selected: 0 }
    }
}

/// Severity of the one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_edits_the_focused_field() {
        let mut form = CredentialsForm::default();
        form.push('a');
        form.push('l');
        form.toggle_focus();
        form.push('x');
        form.pop();
        form.push('1');

        assert_eq!(form.username, "al");
        assert_eq!(form.password, "1");
        assert_eq!(form.focus, Field::Password);
    }

    #[test]
    fn form_caps_field_length_and_clears_errors() {
        let mut form = CredentialsForm {
            error: Some("bad".to_string()),
            ..CredentialsForm::default()
        };
        for _ in 0..MAX_FIELD_LENGTH + 5 {
            form.push('z');
        }
        assert_eq!(form.username.len(), MAX_FIELD_LENGTH);
        assert_eq!(form.error, None);
    }

    #[test]
    fn credentials_are_trimmed() {
        let form = CredentialsForm {
            username: "  amy ".to_string(),
            password: " pw ".to_string(),
            ..CredentialsForm::default()
        };
        assert_eq!(form.credentials(), ("amy".to_string(), "pw".to_string()));
    }
}
