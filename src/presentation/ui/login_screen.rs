//! Login screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::presentation::widgets::TextInput;

/// Result of a login-screen key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    /// Nothing to do.
    None,
    /// Connect with the entered email.
    Submit(String),
    /// Leave the application.
    Quit,
}

/// Login screen collecting the employee's email.
pub struct LoginScreen {
    email_input: TextInput,
    error_message: Option<String>,
}

impl LoginScreen {
    /// Creates a new login screen.
    #[must_use]
    pub fn new() -> Self {
        let mut email_input =
            TextInput::new("Adresse e-mail").placeholder("employe@entreprise.tld");
        email_input.set_focused(true);

        Self {
            email_input,
            error_message: None,
        }
    }

    /// Sets the error line.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        match key.code {
            KeyCode::Esc => return LoginAction::Quit,
            KeyCode::Enter => {
                let email = self.email_input.value().trim().to_string();
                if email.is_empty() || !email.contains('@') {
                    self.error_message = Some("Adresse e-mail invalide".to_string());
                } else {
                    return LoginAction::Submit(email);
                }
            }
            KeyCode::Char(c) => {
                self.error_message = None;
                self.email_input.input_char(c);
            }
            KeyCode::Backspace => self.email_input.backspace(),
            KeyCode::Delete => self.email_input.delete(),
            KeyCode::Left => self.email_input.move_left(),
            KeyCode::Right => self.email_input.move_right(),
            KeyCode::Home => self.email_input.move_start(),
            KeyCode::End => self.email_input.move_end(),
            _ => {}
        }

        LoginAction::None
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(9),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, center, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(48),
            Constraint::Fill(1),
        ])
        .areas(middle);

        Clear.render(center, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Billed - Connexion")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(center);
        block.render(center, buf);

        let [prompt_area, input_area, error_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new("Identifiez-vous pour accéder à vos notes de frais")
            .render(prompt_area, buf);

        (&self.email_input).render(input_area, buf);

        if let Some(ref message) = self.error_message {
            Paragraph::new(Line::from(message.as_str()))
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .render(error_area, buf);
        }

        Paragraph::new("Entrée: se connecter  Échap: quitter")
            .style(Style::default().fg(Color::DarkGray))
            .render(hint_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_submit_with_valid_email() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "a@a");

        assert_eq!(
            screen.handle_key(press(KeyCode::Enter)),
            LoginAction::Submit("a@a".to_string())
        );
    }

    #[test]
    fn test_submit_without_at_sign_is_rejected() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "employee");

        assert_eq!(screen.handle_key(press(KeyCode::Enter)), LoginAction::None);
        assert!(screen.error_message.is_some());
    }

    #[test]
    fn test_empty_submit_is_rejected() {
        let mut screen = LoginScreen::new();
        assert_eq!(screen.handle_key(press(KeyCode::Enter)), LoginAction::None);
    }

    #[test]
    fn test_escape_quits() {
        let mut screen = LoginScreen::new();
        assert_eq!(screen.handle_key(press(KeyCode::Esc)), LoginAction::Quit);
    }
}
