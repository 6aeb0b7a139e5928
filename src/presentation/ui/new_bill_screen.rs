//! New-bill form screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tui_textarea::TextArea;

use crate::application::dto::BillForm;
use crate::domain::entities::ExpenseType;
use crate::presentation::widgets::{FooterBar, TextInput};

const FORMAT_ERROR_MESSAGE: &str = "Le justificatif doit être au format png, jpg ou jpeg.";

/// Result of a form-screen key press.
#[derive(Debug, Clone, PartialEq)]
pub enum NewBillKeyResult {
    /// Event handled, nothing else to do.
    Consumed,
    /// Leave the form without submitting.
    Cancel,
    /// A receipt file was chosen; the value is the file-input content.
    FileChosen(String),
    /// Submit the form.
    Submit(BillForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    ExpenseType,
    Name,
    Date,
    Amount,
    Vat,
    Pct,
    Commentary,
    File,
}

impl FormField {
    const ORDER: [Self; 8] = [
        Self::ExpenseType,
        Self::Name,
        Self::Date,
        Self::Amount,
        Self::Vat,
        Self::Pct,
        Self::Commentary,
        Self::File,
    ];

    fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

enum UploadNotice {
    Attached(String),
    Failed(String),
}

/// Submission form: expense fields, a commentary area, and the receipt
/// file input with its inline format-error indicator.
pub struct NewBillScreen {
    expense_type: ExpenseType,
    name: TextInput,
    date: TextInput,
    amount: TextInput,
    vat: TextInput,
    pct: TextInput,
    commentary: TextArea<'static>,
    file: TextInput,
    focus: FormField,
    format_error: bool,
    upload_notice: Option<UploadNotice>,
}

impl NewBillScreen {
    /// Creates an empty form focused on the expense category.
    #[must_use]
    pub fn new() -> Self {
        let mut screen = Self {
            expense_type: ExpenseType::default(),
            name: TextInput::new("Nom de la dépense").placeholder("Vol Paris Londres"),
            date: TextInput::new("Date").placeholder("AAAA-MM-JJ"),
            amount: TextInput::new("Montant TTC").placeholder("348"),
            vat: TextInput::new("TVA"),
            pct: TextInput::new("%").placeholder("20"),
            commentary: TextArea::default(),
            file: TextInput::new("Justificatif").placeholder("/chemin/vers/justificatif.png"),
            focus: FormField::ExpenseType,
            format_error: false,
            upload_notice: None,
        };
        screen.refresh_focus();
        screen
    }

    /// Shows the file-format error indicator and clears the file input, so
    /// no file is considered selected.
    pub fn set_format_error(&mut self) {
        self.format_error = true;
        self.upload_notice = None;
        self.file.clear();
    }

    /// Marks the receipt as attached, hiding the error indicator.
    pub fn set_attached(&mut self, file_name: impl Into<String>) {
        self.format_error = false;
        self.upload_notice = Some(UploadNotice::Attached(file_name.into()));
    }

    /// Reports an upload failure. The format indicator only covers
    /// rejected extensions, so it is hidden here.
    pub fn set_upload_failed(&mut self, message: impl Into<String>) {
        self.format_error = false;
        self.upload_notice = Some(UploadNotice::Failed(message.into()));
    }

    /// Returns the form values as currently entered.
    #[must_use]
    pub fn form(&self) -> BillForm {
        BillForm {
            expense_type: self.expense_type,
            name: self.name.value().to_string(),
            amount: self.amount.value().to_string(),
            date: self.date.value().to_string(),
            vat: self.vat.value().to_string(),
            pct: self.pct.value().to_string(),
            commentary: self.commentary.lines().join("\n"),
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Date => Some(&mut self.date),
            FormField::Amount => Some(&mut self.amount),
            FormField::Vat => Some(&mut self.vat),
            FormField::Pct => Some(&mut self.pct),
            FormField::File => Some(&mut self.file),
            FormField::ExpenseType | FormField::Commentary => None,
        }
    }

    fn refresh_focus(&mut self) {
        let focus = self.focus;
        for (field, input) in [
            (FormField::Name, &mut self.name),
            (FormField::Date, &mut self.date),
            (FormField::Amount, &mut self.amount),
            (FormField::Vat, &mut self.vat),
            (FormField::Pct, &mut self.pct),
            (FormField::File, &mut self.file),
        ] {
            input.set_focused(field == focus);
        }
    }

    fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.refresh_focus();
    }

    fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
        self.refresh_focus();
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> NewBillKeyResult {
        if key.code == KeyCode::Esc {
            return NewBillKeyResult::Cancel;
        }
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return NewBillKeyResult::Submit(self.form());
        }
        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                return NewBillKeyResult::Consumed;
            }
            KeyCode::BackTab => {
                self.focus_previous();
                return NewBillKeyResult::Consumed;
            }
            _ => {}
        }

        match self.focus {
            FormField::ExpenseType => {
                match key.code {
                    KeyCode::Left => self.expense_type = self.expense_type.previous(),
                    KeyCode::Right | KeyCode::Char(' ') => {
                        self.expense_type = self.expense_type.next();
                    }
                    KeyCode::Enter => self.focus_next(),
                    _ => {}
                }
                NewBillKeyResult::Consumed
            }
            FormField::Commentary => {
                // tui-textarea is driven directly; its own widget targets
                // another ratatui version.
                match key.code {
                    KeyCode::Char(c) => {
                        self.commentary.insert_char(c);
                    }
                    KeyCode::Backspace => {
                        self.commentary.delete_char();
                    }
                    KeyCode::Delete => {
                        self.commentary.delete_next_char();
                    }
                    KeyCode::Enter => self.commentary.insert_newline(),
                    KeyCode::Left => self.commentary.move_cursor(tui_textarea::CursorMove::Back),
                    KeyCode::Right => {
                        self.commentary.move_cursor(tui_textarea::CursorMove::Forward);
                    }
                    KeyCode::Up => self.commentary.move_cursor(tui_textarea::CursorMove::Up),
                    KeyCode::Down => self.commentary.move_cursor(tui_textarea::CursorMove::Down),
                    KeyCode::Home => self.commentary.move_cursor(tui_textarea::CursorMove::Head),
                    KeyCode::End => self.commentary.move_cursor(tui_textarea::CursorMove::End),
                    _ => {}
                }
                NewBillKeyResult::Consumed
            }
            FormField::File if key.code == KeyCode::Enter => {
                let value = self.file.value().trim().to_string();
                if value.is_empty() {
                    NewBillKeyResult::Consumed
                } else {
                    NewBillKeyResult::FileChosen(value)
                }
            }
            _ => {
                if key.code == KeyCode::Enter {
                    self.focus_next();
                    return NewBillKeyResult::Consumed;
                }
                if let Some(input) = self.focused_input() {
                    match key.code {
                        KeyCode::Char(c) => input.input_char(c),
                        KeyCode::Backspace => input.backspace(),
                        KeyCode::Delete => input.delete(),
                        KeyCode::Left => input.move_left(),
                        KeyCode::Right => input.move_right(),
                        KeyCode::Home => input.move_start(),
                        KeyCode::End => input.move_end(),
                        _ => {}
                    }
                }
                NewBillKeyResult::Consumed
            }
        }
    }

    fn render_expense_type(&self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focus == FormField::ExpenseType {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Type de dépense");
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(format!("◄ {} ►", self.expense_type.label())).render(inner, buf);
    }

    // Renders the commentary buffer by hand, like every other field.
    fn render_commentary(&self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focus == FormField::Commentary {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Commentaire");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.commentary.lines();
        let is_empty = lines.iter().all(String::is_empty);
        if is_empty {
            Paragraph::new("Commentaire (facultatif)")
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
        } else {
            let visible: Vec<ratatui::text::Line> = lines
                .iter()
                .take(inner.height as usize)
                .map(|line| ratatui::text::Line::from(line.as_str()))
                .collect();
            Paragraph::new(visible).render(inner, buf);
        }

        if self.focus == FormField::Commentary && inner.width > 0 && inner.height > 0 {
            let (row, col) = self.commentary.cursor();
            #[allow(clippy::cast_possible_truncation)]
            let cursor_x = inner.x + col as u16;
            #[allow(clippy::cast_possible_truncation)]
            let cursor_y = inner.y + row as u16;
            if cursor_x < inner.x + inner.width && cursor_y < inner.y + inner.height {
                buf[(cursor_x, cursor_y)]
                    .set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

impl Default for NewBillScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &NewBillScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, row1, row2, row3, commentary_area, file_area, notice_area, footer_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        Paragraph::new("Envoyer une note de frais")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .render(title_area, buf);

        let [left1, right1] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(row1);
        self.render_expense_type(left1, buf);
        (&self.name).render(right1, buf);

        let [left2, right2] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(row2);
        (&self.date).render(left2, buf);
        (&self.amount).render(right2, buf);

        let [left3, right3] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(row3);
        (&self.vat).render(left3, buf);
        (&self.pct).render(right3, buf);

        self.render_commentary(commentary_area, buf);

        (&self.file).render(file_area, buf);

        if self.format_error {
            Paragraph::new(FORMAT_ERROR_MESSAGE)
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .render(notice_area, buf);
        } else if let Some(ref notice) = self.upload_notice {
            let (message, color) = match notice {
                UploadNotice::Attached(name) => {
                    (format!("Justificatif joint : {name}"), Color::Green)
                }
                UploadNotice::Failed(message) => (message.clone(), Color::Red),
            };
            Paragraph::new(message)
                .style(Style::default().fg(color))
                .render(notice_area, buf);
        }

        let footer = FooterBar::new(vec![
            ("Tab", "champ suivant"),
            ("Entrée", "joindre le fichier"),
            ("Ctrl+S", "envoyer"),
            ("Échap", "retour"),
        ]);
        (&footer).render(footer_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new_with_kind(KeyCode::Char(c), KeyModifiers::CONTROL, KeyEventKind::Press)
    }

    fn type_text(screen: &mut NewBillScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_tab_cycles_through_all_fields() {
        let mut screen = NewBillScreen::new();
        for _ in 0..FormField::ORDER.len() {
            screen.handle_key(press(KeyCode::Tab));
        }
        assert_eq!(screen.focus, FormField::ExpenseType);
    }

    #[test]
    fn test_expense_type_cycling() {
        let mut screen = NewBillScreen::new();
        assert_eq!(screen.expense_type, ExpenseType::Transports);

        screen.handle_key(press(KeyCode::Right));
        assert_eq!(screen.expense_type, ExpenseType::RestaurantsEtBars);

        screen.handle_key(press(KeyCode::Left));
        assert_eq!(screen.expense_type, ExpenseType::Transports);
    }

    #[test]
    fn test_file_enter_reports_chosen_value() {
        let mut screen = NewBillScreen::new();
        while screen.focus != FormField::File {
            screen.handle_key(press(KeyCode::Tab));
        }
        type_text(&mut screen, "/tmp/taxi.png");

        assert_eq!(
            screen.handle_key(press(KeyCode::Enter)),
            NewBillKeyResult::FileChosen("/tmp/taxi.png".to_string())
        );
    }

    #[test]
    fn test_file_enter_with_empty_value_is_consumed() {
        let mut screen = NewBillScreen::new();
        while screen.focus != FormField::File {
            screen.handle_key(press(KeyCode::Tab));
        }
        assert_eq!(
            screen.handle_key(press(KeyCode::Enter)),
            NewBillKeyResult::Consumed
        );
    }

    #[test]
    fn test_format_error_clears_file_input() {
        let mut screen = NewBillScreen::new();
        while screen.focus != FormField::File {
            screen.handle_key(press(KeyCode::Tab));
        }
        type_text(&mut screen, "/tmp/note.pdf");

        screen.set_format_error();

        assert!(screen.format_error);
        assert_eq!(screen.file.value(), "");
    }

    #[test]
    fn test_attached_receipt_hides_format_error() {
        let mut screen = NewBillScreen::new();
        screen.set_format_error();
        screen.set_attached("taxi.png");
        assert!(!screen.format_error);
    }

    #[test]
    fn test_submit_gathers_form_values() {
        let mut screen = NewBillScreen::new();
        // Transports is already selected; fill the text fields in order.
        screen.handle_key(press(KeyCode::Enter));
        type_text(&mut screen, "Taxi");
        screen.handle_key(press(KeyCode::Enter));
        type_text(&mut screen, "2023-01-01");
        screen.handle_key(press(KeyCode::Enter));
        type_text(&mut screen, "42");
        screen.handle_key(press(KeyCode::Enter));
        type_text(&mut screen, "10");
        screen.handle_key(press(KeyCode::Enter));

        let result = screen.handle_key(ctrl('s'));
        let NewBillKeyResult::Submit(form) = result else {
            panic!("expected submit");
        };

        assert_eq!(form.expense_type, ExpenseType::Transports);
        assert_eq!(form.name, "Taxi");
        assert_eq!(form.date, "2023-01-01");
        assert_eq!(form.amount, "42");
        assert_eq!(form.vat, "10");
        assert_eq!(form.pct, "");
        assert_eq!(form.commentary, "");
    }

    #[test]
    fn test_escape_cancels() {
        let mut screen = NewBillScreen::new();
        assert_eq!(screen.handle_key(press(KeyCode::Esc)), NewBillKeyResult::Cancel);
    }
}
