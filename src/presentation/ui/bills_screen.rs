//! Bills listing screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::application::containers::BillsContainer;
use crate::application::dto::ReceiptPreview;
use crate::domain::entities::Bill;
use crate::presentation::widgets::FooterBar;

/// Result of a listing-screen key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillsKeyResult {
    /// Event handled, nothing else to do.
    Consumed,
    /// Leave the application.
    Quit,
    /// Open the new-bill form.
    NewBill,
    /// Reload the listing.
    Refresh,
    /// Show the receipt of the selected bill.
    ViewReceipt,
    /// Open the previewed receipt in the system viewer.
    OpenReceipt(String),
    /// Disconnect and return to login.
    Logout,
}

enum ListingState {
    Loading,
    Error(String),
    Loaded(Vec<Bill>),
}

/// Listing of the connected employee's bills, with a receipt preview modal.
pub struct BillsScreen {
    state: ListingState,
    table: TableState,
    preview: Option<ReceiptPreview>,
    notice: Option<String>,
    currency_symbol: String,
}

impl BillsScreen {
    /// Creates the screen in its loading state.
    #[must_use]
    pub fn loading(currency_symbol: impl Into<String>) -> Self {
        Self {
            state: ListingState::Loading,
            table: TableState::default(),
            preview: None,
            notice: None,
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Replaces the listing content.
    pub fn set_bills(&mut self, bills: Vec<Bill>) {
        self.table
            .select(if bills.is_empty() { None } else { Some(0) });
        self.state = ListingState::Loaded(bills);
    }

    /// Switches to the error state.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = ListingState::Error(message.into());
    }

    /// Sets the one-line notice under the table.
    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// Returns the selected bill, if the listing is loaded and non-empty.
    #[must_use]
    pub fn selected_bill(&self) -> Option<&Bill> {
        match &self.state {
            ListingState::Loaded(bills) => self.table.selected().and_then(|i| bills.get(i)),
            _ => None,
        }
    }

    /// Opens the receipt preview modal.
    pub fn show_preview(&mut self, preview: ReceiptPreview) {
        self.preview = Some(preview);
    }

    fn select_next(&mut self) {
        if let ListingState::Loaded(bills) = &self.state
            && !bills.is_empty()
        {
            let next = self.table.selected().map_or(0, |i| (i + 1) % bills.len());
            self.table.select(Some(next));
        }
    }

    fn select_previous(&mut self) {
        if let ListingState::Loaded(bills) = &self.state
            && !bills.is_empty()
        {
            let previous = self
                .table
                .selected()
                .map_or(0, |i| (i + bills.len() - 1) % bills.len());
            self.table.select(Some(previous));
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> BillsKeyResult {
        if self.preview.is_some() {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    self.preview = None;
                    BillsKeyResult::Consumed
                }
                KeyCode::Char('o') => self
                    .preview
                    .as_ref()
                    .map_or(BillsKeyResult::Consumed, |preview| {
                        BillsKeyResult::OpenReceipt(preview.file_url.clone())
                    }),
                _ => BillsKeyResult::Consumed,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => BillsKeyResult::Quit,
            KeyCode::Char('n') => BillsKeyResult::NewBill,
            KeyCode::Char('r') => BillsKeyResult::Refresh,
            KeyCode::Char('d') => BillsKeyResult::Logout,
            KeyCode::Enter | KeyCode::Char('v') => BillsKeyResult::ViewReceipt,
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                BillsKeyResult::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                BillsKeyResult::Consumed
            }
            _ => BillsKeyResult::Consumed,
        }
    }

    fn render_preview(preview: &ReceiptPreview, area: Rect, buf: &mut Buffer) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, center, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Percentage(70),
            Constraint::Fill(1),
        ])
        .areas(middle);

        Clear.render(center, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Justificatif")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(center);
        block.render(center, buf);

        let name = preview.file_name.as_deref().unwrap_or("(sans nom)");
        let lines = vec![
            Line::from(format!("Fichier : {name}")),
            Line::from(format!("URL : {}", preview.file_url)),
            Line::from(""),
            Line::from("o: ouvrir dans le navigateur  Échap: fermer"),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for &mut BillsScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, body_area, notice_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new("Mes notes de frais")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .render(title_area, buf);

        match &self.state {
            ListingState::Loading => {
                Paragraph::new("Loading...").render(body_area, buf);
            }
            ListingState::Error(message) => {
                Paragraph::new(vec![
                    Line::from("Erreur"),
                    Line::from(message.as_str()),
                ])
                .style(Style::default().fg(Color::Red))
                .render(body_area, buf);
            }
            ListingState::Loaded(bills) => {
                if bills.is_empty() {
                    Paragraph::new("Aucune note de frais pour le moment")
                        .style(Style::default().fg(Color::DarkGray))
                        .render(body_area, buf);
                } else {
                    let table = listing_table(bills, &self.currency_symbol);
                    StatefulWidget::render(table, body_area, buf, &mut self.table);
                }
            }
        }

        if let Some(ref notice) = self.notice {
            Paragraph::new(notice.as_str())
                .style(Style::default().fg(Color::Yellow))
                .render(notice_area, buf);
        }

        let footer = FooterBar::new(vec![
            ("n", "nouvelle note"),
            ("Entrée", "justificatif"),
            ("r", "recharger"),
            ("d", "déconnexion"),
            ("q", "quitter"),
        ]);
        (&footer).render(footer_area, buf);

        if let Some(preview) = self.preview.clone() {
            BillsScreen::render_preview(&preview, area, buf);
        }
    }
}

fn listing_table<'a>(bills: &'a [Bill], currency_symbol: &str) -> Table<'a> {
    let header = Row::new(["Type", "Nom", "Date", "Montant", "Statut", ""])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = bills
        .iter()
        .map(|bill| {
            let receipt_marker = if bill.file_url().is_some() { "👁" } else { "" };
            Row::new([
                bill.expense_type().label().to_string(),
                bill.name().to_string(),
                BillsContainer::format_date(bill.date()),
                format!("{} {}", bill.amount(), currency_symbol),
                bill.status().label().to_string(),
                receipt_marker.to_string(),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Fill(1),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(2),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyModifiers};

    use super::*;
    use crate::domain::entities::ExpenseType;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn bill(name: &str) -> Bill {
        Bill::new("a@a", ExpenseType::Transports, name, 42, "2023-01-01", "10", 20, "")
    }

    #[test]
    fn test_new_bill_key() {
        let mut screen = BillsScreen::loading("€");
        assert_eq!(screen.handle_key(press(KeyCode::Char('n'))), BillsKeyResult::NewBill);
    }

    #[test]
    fn test_selection_wraps() {
        let mut screen = BillsScreen::loading("€");
        screen.set_bills(vec![bill("a"), bill("b")]);

        assert_eq!(screen.selected_bill().unwrap().name(), "a");
        screen.handle_key(press(KeyCode::Down));
        assert_eq!(screen.selected_bill().unwrap().name(), "b");
        screen.handle_key(press(KeyCode::Down));
        assert_eq!(screen.selected_bill().unwrap().name(), "a");
        screen.handle_key(press(KeyCode::Up));
        assert_eq!(screen.selected_bill().unwrap().name(), "b");
    }

    #[test]
    fn test_no_selection_while_loading() {
        let screen = BillsScreen::loading("€");
        assert!(screen.selected_bill().is_none());
    }

    #[test]
    fn test_preview_modal_swallows_listing_keys() {
        let mut screen = BillsScreen::loading("€");
        screen.set_bills(vec![bill("a")]);
        screen.show_preview(ReceiptPreview {
            file_url: "https://x/r.png".to_string(),
            file_name: Some("r.png".to_string()),
        });

        assert_eq!(
            screen.handle_key(press(KeyCode::Char('n'))),
            BillsKeyResult::Consumed
        );
        assert_eq!(
            screen.handle_key(press(KeyCode::Char('o'))),
            BillsKeyResult::OpenReceipt("https://x/r.png".to_string())
        );

        screen.handle_key(press(KeyCode::Esc));
        assert_eq!(screen.handle_key(press(KeyCode::Char('n'))), BillsKeyResult::NewBill);
    }

    #[test]
    fn test_quit_and_logout_keys() {
        let mut screen = BillsScreen::loading("€");
        assert_eq!(screen.handle_key(press(KeyCode::Char('q'))), BillsKeyResult::Quit);
        assert_eq!(screen.handle_key(press(KeyCode::Char('d'))), BillsKeyResult::Logout);
    }
}
