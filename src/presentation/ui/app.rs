//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::application::containers::{BillsContainer, NewBillContainer, NewBillError, UpdateOutcome};
use crate::domain::entities::{Bill, Employee};
use crate::domain::errors::StoreError;
use crate::domain::ports::{BillStorePort, NavigationPort, SessionPort};
use crate::domain::routes::Route;
use crate::infrastructure::AppConfig;
use crate::presentation::events::EventHandler;
use crate::presentation::navigation::ChannelNavigator;
use crate::presentation::ui::{
    BillsKeyResult, BillsScreen, LoginAction, LoginScreen, NewBillKeyResult, NewBillScreen,
};

#[derive(Debug)]
enum Action {
    BillsLoaded(Result<Vec<Bill>, StoreError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

enum CurrentScreen {
    Login(LoginScreen),
    Bills(BillsScreen),
    NewBill(NewBillScreen),
}

enum ScreenEvent {
    Login(LoginAction),
    Bills(BillsKeyResult),
    NewBill(NewBillKeyResult),
}

/// Application orchestrator: owns the screens and the containers, drains
/// navigation and action channels, and dispatches one command per UI event.
pub struct App {
    state: AppState,
    screen: CurrentScreen,
    store: Option<Arc<dyn BillStorePort>>,
    session: Arc<dyn SessionPort>,
    navigation: Arc<ChannelNavigator>,
    nav_rx: mpsc::UnboundedReceiver<Route>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    bills: BillsContainer,
    new_bill: NewBillContainer,
    pending_notice: Option<String>,
    currency_symbol: String,
}

impl App {
    /// Creates the application with its collaborators.
    #[must_use]
    pub fn new(
        store: Option<Arc<dyn BillStorePort>>,
        session: Arc<dyn SessionPort>,
        config: &AppConfig,
    ) -> Self {
        let (navigation, nav_rx) = ChannelNavigator::new();
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let bills = BillsContainer::new(
            store.clone(),
            navigation.clone() as Arc<dyn NavigationPort>,
        );
        let new_bill = NewBillContainer::new(
            store.clone(),
            session.clone(),
            navigation.clone() as Arc<dyn NavigationPort>,
        );

        Self {
            state: AppState::Running,
            screen: CurrentScreen::Login(LoginScreen::new()),
            store,
            session,
            navigation,
            nav_rx,
            action_tx,
            action_rx,
            bills,
            new_bill,
            pending_notice: None,
            currency_symbol: config.ui.currency_symbol.clone(),
        }
    }

    /// Runs the application until the user leaves.
    ///
    /// # Errors
    /// Returns an error when the terminal cannot be drawn to.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        match self.session.current_user() {
            Ok(Some(user)) => {
                info!(user = %user, "Session found");
                self.apply_route(Route::Bills);
            }
            Ok(None) => self.apply_route(Route::Login),
            Err(e) => {
                warn!(error = %e, "Failed to read session, starting at login");
                self.apply_route(Route::Login);
            }
        }

        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            tokio::select! {
                biased;

                Some(route) = self.nav_rx.recv() => {
                    self.apply_route(route);
                }

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if let Event::Key(key) = event
                        && key.kind == KeyEventKind::Press
                    {
                        self.handle_key(key).await;
                    }
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        match &mut self.screen {
            CurrentScreen::Login(screen) => frame.render_widget(&*screen, frame.area()),
            CurrentScreen::Bills(screen) => frame.render_widget(screen, frame.area()),
            CurrentScreen::NewBill(screen) => frame.render_widget(&*screen, frame.area()),
        }
    }

    fn apply_route(&mut self, route: Route) {
        debug!(route = %route, "Navigating");
        match route {
            Route::Login => {
                self.screen = CurrentScreen::Login(LoginScreen::new());
            }
            Route::Bills => {
                let mut screen = BillsScreen::loading(self.currency_symbol.clone());
                if let Some(notice) = self.pending_notice.take() {
                    screen.set_notice(notice);
                }
                self.screen = CurrentScreen::Bills(screen);
                self.spawn_bills_fetch();
            }
            Route::NewBill => {
                self.new_bill = NewBillContainer::new(
                    self.store.clone(),
                    self.session.clone(),
                    self.navigation.clone() as Arc<dyn NavigationPort>,
                );
                self.screen = CurrentScreen::NewBill(NewBillScreen::new());
            }
            Route::Dashboard => {
                warn!("The admin dashboard is not part of the employee client");
            }
        }
    }

    fn spawn_bills_fetch(&self) {
        let container = self.bills.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let result = container.get_bills().await;
            let _ = tx.send(Action::BillsLoaded(result));
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::BillsLoaded(result) => {
                if let CurrentScreen::Bills(screen) = &mut self.screen {
                    match result {
                        Ok(bills) => screen.set_bills(bills),
                        Err(e) => {
                            error!(error = %e, "Failed to load bills");
                            screen.set_error(e.to_string());
                        }
                    }
                }
            }
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if EventHandler::is_force_quit_event(&key) {
            self.state = AppState::Exiting;
            return;
        }

        let event = match &mut self.screen {
            CurrentScreen::Login(screen) => ScreenEvent::Login(screen.handle_key(key)),
            CurrentScreen::Bills(screen) => ScreenEvent::Bills(screen.handle_key(key)),
            CurrentScreen::NewBill(screen) => ScreenEvent::NewBill(screen.handle_key(key)),
        };

        match event {
            ScreenEvent::Login(action) => self.handle_login_action(action),
            ScreenEvent::Bills(result) => self.handle_bills_result(result),
            ScreenEvent::NewBill(result) => self.handle_new_bill_result(result).await,
        }
    }

    fn handle_login_action(&mut self, action: LoginAction) {
        match action {
            LoginAction::None => {}
            LoginAction::Quit => self.state = AppState::Exiting,
            LoginAction::Submit(email) => {
                let employee = Employee::new(email);
                match self.session.store_user(&employee) {
                    Ok(()) => {
                        info!(user = %employee, "Connected");
                        self.navigation.navigate(Route::Bills);
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to store session");
                        if let CurrentScreen::Login(screen) = &mut self.screen {
                            screen.set_error(format!("Impossible d'enregistrer la session : {e}"));
                        }
                    }
                }
            }
        }
    }

    fn handle_bills_result(&mut self, result: BillsKeyResult) {
        match result {
            BillsKeyResult::Consumed => {}
            BillsKeyResult::Quit => self.state = AppState::Exiting,
            BillsKeyResult::NewBill => self.bills.handle_click_new_bill(),
            BillsKeyResult::Refresh => self.apply_route(Route::Bills),
            BillsKeyResult::ViewReceipt => {
                let preview = if let CurrentScreen::Bills(screen) = &self.screen {
                    screen
                        .selected_bill()
                        .and_then(|bill| self.bills.handle_click_icon_eye(bill))
                } else {
                    None
                };

                if let CurrentScreen::Bills(screen) = &mut self.screen {
                    match preview {
                        Some(preview) => screen.show_preview(preview),
                        None => screen.set_notice("Cette note n'a pas de justificatif"),
                    }
                }
            }
            BillsKeyResult::OpenReceipt(url) => {
                debug!(url = %url, "Opening receipt in the system viewer");
                if let Err(e) = opener::open(&url) {
                    warn!(error = %e, url = %url, "Failed to open receipt");
                }
            }
            BillsKeyResult::Logout => {
                if let Err(e) = self.session.clear() {
                    error!(error = %e, "Failed to clear session");
                }
                self.navigation.navigate(Route::Login);
            }
        }
    }

    async fn handle_new_bill_result(&mut self, result: NewBillKeyResult) {
        match result {
            NewBillKeyResult::Consumed => {}
            NewBillKeyResult::Cancel => self.navigation.navigate(Route::Bills),
            NewBillKeyResult::FileChosen(value) => self.handle_file_chosen(value).await,
            NewBillKeyResult::Submit(form) => {
                match self.new_bill.handle_submit(form).await {
                    Ok(outcome) => match outcome.update {
                        UpdateOutcome::Failed(e) => {
                            self.pending_notice =
                                Some(format!("L'envoi au service a échoué : {e}"));
                        }
                        UpdateOutcome::NoReceipt => {
                            self.pending_notice =
                                Some("Note transmise sans justificatif".to_string());
                        }
                        UpdateOutcome::Updated(_) | UpdateOutcome::NoStore => {}
                    },
                    Err(e) => {
                        error!(error = %e, "Failed to submit the bill");
                        if let CurrentScreen::NewBill(screen) = &mut self.screen {
                            screen.set_upload_failed(e.to_string());
                        }
                    }
                }
            }
        }
    }

    async fn handle_file_chosen(&mut self, value: String) {
        let bytes = match tokio::fs::read(&value).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %value, error = %e, "Failed to read receipt file");
                if let CurrentScreen::NewBill(screen) = &mut self.screen {
                    screen.set_upload_failed(format!("Impossible de lire {value} : {e}"));
                }
                return;
            }
        };

        let result = self.new_bill.handle_change_file(&value, bytes).await;

        let CurrentScreen::NewBill(screen) = &mut self.screen else {
            return;
        };
        match result {
            Ok(receipt) => screen.set_attached(receipt.file_name),
            Err(NewBillError::Receipt(_)) => screen.set_format_error(),
            Err(e) => screen.set_upload_failed(e.to_string()),
        }
    }
}
