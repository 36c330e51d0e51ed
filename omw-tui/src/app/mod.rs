use crate::api::ApiResult;
use crate::command::{CommandError, Operation};
use crate::config::OmwConfig;

mod reconcile;
mod state;
pub use reconcile::{clear_status, reconcile, reject, toggle_help};
pub use state::{Severity, TextInput, UiOutputState};

pub struct App {
    pub running: bool,
    pub input: TextInput,
    pub output: UiOutputState,

    // Dispatches sent but not yet settled
    pub in_flight: usize,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    // Report panel scroll offset (lines)
    pub report_scroll: u16,

    pub api_url: String,
}

impl App {
    pub fn new(cfg: &OmwConfig) -> Self {
        Self {
            running: true,
            input: TextInput::new(),
            output: UiOutputState::default(),
            in_flight: 0,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            report_scroll: 0,
            api_url: cfg.api_url.clone(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    fn update_output(&mut self, f: impl FnOnce(UiOutputState) -> UiOutputState) {
        self.output = f(std::mem::take(&mut self.output));
    }

    /// The input line is cleared on submit, before anything is parsed or sent.
    pub fn take_input(&mut self) -> String {
        self.input.take()
    }

    pub fn command_accepted(&mut self) {
        self.update_output(clear_status);
    }

    pub fn command_rejected(&mut self, error: &CommandError) {
        self.update_output(|state| reject(state, error));
    }

    pub fn dispatch_started(&mut self) {
        self.in_flight += 1;
    }

    pub fn dispatch_settled(&mut self, op: &Operation, result: ApiResult) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if op.is_report() && matches!(result, ApiResult::Success(_)) {
            self.report_scroll = 0;
        }
        self.update_output(|state| reconcile(state, op, result));
    }

    /// `?` typed as a command.
    pub fn help_command(&mut self) {
        self.update_output(toggle_help);
    }

    /// Direct toggle of the help panel; leaves the report as it is.
    pub fn toggle_help_panel(&mut self) {
        self.output.help_visible = !self.output.help_visible;
    }

    pub fn toggle_report_panel(&mut self) {
        self.output.report_visible = !self.output.report_visible;
    }

    pub fn scroll_report_down(&mut self) {
        self.report_scroll = self.report_scroll.saturating_add(1);
    }

    pub fn scroll_report_up(&mut self) {
        self.report_scroll = self.report_scroll.saturating_sub(1);
    }
}
