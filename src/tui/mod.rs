//! Ratatui-based terminal form.
//!
//! The form lists every application field plus a Submit control. Submitting
//! runs the shared controller; the screen is redrawn from the presenter
//! callbacks so the loading state is visible while the request is in flight.

use std::io;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};

use crate::app::controller::{FormEvent, FormSubmissionController, Presenter};
use crate::domain::RiskLevel;
use crate::error::{AppError, SubmitError};
use crate::report::{approval_glyph, format_error, risk_glyph, ResultView};

mod fields;

use fields::{FieldId, FormState};

/// Index of the Submit control in the field list.
const SUBMIT_INDEX: usize = FieldId::ALL.len();

/// Start the TUI.
pub fn run(controller: FormSubmissionController) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(controller);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// What the result side of the screen currently shows.
#[derive(Debug, Default)]
struct Panels {
    loading: bool,
    submit_disabled: bool,
    result: Option<ResultView>,
    error: Option<String>,
}

impl Panels {
    fn show_loading(&mut self) {
        self.loading = true;
        self.submit_disabled = true;
        self.result = None;
        self.error = None;
    }

    fn show_result(&mut self, view: &ResultView) {
        self.result = Some(view.clone());
    }

    fn show_error(&mut self, err: &SubmitError) {
        self.error = Some(format_error(err));
    }

    fn finish_loading(&mut self) {
        self.loading = false;
        self.submit_disabled = false;
    }
}

/// Everything drawn on screen.
struct Screen {
    base_url: String,
    form: FormState,
    selected: usize,
    editing: bool,
    edit_backup: String,
    panels: Panels,
    status: String,
    last_submitted: Option<DateTime<Local>>,
}

/// Presenter that redraws after every state change.
///
/// Submission blocks the event loop, so this is the only way the loading
/// state reaches the screen before the response arrives.
struct LivePresenter<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    screen: &'a mut Screen,
}

impl<B: Backend> LivePresenter<'_, B> {
    fn redraw(&mut self) {
        let screen = &*self.screen;
        if let Err(e) = self.terminal.draw(|f| screen.draw(f)) {
            tracing::debug!("redraw during submission failed: {e}");
        }
    }
}

impl<B: Backend> Presenter for LivePresenter<'_, B> {
    fn show_loading(&mut self) {
        self.screen.panels.show_loading();
        self.redraw();
    }

    fn show_result(&mut self, view: &ResultView) {
        self.screen.panels.show_result(view);
        self.redraw();
    }

    fn show_error(&mut self, err: &SubmitError) {
        self.screen.panels.show_error(err);
        self.redraw();
    }

    fn finish_loading(&mut self) {
        self.screen.panels.finish_loading();
        self.redraw();
    }
}

struct App {
    controller: FormSubmissionController,
    screen: Screen,
}

impl App {
    fn new(controller: FormSubmissionController) -> Self {
        let base_url = controller.client().base_url().to_string();
        Self {
            controller,
            screen: Screen {
                base_url,
                form: FormState::default(),
                selected: 0,
                editing: false,
                edit_backup: String::new(),
                panels: Panels::default(),
                status: "Fill in the application and submit.".to_string(),
                last_submitted: None,
            },
        }
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.screen.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key, terminal)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key<B: Backend>(&mut self, key: KeyEvent, terminal: &mut Terminal<B>) -> Result<bool, AppError> {
        if self.screen.editing {
            self.handle_edit(key.code);
            return Ok(false);
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit(terminal)?;
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => {
                self.screen.selected = self.screen.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Tab => {
                if self.screen.selected < SUBMIT_INDEX {
                    self.screen.selected += 1;
                }
            }
            KeyCode::Left => self.cycle_selected(-1),
            KeyCode::Right => self.cycle_selected(1),
            KeyCode::Enter => match self.selected_field() {
                None => self.submit(terminal)?,
                Some(id) if id.choices().is_some() => self.cycle_selected(1),
                Some(id) => {
                    self.screen.editing = true;
                    self.screen.edit_backup = self.screen.form.value(id).to_string();
                    self.screen.status =
                        format!("Editing {}. Enter to apply, Esc to cancel.", id.label());
                }
            },
            _ => {}
        }

        Ok(false)
    }

    fn handle_edit(&mut self, code: KeyCode) {
        let Some(id) = self.selected_field() else {
            self.screen.editing = false;
            return;
        };

        match code {
            KeyCode::Esc => {
                let backup = std::mem::take(&mut self.screen.edit_backup);
                self.screen.form.set(id, backup);
                self.screen.editing = false;
                self.screen.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.screen.editing = false;
                self.screen.status = format!("{}: {}", id.label(), self.screen.form.display_value(id));
            }
            KeyCode::Backspace => self.screen.form.pop_char(id),
            KeyCode::Char(c) => {
                self.screen.form.push_char(id, c);
            }
            _ => {}
        }
    }

    fn selected_field(&self) -> Option<FieldId> {
        FieldId::ALL.get(self.screen.selected).copied()
    }

    fn cycle_selected(&mut self, delta: i32) {
        if let Some(id) = self.selected_field() {
            self.screen.form.cycle(id, delta);
        }
    }

    fn submit<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        if self.screen.panels.submit_disabled {
            return Ok(());
        }

        let event = FormEvent::Submit(self.screen.form.fields.clone());
        let outcome = {
            let mut presenter = LivePresenter {
                terminal: &mut *terminal,
                screen: &mut self.screen,
            };
            self.controller.handle_event(event, &mut presenter)
        };

        // Keys pressed while the request was running hit a disabled control.
        discard_pending_input()?;

        let now = Local::now();
        self.screen.last_submitted = Some(now);
        self.screen.status = match outcome {
            Ok(_) => format!("Prediction received at {}.", now.format("%H:%M:%S")),
            Err(_) => format!("Submission failed at {}.", now.format("%H:%M:%S")),
        };
        Ok(())
    }
}

fn discard_pending_input() -> Result<(), AppError> {
    while event::poll(Duration::ZERO).map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
        event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))?;
    }
    Ok(())
}

impl Screen {
    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let last = self
            .last_submitted
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        let lines = vec![
            Line::from(vec![
                Span::styled("loan", Style::default().fg(Color::Cyan)),
                Span::raw(" | approval prediction"),
            ]),
            Line::from(Span::styled(
                format!("service: {} | last submission: {last}", self.base_url),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_outcome(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items: Vec<ListItem> = FieldId::ALL
            .iter()
            .map(|&id| {
                let mut value = self.form.display_value(id);
                if self.editing && FieldId::ALL.get(self.selected) == Some(&id) {
                    value = format!("{}_", self.form.value(id));
                }
                ListItem::new(format!("{:<18} {value}", id.label()))
            })
            .collect();

        let submit_style = if self.panels.submit_disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        };
        items.push(ListItem::new(Line::from(Span::styled("[ Submit ]", submit_style))));

        let list = List::new(items)
            .block(Block::default().title("Application").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_outcome(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Decision").borders(Borders::ALL);

        let text = if self.panels.loading {
            Text::from(Line::from(Span::styled(
                "⏳ Requesting prediction...",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )))
        } else if let Some(err) = &self.panels.error {
            Text::from(Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red))))
        } else if let Some(view) = &self.panels.result {
            result_text(view)
        } else {
            Text::from(Line::from(Span::styled(
                "No prediction yet.",
                Style::default().fg(Color::Gray),
            )))
        };

        let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.editing {
            "type value  Backspace delete  Enter apply  Esc cancel"
        } else {
            "↑/↓ select  ←/→ choose  Enter edit/submit  Ctrl-S submit  q quit"
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn result_text(view: &ResultView) -> Text<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let decision_style = if view.approved {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };

    Text::from(vec![
        Line::from(vec![
            Span::styled(format!("{} Prediction: ", approval_glyph(view.approved)), bold),
            Span::styled(view.prediction.clone(), decision_style),
        ]),
        Line::from(vec![
            Span::styled("📊 Approval Probability: ", bold),
            Span::raw(format!("{}%", view.probability_pct)),
        ]),
        Line::from(vec![
            Span::styled(format!("{} Risk Level: ", risk_glyph(view.risk.label())), bold),
            Span::styled(view.risk.label(), Style::default().fg(risk_color(view.risk))),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("💡 Recommendation: ", bold),
            Span::raw(view.recommendation),
        ]),
    ])
}

fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}
