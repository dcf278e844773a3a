//! Terminal lifecycle and the event loop

use std::cell::RefCell;
use std::io::stdout;
use std::rc::Rc;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use epochalypse_core::{LocalZone, TimeSync};

use crate::config::FormConfig;
use crate::error::AppResult;
use crate::form::{Form, FormEvent, FormSink};
use crate::ui;

/// Whether the loop keeps going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Build the form, wire it to a `TimeSync` on the host zone, and run until the
/// user quits. The terminal is restored on every exit path.
pub fn run(config: FormConfig) -> AppResult<()> {
    let form = Rc::new(RefCell::new(Form::new(&config)));
    let sync = TimeSync::with_system_zone(FormSink::new(form.clone()));
    let local = sync.zone().describe(sync.instant());
    info!(
        unix = sync.instant().as_unix(),
        zone = %local.abbreviation,
        offset = %local.offset,
        "form ready"
    );

    let mut terminal = match ratatui::try_init() {
        Ok(terminal) => terminal,
        Err(e) => {
            ratatui::restore();
            return Err(e.into());
        }
    };
    let result = TerminalModeGuard::new()
        .map_err(Into::into)
        .and_then(|_modes| event_loop(&mut terminal, &form, &sync));
    ratatui::restore();
    info!(updates = sync.updates(), "terminal restored");
    result
}

fn event_loop<Z: LocalZone>(
    terminal: &mut DefaultTerminal,
    form: &RefCell<Form>,
    sync: &TimeSync<Z>,
) -> AppResult<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &form.borrow()))?;
        if dispatch(event::read()?, form, sync) == Flow::Quit {
            return Ok(());
        }
    }
}

/// Route one terminal event through the form and into the time model.
///
/// The form borrow ends before `TimeSync` runs, because the sink writes back
/// into the same form.
pub fn dispatch<Z: LocalZone>(event: Event, form: &RefCell<Form>, sync: &TimeSync<Z>) -> Flow {
    let form_event = match event {
        Event::Key(key) => form.borrow_mut().handle_key(key),
        Event::Paste(text) => {
            form.borrow_mut().handle_paste(&text);
            None
        }
        Event::Resize(width, height) => {
            debug!(width, height, "resize");
            None
        }
        _ => None,
    };

    match form_event {
        Some(FormEvent::Commit { field, text }) => {
            let applied = sync.commit(field, &text);
            debug!(%field, applied, "commit");
            Flow::Continue
        }
        Some(FormEvent::Now) => {
            sync.on_now_requested();
            Flow::Continue
        }
        Some(FormEvent::Quit) => Flow::Quit,
        None => Flow::Continue,
    }
}
