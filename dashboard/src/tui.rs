use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::api::PriceClient;
use crate::model::Currency;
use crate::poller::{PollEvent, Poller};
use crate::state::Dashboard;
use crate::ui;

const INPUT_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

/// Run the interactive dashboard until the user quits.
pub async fn run(client: PriceClient, every: Duration, currency: Currency) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<PollEvent>(32);
    let poller = Poller::spawn(Arc::new(client), every, tx);
    let mut dashboard = Dashboard::new(currency);

    let mut terminal = ratatui::init();
    let result =
        tokio::task::block_in_place(|| event_loop(&mut terminal, &mut dashboard, &mut rx));
    ratatui::restore();

    // Teardown cancels the timer and any request still in flight.
    drop(poller);
    tracing::info!(stale_dropped = dashboard.stale_dropped(), "dashboard closed");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    dashboard: &mut Dashboard,
    rx: &mut mpsc::Receiver<PollEvent>,
) -> anyhow::Result<()> {
    loop {
        while let Ok(ev) = rx.try_recv() {
            dashboard.apply(ev.seq, ev.result);
        }

        terminal.draw(|f| ui::render(f, dashboard))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(dashboard, key) == Control::Quit {
                    return Ok(());
                }
            }
        }
    }
}

fn handle_key(dashboard: &mut Dashboard, key: KeyEvent) -> Control {
    if key.kind != KeyEventKind::Press {
        return Control::Continue;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Control::Quit,
        KeyCode::Char('c') | KeyCode::Char('C') => {
            dashboard.toggle_currency();
            Control::Continue
        }
        _ => Control::Continue,
    }
}
