pub mod clients;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::db::{ClientFilter, Database};
use clients::{handle_input, render_clients, ClientAction, ClientsState};

/// Show clients matching `filter` in an interactive list until the user quits
pub async fn browse(db: &Database, filter: &ClientFilter) -> Result<()> {
    let clients = db.find_clients(filter).await?;
    let mut state = ClientsState::new(clients);

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, db, filter).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut ClientsState,
    db: &Database,
    filter: &ClientFilter,
) -> Result<()> {
    loop {
        terminal.draw(|f| render_clients(f, state))?;

        match handle_input(state)? {
            Some(ClientAction::Exit) => return Ok(()),
            Some(ClientAction::DeleteClient(client_id)) => {
                db.delete_client(client_id).await?;
                state.reload(db.find_clients(filter).await?);
            }
            None => {}
        }
    }
}
