use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::ClientWithPhones;

// Represents the state of the client browser screen
pub struct ClientsState {
    clients: Vec<ClientWithPhones>,
    list_state: ListState,
    show_delete_confirmation: bool,
}

impl ClientsState {
    pub fn new(clients: Vec<ClientWithPhones>) -> Self {
        let mut list_state = ListState::default();
        if !clients.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            clients,
            list_state,
            show_delete_confirmation: false,
        }
    }

    /// Swap in a fresh result set, keeping the cursor in range
    pub fn reload(&mut self, clients: Vec<ClientWithPhones>) {
        let selected = self.list_state.selected().unwrap_or(0);
        self.clients = clients;
        self.show_delete_confirmation = false;

        if self.clients.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(selected.min(self.clients.len() - 1)));
        }
    }

    pub fn next(&mut self) {
        if self.clients.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.clients.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.clients.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.clients.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }

    pub fn selected_client(&self) -> Option<&ClientWithPhones> {
        self.list_state.selected().and_then(|i| self.clients.get(i))
    }

    pub fn selected_client_id(&self) -> Option<i32> {
        self.selected_client().map(|c| c.id)
    }
}

pub enum ClientAction {
    Exit,
    DeleteClient(i32), // Contains client_id
}

pub fn render_clients<B: Backend>(frame: &mut Frame<B>, state: &mut ClientsState) {
    let size = frame.size();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(rows[0]);

    let items: Vec<ListItem> = state
        .clients
        .iter()
        .map(|client| {
            ListItem::new(Spans::from(vec![
                Span::styled(
                    format!("{:>4} ", client.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!("{} {}", client.first_name, client.last_name)),
                Span::styled(
                    format!("  <{}>", client.email),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let title = format!("Clients ({})", state.clients.len());
    let clients_list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(clients_list, columns[0], &mut state.list_state);

    let phones: Vec<Spans> = match state.selected_client() {
        Some(client) if client.phones.is_empty() => vec![Spans::from("No phone numbers")],
        Some(client) => client
            .phones
            .iter()
            .map(|phone| Spans::from(phone.as_str()))
            .collect(),
        None => Vec::new(),
    };

    let details = Paragraph::new(phones).block(Block::default().title("Phones").borders(Borders::ALL));
    frame.render_widget(details, columns[1]);

    let buttons_text = if state.selected_client().is_some() {
        "<Up/Down> Move | <D> Delete Client | <Q> Quit"
    } else {
        "<Q> Quit"
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, rows[1]);

    if state.show_delete_confirmation {
        render_delete_confirmation(frame, size);
    }
}

fn render_delete_confirmation<B: Backend>(frame: &mut Frame<B>, size: Rect) {
    let popup_area = centered_rect(50, 20, size);

    let popup = Paragraph::new(vec![
        Spans::from(""),
        Spans::from("Are you sure you want to delete this client?"),
        Spans::from(""),
        Spans::from("All of its phone numbers will also be deleted."),
        Spans::from(""),
        Spans::from("<Y> Yes  <N> No"),
    ])
    .block(Block::default().title("Confirm Delete").borders(Borders::ALL))
    .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(popup, popup_area);
}

// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn handle_input(state: &mut ClientsState) -> Result<Option<ClientAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

fn handle_key(state: &mut ClientsState, code: KeyCode) -> Option<ClientAction> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => {
            if state.show_delete_confirmation {
                state.toggle_delete_confirmation();
            } else {
                return Some(ClientAction::Exit);
            }
        }
        KeyCode::Char('n') => {
            if state.show_delete_confirmation {
                state.toggle_delete_confirmation();
            }
        }
        KeyCode::Char('d') => {
            if !state.show_delete_confirmation && state.selected_client().is_some() {
                state.toggle_delete_confirmation();
            }
        }
        KeyCode::Char('y') => {
            if state.show_delete_confirmation {
                if let Some(id) = state.selected_client_id() {
                    state.toggle_delete_confirmation();
                    return Some(ClientAction::DeleteClient(id));
                }
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if !state.show_delete_confirmation {
                state.next();
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if !state.show_delete_confirmation {
                state.previous();
            }
        }
        _ => {}
    }
    None
}
