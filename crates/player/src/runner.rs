//! Composition roots for the two runtimes.
//!
//! - native: terminal client on a current-thread tokio runtime
//! - wasm: binds the host page and returns; callbacks drive the rest

#[cfg(not(target_arch = "wasm32"))]
pub use native::{parse_command, run, Command};

#[cfg(target_arch = "wasm32")]
pub use wasm::start;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::Write;
    use std::time::Duration;

    use anyhow::Result;
    use futures_util::StreamExt;
    use tokio::io::{AsyncBufReadExt, BufReader};

    use crate::application::ChannelSessionManager;
    use crate::config::ClientConfig;
    use crate::infrastructure::view::{terminal::render_page, MemoryView, TerminalView};
    use crate::infrastructure::websocket::{create_connection, Connection, TransportConfig};

    /// How long to let the transport say goodbye after a disconnect
    const CLOSE_GRACE: Duration = Duration::from_secs(1);

    /// One line of terminal input
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Command {
        /// Anything else is taken as a cell index and validated by the session
        Cell(String),
        NewRound,
        Quit,
    }

    pub fn parse_command(line: &str) -> Option<Command> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => None,
            "n" | "new" => Some(Command::NewRound),
            "q" | "quit" => Some(Command::Quit),
            _ => Some(Command::Cell(line.to_string())),
        }
    }

    /// Play one game from the terminal until quit, EOF or a final view.
    pub async fn run(config: ClientConfig) -> Result<()> {
        let transport =
            TransportConfig::new(config.socket_url.clone()).with_heartbeat(config.heartbeat);
        let Connection {
            connector,
            mut events,
        } = create_connection(transport);

        let mut stdout = std::io::stdout();
        stdout.write_all(render_page(&MemoryView::new()).as_bytes())?;
        stdout.flush()?;

        let view = TerminalView::new(stdout);
        let mut session =
            ChannelSessionManager::init(&connector, &config.game, &config.player, view)?;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                event = events.next() => {
                    let Some(event) = event else {
                        tracing::info!("Transport stopped");
                        return Ok(());
                    };
                    session.route(event);
                    if session.phase().is_terminal() {
                        tracing::info!(phase = ?session.phase(), "Game over for this session");
                        break;
                    }
                }

                line = lines.next_line() => match line? {
                    Some(line) => match parse_command(&line) {
                        Some(Command::Cell(index)) => {
                            if session.cell_clicked(Some(&index)).is_none() {
                                tracing::warn!(input = %index, "Not a cell; type 0-8, n or q");
                            }
                        }
                        Some(Command::NewRound) => {
                            session.new_round_clicked();
                        }
                        Some(Command::Quit) => break,
                        None => {}
                    },
                    None => {
                        tracing::debug!("stdin closed");
                        break;
                    }
                },
            }
        }

        session.shutdown();
        // The transport drops its sender once the close is sent.
        let drained = tokio::time::timeout(CLOSE_GRACE, async {
            while events.next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            tracing::debug!("Transport did not stop in time");
        }
        Ok(())
    }

}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{anyhow, Result};
    use futures_util::StreamExt;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Element, MouseEvent, Window};

    use tictac_domain::PlayerName;

    use crate::application::ChannelSessionManager;
    use crate::config::page_socket_url;
    use crate::infrastructure::view::{DomView, UiElements};
    use crate::infrastructure::websocket::{create_connection, Connection, TransportConfig};

    type SharedSession = Rc<RefCell<ChannelSessionManager<DomView>>>;

    fn js_error(e: JsValue) -> anyhow::Error {
        anyhow!("{:?}", e)
    }

    /// `window.currentPlayer`, set by the server-rendered page
    fn current_player(window: &Window) -> Result<PlayerName> {
        let value = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str("currentPlayer"))
            .map_err(js_error)?;
        let name: String = serde_wasm_bindgen::from_value(value)
            .map_err(|e| anyhow!("window.currentPlayer: {}", e))?;
        Ok(PlayerName::new(name)?)
    }

    /// Bind the game page, if this is one.
    pub fn start() -> Result<()> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window.document().ok_or_else(|| anyhow!("no document"))?;

        let Some(elements) = UiElements::locate(&document)? else {
            tracing::debug!("No game on this page");
            return Ok(());
        };
        let game = elements.game_name()?;
        let player = current_player(&window)?;

        let location = window.location();
        let socket_url = page_socket_url(
            &location.protocol().map_err(js_error)?,
            &location.host().map_err(js_error)?,
        )?;

        let Connection { connector, events } = create_connection(TransportConfig::new(socket_url));
        let board = elements.root.clone();
        let new_game = elements.new_game.clone();
        let session: SharedSession = Rc::new(RefCell::new(ChannelSessionManager::init(
            &connector,
            &game,
            &player,
            DomView::new(elements),
        )?));

        bind_board_clicks(&board, Rc::clone(&session))?;
        bind_new_round_click(&new_game, Rc::clone(&session))?;

        spawn_local(async move {
            let mut events = events;
            while let Some(event) = events.next().await {
                match session.try_borrow_mut() {
                    Ok(mut session) => session.route(event),
                    Err(_) => tracing::error!("Session busy, channel event dropped"),
                }
            }
            tracing::debug!("Transport stopped");
        });

        Ok(())
    }

    fn bind_board_clicks(board: &Element, session: SharedSession) -> Result<()> {
        let on_click = Closure::<dyn FnMut(_)>::new(move |e: MouseEvent| {
            e.prevent_default();
            let index = e
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.get_attribute("data-index"));
            match session.try_borrow() {
                Ok(session) => {
                    session.cell_clicked(index.as_deref());
                }
                Err(_) => tracing::warn!("Session busy, click dropped"),
            }
        });
        board
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(js_error)?;
        // Listeners live as long as the page.
        on_click.forget();
        Ok(())
    }

    fn bind_new_round_click(button: &Element, session: SharedSession) -> Result<()> {
        let on_click = Closure::<dyn FnMut(_)>::new(move |e: MouseEvent| {
            e.prevent_default();
            match session.try_borrow() {
                Ok(session) => {
                    session.new_round_clicked();
                }
                Err(_) => tracing::warn!("Session busy, click dropped"),
            }
        });
        button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(js_error)?;
        on_click.forget();
        Ok(())
    }
}
