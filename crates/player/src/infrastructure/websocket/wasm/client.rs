//! WASM WebSocket transport using web-sys

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures_channel::mpsc::{UnboundedReceiver, UnboundedSender};
use futures_util::{stream, StreamExt};
use gloo_timers::future::IntervalStream;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use tictac_shared::Frame;

use crate::infrastructure::messaging::SocketCommand;
use crate::infrastructure::websocket::core::ChannelCore;
use crate::infrastructure::websocket::shared::{socket_url, wait_for_connect, TransportConfig};
use crate::ports::outbound::ChannelEvent;

/// Storage for WebSocket event closures; they must outlive the socket handlers
struct WasmClosures {
    #[allow(dead_code)]
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    #[allow(dead_code)]
    onopen: Closure<dyn FnMut()>,
    #[allow(dead_code)]
    onclose: Closure<dyn FnMut(CloseEvent)>,
    #[allow(dead_code)]
    onerror: Closure<dyn FnMut(Event)>,
}

/// Browser socket plus the frames waiting for it to open
struct WasmSocket {
    ws: WebSocket,
    outbox: Rc<RefCell<Vec<String>>>,
    intentional_close: Rc<Cell<bool>>,
    _closures: WasmClosures,
}

impl WasmSocket {
    fn open(
        url: &str,
        core: Rc<RefCell<ChannelCore>>,
        events: UnboundedSender<ChannelEvent>,
    ) -> anyhow::Result<Self> {
        let ws = WebSocket::new(url)
            .map_err(|e| anyhow::anyhow!("Failed to create WebSocket: {:?}", e))?;

        let outbox = Rc::new(RefCell::new(Vec::<String>::new()));
        let intentional_close = Rc::new(Cell::new(false));

        let events_for_messages = events.clone();
        let onmessage = Closure::<dyn FnMut(_)>::new(move |e: MessageEvent| {
            let Ok(text) = e.data().dyn_into::<js_sys::JsString>() else {
                tracing::debug!("Ignoring non-text frame");
                return;
            };
            let text: String = text.into();
            match Frame::decode(&text) {
                Ok(frame) => {
                    let event = core.borrow_mut().interpret(frame);
                    if let Some(event) = event {
                        if events_for_messages.unbounded_send(event).is_err() {
                            tracing::debug!("Session dropped its receiver");
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Failed to parse frame"),
            }
        });
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let ws_for_open = ws.clone();
        let outbox_for_open = Rc::clone(&outbox);
        let onopen = Closure::<dyn FnMut()>::new(move || {
            tracing::info!("Connected to game server");
            for text in outbox_for_open.borrow_mut().drain(..) {
                if let Err(e) = ws_for_open.send_with_str(&text) {
                    tracing::error!(error = ?e, "Failed to flush buffered frame");
                }
            }
        });
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));

        let intentional = Rc::clone(&intentional_close);
        let onclose = Closure::<dyn FnMut(_)>::new(move |e: CloseEvent| {
            if intentional.get() {
                return;
            }
            let reason = if e.reason().is_empty() {
                format!("socket closed (code {})", e.code())
            } else {
                e.reason()
            };
            tracing::info!(code = e.code(), reason = %reason, "Server closed connection");
            if events
                .unbounded_send(ChannelEvent::Closed { reason })
                .is_err()
            {
                tracing::debug!("Session dropped its receiver");
            }
        });
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        // A close event always follows an error; only log here.
        let onerror = Closure::<dyn FnMut(_)>::new(move |e: Event| {
            tracing::error!(kind = %e.type_(), "WebSocket error");
        });
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        Ok(Self {
            ws,
            outbox,
            intentional_close,
            _closures: WasmClosures {
                onmessage,
                onopen,
                onclose,
                onerror,
            },
        })
    }

    fn is_finished(&self) -> bool {
        matches!(
            self.ws.ready_state(),
            WebSocket::CLOSING | WebSocket::CLOSED
        )
    }

    /// Send now when open, buffer while connecting, drop once closed.
    fn send(&self, frame: &Frame) {
        let text = match frame.encode() {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(event = %frame.event, error = %e, "Failed to encode frame");
                return;
            }
        };

        match self.ws.ready_state() {
            WebSocket::OPEN => {
                if let Err(e) = self.ws.send_with_str(&text) {
                    tracing::error!(event = %frame.event, error = ?e, "Failed to send frame");
                }
            }
            WebSocket::CONNECTING => self.outbox.borrow_mut().push(text),
            _ => tracing::debug!(event = %frame.event, "Socket closed, frame dropped"),
        }
    }

    fn close(&self) {
        self.intentional_close.set(true);
        if let Err(e) = self.ws.close() {
            tracing::debug!(error = ?e, "Close failed");
        }
    }
}

impl Drop for WasmSocket {
    fn drop(&mut self) {
        self.ws.set_onmessage(None);
        self.ws.set_onopen(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
    }
}

enum Tick {
    Command(SocketCommand),
    Heartbeat,
    Stopped,
}

/// Drive one browser socket until the session disconnects or the socket ends.
///
/// Inbound frames are handled by the socket callbacks; this loop owns the
/// outbound side: queued commands and the heartbeat.
pub async fn run_transport(
    config: TransportConfig,
    mut commands: UnboundedReceiver<SocketCommand>,
    events: UnboundedSender<ChannelEvent>,
) {
    let Some(params) = wait_for_connect(&mut commands).await else {
        tracing::debug!("Transport stopped before connecting");
        return;
    };

    let url = socket_url(&config.endpoint, &params);
    let core = Rc::new(RefCell::new(ChannelCore::new()));
    let socket = match WasmSocket::open(url.as_str(), Rc::clone(&core), events.clone()) {
        Ok(socket) => socket,
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Failed to connect to game server");
            if events
                .unbounded_send(ChannelEvent::Closed {
                    reason: format!("connect failed: {}", e),
                })
                .is_err()
            {
                tracing::debug!("Session dropped its receiver");
            }
            return;
        }
    };

    let heartbeat_ms = u32::try_from(config.heartbeat.as_millis()).unwrap_or(u32::MAX);
    let command_ticks = commands
        .map(Tick::Command)
        .chain(stream::iter([Tick::Stopped]));
    let heartbeat_ticks = IntervalStream::new(heartbeat_ms).map(|_| Tick::Heartbeat);
    let mut ticks = std::pin::pin!(stream::select(command_ticks, heartbeat_ticks));

    while let Some(tick) = ticks.next().await {
        match tick {
            Tick::Command(SocketCommand::Disconnect) | Tick::Stopped => {
                tracing::info!("Disconnect requested");
                socket.close();
                break;
            }
            Tick::Command(SocketCommand::Connect { .. }) => {
                tracing::debug!("Already connected");
            }
            Tick::Command(command) => {
                let frame = core.borrow_mut().frame_for(&command);
                if let Some(frame) = frame {
                    socket.send(&frame);
                }
            }
            Tick::Heartbeat => {
                if socket.is_finished() {
                    break;
                }
                let frame = core.borrow_mut().heartbeat_frame();
                socket.send(&frame);
            }
        }
    }
}
