//! UDP listener for OSC transport events.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use chrono::Utc;
use rosc::{OscMessage, OscPacket};
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::ListenerError;
use crate::event::InboundEvent;

/// Port REAPER's OSC control surface sends to by default
pub const DEFAULT_OSC_PORT: u16 = 9000;

/// Configuration for [`OscListener`]
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Local address to bind
    /// Default: 0.0.0.0:9000
    pub bind_addr: SocketAddr,

    /// Receive buffer size, the largest datagram that is decoded
    /// Default: 65507 (max UDP payload)
    pub buffer_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_OSC_PORT)),
            buffer_size: 65_507,
        }
    }
}

impl ListenerConfig {
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Default::default()
        }
    }
}

/// UDP listener that decodes OSC packets into [`InboundEvent`]s.
///
/// Every message, including those nested in bundles, is forwarded to the
/// event channel in arrival order. Datagrams that are not valid OSC and
/// messages with unsupported argument types are logged and dropped.
///
/// # Example
///
/// ```no_run
/// use osc_listener::{InboundEvent, ListenerConfig, OscListener};
/// use tokio::sync::mpsc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), osc_listener::ListenerError> {
///     let (tx, mut rx) = mpsc::unbounded_channel::<InboundEvent>();
///     let listener = OscListener::bind(&ListenerConfig::default(), tx).await?;
///
///     while let Some(event) = rx.recv().await {
///         println!("{} {:?}", event.address, event.args);
///     }
///
///     listener.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct OscListener {
    /// Address the socket is bound to
    local_addr: SocketAddr,
    /// Shutdown signal sender
    shutdown_tx: Option<mpsc::Sender<()>>,
    /// Receive task handle
    task_handle: Option<JoinHandle<()>>,
}

impl OscListener {
    /// Bind the socket and start the receive task.
    ///
    /// # Errors
    ///
    /// Returns `ListenerError::Bind` if the address is unavailable.
    pub async fn bind(
        config: &ListenerConfig,
        event_sender: mpsc::UnboundedSender<InboundEvent>,
    ) -> Result<Self, ListenerError> {
        let socket = UdpSocket::bind(config.bind_addr)
            .await
            .map_err(|source| ListenerError::Bind {
                addr: config.bind_addr,
                source,
            })?;
        let local_addr = socket.local_addr().map_err(ListenerError::LocalAddr)?;

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let task_handle = Self::start_receiving(socket, config.buffer_size, event_sender, shutdown_rx);

        tracing::info!("OSC listener bound to {}", local_addr);

        Ok(Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task_handle: Some(task_handle),
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop the receive task and wait for it to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }

        tracing::info!("OSC listener on {} stopped", self.local_addr);
    }

    fn start_receiving(
        socket: UdpSocket,
        buffer_size: usize,
        event_sender: mpsc::UnboundedSender<InboundEvent>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut buf = vec![0u8; buffer_size];

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    received = socket.recv_from(&mut buf) => {
                        match received {
                            Ok((len, peer)) => {
                                if !forward_datagram(&buf[..len], peer, &event_sender) {
                                    tracing::debug!("Event receiver dropped, stopping OSC listener");
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!("OSC receive failed: {}", e);
                            }
                        }
                    }
                }
            }
        })
    }
}

/// Decode one datagram and forward its messages.
///
/// Returns `false` once the receiving side of the channel is gone.
fn forward_datagram(
    datagram: &[u8],
    peer: SocketAddr,
    event_sender: &mpsc::UnboundedSender<InboundEvent>,
) -> bool {
    let packet = match rosc::decoder::decode_udp(datagram) {
        Ok((_, packet)) => packet,
        Err(e) => {
            tracing::warn!("Dropping undecodable OSC datagram from {}: {:?}", peer, e);
            return true;
        }
    };

    let received_at = Utc::now();
    let mut messages = Vec::new();
    flatten_packet(packet, &mut messages);

    for message in messages {
        match InboundEvent::from_message(message, received_at) {
            Ok(event) => {
                tracing::trace!("OSC {} {:?}", event.address, event.args);
                if event_sender.send(event).is_err() {
                    return false;
                }
            }
            Err(e) => tracing::error!("Rejected OSC message from {}: {}", peer, e),
        }
    }

    true
}

/// Collect messages from a packet, descending into bundles in order
pub fn flatten_packet(packet: OscPacket, out: &mut Vec<OscMessage>) {
    match packet {
        OscPacket::Message(message) => out.push(message),
        OscPacket::Bundle(bundle) => {
            for inner in bundle.content {
                flatten_packet(inner, out);
            }
        }
    }
}
