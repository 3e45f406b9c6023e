//! WebSocket connection handler
//!
//! Greets each client, then dispatches every inbound frame on its own task.
//! Responses go through a channel to a single writer task, so they are sent
//! whole but possibly in a different order than the requests arrived.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};

use crate::socket_server::dispatcher::Dispatcher;
use crate::socket_server::protocol::GREETING;

/// Accept connections forever, one task per connection
pub async fn serve(listener: TcpListener, dispatcher: Arc<Dispatcher>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tracing::info!("Accepted connection from {}", addr);
                let dispatcher = Arc::clone(&dispatcher);
                tokio::spawn(async move {
                    handle_connection(stream, dispatcher).await;
                });
            }
            Err(e) => {
                tracing::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Handle a single WebSocket connection
pub async fn handle_connection(stream: TcpStream, dispatcher: Arc<Dispatcher>) {
    let addr = stream.peer_addr().ok();
    let conn_id = connection_id();

    // Accept WebSocket handshake
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::error!("WebSocket handshake failed for {:?}: {}", addr, e);
            return;
        }
    };
    tracing::info!("Connected: {} ({:?})", conn_id, addr);

    let (mut sink, mut source) = ws_stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let writer_id = conn_id.clone();
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sink.send(msg).await {
                tracing::debug!("Dropping outbound frames for {}: {}", writer_id, e);
                break;
            }
        }
    });

    let _ = tx.send(Message::Text(GREETING.to_string()));

    while let Some(msg) = source.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let dispatcher = Arc::clone(&dispatcher);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let response = dispatcher.handle(&text).await;
                    let _ = tx.send(Message::Text(response));
                });
            }
            Ok(Message::Binary(data)) => {
                let dispatcher = Arc::clone(&dispatcher);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let response = dispatcher.handle_bytes(&data).await;
                    let _ = tx.send(Message::Text(response));
                });
            }
            Ok(Message::Ping(data)) => {
                let _ = tx.send(Message::Pong(data));
            }
            Ok(Message::Close(_)) => {
                tracing::info!("Client {} requested close", conn_id);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("WebSocket error on {}: {}", conn_id, e);
                break;
            }
        }
    }

    // In-flight dispatches hold their own senders; the writer stops once
    // they are done or the socket is gone.
    drop(tx);
    drop(writer);

    tracing::info!("Connection closed: {} ({:?})", conn_id, addr);
}

fn connection_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("conn_{}", &uuid[..8])
}
