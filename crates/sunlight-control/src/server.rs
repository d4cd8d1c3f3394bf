//! Line-oriented TCP transport for [`ControlCommand`]s.
//!
//! Each client gets its own task. Commands from all clients are serialized
//! through the shared handler lock, so a host never sees two at once.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::protocol::{encode_response, parse_command, ControlCommand, ControlResponse, ProtocolError};

/// Implemented by the host; receives one parsed command at a time.
pub trait ControlHandler: Send + Sync + 'static {
    fn handle_command(&mut self, cmd: ControlCommand) -> ControlResponse;
}

/// Shared, lockable handler as held by the server.
pub type SharedHandler = Arc<Mutex<dyn ControlHandler>>;

/// Running control server. Dropping the value leaves the task running;
/// call [`ControlServer::shutdown`] to stop accepting clients.
pub struct ControlServer {
    task: JoinHandle<()>,
}

impl ControlServer {
    /// Bind `127.0.0.1:port` in the background and start serving. Bind
    /// failures are logged and leave the server idle.
    pub fn start(handler: SharedHandler, port: u16) -> Self {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let task = tokio::spawn(async move {
            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    log::info!("Control protocol on {addr}");
                    accept_clients(listener, handler).await;
                }
                Err(e) => log::error!("Cannot bind control port {addr}: {e}"),
            }
        });
        Self { task }
    }

    /// Serve on an already bound listener.
    pub fn serve(listener: TcpListener, handler: SharedHandler) -> Self {
        Self { task: tokio::spawn(accept_clients(listener, handler)) }
    }

    /// Stop accepting clients.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

async fn accept_clients(listener: TcpListener, handler: SharedHandler) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                log::warn!("Control accept failed: {e}");
                continue;
            }
        };
        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            log::debug!("Control client {peer} attached");
            match serve_client(stream, handler).await {
                Ok(()) => log::debug!("Control client {peer} left"),
                Err(e) => log::warn!("Control client {peer} dropped: {e}"),
            }
        });
    }
}

/// Answer one request line. Blank lines get no reply.
async fn respond(handler: &SharedHandler, line: &str) -> Option<ControlResponse> {
    match parse_command(line) {
        Ok(cmd) => {
            log::debug!("Control <- {cmd:?}");
            Some(handler.lock().await.handle_command(cmd))
        }
        Err(ProtocolError::Empty) => None,
        Err(e) => Some(ControlResponse::error(e.to_string())),
    }
}

async fn serve_client(stream: TcpStream, handler: SharedHandler) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(response) = respond(&handler, &line).await {
            write_half.write_all(encode_response(&response).as_bytes()).await?;
            write_half.flush().await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpStream;

    struct Echo {
        dates: Vec<i64>,
    }

    impl ControlHandler for Echo {
        fn handle_command(&mut self, cmd: ControlCommand) -> ControlResponse {
            match cmd {
                ControlCommand::Ping => ControlResponse::pong(),
                ControlCommand::SetDate { day } => {
                    self.dates.push(day);
                    ControlResponse::none()
                }
                _ => ControlResponse::error("unsupported"),
            }
        }
    }

    async fn roundtrip(
        reader: &mut BufReader<tokio::net::tcp::OwnedReadHalf>,
        writer: &mut tokio::net::tcp::OwnedWriteHalf,
        request: &str,
    ) -> serde_json::Value {
        writer.write_all(request.as_bytes()).await.unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        serde_json::from_str(line.trim()).unwrap()
    }

    #[tokio::test]
    async fn test_respond_skips_blank_lines() {
        let handler: SharedHandler = Arc::new(Mutex::new(Echo { dates: Vec::new() }));
        assert!(respond(&handler, "   ").await.is_none());
        let reply = respond(&handler, "{\"cmd\":\"SetDate\",\"params\":{\"day\":5}}").await;
        assert!(reply.is_some());
        let garbage = respond(&handler, "{").await;
        assert!(matches!(garbage, Some(ControlResponse::Error { .. })));
    }

    #[tokio::test]
    async fn test_serves_json_lines() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let echo = Arc::new(Mutex::new(Echo { dates: Vec::new() }));
        let server = ControlServer::serve(listener, echo.clone());

        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        let pong = roundtrip(&mut reader, &mut writer, "{\"cmd\":\"Ping\"}\n").await;
        assert_eq!(pong["status"], "ok");
        assert_eq!(pong["data"]["message"], "pong");

        // Blank lines are skipped without a response.
        let ok = roundtrip(
            &mut reader,
            &mut writer,
            "\n{\"cmd\":\"SetDate\",\"params\":{\"day\":200}}\n",
        )
        .await;
        assert_eq!(ok["status"], "ok");

        let bad = roundtrip(&mut reader, &mut writer, "not json\n").await;
        assert_eq!(bad["status"], "error");

        let unsupported = roundtrip(&mut reader, &mut writer, "{\"cmd\":\"Undo\"}\n").await;
        assert_eq!(unsupported["message"], "unsupported");

        assert_eq!(echo.lock().await.dates, vec![200]);
        server.shutdown();
    }
}
