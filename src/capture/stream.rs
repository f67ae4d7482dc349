use crate::capture::wire::parse_frame;
use crate::capture::{CaptureError, CaptureSource, ConnectMode};
use crate::models::Frame;
use crate::utils::path::expand_tilde;
use crate::utils::time::now_seconds;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::{Shutdown, TcpStream};
use std::path::PathBuf;
use tracing::{debug, info};

/// Where a stream address points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Live bridge, `host:port` or `tcp://host:port`.
    Tcp(String),
    /// Recorded frame log, `replay:<path>` or `file:<path>`.
    Replay(PathBuf),
}

impl Endpoint {
    pub fn parse(address: &str) -> Result<Self, CaptureError> {
        let address = address.trim();

        if let Some(path) = address
            .strip_prefix("replay:")
            .or_else(|| address.strip_prefix("file:"))
        {
            if path.is_empty() {
                return Err(CaptureError::InvalidAddress(address.to_string()));
            }
            return Ok(Endpoint::Replay(expand_tilde(path)));
        }

        let host = address.strip_prefix("tcp://").unwrap_or(address);
        match host.rsplit_once(':') {
            Some((h, port)) if !h.is_empty() && port.parse::<u16>().is_ok() => {
                Ok(Endpoint::Tcp(host.to_string()))
            }
            _ => Err(CaptureError::InvalidAddress(address.to_string())),
        }
    }
}

struct Link {
    endpoint: Endpoint,
    reader: Box<dyn BufRead + Send>,
    socket: Option<TcpStream>,
    mode: ConnectMode,
    line_no: usize,
    last_frame: Option<u64>,
    /// Replay only: shift applied to recorded capture times.
    time_offset: Option<f64>,
}

/// JSON-lines frame stream over TCP or from a recorded log.
#[derive(Default)]
pub struct StreamSource {
    link: Option<Link>,
}

impl StreamSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }
}

impl CaptureSource for StreamSource {
    fn connect(&mut self, address: &str, mode: ConnectMode) -> Result<(), CaptureError> {
        if let Some(link) = &self.link {
            return Err(CaptureError::AlreadyConnected(format!("{:?}", link.endpoint)));
        }

        let endpoint = Endpoint::parse(address)?;
        let connect_err = |source: io::Error| CaptureError::Connect {
            address: address.to_string(),
            source,
        };

        let (reader, socket): (Box<dyn BufRead + Send>, Option<TcpStream>) = match &endpoint {
            Endpoint::Tcp(host) => {
                let socket = TcpStream::connect(host.as_str()).map_err(connect_err)?;
                let reader = socket.try_clone().map_err(connect_err)?;
                (Box::new(BufReader::new(reader)), Some(socket))
            }
            Endpoint::Replay(path) => {
                let file = File::open(path).map_err(connect_err)?;
                (Box::new(BufReader::new(file)), None)
            }
        };

        info!(?endpoint, ?mode, "capture source connected");

        self.link = Some(Link {
            endpoint,
            reader,
            socket,
            mode,
            line_no: 0,
            last_frame: None,
            time_offset: None,
        });
        Ok(())
    }

    fn next_unread_frame(&mut self) -> Result<Frame, CaptureError> {
        let link = self.link.as_mut().ok_or(CaptureError::NotConnected)?;
        let mut line = String::new();

        loop {
            line.clear();
            if link.reader.read_line(&mut line)? == 0 {
                return match link.endpoint {
                    Endpoint::Replay(_) => Err(CaptureError::Exhausted),
                    Endpoint::Tcp(_) => Err(CaptureError::Read(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "stream closed by peer",
                    ))),
                };
            }
            link.line_no += 1;

            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            let mut frame = parse_frame(text, link.line_no, link.mode)?;

            if link.last_frame.is_some_and(|last| frame.frame_number <= last) {
                debug!(frame = frame.frame_number, "skipping already-read frame");
                continue;
            }
            link.last_frame = Some(frame.frame_number);

            if let Endpoint::Replay(_) = link.endpoint {
                // First replayed frame lands on the wall clock at read time.
                let offset = *link
                    .time_offset
                    .get_or_insert_with(|| now_seconds() - frame.capture_time);
                frame.capture_time += offset;
            }

            return Ok(frame);
        }
    }

    fn disconnect(&mut self) -> Result<(), CaptureError> {
        let link = self.link.take().ok_or(CaptureError::NotConnected)?;

        if let Some(socket) = link.socket {
            match socket.shutdown(Shutdown::Both) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotConnected => {}
                Err(e) => return Err(CaptureError::Read(e)),
            }
        }

        info!(endpoint = ?link.endpoint, lines_read = link.line_no, "capture source disconnected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_address_forms() {
        assert_eq!(
            Endpoint::parse("192.168.11.3:801").unwrap(),
            Endpoint::Tcp("192.168.11.3:801".into())
        );
        assert_eq!(
            Endpoint::parse("tcp://localhost:801").unwrap(),
            Endpoint::Tcp("localhost:801".into())
        );
        assert_eq!(
            Endpoint::parse("replay:/tmp/take1.jsonl").unwrap(),
            Endpoint::Replay(PathBuf::from("/tmp/take1.jsonl"))
        );
        assert!(Endpoint::parse("no-port").is_err());
        assert!(Endpoint::parse("replay:").is_err());
    }

    #[test]
    fn disconnect_without_connect_fails() {
        let mut source = StreamSource::new();
        assert!(matches!(source.disconnect(), Err(CaptureError::NotConnected)));
    }
}
