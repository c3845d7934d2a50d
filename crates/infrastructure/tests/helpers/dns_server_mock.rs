#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock server answers every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockReply {
    /// NOERROR with a single A record.
    Answer([u8; 4]),
    /// NOERROR with a single TXT record.
    Txt(&'static str),
    /// NOERROR, no answers.
    NoData,
    NxDomain,
    ServFail,
    Refused,
    /// Never responds.
    Silent,
}

impl MockReply {
    fn rcode(&self) -> u8 {
        match self {
            Self::ServFail => 2,
            Self::NxDomain => 3,
            Self::Refused => 5,
            _ => 0,
        }
    }
}

/// Loopback UDP DNS server with a fixed, switchable reply.
pub struct MockDnsServer {
    addr: SocketAddr,
    reply: Arc<Mutex<MockReply>>,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Starts a server on an ephemeral loopback port.
    pub async fn start(reply: MockReply) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let reply = Arc::new(Mutex::new(reply));
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let server_reply = reply.clone();
        let server_queries = queries.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            server_queries.fetch_add(1, Ordering::SeqCst);
                            let reply = *server_reply.lock().unwrap();
                            if reply == MockReply::Silent {
                                continue;
                            }
                            let response = Self::build_response(&buf[..len], reply);
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            reply,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn set_reply(&self, reply: MockReply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Echoes the query's ID and question, then appends the configured answer.
    pub fn build_response(query: &[u8], reply: MockReply) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(512);

        // Transaction ID
        response.extend_from_slice(&query[0..2]);

        // QR=1, RD=1 / RA=1, RCODE
        response.push(0x81);
        response.push(0x80 | reply.rcode());

        // Questions count (from query)
        response.extend_from_slice(&query[4..6]);

        let answers: u8 = if matches!(reply, MockReply::Answer(_) | MockReply::Txt(_)) {
            1
        } else {
            0
        };
        response.extend_from_slice(&[0x00, answers]);

        // Authority RRs: 0, Additional RRs: 0
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        // Copy question section (rest of query)
        response.extend_from_slice(&query[12..]);

        if let MockReply::Answer(ip) = reply {
            response.extend_from_slice(&[
                0xc0, 0x0c, // Name pointer to question
                0x00, 0x01, // Type A
                0x00, 0x01, // Class IN
                0x00, 0x00, 0x00, 0x3c, // TTL: 60 seconds
                0x00, 0x04, // Data length: 4 bytes
            ]);
            response.extend_from_slice(&ip);
        }

        if let MockReply::Txt(text) = reply {
            let text = &text.as_bytes()[..text.len().min(255)];
            let rdlength = (text.len() + 1) as u16;
            response.extend_from_slice(&[
                0xc0, 0x0c, // Name pointer to question
                0x00, 0x10, // Type TXT
                0x00, 0x01, // Class IN
                0x00, 0x00, 0x00, 0x3c, // TTL: 60 seconds
            ]);
            response.extend_from_slice(&rdlength.to_be_bytes());
            response.push(text.len() as u8);
            response.extend_from_slice(text);
        }

        response
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
