// Shared test helpers: a one-shot local HTTP server.
//
// Each accepted connection reads one request (head plus Content-Length body),
// answers with the next canned response and closes.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Starts a server that answers `responses` in order on successive connections.
///
/// Returns the bound port and a handle yielding the raw requests received.
#[allow(dead_code)] // Used by other test files
pub fn spawn_server(responses: Vec<String>) -> (u16, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
    let port = listener.local_addr().expect("Failed to read local addr").port();

    let handle = thread::spawn(move || {
        let mut received = Vec::new();
        for response in responses {
            let (mut stream, _) = listener.accept().expect("Failed to accept");
            received.push(read_request(&mut stream));
            stream
                .write_all(response.as_bytes())
                .expect("Failed to write response");
            // Dropping the stream closes it, which ends the client's read loop.
        }
        received
    });

    (port, handle)
}

/// Reads one request: everything up to the blank line, then `Content-Length` bytes.
fn read_request<R: Read>(stream: &mut R) -> String {
    let mut data = Vec::new();
    let mut byte = [0u8; 1];
    while !data.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => data.push(byte[0]),
            Err(e) => panic!("Failed to read request: {e}"),
        }
    }

    let head = String::from_utf8_lossy(&data).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    let mut body = vec![0u8; content_length];
    stream.read_exact(&mut body).expect("Failed to read body");
    data.extend_from_slice(&body);
    String::from_utf8_lossy(&data).to_string()
}
