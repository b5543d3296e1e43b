#![allow(dead_code)]

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

use mfl_scoreboard::state::ScoringRecord;

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

pub fn record(team_id: &str, team: &str, owner: &str, total: &str) -> ScoringRecord {
    ScoringRecord {
        team_id: team_id.to_string(),
        team_name: team.to_string(),
        owner_name: owner.to_string(),
        total_score: total.to_string(),
        ..ScoringRecord::default()
    }
}

/// Answer exactly one HTTP request with a canned response; returns the base url.
pub fn serve_once(status_line: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("listener addr");
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 8192];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });
    format!("http://{addr}/stage/mfl-scoring")
}

/// A url on a port nobody is listening on.
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("listener addr");
    drop(listener);
    format!("http://{addr}/stage/mfl-scoring")
}

/// Serve `count` requests, answering each with the first route whose key
/// appears in the request line. Unmatched requests get a 404.
pub fn serve_routes(routes: Vec<(&'static str, String)>, count: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("listener addr");
    thread::spawn(move || {
        for _ in 0..count {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut buf = [0u8; 8192];
            let n = stream.read(&mut buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let request_line = request.lines().next().unwrap_or("");
            let (status, body) = routes
                .iter()
                .find(|(key, _)| request_line.contains(key))
                .map(|(_, body)| ("200 OK", body.as_str()))
                .unwrap_or(("404 Not Found", ""));
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });
    format!("http://{addr}/")
}
