// Logging module
// Console event lines and ingest errors go to stdout, where the forwarded
// log stream lives. Access lines and server diagnostics go to stderr so
// stdout stays a clean stream.

use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr) {
    println!("Console streaming server running on http://{addr}");
    println!("JavaScript console logs will appear here in real-time!");
    println!("{}", "-".repeat(50));
}

/// One formatted browser console line.
pub fn log_console_event(line: &str) {
    println!("{line}");
}

/// Ingest failure, with the fixed prefix clients grep for.
pub fn log_ingest_error(reason: &str) {
    println!("Error processing log: {reason}");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    eprintln!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    eprintln!("[Request] {method} {uri} {version:?}");
}

pub fn log_headers_count(count: usize) {
    eprintln!("[Headers] Count: {count}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
