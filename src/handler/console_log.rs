//! Console log ingest endpoint
//!
//! Receives one browser console event per `POST /api/console-log`, prints
//! the formatted line to stdout, and acknowledges with a fixed JSON body.
//! Every failure mode collapses to a 400 with an empty body; the reason
//! goes to stdout alongside the log stream, and the server keeps serving.

use crate::config::HttpConfig;
use crate::event::{DecodeError, LogEvent};
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

/// Handle `POST /api/console-log`.
pub async fn handle_ingest<B>(req: Request<B>, http_config: &HttpConfig) -> Response<Full<Bytes>>
where
    B: Body + Unpin,
    B::Error: std::fmt::Display,
{
    // The body must arrive with an explicit, well-formed length
    let declared_len = match content_length(&req) {
        Ok(len) => len,
        Err(reason) => {
            logger::log_ingest_error(&reason);
            return http::build_400_response();
        }
    };

    if declared_len > http_config.max_body_size {
        logger::log_warning(&format!(
            "Log event body too large: {declared_len} bytes (max: {})",
            http_config.max_body_size
        ));
        return http::build_413_response();
    }

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_ingest_error(&format!("failed to read request body: {e}"));
            return http::build_400_response();
        }
    };

    match print_event(&body) {
        Ok(()) => http::build_ok_json_response(),
        Err(e) => {
            logger::log_ingest_error(&e.to_string());
            http::build_400_response()
        }
    }
}

/// Decode the body and emit the formatted line.
fn print_event(body: &[u8]) -> Result<(), DecodeError> {
    let event = LogEvent::decode(body)?;
    let line = event.format_line()?;
    logger::log_console_event(&line);
    Ok(())
}

/// Extract and validate the Content-Length header.
fn content_length<B>(req: &Request<B>) -> Result<u64, String> {
    let value = req
        .headers()
        .get("content-length")
        .ok_or_else(|| "missing Content-Length header".to_string())?;

    let text = value
        .to_str()
        .map_err(|_| "Content-Length header is not ASCII".to_string())?;

    text.parse::<u64>()
        .map_err(|_| format!("invalid Content-Length value: '{text}'"))
}
