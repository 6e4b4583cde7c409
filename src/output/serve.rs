use http::{Method, Uri, Version};
use httparse::Status;
use std::{
    collections::HashMap,
    io::{self, Read, Write},
    net::{TcpListener, TcpStream},
    str::FromStr,
    time::Instant,
};
use tracing::{debug, info};

use crate::{config::SiteConfig, content::FsLoader};

/// Serves the site root, with `generated` files taking precedence.
pub fn serve(config: &SiteConfig, generated: &HashMap<String, Vec<u8>>) -> io::Result<()> {
    let start = Instant::now();
    let root = &FsLoader::new(&config.root);
    let listener = TcpListener::bind(&config.address)?;

    info!(
        address = %config.address,
        root = %config.root,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "serving"
    );

    std::thread::scope(|scope| {
        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    debug!(error = %e, "failed to accept connection");
                    continue;
                }
            };
            scope.spawn(move || handle(stream, root, generated));
        }
    });

    Ok(())
}

fn handle(mut stream: TcpStream, root: &FsLoader, generated: &HashMap<String, Vec<u8>>) {
    let mut buf = Vec::new();

    let request = loop {
        let mut tmp = [0u8; 1024];
        match stream.read(&mut tmp) {
            Ok(0) => return,
            Ok(n) => {
                buf.extend_from_slice(&tmp[0..n]);
            }
            Err(_) => {
                return;
            }
        };

        let mut headers = [httparse::EMPTY_HEADER; 128];
        let mut parse_req = httparse::Request::new(&mut headers);
        let Ok(res) = parse_req.parse(&buf) else {
            return;
        };
        if let Status::Complete(_) = res {
            let Some(method) = parse_req.method.and_then(|m| Method::from_str(m).ok()) else {
                return;
            };
            let Some(uri) = parse_req.path.and_then(|p| Uri::from_str(p).ok()) else {
                return;
            };
            let mut builder = http::Request::builder().method(method).uri(uri).version(
                if parse_req.version == Some(1) {
                    Version::HTTP_11
                } else {
                    Version::HTTP_10
                },
            );
            for header in parse_req.headers {
                builder = builder.header(header.name, header.value);
            }
            let Ok(request) = builder.body(()) else {
                return;
            };

            break request;
        }
    };

    let mut path = request.uri().path().to_owned();
    if path.ends_with('/') {
        path.push_str("index.html")
    }

    let file = generated.get(&path).cloned().or_else(|| {
        root.resolve(&path)
            .filter(|p| p.is_file())
            .and_then(|p| std::fs::read(p).ok())
    });

    let (status, body) = match file {
        Some(body) => (200u16, body),
        None => (404, b"not found".to_vec()),
    };

    info!(status, uri = %request.uri(), "request");

    let reason = http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("");
    let status_line = format!("{:?} {status} {reason}\r\n", request.version());

    let mut headers = String::new();
    headers.push_str(&format!("Content-Length: {}\r\n", body.len()));
    if status == 200 {
        headers.push_str(&format!("Content-Type: {}\r\n", content_type(&path)));
    }
    headers.push_str("\r\n");

    if stream.write_all(status_line.as_bytes()).is_err() {
        return;
    }
    if stream.write_all(headers.as_bytes()).is_err() {
        return;
    }
    if stream.write_all(&body).is_err() {
        return;
    }
    let _ = stream.flush();
}

pub fn content_type(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase());
    match extension.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("json") => "application/json",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("md") => "text/markdown; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        // Help Chrome
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
