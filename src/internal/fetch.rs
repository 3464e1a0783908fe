// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Paul <abonnementspaul (at) gmail.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use anyhow::Context;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::io::{self, Read};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("Icon at {url} is larger than {limit} bytes")]
    TooLarge { url: String, limit: u64 },

    #[error("{url} returned an empty body")]
    Empty { url: String },

    #[error("Failed to read the response from {url}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },
}

pub trait IconFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct HttpIconFetcher {
    client: Client,
    max_bytes: u64,
}

impl HttpIconFetcher {
    pub fn new(timeout: Duration, max_bytes: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Unable to build the HTTP client")?;

        Ok(Self { client, max_bytes })
    }
}

impl IconFetcher for HttpIconFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("Downloading icon from {url}");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let too_large = || FetchError::TooLarge {
            url: url.to_string(),
            limit: self.max_bytes,
        };

        if response.content_length().is_some_and(|len| len > self.max_bytes) {
            return Err(too_large());
        }

        // Content-Length can be absent or wrong, read one byte past the limit to find out
        let mut buffer = Vec::new();
        response
            .take(self.max_bytes + 1)
            .read_to_end(&mut buffer)
            .map_err(|e| FetchError::Body {
                url: url.to_string(),
                source: e,
            })?;

        if buffer.len() as u64 > self.max_bytes {
            return Err(too_large());
        }

        if buffer.is_empty() {
            return Err(FetchError::Empty {
                url: url.to_string(),
            });
        }

        debug!("Downloaded {} bytes from {url}", buffer.len());

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::{Ipv4Addr, TcpListener};
    use std::thread;

    /// Answers a single request with `status` and `body`, returns the URL to hit.
    fn serve_once(status: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind(format!("{}:0", Ipv4Addr::LOCALHOST)).unwrap();
        let port = listener.local_addr().unwrap().port();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }

            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(&body).unwrap();
            stream.flush().unwrap();
        });

        format!("http://{}:{port}/icon.png", Ipv4Addr::LOCALHOST)
    }

    fn fetcher(max_bytes: u64) -> HttpIconFetcher {
        // Proxy settings from the environment must not catch loopback requests
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        HttpIconFetcher { client, max_bytes }
    }

    #[test]
    fn test_new_builds_client() {
        assert!(HttpIconFetcher::new(Duration::from_secs(1), 1).is_ok());
    }

    #[test]
    fn test_fetch_returns_body() {
        let url = serve_once("200 OK", b"\x89PNG icon".to_vec());

        let bytes = fetcher(1024).fetch(&url).unwrap();
        assert_eq!(bytes, b"\x89PNG icon");
    }

    #[test]
    fn test_fetch_reports_http_status() {
        let url = serve_once("404 Not Found", b"nope".to_vec());

        let err = fetcher(1024).fetch(&url).unwrap_err();
        assert!(matches!(err, FetchError::Status { status, .. } if status == StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_fetch_rejects_oversized_body() {
        let url = serve_once("200 OK", vec![0u8; 64]);

        let err = fetcher(16).fetch(&url).unwrap_err();
        assert!(matches!(err, FetchError::TooLarge { limit: 16, .. }));
    }

    #[test]
    fn test_fetch_rejects_empty_body() {
        let url = serve_once("200 OK", Vec::new());

        let err = fetcher(16).fetch(&url).unwrap_err();
        assert!(matches!(err, FetchError::Empty { .. }));
    }

    #[test]
    fn test_fetch_rejects_invalid_url() {
        let err = fetcher(16).fetch("not a url").unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }
}
