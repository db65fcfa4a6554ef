//! reqwest (blocking) を使う HttpClient 実装
//!
//! タイムアウトは上書きしない（reqwest の既定値に任せる）。

use crate::error::Error;
use crate::ports::outbound::{HttpClient, HttpResponse};

pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, Error> {
        let mut builder = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body.to_string());

        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse::new(status, text))
    }
}
