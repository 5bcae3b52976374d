//! HTTP client forwarding validated requests to the server

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::Response,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::api::SHARER_HEADER;
use crate::error::{AppError, AppResult};

/// A request to replay against the server
#[derive(Debug)]
pub struct Forward<'a, T = ()> {
    pub method: Method,
    pub path: String,
    pub query: Option<&'a str>,
    pub sharer_id: Option<i64>,
    pub body: Option<&'a T>,
}

impl<'a> Forward<'a> {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            sharer_id: None,
            body: None,
        }
    }
}

impl<'a, T> Forward<'a, T> {
    pub fn query(mut self, query: Option<&'a str>) -> Self {
        self.query = query;
        self
    }

    pub fn sharer(mut self, sharer_id: i64) -> Self {
        self.sharer_id = Some(sharer_id);
        self
    }

    /// Attach a JSON body
    pub fn json<B>(self, body: &'a B) -> Forward<'a, B> {
        Forward {
            method: self.method,
            path: self.path,
            query: self.query,
            sharer_id: self.sharer_id,
            body: Some(body),
        }
    }
}

/// Client for the ShareIt server
#[derive(Clone)]
pub struct ServerClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Send the request and relay the server's status, content type and body
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn forward<T: Serialize>(&self, request: Forward<'_, T>) -> AppResult<Response> {
        let mut url = format!("{}{}", self.base_url, request.path);
        if let Some(query) = request.query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        let mut builder = self.client.request(request.method, &url);
        if let Some(sharer_id) = request.sharer_id {
            builder = builder.header(SHARER_HEADER, sharer_id.to_string());
        }
        if let Some(body) = request.body {
            builder = builder.json(body);
        }

        let upstream = builder.send().await?;
        let status = StatusCode::from_u16(upstream.status().as_u16())
            .map_err(|e| AppError::Internal(format!("Invalid upstream status: {}", e)))?;
        let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
        let bytes = upstream.bytes().await?;

        debug!(status = %status, bytes = bytes.len(), "Server responded");

        let mut response = Response::builder().status(status);
        if let Some(content_type) = content_type {
            response = response.header(CONTENT_TYPE, content_type);
        }
        response
            .body(Body::from(bytes))
            .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
    }
}
