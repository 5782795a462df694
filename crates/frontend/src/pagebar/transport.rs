//! Seams to the network and to page navigation.

use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use super::config::{HttpMethod, Params};
use super::error::PageBarError;

/// How the response body should be handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: String,
    pub method: HttpMethod,
    pub params: Params,
    pub kind: ResponseKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportResponse {
    Text(String),
    Json(Value),
}

#[async_trait(?Send)]
pub trait Transport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, PageBarError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for Rc<T> {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, PageBarError> {
        (**self).request(request).await
    }
}

/// Performs a full-page navigation.
pub trait Navigator {
    fn navigate(&self, url: &str);
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn navigate(&self, url: &str) {
        (**self).navigate(url)
    }
}
