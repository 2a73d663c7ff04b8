//! 发送请求的接口
//!
//! 默认使用`reqwest::blocking::Client`，可以在构建`Client`时传入其它实现。

use super::Error;
use aws_sign_v4::HTTPVerb;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use url::Url;

/// 已经签名的请求，`url`中的path和query与签名时使用的完全一致
#[derive(Debug)]
pub struct HttpRequest {
    pub method: HTTPVerb,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    /// `None`：body读取失败
    pub body: Option<Bytes>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    pub fn without_body(status: StatusCode) -> Self {
        Self { status, body: None }
    }
}

pub trait HttpTransport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error>;
}

impl HttpTransport for reqwest::blocking::Client {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let method = match request.method {
            HTTPVerb::Get => reqwest::Method::GET,
            HTTPVerb::Put => reqwest::Method::PUT,
            HTTPVerb::Post => reqwest::Method::POST,
            HTTPVerb::Delete => reqwest::Method::DELETE,
            HTTPVerb::Head => reqwest::Method::HEAD,
        };
        let mut builder = self.request(method, request.url).headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let resp = builder.send()?;

        let status = resp.status();
        let body = match resp.bytes() {
            Ok(b) => Some(b),
            Err(e) => {
                tracing::warn!(%status, error = %e, "failed to read response body");
                None
            }
        };
        Ok(HttpResponse { status, body })
    }
}
