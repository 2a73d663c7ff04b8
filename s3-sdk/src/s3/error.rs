use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt::{Display, Formatter};

/// 服务端返回的错误信息
///
/// [Error responses](https://docs.aws.amazon.com/AmazonS3/latest/API/ErrorResponses.html)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceError {
    pub code: String,
    pub message: String,
    pub resource: Option<String>,
    pub request_id: Option<String>,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(id) = &self.request_id {
            write!(f, " (request id: {})", id)?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("operation is not implemented")]
    Unimplemented,
    #[error("invalid response, status: {0}")]
    InvalidResponse(StatusCode),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("service error: {0}")]
    Service(ServiceError),
    #[error("listing exceeded the limit of {limit} pages")]
    PageLimitExceeded { limit: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorBody {
    code: String,
    message: String,
    resource: Option<String>,
    request_id: Option<String>,
}

/// 解析失败的请求返回的xml
///
/// 成功时返回`Error::Service`，body无法解析时返回`Error::InvalidData`，不会返回xml解析库的错误
pub fn decode_error_body(body: &[u8]) -> Error {
    let text = match std::str::from_utf8(body) {
        Ok(s) => s,
        Err(e) => return Error::InvalidData(format!("error body is not utf-8: {}", e)),
    };
    match quick_xml::de::from_str::<ErrorBody>(text) {
        Ok(b) if !b.code.trim().is_empty() => Error::Service(ServiceError {
            code: b.code,
            message: b.message,
            resource: b.resource.filter(|s| !s.is_empty()),
            request_id: b.request_id.filter(|s| !s.is_empty()),
        }),
        Ok(_) => Error::InvalidData("error body has an empty Code".to_owned()),
        Err(e) => Error::InvalidData(format!("XML parse error: {}", e)),
    }
}
