use super::Client;
use super::Error;
use super::error::decode_error_body;
use super::transport::{HttpRequest, HttpResponse};
use aws_sign_v4::percent_encode::{canonical_query, encode_path};
use aws_sign_v4::{HTTPVerb, SignV4Param};
use base64::{Engine, engine::general_purpose};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use url::Url;

/// S3 object key 的最大长度
const MAX_PATH_LEN: usize = 1024;

pub fn get_content_md5(bytes: &[u8]) -> String {
    use md5::{Digest, Md5};

    let mut hasher = Md5::new();
    hasher.update(bytes);
    let res = hasher.finalize();

    general_purpose::STANDARD.encode(res)
}

#[test]
fn get_content_md5_test() {
    let s = get_content_md5(b"0123456789");
    assert_eq!(&s, "eB5eJF1ptWaXm4bijSPyxw==")
}

pub(crate) fn into_request_header(map: BTreeMap<String, String>) -> Result<HeaderMap, Error> {
    map.into_iter()
        .map(|(k, v)| {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|_| Error::InvalidArgument(format!("invalid header name: {}", k)))?;
            let value = HeaderValue::from_str(&v)
                .map_err(|_| Error::InvalidArgument(format!("invalid value for header {}", k)))?;
            Ok((name, value))
        })
        .collect()
}

/// 非2xx的响应转换为错误
///
/// 能解析出服务端错误时返回`Error::Service`，否则返回携带状态码的`Error::InvalidResponse`
pub(crate) fn into_request_failed_error(resp: HttpResponse) -> Error {
    let Some(body) = resp.body else {
        return Error::InvalidResponse(resp.status);
    };
    match decode_error_body(&body) {
        Error::InvalidData(reason) => {
            tracing::debug!(status = %resp.status, %reason, "error body could not be decoded");
            Error::InvalidResponse(resp.status)
        }
        e => e,
    }
}

pub(crate) fn into_success_body(resp: HttpResponse) -> Result<Bytes, Error> {
    if !resp.status.is_success() {
        return Err(into_request_failed_error(resp));
    }
    resp.body.ok_or(Error::InvalidResponse(resp.status))
}

/// 补齐开头的`/`并检查路径
///
/// 路径形如`/bucket/key`，url解析时会处理`.`和`..`，处理后的path和签名的path不一致，所以不允许出现
pub(crate) fn normalize_path(path: &str) -> Result<String, Error> {
    let path = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{}", path)
    };

    if path.len() == 1 {
        return Err(Error::InvalidArgument("path cannot be empty".to_owned()));
    }
    if path.len() > MAX_PATH_LEN {
        return Err(Error::InvalidArgument(format!(
            "path is too long, max is {} bytes",
            MAX_PATH_LEN
        )));
    }
    if path.bytes().any(|b| b == b'\r' || b == b'\n') {
        return Err(Error::InvalidArgument(
            "path cannot contain control characters".to_owned(),
        ));
    }
    if path.split('/').any(|seg| seg == "." || seg == "..") {
        return Err(Error::InvalidArgument(
            "path cannot contain relative path segments '.' or '..'".to_owned(),
        ));
    }

    Ok(path)
}

pub(crate) fn validate_bucket_name(name: &str) -> Result<(), Error> {
    if name.is_empty() || name.contains('/') {
        return Err(Error::InvalidArgument(format!(
            "invalid bucket name: {:?}",
            name
        )));
    }
    Ok(())
}

/// 请求地址，path和query使用与签名相同的编码
pub(crate) fn request_url(host: &str, path: &str, query: Option<&str>) -> Result<Url, Error> {
    let mut url = Url::parse(&format!("https://{}{}", host, encode_path(path)))?;
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        url.set_query(Some(&canonical_query(q)));
    }
    Ok(url)
}

/// 签名并发送请求
///
/// - `path`、`query`：未编码的原始值
/// - `header`：除签名必需的header外，需要额外参与签名并发送的header
pub(crate) fn send_signed(
    client: &Client,
    http_verb: HTTPVerb,
    path: &str,
    query: Option<&str>,
    payload: Option<&[u8]>,
    header: Option<&BTreeMap<String, String>>,
) -> Result<HttpResponse, Error> {
    let url = request_url(client.host(), path, query)?;
    let header_map = client.signer.sign(SignV4Param {
        http_verb,
        path,
        query,
        payload,
        headers: header,
    });
    let request = HttpRequest {
        method: http_verb,
        url,
        headers: into_request_header(header_map)?,
        body: payload.map(<[u8]>::to_vec),
    };
    tracing::debug!(method = %http_verb, url = %request.url, "sending signed request");

    let resp = client.transport.send(request)?;
    tracing::debug!(status = %resp.status, "received response");
    Ok(resp)
}
