use crate::helper::{amz_date, date_stamp, hash_sha256, sign_hmac_sha256_byte};
use crate::percent_encode::{canonical_query, encode_path};
use crate::region::Region;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use time::{OffsetDateTime, UtcOffset};
// 签名文档：https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html

pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";
pub const AUTHORIZATION: &str = "Authorization";
pub const HOST: &str = "host";
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";
const SCOPE_TERMINATOR: &str = "aws4_request";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HTTPVerb {
    #[default]
    Get,
    Put,
    Post,
    Delete,
    Head,
}

impl HTTPVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HTTPVerb::Get => "GET",
            HTTPVerb::Put => "PUT",
            HTTPVerb::Post => "POST",
            HTTPVerb::Delete => "DELETE",
            HTTPVerb::Head => "HEAD",
        }
    }
}

impl Display for HTTPVerb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次签名需要的请求信息
///
/// - `path`：未编码的原始路径，如 `/bucket/dir/file.txt`
/// - `query`：已按名称排序的query，如 `list-type=2&prefix=a%2Fb`，值中的`&`、`=`需要先用
///   [`encode_value`](crate::percent_encode::encode_value)编码，其余规则见[`canonical_query`]
/// - `headers`：额外参与签名的header，名称会转为小写，值会去掉首尾空白
#[derive(Clone, Copy, Debug, Default)]
pub struct SignV4Param<'a> {
    pub http_verb: HTTPVerb,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub payload: Option<&'a [u8]>,
    pub headers: Option<&'a BTreeMap<String, String>>,
}

/// AWS Signature Version 4 签名器
///
/// 构建后不可修改，需要切换 host 或 region 时重新构建一个新的签名器。
/// 不持有任何可变状态，可以在多个线程间共享。
#[derive(Clone)]
pub struct SignatureV4 {
    service: String,
    host: String,
    region: Region,
    access_key: String,
    secret_key: String,
}

impl Debug for SignatureV4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureV4")
            .field("service", &self.service)
            .field("host", &self.host)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .finish_non_exhaustive()
    }
}

impl SignatureV4 {
    pub fn new(
        service: impl Into<String>,
        host: impl Into<String>,
        region: Region,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            host: host.into(),
            region,
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// 使用新的host构建一个新的签名器
    pub fn with_host(&self, host: impl Into<String>) -> Self {
        Self::new(
            self.service.clone(),
            host,
            self.region.clone(),
            self.access_key.clone(),
            self.secret_key.clone(),
        )
    }

    /// 使用新的region构建一个新的签名器
    pub fn with_region(&self, region: Region) -> Self {
        Self::new(
            self.service.clone(),
            self.host.clone(),
            region,
            self.access_key.clone(),
            self.secret_key.clone(),
        )
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// `YYYYMMDD/region/service/aws4_request`
    pub fn credential_scope(&self, date_time: &OffsetDateTime) -> String {
        let date = date_stamp(&date_time.to_offset(UtcOffset::UTC));
        format!(
            "{}/{}/{}/{}",
            date,
            self.region.as_str(),
            self.service,
            SCOPE_TERMINATOR
        )
    }

    /// 使用当前时间签名，返回需要随请求发送的全部header
    pub fn sign(&self, param: SignV4Param<'_>) -> BTreeMap<String, String> {
        // 只读取一次时间，后面所有步骤共用
        let now = OffsetDateTime::now_utc();
        self.sign_at(param, &now)
    }

    /// 使用指定的时间签名
    pub fn sign_at(
        &self,
        param: SignV4Param<'_>,
        date_time: &OffsetDateTime,
    ) -> BTreeMap<String, String> {
        let date_time = date_time.to_offset(UtcOffset::UTC);
        let timestamp = amz_date(&date_time);
        let content_hash = hash_sha256(param.payload);

        let mut headers = canonical_header_map(param.headers);
        headers.insert(HOST.to_owned(), self.host.trim().to_owned());
        headers.insert(X_AMZ_CONTENT_SHA256.to_owned(), content_hash.clone());
        headers.insert(X_AMZ_DATE.to_owned(), timestamp.clone());

        //region 构建string_to_sign
        let signed_headers = signed_headers(&headers);
        let canonical_request_str = get_canonical_request(
            param.http_verb,
            &canonical_path(param.path),
            &param.query.map(canonical_query).unwrap_or_default(),
            &headers,
            &signed_headers,
            &content_hash,
        );
        tracing::trace!(canonical_request = %canonical_request_str, "sigv4 canonical request");

        let scope = self.credential_scope(&date_time);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            timestamp,
            scope,
            hash_sha256(Some(canonical_request_str.as_bytes()))
        );
        tracing::trace!(string_to_sign = %string_to_sign, "sigv4 string to sign");
        //endregion

        let signing_key = self.signing_key(&date_stamp(&date_time));
        let signature = hex::encode(sign_hmac_sha256_byte(
            &signing_key,
            string_to_sign.as_bytes(),
        ));

        let authorization = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM, self.access_key, scope, signed_headers, signature
        );
        headers.insert(AUTHORIZATION.to_owned(), authorization);
        headers
    }

    fn signing_key(&self, date: &str) -> Vec<u8> {
        let date_key = sign_hmac_sha256_byte(
            format!("AWS4{}", self.secret_key).as_bytes(),
            date.as_bytes(),
        );
        let date_region_key = sign_hmac_sha256_byte(&date_key, self.region.as_str().as_bytes());
        let date_region_service_key = sign_hmac_sha256_byte(&date_region_key, self.service.as_bytes());
        sign_hmac_sha256_byte(&date_region_service_key, SCOPE_TERMINATOR.as_bytes())
    }
}

// 名称统一为小写，值去掉首尾空白
fn canonical_header_map(headers: Option<&BTreeMap<String, String>>) -> BTreeMap<String, String> {
    headers
        .into_iter()
        .flatten()
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_owned()))
        .collect()
}

fn canonical_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_owned()
    } else {
        encode_path(path)
    }
}

// BTreeMap的key已经排好序
fn signed_headers(headers: &BTreeMap<String, String>) -> String {
    headers.keys().map(String::as_str).collect::<Vec<_>>().join(";")
}

// METHOD\nPATH\nQUERY\nHEADERS\nSIGNED_HEADERS\nHASH，每个canonical header自带`\n`结尾
fn get_canonical_request(
    http_verb: HTTPVerb,
    canonical_uri: &str,
    canonical_query_string: &str,
    canonical_header: &BTreeMap<String, String>,
    signed_headers: &str,
    content_hash: &str,
) -> String {
    let mut canonical_headers_str = String::new();
    for (k, v) in canonical_header {
        canonical_headers_str.push_str(&format!("{}:{}\n", k, v));
    }

    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        http_verb,
        canonical_uri,
        canonical_query_string,
        canonical_headers_str,
        signed_headers,
        content_hash
    )
}
