//! s3 sdk
//!
//! 注意：
//!
//! - 只支持path-style的地址，如`https://host/bucket/key`
//! - 只支持使用Header携带签名的方式请求，不支持url参数签名
//! - 所有请求都是同步阻塞的，不会重试

pub mod bucket;
pub mod object;
pub mod query;
pub mod transport;
pub mod types_rs;

mod error;
pub use error::{Error, ServiceError, decode_error_body};

pub(crate) mod utils;

pub use aws_sign_v4::{AccessControlList, Region};
pub use query::Query;
pub use types_rs::{ListPage, S3File};

use aws_sign_v4::SignatureV4;
use bon::bon;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use transport::HttpTransport;

/// 签名使用的服务名
pub const SERVICE: &str = "s3";
/// `list_all`默认最多请求的页数
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// s3客户端
///
/// host和region只保存在签名器中，修改时会重新构建签名器。
#[derive(Clone)]
pub struct Client {
    signer: SignatureV4,
    max_pages: usize,
    transport: Arc<dyn HttpTransport>,
}

/// 创建s3客户端
#[bon]
impl Client {
    /// - `host`：如`s3.amazonaws.com`、`localhost:9000`
    /// - `max_pages`：`list_all`最多请求的页数，默认为[`DEFAULT_MAX_PAGES`]
    /// - `transport`：默认使用`reqwest::blocking::Client`
    #[builder(on(String, into))]
    pub fn new(
        host: String,
        access_key: String,
        secret_key: String,
        region: Region,
        #[builder(default = DEFAULT_MAX_PAGES)] max_pages: usize,
        transport: Option<Arc<dyn HttpTransport>>,
    ) -> Self {
        let transport: Arc<dyn HttpTransport> = match transport {
            Some(t) => t,
            None => Arc::new(reqwest::blocking::Client::new()),
        };
        Self {
            signer: SignatureV4::new(SERVICE, host, region, access_key, secret_key),
            max_pages,
            transport,
        }
    }
}

impl Client {
    pub fn host(&self) -> &str {
        self.signer.host()
    }

    pub fn region(&self) -> &Region {
        self.signer.region()
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.signer = self.signer.with_host(host);
    }

    pub fn set_region(&mut self, region: Region) {
        self.signer = self.signer.with_region(region);
    }

    /// 返回使用新host的客户端，共享同一个transport
    pub fn with_host(&self, host: impl Into<String>) -> Self {
        let mut client = self.clone();
        client.set_host(host);
        client
    }

    /// 返回使用新region的客户端，共享同一个transport
    pub fn with_region(&self, region: Region) -> Self {
        let mut client = self.clone();
        client.set_region(region);
        client
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("signer", &self.signer)
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}
