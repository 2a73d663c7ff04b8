//! 列举bucket中的object
//!
//! [ListObjectsV2](https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListObjectsV2.html)

use super::Client;
use super::Error;
use super::query::Query;
use super::types_rs::{ListBucketResult, ListPage, S3File};
use super::utils::{into_success_body, send_signed, validate_bucket_name};
use aws_sign_v4::HTTPVerb;
use aws_sign_v4::percent_encode::encode_value;
use bon::Builder;

/// 单页最多返回的条目数
pub const DEFAULT_MAX_KEYS: u32 = 1000;

/// `list-type`固定为2，`delimiter`固定为`/`
#[derive(Builder)]
pub struct ListObjectsV2<'a> {
    #[builder(start_fn)]
    pub(crate) client: &'a Client,
    #[builder(start_fn)]
    pub(crate) bucket: &'a str,
    #[builder(default)]
    prefix: &'a str,
    #[builder(default = DEFAULT_MAX_KEYS)]
    max_keys: u32,
    /// 从这个token开始列举
    continuation_token: Option<&'a str>,
}

enum PageState {
    Fetching(Option<String>),
    Done,
}

impl ListObjectsV2<'_> {
    /// 只请求一页
    pub fn list_page(&self) -> Result<ListPage, Error> {
        self.fetch_page(self.continuation_token)
    }

    /// 依次请求所有页，按请求顺序拼接结果
    ///
    /// 请求的页数超过client的`max_pages`时返回`Error::PageLimitExceeded`
    pub fn list_all(&self) -> Result<Vec<S3File>, Error> {
        let limit = self.client.max_pages;
        let mut files = Vec::new();
        let mut pages = 0;
        let mut state = PageState::Fetching(self.continuation_token.map(str::to_owned));

        while let PageState::Fetching(token) = state {
            if pages >= limit {
                return Err(Error::PageLimitExceeded { limit });
            }
            let page = self.fetch_page(token.as_deref())?;
            pages += 1;
            files.extend(page.entries);
            state = match page.next_token {
                Some(next) => PageState::Fetching(Some(next)),
                None => PageState::Done,
            };
        }

        tracing::debug!(bucket = self.bucket, pages, files = files.len(), "listed bucket");
        Ok(files)
    }

    fn fetch_page(&self, token: Option<&str>) -> Result<ListPage, Error> {
        validate_bucket_name(self.bucket)?;

        // 值先编码，prefix和token中可能有`&`、`=`
        let mut query = Query::new();
        query.insert("list-type", "2");
        query.insert("max-keys", self.max_keys.to_string());
        query.insert("prefix", encode_value(self.prefix));
        query.insert("delimiter", encode_value("/"));
        if let Some(token) = token {
            query.insert("continuation-token", encode_value(token));
        }

        let path = format!("/{}/", self.bucket);
        let resp = send_signed(
            self.client,
            HTTPVerb::Get,
            &path,
            Some(&query.to_string()),
            None,
            None,
        )?;
        let body = into_success_body(resp)?;
        parse_list_page(&body)
    }
}

/// 解析ListObjectsV2返回的xml
///
/// 整个文档无法解析时返回`Error::InvalidData`；单个`Contents`缺少字段或格式错误时跳过该条目
pub(crate) fn parse_list_page(body: &[u8]) -> Result<ListPage, Error> {
    let text = std::str::from_utf8(body)
        .map_err(|e| Error::InvalidData(format!("list response is not utf-8: {}", e)))?;
    let result: ListBucketResult = quick_xml::de::from_str(text)
        .map_err(|e| Error::InvalidData(format!("XML parse error: {}", e)))?;

    let prefix = result.prefix.unwrap_or_default();
    let next_token = match (result.is_truncated.as_deref(), result.next_continuation_token) {
        (Some("true"), Some(token)) if !token.is_empty() => Some(token),
        _ => None,
    };

    let mut entries = Vec::with_capacity(result.contents.len());
    let mut skipped = 0;
    for content in result.contents {
        match S3File::from_content(content) {
            // prefix本身（目录标记）不算作object
            Some(file) if file.path() == prefix => {}
            Some(file) => entries.push(file),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, prefix = %prefix, "skipped malformed entries in list response");
    }

    Ok(ListPage {
        entries,
        next_token,
        skipped,
    })
}

impl Client {
    pub fn list_objects_v2<'a>(&'a self, bucket: &'a str) -> ListObjectsV2Builder<'a> {
        ListObjectsV2::builder(self, bucket)
    }

    /// 列举bucket
    ///
    /// - `fetch_all`：为`false`时只返回第一页，为`true`时返回所有页
    pub fn list_bucket(
        &self,
        name: &str,
        prefix: &str,
        max_files: u32,
        fetch_all: bool,
    ) -> Result<Vec<S3File>, Error> {
        let req = self
            .list_objects_v2(name)
            .prefix(prefix)
            .max_keys(max_files)
            .build();
        if fetch_all {
            req.list_all()
        } else {
            Ok(req.list_page()?.entries)
        }
    }
}
