use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// 列举bucket时返回的一个object
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3File {
    path: String,
    size: u64,
    #[serde(with = "time::serde::rfc3339")]
    last_modified: OffsetDateTime,
    #[serde(rename = "ETag")]
    e_tag: String,
}

impl S3File {
    /// object key
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn last_modified(&self) -> OffsetDateTime {
        self.last_modified
    }

    pub fn e_tag(&self) -> &str {
        &self.e_tag
    }

    /// 缺少字段或者字段无法解析时返回`None`
    pub(crate) fn from_content(content: Content) -> Option<Self> {
        let path = non_empty(content.key)?;
        let size = non_empty(content.size)?.trim().parse::<u64>().ok()?;
        // eg: 2009-10-12T17:50:30.000Z
        let last_modified =
            OffsetDateTime::parse(non_empty(content.last_modified)?.trim(), &Rfc3339).ok()?;
        let e_tag = non_empty(content.e_tag)?;

        Some(Self {
            path,
            size,
            last_modified,
            e_tag,
        })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// 一页列举结果
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListPage {
    /// 按xml中的顺序排列，不包含key与请求prefix相同的条目
    pub entries: Vec<S3File>,
    /// 只有`IsTruncated`为`true`且返回了token时才有值
    pub next_token: Option<String>,
    /// 因为缺少字段或者字段格式错误被跳过的条目数
    pub skipped: usize,
}

// ListObjectsV2返回的xml，只取用到的字段，全部使用字符串以便逐条容错
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListBucketResult {
    pub prefix: Option<String>,
    pub is_truncated: Option<String>,
    pub next_continuation_token: Option<String>,
    #[serde(default)]
    pub contents: Vec<Content>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Content {
    pub key: Option<String>,
    pub size: Option<String>,
    pub last_modified: Option<String>,
    pub e_tag: Option<String>,
}
