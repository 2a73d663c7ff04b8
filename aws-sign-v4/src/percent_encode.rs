//! 签名用的百分号编码
//!
//! [`encode`]的输入是原始字节，不会识别已经转义过的序列，`%` 本身也会被编码。
//! [`canonical_query`]则会保留已有的`%XX`。
//! 输出的十六进制一律为大写，例如 `/` 在 query 中会变成 `%2F`。

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

/// query 允许的字符：unreserved + `=` `&`
///
/// 整个 query 字符串一次性编码，所以分隔符 `=` 和 `&` 需要保留。
const QUERY_ALLOWED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'=')
    .remove(b'&');

/// query 参数值允许的字符：只有 unreserved，`=` `&` `/` 都会被编码
const VALUE_ALLOWED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// path 允许的字符：unreserved + `/`
const PATH_ALLOWED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// 可以不编码直接通过的字符集合
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllowedSet {
    /// canonical query 使用
    Query,
    /// canonical path 使用，`/` 不会被编码
    Path,
    /// 单个query参数的名称或值
    Value,
}

impl AllowedSet {
    fn ascii_set(self) -> &'static AsciiSet {
        match self {
            AllowedSet::Query => QUERY_ALLOWED,
            AllowedSet::Path => PATH_ALLOWED,
            AllowedSet::Value => VALUE_ALLOWED,
        }
    }
}

/// 不在 `allowed` 中的字节编码为 `%XX`（大写十六进制）
pub fn encode(input: &[u8], allowed: AllowedSet) -> String {
    percent_encode(input, allowed.ascii_set()).to_string()
}

/// `encode(s.as_bytes(), AllowedSet::Query)`
pub fn encode_query(s: &str) -> String {
    encode(s.as_bytes(), AllowedSet::Query)
}

/// `encode(s.as_bytes(), AllowedSet::Path)`
pub fn encode_path(s: &str) -> String {
    encode(s.as_bytes(), AllowedSet::Path)
}

/// `encode(s.as_bytes(), AllowedSet::Value)`
///
/// 放入query之前先用它编码参数值，值中的`&`、`=`才不会被当成分隔符
pub fn encode_value(s: &str) -> String {
    encode(s.as_bytes(), AllowedSet::Value)
}

/// 把query转换为签名和发送请求时使用的形式
///
/// 按`&`拆分参数，每个参数在第一个`=`处拆分为名称和值，没有`=`的参数输出为`name=`。
/// 名称和值中已有的`%XX`原样保留（十六进制转为大写），其它不属于unreserved的字节都会编码，
/// 所以对结果再调用一次不会改变它。
/// 值中原本的`&`需要调用方先用[`encode_value`]编码。
pub fn canonical_query(query: &str) -> String {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            format!("{}={}", encode_component(k), encode_component(v))
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let escaped = bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if escaped {
            out.push('%');
            out.push(bytes[i + 1].to_ascii_uppercase() as char);
            out.push(bytes[i + 2].to_ascii_uppercase() as char);
            i += 3;
        } else {
            out.push_str(&encode(&bytes[i..i + 1], AllowedSet::Value));
            i += 1;
        }
    }
    out
}
