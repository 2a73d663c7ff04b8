use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// 请求参数
///
/// 输出时名称转为小写，并按小写后的名称排序，名称相同时按值排序，用`&`连接。
/// 值原样输出，不会进行编码，插入前需要调用方编码
/// （见[`encode_value`](aws_sign_v4::percent_encode::encode_value)）。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    elements: HashMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.elements.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.elements.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn alphabetize(&self) -> Vec<(&str, &str)> {
        let mut pairs = self
            .elements
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect::<Vec<_>>();
        // 小写相同的名称按值排序，再按原名称排序，保证输出和HashMap的遍历顺序无关
        pairs.sort_by(|(ka, va), (kb, vb)| {
            ka.to_lowercase()
                .cmp(&kb.to_lowercase())
                .then_with(|| va.cmp(vb))
                .then_with(|| ka.cmp(kb))
        });
        pairs
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (k, v)) in self.alphabetize().into_iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", k.to_lowercase(), v)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            elements: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
