//! 地域
//!
//! [Regions and endpoints](https://docs.aws.amazon.com/general/latest/gr/s3.html)

use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    UsEast1,
    UsEast2,
    UsWest1,
    UsWest2,
    CaCentral1,
    EuWest1,
    EuWest2,
    EuWest3,
    EuCentral1,
    EuNorth1,
    ApSouth1,
    ApSoutheast1,
    ApSoutheast2,
    ApNortheast1,
    ApNortheast2,
    ApNortheast3,
    ApEast1,
    SaEast1,
    CnNorth1,
    CnNorthwest1,
    /// S3兼容服务（minio 等）的自定义地域
    Custom(String),
}

static KNOWN: [(Region, &str); 20] = [
    (Region::UsEast1, "us-east-1"),
    (Region::UsEast2, "us-east-2"),
    (Region::UsWest1, "us-west-1"),
    (Region::UsWest2, "us-west-2"),
    (Region::CaCentral1, "ca-central-1"),
    (Region::EuWest1, "eu-west-1"),
    (Region::EuWest2, "eu-west-2"),
    (Region::EuWest3, "eu-west-3"),
    (Region::EuCentral1, "eu-central-1"),
    (Region::EuNorth1, "eu-north-1"),
    (Region::ApSouth1, "ap-south-1"),
    (Region::ApSoutheast1, "ap-southeast-1"),
    (Region::ApSoutheast2, "ap-southeast-2"),
    (Region::ApNortheast1, "ap-northeast-1"),
    (Region::ApNortheast2, "ap-northeast-2"),
    (Region::ApNortheast3, "ap-northeast-3"),
    (Region::ApEast1, "ap-east-1"),
    (Region::SaEast1, "sa-east-1"),
    (Region::CnNorth1, "cn-north-1"),
    (Region::CnNorthwest1, "cn-northwest-1"),
];

impl Region {
    /// 签名和 credential scope 中使用的地域标识
    pub fn as_str(&self) -> &str {
        if let Region::Custom(s) = self {
            return s;
        }
        KNOWN
            .iter()
            .find(|(r, _)| r == self)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid region: {0:?}")]
pub struct ParseRegionError(String);

impl FromStr for Region {
    type Err = ParseRegionError;

    /// 未知的地域标识解析为`Region::Custom`，只有空字符串会失败
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseRegionError(s.to_owned()));
        }
        let region = KNOWN
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
            .map(|(r, _)| r.clone())
            .unwrap_or_else(|| Region::Custom(s.to_owned()));
        Ok(region)
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.as_str().to_owned()
    }
}

#[test]
fn region_round_trip_test() {
    for (region, name) in KNOWN.iter() {
        assert_eq!(region.as_str(), *name);
        assert_eq!(&name.parse::<Region>().unwrap(), region);
    }
    assert_eq!(
        "minio-local".parse::<Region>().unwrap(),
        Region::Custom("minio-local".to_owned())
    );
    assert_eq!(Region::Custom("x".to_owned()).to_string(), "x");
    assert!("  ".parse::<Region>().is_err());
}
