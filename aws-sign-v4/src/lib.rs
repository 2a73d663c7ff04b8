//! AWS Signature Version 4 请求签名
//!
//! 提供 s3-sdk 使用的签名、百分号编码以及地域、ACL 等公共类型。

mod acl;
pub mod helper;
pub mod percent_encode;
mod region;
mod sign_v4;

pub use acl::AccessControlList;
pub use region::{ParseRegionError, Region};
pub use sign_v4::{
    ALGORITHM, AUTHORIZATION, HOST, HTTPVerb, SignV4Param, SignatureV4, X_AMZ_CONTENT_SHA256,
    X_AMZ_DATE,
};
