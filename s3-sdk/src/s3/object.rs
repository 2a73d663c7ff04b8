//! Object的上传、下载
//!
//! [Operations on objects](https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations_Amazon_Simple_Storage_Service.html)

use super::Client;
use super::Error;
use super::utils::{
    get_content_md5, into_request_failed_error, into_success_body, normalize_path, send_signed,
};
use aws_sign_v4::{AccessControlList, HTTPVerb};
use bytes::Bytes;
use std::collections::BTreeMap;

impl Client {
    /// 上传object
    ///
    /// - `path`：`/bucket/key`形式，缺少开头的`/`时会自动补齐
    /// - `access`：暂未发送给服务端
    pub fn upload(&self, bytes: &[u8], path: &str, access: AccessControlList) -> Result<(), Error> {
        let path = normalize_path(path)?;
        // TODO: 将`access`作为`x-amz-acl`加入签名的header
        tracing::debug!(acl = %access, "access control list is not sent with uploads yet");

        let mut header = BTreeMap::new();
        header.insert("content-md5".to_owned(), get_content_md5(bytes));

        let resp = send_signed(self, HTTPVerb::Put, &path, None, Some(bytes), Some(&header))?;
        if !resp.status.is_success() {
            return Err(into_request_failed_error(resp));
        }
        Ok(())
    }

    /// 下载object
    pub fn get(&self, path: &str) -> Result<Bytes, Error> {
        let path = normalize_path(path)?;
        let resp = send_signed(self, HTTPVerb::Get, &path, None, None, None)?;
        into_success_body(resp)
    }

    /// 未实现，总是返回`Error::Unimplemented`，不会发送请求
    pub fn delete(&self, _path: &str) -> Result<(), Error> {
        Err(Error::Unimplemented)
    }
}
