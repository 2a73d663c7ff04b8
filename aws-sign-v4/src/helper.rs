use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use time::macros::format_description;

/// 空字符串的 sha256，GET/DELETE 等没有 body 的请求使用
pub const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// 小写十六进制的 sha256，`None` 视为空 body
pub fn hash_sha256(bytes: Option<&[u8]>) -> String {
    match bytes {
        Some(b) => hex::encode(Sha256::digest(b)),
        None => EMPTY_SHA256.to_owned(),
    }
}

pub fn sign_hmac_sha256_byte(secret: &[u8], str_to_sign: &[u8]) -> Vec<u8> {
    type HmacSha256 = Hmac<Sha256>;
    // HMAC 可以接受任意长度的 key
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(str_to_sign);
    mac.finalize().into_bytes().to_vec()
}

/// 输出格式: YYYYMMDD
///
/// eg: 20130524
pub fn date_stamp(date_time: &OffsetDateTime) -> String {
    date_time
        .format(&format_description!("[year][month][day]"))
        .expect("date components are always formattable")
}

/// ISO 8601 basic 格式，`x-amz-date` 使用
///
/// eg: 20130524T000000Z
pub fn amz_date(date_time: &OffsetDateTime) -> String {
    date_time
        .format(&format_description!(
            "[year][month][day]T[hour][minute][second]Z"
        ))
        .expect("date components are always formattable")
}
