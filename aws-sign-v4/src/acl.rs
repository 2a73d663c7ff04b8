use std::fmt::{Display, Formatter};

/// Canned ACL
///
/// [Canned ACL](https://docs.aws.amazon.com/AmazonS3/latest/userguide/acl-overview.html#canned-acl)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessControlList {
    #[default]
    Private,
    PublicRead,
    PublicReadWrite,
    AwsExecRead,
    AuthenticatedRead,
    BucketOwnerRead,
    BucketOwnerFullControl,
    LogDeliveryWrite,
}

impl AccessControlList {
    /// `x-amz-acl` 中使用的值
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessControlList::Private => "private",
            AccessControlList::PublicRead => "public-read",
            AccessControlList::PublicReadWrite => "public-read-write",
            AccessControlList::AwsExecRead => "aws-exec-read",
            AccessControlList::AuthenticatedRead => "authenticated-read",
            AccessControlList::BucketOwnerRead => "bucket-owner-read",
            AccessControlList::BucketOwnerFullControl => "bucket-owner-full-control",
            AccessControlList::LogDeliveryWrite => "log-delivery-write",
        }
    }
}

impl Display for AccessControlList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
