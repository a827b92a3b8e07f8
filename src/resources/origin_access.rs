use serde_json::{json, Value};

pub use cloud_front::cloud_front_origin_access_identity::CfnCloudFrontOriginAccessIdentity;
use cloud_front::cloud_front_origin_access_identity::CloudFrontOriginAccessIdentityConfig;

use super::*;

/// the identity cloudfront uses to read from a private bucket.
pub fn origin_access_identity(comment: Value) -> CfnCloudFrontOriginAccessIdentity {
    CfnCloudFrontOriginAccessIdentity {
        cloud_front_origin_access_identity_config: CloudFrontOriginAccessIdentityConfig {
            comment: StrVal::Val(comment),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// the bucket policy principal for an origin access identity.
pub fn canonical_user_principal(oai_logical_id: &str) -> Value {
    json!({ "CanonicalUser": get_att(oai_logical_id, "S3CanonicalUserId") })
}

/// the value an S3 origin expects in `S3OriginConfig.OriginAccessIdentity`
pub fn origin_access_identity_path(oai_logical_id: &str) -> Value {
    join("", [Value::from("origin-access-identity/cloudfront/"), get_ref(oai_logical_id)])
}
