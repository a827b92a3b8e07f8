use cfn_resources::create_policy_doc;
use serde_json::Value;

pub use s3::bucket::CfnBucket;
pub use s3::bucket_policy::CfnBucketPolicy;
use s3::bucket::{
    LifecycleConfiguration, OwnershipControls, OwnershipControlsRule,
    OwnershipControlsRuleObjectOwnershipEnum, PublicAccessBlockConfiguration, Rule, RuleStatusEnum,
};

use super::*;

/// actions granted by `grant_read`.
pub const READ_ACTIONS: &[&str] = &["s3:GetObject*", "s3:GetBucket*", "s3:List*"];

/// a bucket that can never be made public. We never set a bucket name, and
/// instead let cloudformation create one based on the logical resource name.
pub fn private_bucket() -> CfnBucket {
    CfnBucket {
        public_access_block_configuration: Some(PublicAccessBlockConfiguration {
            block_public_acls: true.into(),
            block_public_policy: true.into(),
            ignore_public_acls: true.into(),
            restrict_public_buckets: true.into(),
        }),
        ..Default::default()
    }
}

/// a private bucket for access logs. Every object expires after
/// `expiration_days`, and the writer owns the objects it puts, which
/// cloudfront's ACL based log delivery needs.
pub fn log_bucket(expiration_days: u32) -> Result<CfnBucket, String> {
    if expiration_days == 0 {
        return Err("Lifecycle rule expiration must be at least 1 day".to_string());
    }
    let expiration_in_days = expiration_days.try_into()
        .map_err(|_| format!("Lifecycle rule expiration of {expiration_days} days is too long"))?;
    let rule = Rule {
        expiration_in_days: Some(expiration_in_days),
        status: RuleStatusEnum::Enabled.into(),
        ..Default::default()
    };
    let ownership = OwnershipControlsRule {
        object_ownership: OwnershipControlsRuleObjectOwnershipEnum::Objectwriter.into(),
        ..Default::default()
    };
    Ok(CfnBucket {
        lifecycle_configuration: Some(LifecycleConfiguration {
            rules: vec![rule],
            ..Default::default()
        }),
        ownership_controls: Some(OwnershipControls {
            rules: vec![ownership],
            ..Default::default()
        }),
        ..private_bucket()
    })
}

/// a bucket policy that lets `principal` read every object in the bucket,
/// as well as list the bucket itself.
pub fn grant_read(bucket_logical_id: &str, principal: Value) -> CfnBucketPolicy {
    let bucket_arn = get_att(bucket_logical_id, "Arn");
    let objects_arn = join("", [bucket_arn.clone(), Value::from("/*")]);
    let resources = StrVal::Val(Value::Array(vec![bucket_arn, objects_arn]));
    let statements: Vec<(String, String, StrVal, StrVal)> = READ_ACTIONS.iter()
        .map(|action| ("Allow".to_string(), action.to_string(), resources.clone(), StrVal::Val(principal.clone())))
        .collect();
    CfnBucketPolicy {
        bucket: StrVal::Val(get_ref(bucket_logical_id)),
        policy_document: create_policy_doc(&statements),
    }
}
