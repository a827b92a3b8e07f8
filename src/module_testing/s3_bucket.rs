#[cfg(test)]
mod tests {
    use cfn_resources::CfnResource;
    use serde_json::{json, Value};

    use crate::resources::*;

    #[test]
    fn private_bucket_blocks_everything() {
        let bucket = private_bucket();
        assert_eq!(bucket.type_string(), "AWS::S3::Bucket");
        let props = bucket.properties();
        assert_eq!(props["PublicAccessBlockConfiguration"], json!({
            "BlockPublicAcls": true,
            "BlockPublicPolicy": true,
            "IgnorePublicAcls": true,
            "RestrictPublicBuckets": true,
        }));
        assert!(props.get("WebsiteConfiguration").map_or(true, Value::is_null));
        assert!(props.get("LifecycleConfiguration").map_or(true, Value::is_null));
    }

    #[test]
    fn log_buckets_expire_objects() {
        let props = log_bucket(14).unwrap().properties();
        let rule = &props["LifecycleConfiguration"]["Rules"][0];
        assert_eq!(rule["ExpirationInDays"], 14);
        assert_eq!(rule["Status"], "Enabled");
        assert_eq!(props["OwnershipControls"]["Rules"][0]["ObjectOwnership"], "ObjectWriter");
        assert_eq!(props["PublicAccessBlockConfiguration"]["RestrictPublicBuckets"], true);

        assert_eq!(log_bucket(0).unwrap_err(), "Lifecycle rule expiration must be at least 1 day");
    }

    #[test]
    fn grant_read_covers_bucket_and_objects() {
        let policy = grant_read("Bucket", json!({ "AWS": "*" }));
        assert_eq!(policy.type_string(), "AWS::S3::BucketPolicy");
        let props = policy.properties();
        assert_eq!(props["Bucket"], json!({ "Ref": "Bucket" }));

        let document = serde_json::to_string(&props["PolicyDocument"]).unwrap();
        for action in READ_ACTIONS {
            assert!(document.contains(&format!("\"{action}\"")), "missing {action}");
        }
        assert!(document.contains(r#"{"AWS":"*"}"#));
        assert!(document.contains(r#"{"Fn::GetAtt":["Bucket","Arn"]}"#));
        assert!(document.contains(r#"{"Fn::Join":["",[{"Fn::GetAtt":["Bucket","Arn"]},"/*"]]}"#));
    }

    #[test]
    fn origin_access_identity_paths() {
        let oai = origin_access_identity(json!("a comment"));
        assert_eq!(oai.type_string(), "AWS::CloudFront::CloudFrontOriginAccessIdentity");
        assert_eq!(oai.properties()["CloudFrontOriginAccessIdentityConfig"]["Comment"], "a comment");
        assert_eq!(canonical_user_principal("Oai"), json!({
            "CanonicalUser": { "Fn::GetAtt": ["Oai", "S3CanonicalUserId"] }
        }));
        assert_eq!(origin_access_identity_path("Oai"), json!({
            "Fn::Join": ["", ["origin-access-identity/cloudfront/", { "Ref": "Oai" }]]
        }));
    }
}
