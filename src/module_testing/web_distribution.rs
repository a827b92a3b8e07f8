#[cfg(test)]
mod tests {
    use cfn_resources::CfnResource;
    use serde_json::{json, Value};

    use crate::resources::*;

    fn source(behaviors: Vec<Behavior>) -> SourceConfiguration {
        SourceConfiguration {
            s3_origin_source: S3OriginSource {
                bucket: "Bucket".to_string(),
                origin_access_identity: "Oai".to_string(),
                origin_path: None,
            },
            behaviors,
        }
    }

    fn default_behavior() -> Behavior {
        Behavior { is_default_behavior: true, ..Default::default() }
    }

    fn config(props: &WebDistributionProps) -> Value {
        let distribution = props.build().unwrap();
        assert_eq!(distribution.type_string(), "AWS::CloudFront::Distribution");
        distribution.properties()["DistributionConfig"].clone()
    }

    fn absent(value: &Value, key: &str) -> bool {
        value.get(key).map_or(true, Value::is_null)
    }

    #[test]
    fn renders_origins_and_default_behavior() {
        let conf = config(&WebDistributionProps::new(vec![source(vec![default_behavior()])]));
        assert_eq!(conf["Enabled"], true);
        assert_eq!(conf["DefaultRootObject"], "index.html");
        assert_eq!(conf["HttpVersion"], "http2");
        assert_eq!(conf["ViewerCertificate"]["CloudFrontDefaultCertificate"], true);
        assert!(absent(&conf, "Aliases"));
        assert!(absent(&conf, "CacheBehaviors"));
        assert!(absent(&conf, "Logging"));

        let origins = conf["Origins"].as_array().unwrap();
        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0]["Id"], "origin1");
        assert_eq!(origins[0]["DomainName"], json!({ "Fn::GetAtt": ["Bucket", "RegionalDomainName"] }));
        assert_eq!(origins[0]["S3OriginConfig"]["OriginAccessIdentity"], json!({
            "Fn::Join": ["", ["origin-access-identity/cloudfront/", { "Ref": "Oai" }]]
        }));

        let default = &conf["DefaultCacheBehavior"];
        assert_eq!(default["AllowedMethods"], json!(["GET", "HEAD"]));
        assert_eq!(default["CachedMethods"], json!(["GET", "HEAD"]));
        assert_eq!(default["Compress"], true);
        assert_eq!(default["ForwardedValues"]["Cookies"]["Forward"], "none");
        assert_eq!(default["ForwardedValues"]["QueryString"], false);
        assert_eq!(default["TargetOriginId"], "origin1");
        assert_eq!(default["ViewerProtocolPolicy"], "redirect-to-https");
        assert!(absent(default, "PathPattern"));
    }

    #[test]
    fn requires_exactly_one_default_behavior() {
        let none = WebDistributionProps::new(vec![source(vec![Behavior {
            path_pattern: Some("/a".to_string()),
            ..Default::default()
        }])]);
        assert!(none.build().unwrap_err().contains("only be one default behavior"));

        let two = WebDistributionProps::new(vec![
            source(vec![default_behavior()]),
            source(vec![default_behavior()]),
        ]);
        assert!(two.build().unwrap_err().contains("only be one default behavior"));

        assert!(WebDistributionProps::new(vec![]).build().unwrap_err().contains("at least one origin"));
    }

    #[test]
    fn non_default_behaviors_need_a_path_pattern() {
        let props = WebDistributionProps::new(vec![source(vec![default_behavior(), Behavior::default()])]);
        assert_eq!(props.build().unwrap_err(), "pathPattern is required for all non-default behaviors");

        let patterned_default = Behavior { path_pattern: Some("/a".to_string()), ..default_behavior() };
        let props = WebDistributionProps::new(vec![source(vec![patterned_default])]);
        assert!(props.build().unwrap_err().contains("cannot have a path pattern"));

        let pattern = || Behavior { path_pattern: Some("/a".to_string()), ..Default::default() };
        let props = WebDistributionProps::new(vec![source(vec![default_behavior(), pattern(), pattern()])]);
        assert!(props.build().unwrap_err().contains("Duplicate path pattern /a"));
    }

    #[test]
    fn behaviors_target_their_own_origin() {
        let props = WebDistributionProps::new(vec![
            source(vec![Behavior { path_pattern: Some("/*.*".to_string()), ..Default::default() }]),
            source(vec![default_behavior()]),
        ]);
        let conf = config(&props);
        assert_eq!(conf["Origins"].as_array().unwrap().len(), 2);
        assert_eq!(conf["DefaultCacheBehavior"]["TargetOriginId"], "origin2");
        let behaviors = conf["CacheBehaviors"].as_array().unwrap();
        assert_eq!(behaviors.len(), 1);
        assert_eq!(behaviors[0]["TargetOriginId"], "origin1");
        assert_eq!(behaviors[0]["PathPattern"], "/*.*");
    }

    #[test]
    fn origin_paths_are_checked() {
        let mut with_path = source(vec![default_behavior()]);
        with_path.s3_origin_source.origin_path = Some("/site".to_string());
        let conf = config(&WebDistributionProps::new(vec![with_path.clone()]));
        assert_eq!(conf["Origins"][0]["OriginPath"], "/site");

        for path in ["site", "/site/"] {
            with_path.s3_origin_source.origin_path = Some(path.to_string());
            let err = WebDistributionProps::new(vec![with_path.clone()]).build().unwrap_err();
            assert!(err.contains("must start with '/'"), "{path} should fail");
        }
    }

    #[test]
    fn custom_certificates_need_aliases_and_an_arn() {
        let mut props = WebDistributionProps::new(vec![source(vec![default_behavior()])]);
        props.viewer_certificate = Some(AliasConfiguration {
            aliases: vec!["example.com".to_string()],
            acm_certificate_arn: "arn:aws:acm:us-east-1:123456789012:certificate/abc".to_string(),
        });
        let conf = config(&props);
        assert_eq!(conf["Aliases"], json!(["example.com"]));
        assert_eq!(conf["ViewerCertificate"]["SslSupportMethod"], "sni-only");
        assert!(absent(&conf["ViewerCertificate"], "CloudFrontDefaultCertificate"));

        let mut no_arn = props.clone();
        if let Some(conf) = &mut no_arn.viewer_certificate {
            conf.acm_certificate_arn = String::new();
        }
        assert_eq!(no_arn.build().unwrap_err(), "Viewer certificate ARN cannot be empty");

        let mut no_aliases = props;
        if let Some(conf) = &mut no_aliases.viewer_certificate {
            conf.aliases = vec![];
        }
        assert!(no_aliases.build().unwrap_err().contains("at least one non-empty alias"));
    }

    #[test]
    fn renders_every_association_event_type() {
        let lambda = |event_type| LambdaFunctionAssociation {
            event_type,
            include_body: false,
            version: "Version".to_string(),
        };
        let function = |event_type| FunctionAssociation { event_type, function: "Function".to_string() };
        let behavior = Behavior {
            lambda_function_associations: vec![
                lambda(LambdaEdgeEventType::OriginRequest),
                lambda(LambdaEdgeEventType::OriginResponse),
                lambda(LambdaEdgeEventType::ViewerRequest),
                lambda(LambdaEdgeEventType::ViewerResponse),
            ],
            function_associations: vec![
                function(FunctionEventType::ViewerRequest),
                function(FunctionEventType::ViewerResponse),
            ],
            ..default_behavior()
        };
        let conf = config(&WebDistributionProps::new(vec![source(vec![behavior])]));
        let default = &conf["DefaultCacheBehavior"];
        let event_types = |key: &str| -> Vec<Value> {
            default[key].as_array().unwrap().iter().map(|a| a["EventType"].clone()).collect()
        };
        assert_eq!(event_types("LambdaFunctionAssociations"), vec![
            json!("origin-request"), json!("origin-response"), json!("viewer-request"), json!("viewer-response"),
        ]);
        assert_eq!(event_types("FunctionAssociations"), vec![json!("viewer-request"), json!("viewer-response")]);
        assert_eq!(default["LambdaFunctionAssociations"][0]["LambdaFunctionARN"], json!({ "Ref": "Version" }));
        assert_eq!(default["FunctionAssociations"][0]["FunctionARN"], json!({ "Fn::GetAtt": ["Function", "FunctionARN"] }));
    }

    #[test]
    fn duplicate_edge_associations_are_rejected() {
        let association = LambdaFunctionAssociation {
            event_type: LambdaEdgeEventType::OriginRequest,
            include_body: false,
            version: "Version".to_string(),
        };
        let behavior = Behavior {
            lambda_function_associations: vec![association.clone(), association],
            ..default_behavior()
        };
        let err = WebDistributionProps::new(vec![source(vec![behavior])]).build().unwrap_err();
        assert!(err.contains("Only one lambda function"));

        let function = FunctionAssociation {
            event_type: FunctionEventType::ViewerResponse,
            function: "Function".to_string(),
        };
        let behavior = Behavior {
            function_associations: vec![function.clone(), function],
            ..default_behavior()
        };
        let err = WebDistributionProps::new(vec![source(vec![behavior])]).build().unwrap_err();
        assert!(err.contains("Only one cloudfront function"));
    }

    #[test]
    fn error_responses_must_be_errors() {
        let mut props = WebDistributionProps::new(vec![source(vec![default_behavior()])]);
        props.error_configurations = vec![CustomErrorResponse {
            error_code: 200,
            response_code: None,
            response_page_path: None,
        }];
        assert!(props.build().unwrap_err().contains("4xx or 5xx"));

        props.error_configurations = vec![CustomErrorResponse {
            error_code: 404,
            response_code: Some(200),
            response_page_path: Some("index.html".to_string()),
        }];
        assert!(props.build().unwrap_err().contains("must start with '/'"));
    }

    #[test]
    fn method_lists() {
        assert_eq!(CloudFrontAllowedMethods::GetHeadOptions.methods(), &["GET", "HEAD", "OPTIONS"]);
        assert_eq!(CloudFrontAllowedCachedMethods::GetHeadOptions.methods(), &["GET", "HEAD", "OPTIONS"]);
        let behavior = Behavior {
            cached_methods: CloudFrontAllowedCachedMethods::GetHeadOptions,
            allowed_methods: CloudFrontAllowedMethods::GetHeadOptions,
            ..default_behavior()
        };
        let conf = config(&WebDistributionProps::new(vec![source(vec![behavior])]));
        assert_eq!(conf["DefaultCacheBehavior"]["CachedMethods"], json!(["GET", "HEAD", "OPTIONS"]));
    }
}
