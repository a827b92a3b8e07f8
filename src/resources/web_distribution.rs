use std::collections::HashSet;
use std::hash::Hash;

pub use cloud_front::distribution::CfnDistribution;
use cloud_front::distribution as cf;

use super::*;

/// an S3 bucket origin that is read through an origin access identity.
/// Both fields are logical ids of resources in the same stack.
#[derive(Debug, Clone, PartialEq)]
pub struct S3OriginSource {
    pub bucket: String,
    pub origin_access_identity: String,
    pub origin_path: Option<String>,
}

/// how the distribution serves requests routed to an origin.
/// Cookies are never forwarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Behavior {
    pub allowed_methods: CloudFrontAllowedMethods,
    pub cached_methods: CloudFrontAllowedCachedMethods,
    pub compress: bool,
    /// exactly one behavior across all sources must be the default.
    pub is_default_behavior: bool,
    /// required for every behavior that is not the default.
    pub path_pattern: Option<String>,
    pub forward_query_string: bool,
    pub lambda_function_associations: Vec<LambdaFunctionAssociation>,
    pub function_associations: Vec<FunctionAssociation>,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            allowed_methods: CloudFrontAllowedMethods::GetHead,
            cached_methods: CloudFrontAllowedCachedMethods::GetHead,
            compress: true,
            is_default_behavior: false,
            path_pattern: None,
            forward_query_string: false,
            lambda_function_associations: vec![],
            function_associations: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfiguration {
    pub s3_origin_source: S3OriginSource,
    pub behaviors: Vec<Behavior>,
}

/// the mutable description of a distribution. Constructs adjust these
/// props, and `build` renders them into an `AWS::CloudFront::Distribution`.
/// Viewers are always redirected to https.
#[derive(Debug, Clone, PartialEq)]
pub struct WebDistributionProps {
    pub origin_configs: Vec<SourceConfiguration>,
    pub error_configurations: Vec<CustomErrorResponse>,
    pub logging_config: Option<LoggingConfiguration>,
    /// when unset, the distribution uses the cloudfront default certificate
    pub viewer_certificate: Option<AliasConfiguration>,
    pub default_root_object: Option<String>,
    pub enabled: bool,
}

impl WebDistributionProps {
    pub fn new(origin_configs: Vec<SourceConfiguration>) -> Self {
        Self {
            origin_configs,
            error_configurations: vec![],
            logging_config: None,
            viewer_certificate: None,
            default_root_object: Some("index.html".to_string()),
            enabled: true,
        }
    }

    pub fn behaviors_mut(&mut self) -> impl Iterator<Item = &mut Behavior> {
        self.origin_configs.iter_mut().flat_map(|c| c.behaviors.iter_mut())
    }

    /// checks the props and renders the distribution.
    pub fn build(&self) -> Result<CfnDistribution, String> {
        if self.origin_configs.is_empty() {
            return Err("Must provide at least one origin to cloudfront distribution".to_string());
        }

        let mut origins = vec![];
        let mut behaviors = vec![];
        for (i, origin_config) in self.origin_configs.iter().enumerate() {
            let source = &origin_config.s3_origin_source;
            if let Some(path) = &source.origin_path {
                if !path.starts_with('/') || path.ends_with('/') {
                    return Err(format!("Origin path {path} must start with '/' and cannot end with '/'"));
                }
            }
            let origin_id = format!("origin{}", i + 1);
            origins.push(cf::Origin {
                domain_name: StrVal::Val(get_att(&source.bucket, "RegionalDomainName")).into(),
                id: origin_id.clone().into(),
                origin_path: source.origin_path.clone().map(StrVal::from),
                s3_origin_config: Some(cf::S3OriginConfig {
                    origin_access_identity: StrVal::Val(origin_access_identity_path(&source.origin_access_identity)).into(),
                    ..Default::default()
                }),
                ..Default::default()
            });
            for behavior in origin_config.behaviors.iter() {
                check_behavior(behavior)?;
                behaviors.push((behavior, origin_id.clone()));
            }
        }

        let default_count = behaviors.iter().filter(|(b, _)| b.is_default_behavior).count();
        if default_count != 1 {
            return Err("There can only be one default behavior across all sources. [ One default behavior per distribution ].".to_string());
        }
        let mut default_cache_behavior = None;
        let mut cache_behaviors = vec![];
        let mut patterns = HashSet::new();
        for (behavior, origin_id) in behaviors {
            if behavior.is_default_behavior {
                if behavior.path_pattern.is_some() {
                    return Err("The default cache behavior cannot have a path pattern".to_string());
                }
                default_cache_behavior = Some(render_default_behavior(behavior, origin_id));
                continue;
            }
            let pattern = behavior.path_pattern.as_deref()
                .ok_or_else(|| "pathPattern is required for all non-default behaviors".to_string())?;
            if !patterns.insert(pattern) {
                return Err(format!("Duplicate path pattern {pattern}. All behavior path patterns must be unique"));
            }
            cache_behaviors.push(render_behavior(behavior, origin_id, pattern));
        }
        let default_cache_behavior = default_cache_behavior
            .ok_or_else(|| "Missing a default behavior".to_string())?;

        let mut custom_error_responses = vec![];
        for response in self.error_configurations.iter() {
            if !(400..600).contains(&response.error_code) {
                return Err(format!("Custom error response code {} must be a 4xx or 5xx status", response.error_code));
            }
            if response.response_page_path.as_deref().map_or(false, |p| !p.starts_with('/')) {
                return Err("Custom error response page path must start with '/'".to_string());
            }
            custom_error_responses.push(cf::CustomErrorResponse {
                error_code: response.error_code.into(),
                response_code: response.response_code.map(Into::into),
                response_page_path: response.response_page_path.clone().map(StrVal::from),
                ..Default::default()
            });
        }

        let (aliases, viewer_certificate) = match &self.viewer_certificate {
            Some(conf) => {
                if conf.aliases.is_empty() || conf.aliases.iter().any(|a| a.is_empty()) {
                    return Err("A custom viewer certificate needs at least one non-empty alias".to_string());
                }
                if conf.acm_certificate_arn.trim().is_empty() {
                    return Err("Viewer certificate ARN cannot be empty".to_string());
                }
                let certificate = cf::ViewerCertificate {
                    acm_certificate_arn: StrVal::from(conf.acm_certificate_arn.clone()).into(),
                    minimum_protocol_version: cf::ViewerCertificateMinimumProtocolVersionEnum::Tlsv122021.into(),
                    ssl_support_method: cf::ViewerCertificateSslSupportMethodEnum::Snionly.into(),
                    ..Default::default()
                };
                (Some(conf.aliases.iter().cloned().map(Into::into).collect()), certificate)
            }
            None => {
                let certificate = cf::ViewerCertificate {
                    cloud_front_default_certificate: true.into(),
                    ..Default::default()
                };
                (None, certificate)
            }
        };

        let logging = self.logging_config.as_ref().map(|l| cf::Logging {
            bucket: StrVal::Val(get_att(&l.bucket, "RegionalDomainName")).into(),
            include_cookies: l.include_cookies.into(),
            prefix: l.prefix.clone().map(StrVal::from),
            ..Default::default()
        });

        Ok(CfnDistribution {
            distribution_config: cf::DistributionConfig {
                aliases,
                cache_behaviors: non_empty(cache_behaviors),
                custom_error_responses: non_empty(custom_error_responses),
                default_cache_behavior,
                default_root_object: self.default_root_object.clone().map(StrVal::from),
                enabled: self.enabled.into(),
                http_version: cf::DistributionConfigHttpVersionEnum::Http2.into(),
                logging,
                origins: Some(origins),
                viewer_certificate: Some(viewer_certificate),
                ..Default::default()
            },
            ..Default::default()
        })
    }
}

fn check_behavior(behavior: &Behavior) -> Result<(), String> {
    if let Some(event) = first_duplicate(behavior.lambda_function_associations.iter().map(|a| a.event_type)) {
        return Err(format!("Only one lambda function can be associated per event type. Found duplicate {event:?}"));
    }
    if let Some(event) = first_duplicate(behavior.function_associations.iter().map(|a| a.event_type)) {
        return Err(format!("Only one cloudfront function can be associated per event type. Found duplicate {event:?}"));
    }
    Ok(())
}

fn first_duplicate<T: Eq + Hash>(items: impl Iterator<Item = T>) -> Option<T> {
    let mut seen = HashSet::new();
    for item in items {
        if seen.contains(&item) {
            return Some(item);
        }
        seen.insert(item);
    }
    None
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

fn method_list<T: From<&'static str>>(methods: &'static [&'static str]) -> Vec<T> {
    methods.iter().map(|m| T::from(*m)).collect()
}

fn forwarded_values(query_string: bool) -> cf::ForwardedValues {
    cf::ForwardedValues {
        cookies: Some(cf::Cookies {
            forward: cf::CookiesForwardEnum::None.into(),
            ..Default::default()
        }),
        query_string: query_string.into(),
        ..Default::default()
    }
}

fn lambda_associations(behavior: &Behavior) -> Option<Vec<cf::LambdaFunctionAssociation>> {
    let associations = behavior.lambda_function_associations.iter().map(|a| {
        let event_type = match a.event_type {
            LambdaEdgeEventType::OriginRequest => cf::LambdaFunctionAssociationEventTypeEnum::Originrequest,
            LambdaEdgeEventType::OriginResponse => cf::LambdaFunctionAssociationEventTypeEnum::Originresponse,
            LambdaEdgeEventType::ViewerRequest => cf::LambdaFunctionAssociationEventTypeEnum::Viewerrequest,
            LambdaEdgeEventType::ViewerResponse => cf::LambdaFunctionAssociationEventTypeEnum::Viewerresponse,
        };
        cf::LambdaFunctionAssociation {
            event_type: event_type.into(),
            include_body: a.include_body.then_some(true),
            lambda_function_arn: StrVal::Val(get_ref(&a.version)).into(),
            ..Default::default()
        }
    });
    non_empty(associations.collect())
}

fn function_associations(behavior: &Behavior) -> Option<Vec<cf::FunctionAssociation>> {
    let associations = behavior.function_associations.iter().map(|a| {
        let event_type = match a.event_type {
            FunctionEventType::ViewerRequest => cf::FunctionAssociationEventTypeEnum::Viewerrequest,
            FunctionEventType::ViewerResponse => cf::FunctionAssociationEventTypeEnum::Viewerresponse,
        };
        cf::FunctionAssociation {
            event_type: event_type.into(),
            function_arn: StrVal::Val(get_att(&a.function, "FunctionARN")).into(),
            ..Default::default()
        }
    });
    non_empty(associations.collect())
}

fn render_default_behavior(behavior: &Behavior, target_origin_id: String) -> cf::DefaultCacheBehavior {
    cf::DefaultCacheBehavior {
        allowed_methods: Some(method_list(behavior.allowed_methods.methods())),
        cached_methods: Some(method_list(behavior.cached_methods.methods())),
        compress: behavior.compress.into(),
        forwarded_values: Some(forwarded_values(behavior.forward_query_string)),
        function_associations: function_associations(behavior),
        lambda_function_associations: lambda_associations(behavior),
        target_origin_id: target_origin_id.into(),
        viewer_protocol_policy: cf::DefaultCacheBehaviorViewerProtocolPolicyEnum::Redirecttohttps.into(),
        ..Default::default()
    }
}

fn render_behavior(behavior: &Behavior, target_origin_id: String, path_pattern: &str) -> cf::CacheBehavior {
    cf::CacheBehavior {
        allowed_methods: Some(method_list(behavior.allowed_methods.methods())),
        cached_methods: Some(method_list(behavior.cached_methods.methods())),
        compress: behavior.compress.into(),
        forwarded_values: Some(forwarded_values(behavior.forward_query_string)),
        function_associations: function_associations(behavior),
        lambda_function_associations: lambda_associations(behavior),
        path_pattern: path_pattern.into(),
        target_origin_id: target_origin_id.into(),
        viewer_protocol_policy: cf::CacheBehaviorViewerProtocolPolicyEnum::Redirecttohttps.into(),
        ..Default::default()
    }
}
