use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::*;
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::logical_id::{logical_id, validate_construct_id};
use crate::template::Stack;

pub const DEFAULT_LOG_EXPIRATION: Duration = Duration::days(14);
pub const LOG_PREFIX: &str = "website";
/// once an edge handler takes over the default behavior, requests for
/// files with an extension are still served directly from the bucket.
pub const STATIC_ASSETS_PATH_PATTERN: &str = "/*.*";

/// optional inputs to a `Website`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebsiteProps {
    /// a custom domain for the distribution. Only applied when
    /// `certificate_arn` is also provided.
    pub domain_name: Option<String>,
    /// ARN of an ACM certificate in us-east-1 that covers `domain_name`.
    pub certificate_arn: Option<String>,
    /// how long access logs are retained. Defaults to 14 days.
    pub log_expiration: Option<Duration>,
    /// an edge function invoked on origin requests. When provided, it
    /// becomes the default behavior of the distribution.
    pub origin_request_handler: Option<EdgeHandler>,
    /// attach a cloudfront function that sets security headers on responses.
    pub security_headers: bool,
}

impl Default for WebsiteProps {
    fn default() -> Self {
        Self {
            domain_name: None,
            certificate_arn: None,
            log_expiration: None,
            origin_request_handler: None,
            security_headers: true,
        }
    }
}

/// a private S3 bucket served through a cloudfront distribution.
/// Every field is the logical id of a resource this website created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Website {
    pub id: String,
    pub bucket: String,
    pub bucket_policy: String,
    pub origin_access_identity: String,
    pub logging_bucket: String,
    pub distribution: String,
    pub origin_handler_version: Option<String>,
    pub security_headers_function: Option<String>,
}

/// the names of the outputs `Website::export_outputs` added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteOutputs {
    pub distribution_domain_name: String,
    pub distribution_id: String,
    pub assets_bucket_name: String,
}

impl Website {
    /// adds the website's resources to `stack`. Every input is checked
    /// before the first resource is added, so an error leaves `stack` as it was.
    pub fn new(stack: &mut Stack, id: &str, props: &WebsiteProps) -> Result<Self> {
        validate_construct_id(id)?;
        let bucket_construct = format!("{id}-assets-bucket");
        let mut website = Website {
            id: id.to_string(),
            bucket: logical_id(&[id, &bucket_construct, "Resource"])?,
            bucket_policy: logical_id(&[id, &bucket_construct, "Policy", "Resource"])?,
            origin_access_identity: logical_id(&[id, &format!("{id}-oai"), "Resource"])?,
            logging_bucket: logical_id(&[id, &format!("{id}-logging-bucket"), "Resource"])?,
            distribution: logical_id(&[id, &format!("{id}-distribution"), "CFDistribution"])?,
            origin_handler_version: None,
            security_headers_function: None,
        };
        let log_expiration_days = props.log_expiration.unwrap_or(DEFAULT_LOG_EXPIRATION).to_days()?;
        let custom_domain = custom_domain(id, props)?;
        let handler = match &props.origin_request_handler {
            Some(handler) => Some((handler, handler.function_name()?)),
            None => None,
        };

        let mut resources = vec![];
        resources.push(Resource::new(&website.bucket, private_bucket()).with_removal_policy(RemovalPolicy::Delete));

        let comment = join("", [Value::from("OAI for "), get_ref(&website.bucket), Value::from(" website")]);
        resources.push(Resource::new(&website.origin_access_identity, origin_access_identity(comment)));

        let policy = grant_read(&website.bucket, canonical_user_principal(&website.origin_access_identity));
        resources.push(Resource::new(&website.bucket_policy, policy));

        let logging_bucket = log_bucket(log_expiration_days).map_err(|reason| Error::Validation {
            logical_id: website.logging_bucket.clone(),
            reason,
        })?;
        resources.push(Resource::new(&website.logging_bucket, logging_bucket).with_removal_policy(RemovalPolicy::Retain));

        let mut distro_props = WebDistributionProps::new(vec![SourceConfiguration {
            s3_origin_source: website.s3_origin_source(),
            // serve static assets directly from s3
            behaviors: vec![Behavior {
                is_default_behavior: true,
                ..Default::default()
            }],
        }]);
        distro_props.error_configurations = vec![CustomErrorResponse {
            error_code: 404,
            response_code: Some(200),
            response_page_path: Some("/index.html".to_string()),
        }];
        distro_props.logging_config = Some(LoggingConfiguration {
            bucket: website.logging_bucket.clone(),
            include_cookies: false,
            prefix: Some(LOG_PREFIX.to_string()),
        });

        if let Some((domain_name, certificate_arn)) = custom_domain {
            distro_props.viewer_certificate = Some(AliasConfiguration {
                aliases: vec![domain_name],
                acm_certificate_arn: certificate_arn,
            });
        }

        if let Some((handler, function_name)) = handler {
            distro_props = website.add_origin_request_handler(&mut resources, distro_props, handler, function_name)?;
        }

        if props.security_headers {
            distro_props = website.add_security_headers(stack.name(), &mut resources, distro_props)?;
        }

        let distribution = distro_props.build().map_err(|reason| Error::Validation {
            logical_id: website.distribution.clone(),
            reason,
        })?;
        resources.push(Resource::new(&website.distribution, distribution));

        if let Some(taken) = resources.iter().find(|r| stack.contains(&r.name)) {
            return Err(Error::DuplicateLogicalId(taken.name.clone()));
        }
        for resource in resources {
            stack.add_resource(resource);
        }
        info!(
            website = id,
            custom_domain = distro_props.viewer_certificate.is_some(),
            edge_handler = website.origin_handler_version.is_some(),
            log_expiration_days,
            "created static website"
        );
        Ok(website)
    }

    fn s3_origin_source(&self) -> S3OriginSource {
        S3OriginSource {
            bucket: self.bucket.clone(),
            origin_access_identity: self.origin_access_identity.clone(),
            origin_path: None,
        }
    }

    fn add_origin_request_handler(
        &mut self,
        resources: &mut Vec<Resource>,
        mut props: WebDistributionProps,
        handler: &EdgeHandler,
        function_name: StrVal,
    ) -> Result<WebDistributionProps> {
        let version_id = logical_id(&[&self.id, "OriginHandlerVersion", "Resource"])?;
        let version = edge_handler_version(&format!("Origin request handler for {}", self.id), function_name);
        resources.push(Resource::new(&version_id, version));

        // the handler takes over the default behavior. static assets keep
        // being served from s3 under their own path pattern.
        for behavior in props.behaviors_mut() {
            if behavior.is_default_behavior {
                behavior.is_default_behavior = false;
                behavior.path_pattern = Some(STATIC_ASSETS_PATH_PATTERN.to_string());
            }
        }
        props.origin_configs.push(SourceConfiguration {
            // serve ssr paths to lambda@edge
            s3_origin_source: self.s3_origin_source(),
            behaviors: vec![Behavior {
                allowed_methods: CloudFrontAllowedMethods::GetHeadOptions,
                cached_methods: CloudFrontAllowedCachedMethods::GetHead,
                compress: true,
                is_default_behavior: true,
                path_pattern: None,
                forward_query_string: true,
                lambda_function_associations: vec![LambdaFunctionAssociation {
                    event_type: LambdaEdgeEventType::OriginRequest,
                    include_body: handler.include_body,
                    version: version_id.clone(),
                }],
                function_associations: vec![],
            }],
        });
        debug!(website = %self.id, version = %version_id, "attached origin request handler");
        self.origin_handler_version = Some(version_id);
        Ok(props)
    }

    fn add_security_headers(
        &mut self,
        stack_name: &str,
        resources: &mut Vec<Resource>,
        mut props: WebDistributionProps,
    ) -> Result<WebDistributionProps> {
        let function_id = logical_id(&[&self.id, "AddRespSecurityHeaders", "Resource"])?;
        let function = security_headers_function(&cloudfront_function_name(stack_name, &function_id));
        resources.push(Resource::new(&function_id, function));

        for behavior in props.behaviors_mut() {
            behavior.function_associations.push(FunctionAssociation {
                event_type: FunctionEventType::ViewerResponse,
                function: function_id.clone(),
            });
        }
        self.security_headers_function = Some(function_id);
        Ok(props)
    }

    pub fn distribution_domain_name(&self) -> Value {
        get_att(&self.distribution, "DomainName")
    }

    /// exports the values needed to upload content and point DNS at the website.
    /// Output names are hashed like logical ids, so ids that only differ in
    /// punctuation, eg: `my-site` and `mysite`, get distinct outputs.
    pub fn export_outputs(&self, stack: &mut Stack) -> Result<WebsiteOutputs> {
        let outputs = WebsiteOutputs {
            distribution_domain_name: logical_id(&[&self.id, "DistributionDomainName"])?,
            distribution_id: logical_id(&[&self.id, "DistributionId"])?,
            assets_bucket_name: logical_id(&[&self.id, "AssetsBucketName"])?,
        };
        stack.add_output(
            &outputs.distribution_domain_name,
            format!("Domain name of the {} distribution", self.id),
            self.distribution_domain_name(),
        );
        stack.add_output(
            &outputs.distribution_id,
            format!("Id of the {} distribution", self.id),
            get_ref(&self.distribution),
        );
        stack.add_output(
            &outputs.assets_bucket_name,
            format!("Bucket holding the {} assets", self.id),
            get_ref(&self.bucket),
        );
        Ok(outputs)
    }
}

/// the domain and certificate to attach, when both are given.
fn custom_domain(id: &str, props: &WebsiteProps) -> Result<Option<(String, String)>> {
    if let Some(arn) = &props.certificate_arn {
        if arn.trim().is_empty() {
            return Err(Error::InvalidCertificateArn(arn.clone()));
        }
    }
    match (&props.domain_name, &props.certificate_arn) {
        (Some(domain_name), Some(certificate_arn)) => {
            validate_domain_name(domain_name)?;
            if !looks_like_edge_certificate(certificate_arn) {
                warn!(certificate_arn = %certificate_arn, "cloudfront only accepts ACM certificates from us-east-1");
            }
            Ok(Some((domain_name.clone(), certificate_arn.clone())))
        }
        (Some(_), None) => {
            warn!(website = id, "domain_name was provided without certificate_arn. The distribution will only be reachable on its cloudfront domain");
            Ok(None)
        }
        (None, Some(_)) => {
            warn!(website = id, "certificate_arn was provided without domain_name. The certificate will not be used");
            Ok(None)
        }
        (None, None) => Ok(None),
    }
}

/// arn:aws:acm:us-east-1:123456789012:certificate/...
fn looks_like_edge_certificate(arn: &str) -> bool {
    let parts: Vec<&str> = arn.splitn(6, ':').collect();
    parts.len() == 6 && parts[2] == "acm" && parts[3] == EDGE_REGION && parts[5].starts_with("certificate/")
}

fn validate_domain_name(domain_name: &str) -> Result<()> {
    let invalid = |reason| Err(Error::InvalidDomainName {
        name: domain_name.to_string(),
        reason,
    });
    if domain_name.is_empty() {
        return invalid("Must not be empty");
    }
    if domain_name.ends_with('.') {
        return invalid("Must not end with '.'");
    }
    if domain_name.contains('*') {
        if domain_name.matches('*').count() > 1 {
            return invalid("Must only contain 1 wildcard");
        }
        if !domain_name.starts_with("*.") {
            return invalid("If using a wildcard, it must be the first component of your domain, eg: \"*.something.com\"");
        }
    }
    let labels_ok = domain_name
        .trim_start_matches("*.")
        .split('.')
        .all(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    if !labels_ok {
        return invalid("Each label must be non-empty and only contain alphanumerics and '-'");
    }
    Ok(())
}
