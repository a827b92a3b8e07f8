//! the pieces of a distribution that constructs work with. They are rendered
//! into the `cloud_front::distribution` schema by `WebDistributionProps::build`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudFrontAllowedMethods {
    GetHead,
    GetHeadOptions,
}

impl CloudFrontAllowedMethods {
    pub fn methods(&self) -> &'static [&'static str] {
        match self {
            CloudFrontAllowedMethods::GetHead => &["GET", "HEAD"],
            CloudFrontAllowedMethods::GetHeadOptions => &["GET", "HEAD", "OPTIONS"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudFrontAllowedCachedMethods {
    GetHead,
    GetHeadOptions,
}

impl CloudFrontAllowedCachedMethods {
    pub fn methods(&self) -> &'static [&'static str] {
        match self {
            CloudFrontAllowedCachedMethods::GetHead => &["GET", "HEAD"],
            CloudFrontAllowedCachedMethods::GetHeadOptions => &["GET", "HEAD", "OPTIONS"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LambdaEdgeEventType {
    OriginRequest,
    OriginResponse,
    ViewerRequest,
    ViewerResponse,
}

/// cloudfront functions only run on viewer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionEventType {
    ViewerRequest,
    ViewerResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaFunctionAssociation {
    pub event_type: LambdaEdgeEventType,
    pub include_body: bool,
    /// logical id of an `AWS::Lambda::Version`
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionAssociation {
    pub event_type: FunctionEventType,
    /// logical id of an `AWS::CloudFront::Function`
    pub function: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomErrorResponse {
    pub error_code: u16,
    pub response_code: Option<u16>,
    pub response_page_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfiguration {
    /// logical id of the bucket the logs are written to
    pub bucket: String,
    pub include_cookies: bool,
    pub prefix: Option<String>,
}

/// custom domain names, and the ACM certificate that covers them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConfiguration {
    pub aliases: Vec<String>,
    pub acm_certificate_arn: String,
}
