pub use cloud_front::function::CfnFunction;
use cloud_front::function::{FunctionConfig, FunctionConfigRuntimeEnum};

use super::*;
use crate::logical_id::physical_name;

/// function names are unique per account, and at most 64 characters.
pub const MAX_FUNCTION_NAME_LEN: usize = 64;

/// sets standard security headers on every response sent to viewers.
pub const SECURITY_HEADERS_CODE: &str = r#"function handler(event) {
    var response = event.response;
    var headers = response.headers;
    headers['strict-transport-security'] = { value: 'max-age=63072000; includeSubdomains; preload' };
    headers['x-content-type-options'] = { value: 'nosniff' };
    headers['x-frame-options'] = { value: 'DENY' };
    headers['x-xss-protection'] = { value: '1; mode=block' };
    headers['referrer-policy'] = { value: 'same-origin' };
    return response;
}
"#;

/// the name of a cloudfront function owned by a stack. Stack names can be
/// up to 128 characters, so long names are hashed rather than cut off.
pub fn cloudfront_function_name(stack_name: &str, logical_id: &str) -> String {
    physical_name(&[stack_name, logical_id], MAX_FUNCTION_NAME_LEN)
}

/// an auto published `cloudfront-js-1.0` function.
pub fn cloudfront_function(name: &str, comment: &str, code: &str) -> CfnFunction {
    CfnFunction {
        auto_publish: true.into(),
        function_code: StrVal::from(code).into(),
        function_config: FunctionConfig {
            comment: comment.into(),
            runtime: FunctionConfigRuntimeEnum::Cloudfrontjs10.into(),
            ..Default::default()
        },
        name: StrVal::from(name).into(),
        ..Default::default()
    }
}

/// the function used by static websites to set security headers
pub fn security_headers_function(name: &str) -> CfnFunction {
    cloudfront_function(name, "Adds security headers to every viewer response", SECURITY_HEADERS_CODE)
}
