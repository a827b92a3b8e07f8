use serde::Deserialize;

pub use lambda::version::CfnVersion;

use super::*;
use crate::error::{Error, Result};

/// lambda@edge functions can only be created in this region.
pub const EDGE_REGION: &str = "us-east-1";

/// the function an edge handler points to. Either a function
/// defined elsewhere in the same stack, or an existing function's ARN.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeFunctionRef {
    Arn(String),
    LogicalId(String),
}

/// an externally supplied compute unit that the distribution invokes.
/// the handler is never inspected, only referenced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeHandler {
    pub function: EdgeFunctionRef,
    /// expose the request body to the handler.
    #[serde(default)]
    pub include_body: bool,
}

impl EdgeHandler {
    pub fn from_arn(arn: impl Into<String>) -> Self {
        Self {
            function: EdgeFunctionRef::Arn(arn.into()),
            include_body: false,
        }
    }

    pub fn from_logical_id(logical_id: impl Into<String>) -> Self {
        Self {
            function: EdgeFunctionRef::LogicalId(logical_id.into()),
            include_body: false,
        }
    }

    /// `FunctionName` for the version we publish of this handler.
    pub fn function_name(&self) -> Result<StrVal> {
        match &self.function {
            EdgeFunctionRef::Arn(arn) => {
                validate_edge_function_arn(arn)?;
                Ok(StrVal::from(arn.clone()))
            }
            EdgeFunctionRef::LogicalId(id) => {
                if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(Error::InvalidEdgeHandler(format!("'{id}' is not a valid logical id. Logical ids must be alphanumeric")));
                }
                Ok(StrVal::Val(get_ref(id)))
            }
        }
    }
}

/// arn:aws:lambda:us-east-1:123456789012:function:my-function
/// the arn must be unqualified, since we publish our own version of it.
fn validate_edge_function_arn(arn: &str) -> Result<()> {
    let parts: Vec<&str> = arn.split(':').collect();
    let invalid = |reason: &str| Err(Error::InvalidEdgeHandler(format!("{arn} {reason}")));
    if parts.len() < 7 || parts[0] != "arn" || parts[2] != "lambda" || parts[5] != "function" || parts[6].is_empty() {
        return invalid("is not a lambda function ARN");
    }
    if parts.len() > 7 {
        return invalid("must be an unqualified function ARN (without a version or alias)");
    }
    if parts[3] != EDGE_REGION {
        return invalid("must be in us-east-1 to be used as a lambda@edge handler");
    }
    Ok(())
}

/// the version published for an edge handler. Edge associations
/// must reference a published version, never `$LATEST`.
pub fn edge_handler_version(description: &str, function_name: StrVal) -> CfnVersion {
    CfnVersion {
        description: Some(description.into()),
        function_name,
        ..Default::default()
    }
}
