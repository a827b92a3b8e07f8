use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use cfn_resources::CfnResource;

use crate::error::{Error, Result};
use crate::intrinsics::referenced_ids;

pub const TEMPLATE_VERSION: &str = "2010-09-09";
const MAX_STACK_NAME_LEN: usize = 128;
const STACK_NAME_RESTRICTION: &str = "Must only consist of alphanumeric characters and hyphens, Must start with an alphabetical character, and cannot be longer than 128 characters.";

/// what happens to the physical resource when it is removed
/// from the stack, or replaced during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalPolicy {
    Delete,
    Retain,
    Snapshot,
}

pub struct Resource {
    pub name: String,
    pub properties: Box<dyn CfnResource>,
    pub removal_policy: Option<RemovalPolicy>,
}

impl Resource {
    pub fn new<R: CfnResource + 'static>(name: impl Into<String>, properties: R) -> Self {
        Self {
            name: name.into(),
            properties: Box::new(properties) as _,
            removal_policy: None,
        }
    }

    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = Some(policy);
        self
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResource {
    #[serde(rename = "Type")]
    pub ty: String,
    #[serde(rename = "Properties")]
    pub properties: Value,
    #[serde(rename = "DeletionPolicy", skip_serializing_if = "Option::is_none", default)]
    pub deletion_policy: Option<RemovalPolicy>,
    #[serde(rename = "UpdateReplacePolicy", skip_serializing_if = "Option::is_none", default)]
    pub update_replace_policy: Option<RemovalPolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceOutput {
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Value")]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTemplate {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub version: String,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, SavedResource>,
    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty", default)]
    pub outputs: BTreeMap<String, ResourceOutput>,
}

impl Default for SavedTemplate {
    fn default() -> Self {
        Self {
            version: TEMPLATE_VERSION.to_string(),
            description: None,
            resources: Default::default(),
            outputs: Default::default(),
        }
    }
}

impl SavedTemplate {
    /// every resource in the template of the given type,
    /// eg: `AWS::S3::Bucket`
    pub fn resources_of_type<'a>(&'a self, ty: &'a str) -> impl Iterator<Item = (&'a String, &'a SavedResource)> + 'a {
        self.resources.iter().filter(move |(_, r)| r.ty == ty)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

pub struct Stack {
    name: String,
    pub description: Option<String>,
    resources: Vec<Resource>,
    outputs: Vec<(String, ResourceOutput)>,
}

impl Stack {
    pub fn new(name: &str) -> Result<Self> {
        let name = validate_stack_name(name)?;
        Ok(Self {
            name,
            description: None,
            resources: vec![],
            outputs: vec![],
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn contains(&self, logical_id: &str) -> bool {
        self.resources.iter().any(|r| r.name == logical_id)
    }

    pub fn add_resource(&mut self, resource: Resource) {
        debug!(logical_id = %resource.name, ty = resource.properties.type_string(), "adding resource");
        self.resources.push(resource);
    }

    pub fn add_output(&mut self, name: impl Into<String>, description: impl Into<String>, value: Value) {
        let output = ResourceOutput {
            description: description.into(),
            value,
        };
        self.outputs.push((name.into(), output));
    }

    /// validates every resource and produces the final template.
    pub fn synth(&self) -> Result<SavedTemplate> {
        let mut out_template = SavedTemplate {
            description: self.description.clone(),
            ..Default::default()
        };
        let mut seen = HashSet::new();
        for resource in self.resources.iter() {
            if !seen.insert(resource.name.as_str()) {
                return Err(Error::DuplicateLogicalId(resource.name.clone()));
            }
            resource.properties.validate().map_err(|e| Error::Validation {
                logical_id: resource.name.clone(),
                reason: e.to_string(),
            })?;
            let saved_resource = SavedResource {
                ty: resource.properties.type_string().to_string(),
                properties: resource.properties.properties(),
                deletion_policy: resource.removal_policy,
                update_replace_policy: resource.removal_policy,
            };
            out_template.resources.insert(resource.name.clone(), saved_resource);
        }
        for (name, output) in self.outputs.iter() {
            if out_template.outputs.insert(name.clone(), output.clone()).is_some() {
                return Err(Error::DuplicateOutput(name.clone()));
            }
        }
        check_references(&out_template)?;
        check_function_names(&out_template)?;
        info!(stack = %self.name, resources = out_template.resources.len(), outputs = out_template.outputs.len(), "synthesized template");
        Ok(out_template)
    }
}

/// every `Ref`, `Fn::GetAtt` and `Fn::Sub` variable in resources
/// and outputs must point at a resource of the template.
fn check_references(template: &SavedTemplate) -> Result<()> {
    let resources = template.resources.iter().map(|(name, r)| (name, &r.properties));
    let outputs = template.outputs.iter().map(|(name, o)| (name, &o.value));
    for (name, value) in resources.chain(outputs) {
        if let Some(target) = referenced_ids(value).into_iter().find(|id| !template.resources.contains_key(id)) {
            return Err(Error::UnresolvedReference {
                logical_id: name.clone(),
                target,
            });
        }
    }
    Ok(())
}

/// cloudfront function names are account wide, so two functions
/// of one template can never share a name.
fn check_function_names(template: &SavedTemplate) -> Result<()> {
    let mut names = HashSet::new();
    for (_, function) in template.resources_of_type("AWS::CloudFront::Function") {
        if let Some(name) = function.properties["Name"].as_str() {
            if !names.insert(name) {
                return Err(Error::DuplicateFunctionName(name.to_string()));
            }
        }
    }
    Ok(())
}

fn validate_stack_name(name: &str) -> Result<String> {
    let stack_name = name.replace('_', "-");
    let invalid = || Error::InvalidStackName {
        name: stack_name.clone(),
        reason: STACK_NAME_RESTRICTION,
    };
    // A stack name can contain only alphanumeric characters (case sensitive) and hyphens.
    // It must start with an alphabetical character and can't be longer than 128 characters.
    match stack_name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return Err(invalid()),
    }
    if stack_name.chars().any(|c| !c.is_ascii_alphanumeric() && c != '-') {
        return Err(invalid());
    }
    if stack_name.len() > MAX_STACK_NAME_LEN {
        return Err(invalid());
    }
    Ok(stack_name)
}
