//! cloudformation intrinsic functions. `Ref` and `Fn::GetAtt` come from
//! `cfn_resources`, `Fn::Join` is built here.

use std::collections::BTreeSet;

use serde_json::{json, Value};

pub use cfn_resources::{get_att, get_ref, StrVal};

pub fn join<I>(delimiter: &str, parts: I) -> Value
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let parts: Vec<Value> = parts.into_iter().map(Into::into).collect();
    json!({ "Fn::Join": [delimiter, parts] })
}

/// every logical id that `value` points at, through `Ref`, `Fn::GetAtt`
/// or a `${}` variable of `Fn::Sub`. Pseudo parameters such as
/// `AWS::Region` are not logical ids and are skipped.
pub fn referenced_ids(value: &Value) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    collect_references(value, &mut ids);
    ids
}

fn collect_references(value: &Value, ids: &mut BTreeSet<String>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_references(item, ids)),
        Value::Object(map) => {
            for (key, inner) in map.iter() {
                match (key.as_str(), inner) {
                    ("Ref", Value::String(id)) => insert_id(id, ids),
                    ("Fn::GetAtt", Value::String(dotted)) => {
                        insert_id(dotted.split('.').next().unwrap_or_default(), ids);
                    }
                    ("Fn::GetAtt", Value::Array(args)) => {
                        if let Some(Value::String(id)) = args.first() {
                            insert_id(id, ids);
                        }
                        args.iter().skip(1).for_each(|arg| collect_references(arg, ids));
                    }
                    ("Fn::Sub", Value::String(template)) => sub_variables(template, &BTreeSet::new(), ids),
                    ("Fn::Sub", Value::Array(args)) => {
                        // variables defined in the second argument are local to the sub
                        let locals: BTreeSet<&str> = args.get(1)
                            .and_then(Value::as_object)
                            .map(|vars| vars.keys().map(String::as_str).collect())
                            .unwrap_or_default();
                        if let Some(Value::String(template)) = args.first() {
                            sub_variables(template, &locals, ids);
                        }
                        args.iter().skip(1).for_each(|arg| collect_references(arg, ids));
                    }
                    _ => collect_references(inner, ids),
                }
            }
        }
        _ => {}
    }
}

fn sub_variables(template: &str, locals: &BTreeSet<&str>, ids: &mut BTreeSet<String>) {
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        rest = &rest[start + 2..];
        let Some(end) = rest.find('}') else { break };
        let variable = &rest[..end];
        rest = &rest[end + 1..];
        // ${!Literal} is an escaped literal
        if variable.starts_with('!') {
            continue;
        }
        let id = variable.split('.').next().unwrap_or(variable);
        if !locals.contains(id) {
            insert_id(id, ids);
        }
    }
}

fn insert_id(id: &str, ids: &mut BTreeSet<String>) {
    if !id.is_empty() && !id.contains("::") {
        ids.insert(id.to_string());
    }
}
