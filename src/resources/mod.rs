pub use crate::intrinsics::*;
pub use crate::template::{Resource, RemovalPolicy};

mod s3_bucket;
pub use s3_bucket::*;
mod origin_access;
pub use origin_access::*;
mod edge_handler;
pub use edge_handler::*;
mod cloudfront;
pub use cloudfront::*;
mod cloudfront_function;
pub use cloudfront_function::*;

// higher level resources:
mod web_distribution;
pub use web_distribution::*;
mod static_website;
pub use static_website::*;
