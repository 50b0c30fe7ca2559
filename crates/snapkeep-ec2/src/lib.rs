mod aws;
mod error;
mod provider;
mod tags;

pub use aws::AwsEc2Provider;
pub use error::{Error, Result};
pub use provider::{Ec2Provider, Instance, Snapshot, Volume};
pub use tags::{Tags, flatten_tags};
