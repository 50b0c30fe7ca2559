use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("EC2 API error: {0}")]
    Ec2Api(#[from] aws_sdk_ec2::Error),

    #[error("EC2 response for {resource} is missing {field}")]
    MissingField {
        resource: String,
        field: &'static str,
    },

    #[error("snapshot {0} has an out-of-range start time")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, Error>;
