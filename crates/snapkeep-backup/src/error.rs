use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error(transparent)]
    Ec2(#[from] snapkeep_ec2::Error),
}

pub type Result<T> = std::result::Result<T, BackupError>;
