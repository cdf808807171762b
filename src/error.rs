#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] crate::parse::ParseError),
    #[error("{0}")]
    Distribution(#[from] crate::distribution::DistributionError),
}
