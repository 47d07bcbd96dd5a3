#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("cannot normalize a vector with norm {norm}")]
    ZeroNorm { norm: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
