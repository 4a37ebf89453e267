#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid race time `{0}`; expected `mm:ss.ms` or `ss.ms`")]
pub struct InvalidTime(pub String);
