#[derive(Debug, thiserror::Error)]
pub enum PeripheryError {
    #[error("unit cell of '{0}' has non-positive footprint")]
    InvalidUnitCell(String),

    #[error("adc resolution '{0}' outside 1..=16")]
    InvalidAdcBits(usize),
}
