#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Decimal exponent of the native currency (18 for Ether).
    pub native_decimals: u8,
    pub native_symbol: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            native_decimals: 18,
            native_symbol: "ETH".to_owned(),
        }
    }
}
