use crate::domain::DomainError;

pub const DEFAULT_MAX_TOKENS: u32 = 256;
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Sampling parameters forwarded with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    max_tokens: u32,
    temperature: f64,
}

impl GenerationParams {
    pub fn new(max_tokens: u32, temperature: f64) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// `max_tokens` must be positive and `temperature` a finite,
    /// non-negative number.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_tokens == 0 {
            return Err(DomainError::invalid_input("max_tokens must be at least 1"));
        }
        check_temperature(self.temperature)
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE)
    }
}

pub fn check_temperature(temperature: f64) -> Result<(), DomainError> {
    if !temperature.is_finite() || temperature < 0.0 {
        return Err(DomainError::invalid_input(format!(
            "temperature must be a finite, non-negative number (got {temperature})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GenerationParams::default().validate().is_ok());
        assert!(GenerationParams::new(1, 0.0).validate().is_ok());
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let err = GenerationParams::new(0, 0.2).validate().unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn non_finite_or_negative_temperature_is_rejected() {
        for temperature in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.1] {
            let params = GenerationParams::default().with_temperature(temperature);
            assert!(params.validate().unwrap_err().is_invalid_input(), "{temperature}");
        }
    }
}
