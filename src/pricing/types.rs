use std::fmt;
use std::str::FromStr;

use crate::error::{ensure_positive, MgfError, Result};

/// Transform variable whose contour is active in a Fourier inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VariableType {
    /// Log-price return `x`, transform variable `phi`
    #[default]
    LogReturn,
    /// Quadratic variation `I`, transform variable `psi`
    QVar,
    /// Instantaneous volatility, transform variable `theta`
    Sigma,
}

impl VariableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::LogReturn => "log_return",
            VariableType::QVar => "q_var",
            VariableType::Sigma => "sigma",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableType {
    type Err = MgfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log_return" | "logreturn" | "x" => Ok(VariableType::LogReturn),
            "q_var" | "qvar" | "i" => Ok(VariableType::QVar),
            "sigma" | "vol" => Ok(VariableType::Sigma),
            _ => Err(MgfError::UnsupportedVariableKind(s.to_string())),
        }
    }
}

/// Pricing measure. Under the inverse measure the payoff is settled in units
/// of the underlying, which flips the contour offset and the kernel pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Measure {
    #[default]
    Spot,
    Inverse,
}

impl Measure {
    /// Real offset of the log-return contour: -0.5 under spot, +0.5 under inverse.
    pub fn phi_real_part(self) -> f64 {
        match self {
            Measure::Spot => -0.5,
            Measure::Inverse => 0.5,
        }
    }
}

impl From<bool> for Measure {
    /// `true` selects the spot measure.
    fn from(is_spot_measure: bool) -> Self {
        if is_spot_measure {
            Measure::Spot
        } else {
            Measure::Inverse
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Spot => f.write_str("spot measure"),
            Measure::Inverse => f.write_str("inverse measure"),
        }
    }
}

/// Option-type codes accepted by the slice pricers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    #[cfg_attr(feature = "serde", serde(rename = "C"))]
    Call,
    #[cfg_attr(feature = "serde", serde(rename = "P"))]
    Put,
    #[cfg_attr(feature = "serde", serde(rename = "IC"))]
    InverseCall,
    #[cfg_attr(feature = "serde", serde(rename = "IP"))]
    InversePut,
}

impl OptionType {
    pub fn code(&self) -> &'static str {
        match self {
            OptionType::Call => "C",
            OptionType::Put => "P",
            OptionType::InverseCall => "IC",
            OptionType::InversePut => "IP",
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call | OptionType::InverseCall)
    }

    /// Parse a whole column of codes, failing on the first unknown one.
    pub fn parse_codes<S: AsRef<str>>(codes: &[S]) -> Result<Vec<OptionType>> {
        codes.iter().map(|c| c.as_ref().parse()).collect()
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OptionType {
    type Err = MgfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "C" => Ok(OptionType::Call),
            "P" => Ok(OptionType::Put),
            "IC" => Ok(OptionType::InverseCall),
            "IP" => Ok(OptionType::InversePut),
            other => Err(MgfError::unsupported_option(other, "option type codes")),
        }
    }
}

/// Quadrature rule used for the integration weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuadratureRule {
    #[default]
    Simpson,
    Trapezoidal,
}

/// Strikes and option types for one maturity, with the slice's forward and discounting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionSlice {
    /// Time to maturity in years
    pub ttm: f64,
    /// Forward price of the underlying for this maturity
    pub forward: f64,
    /// Discount factor to maturity
    pub discount_factor: f64,
    pub strikes: Vec<f64>,
    pub option_types: Vec<OptionType>,
}

impl OptionSlice {
    /// Creates a slice after checking maturity, forward and array alignment.
    ///
    /// Strikes are checked by the pricers so that every pricing call reports
    /// [`MgfError::InvalidStrike`] consistently.
    pub fn new(
        ttm: f64,
        forward: f64,
        discount_factor: f64,
        strikes: Vec<f64>,
        option_types: Vec<OptionType>,
    ) -> Result<Self> {
        let slice = Self {
            ttm,
            forward,
            discount_factor,
            strikes,
            option_types,
        };
        slice.validate()?;
        Ok(slice)
    }

    /// Same as [`OptionSlice::new`] with option types given as string codes.
    pub fn from_codes<S: AsRef<str>>(
        ttm: f64,
        forward: f64,
        discount_factor: f64,
        strikes: Vec<f64>,
        codes: &[S],
    ) -> Result<Self> {
        let option_types = OptionType::parse_codes(codes)?;
        Self::new(ttm, forward, discount_factor, strikes, option_types)
    }

    /// One option type for every strike.
    pub fn uniform(
        ttm: f64,
        forward: f64,
        discount_factor: f64,
        strikes: Vec<f64>,
        option_type: OptionType,
    ) -> Result<Self> {
        let option_types = vec![option_type; strikes.len()];
        Self::new(ttm, forward, discount_factor, strikes, option_types)
    }

    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("ttm", self.ttm)?;
        ensure_positive("forward", self.forward)?;
        if !self.discount_factor.is_finite() {
            return Err(MgfError::InvalidParameter {
                name: "discount_factor",
                value: self.discount_factor,
                reason: "must be finite",
            });
        }
        if self.strikes.len() != self.option_types.len() {
            return Err(MgfError::InvalidParameter {
                name: "option_types",
                value: self.option_types.len() as f64,
                reason: "must have one option type per strike",
            });
        }
        Ok(())
    }

    /// Rejects the first strike that is not strictly positive.
    pub(crate) fn check_strikes(&self) -> Result<()> {
        match self
            .strikes
            .iter()
            .find(|k| !(k.is_finite() && **k > 0.0))
        {
            Some(&bad) => Err(MgfError::InvalidStrike(bad)),
            None => Ok(()),
        }
    }
}
