use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MIN_DISCOUNT_PERCENTAGE: f64 = 0.0;
pub const MAX_DISCOUNT_PERCENTAGE: f64 = 100.0;

/// A percentage discount. The percentage is always finite and within
/// `[0, 100]`; every constructor (including deserialization) checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoreCouponRequest", into = "StoreCouponRequest")]
pub struct Coupon {
    code: String,
    discount_percentage: f64,
}

// request dto
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreCouponRequest {
    #[validate(length(min = 1, max = 32, message = "Coupon code must be 1-32 characters"))]
    pub code: String,

    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    pub discount_percentage: f64,
}

lazy_static::lazy_static! {
    static ref COUPON_CODE_REGEX: Regex = Regex::new(r"^[A-Z0-9_-]{1,32}$").unwrap();
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CouponError {
    #[error("Discount percentage must be between 0 and 100, got {0}")]
    InvalidDiscount(f64),

    #[error("Invalid coupon code: '{0}'")]
    InvalidCode(String),
}

impl Coupon {
    pub fn new(code: impl Into<String>, discount_percentage: f64) -> Result<Self, CouponError> {
        let code = code.into().trim().to_uppercase();
        if !COUPON_CODE_REGEX.is_match(&code) {
            return Err(CouponError::InvalidCode(code));
        }

        // NaN fails both comparisons, so check finiteness explicitly
        if !discount_percentage.is_finite()
            || discount_percentage < MIN_DISCOUNT_PERCENTAGE
            || discount_percentage > MAX_DISCOUNT_PERCENTAGE
        {
            return Err(CouponError::InvalidDiscount(discount_percentage));
        }

        Ok(Self {
            code,
            discount_percentage,
        })
    }

    /// An anonymous coupon, used when a discount is given directly.
    pub fn percentage(discount_percentage: f64) -> Result<Self, CouponError> {
        Self::new("MANUAL", discount_percentage)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn discount_percentage(&self) -> f64 {
        self.discount_percentage
    }
}

impl TryFrom<StoreCouponRequest> for Coupon {
    type Error = CouponError;

    fn try_from(request: StoreCouponRequest) -> Result<Self, Self::Error> {
        if let Err(errors) = request.validate() {
            if errors.field_errors().contains_key("code") {
                return Err(CouponError::InvalidCode(request.code));
            }
            return Err(CouponError::InvalidDiscount(request.discount_percentage));
        }
        // range() lets NaN through, Coupon::new catches it
        Coupon::new(request.code, request.discount_percentage)
    }
}

impl From<Coupon> for StoreCouponRequest {
    fn from(coupon: Coupon) -> Self {
        Self {
            code: coupon.code,
            discount_percentage: coupon.discount_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(Coupon::percentage(0.0).unwrap().discount_percentage(), 0.0);
        assert_eq!(Coupon::percentage(100.0).unwrap().discount_percentage(), 100.0);
    }

    #[test]
    fn test_out_of_range_discount_rejected() {
        for pct in [-0.1, 100.1, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = Coupon::percentage(pct);
            assert!(
                matches!(result, Err(CouponError::InvalidDiscount(_))),
                "expected {} to be rejected",
                pct
            );
        }
    }

    #[test]
    fn test_code_is_normalized() {
        let coupon = Coupon::new(" tenoff ", 10.0).unwrap();
        assert_eq!(coupon.code(), "TENOFF");
    }

    #[test]
    fn test_invalid_code_rejected() {
        assert!(matches!(
            Coupon::new("ten off", 10.0),
            Err(CouponError::InvalidCode(_))
        ));
        assert!(matches!(Coupon::new("", 10.0), Err(CouponError::InvalidCode(_))));
    }

    #[test]
    fn test_deserialize_validates_range() {
        let ok: Coupon =
            serde_json::from_str(r#"{"code":"HALF","discount_percentage":50.0}"#).unwrap();
        assert_eq!(ok.discount_percentage(), 50.0);

        let bad = serde_json::from_str::<Coupon>(r#"{"code":"HUGE","discount_percentage":150.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_keeps_field_names() {
        let coupon = Coupon::new("HALF", 50.0).unwrap();
        let json = serde_json::to_value(&coupon).unwrap();
        assert_eq!(json["code"], "HALF");
        assert_eq!(json["discount_percentage"], 50.0);
    }
}
