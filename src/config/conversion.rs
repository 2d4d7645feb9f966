// Author: Dustin Pilgrim
// License: MIT

use crate::ConfError;

/// A resolved scalar on its way to a typed value.
///
/// Typed lookups go through `TryFrom<Scalar>`; implement it for your own
/// types to use them with [`Dictionary::get_as`](crate::Dictionary::get_as).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar(Option<String>);

impl Scalar {
    pub fn new(text: Option<String>) -> Self {
        Scalar(text)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn into_inner(self) -> Option<String> {
        self.0
    }

    fn describe(&self) -> String {
        match &self.0 {
            Some(text) => format!("'{}'", text),
            None => "null".into(),
        }
    }
}

fn conversion_error(scalar: &Scalar, target: &'static str, hint: &str, code: u32) -> ConfError {
    ConfError::Conversion {
        path: String::new(),
        value: scalar.describe(),
        target,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

impl TryFrom<Scalar> for String {
    type Error = ConfError;

    fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
        match scalar.0 {
            Some(text) => Ok(text),
            None => Err(conversion_error(
                &scalar,
                "String",
                "Use Option<String> to accept null values",
                401,
            )),
        }
    }
}

macro_rules! impl_from_str_conversion {
    ($code:expr, $hint:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl TryFrom<Scalar> for $ty {
                type Error = ConfError;

                fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
                    match scalar.as_str().map(|text| text.trim().parse::<$ty>()) {
                        Some(Ok(value)) => Ok(value),
                        _ => Err(conversion_error(&scalar, stringify!($ty), $hint, $code)),
                    }
                }
            }
        )+
    };
}

impl_from_str_conversion!(402, "Use an integer within the range of the target type" =>
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_from_str_conversion!(403, "Use a decimal number such as 1.5" => f32, f64);

impl TryFrom<Scalar> for bool {
    type Error = ConfError;

    fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
        let parsed = scalar.as_str().and_then(|text| {
            match text.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            }
        });
        parsed.ok_or_else(|| {
            conversion_error(&scalar, "bool", "Use true/false, yes/no, on/off or 1/0", 404)
        })
    }
}

impl<T> TryFrom<Scalar> for Option<T>
where
    T: TryFrom<Scalar, Error = ConfError>,
{
    type Error = ConfError;

    fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
        match scalar.0 {
            None => Ok(None),
            text => Ok(Some(T::try_from(Scalar(text))?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(text: &str) -> Scalar {
        Scalar::new(Some(text.to_string()))
    }

    #[test]
    fn test_string_conversion() {
        let result: Result<String, ConfError> = scalar("hello").try_into();
        assert_eq!(result.unwrap(), "hello");

        let result: Result<String, ConfError> = Scalar::new(None).try_into();
        assert_eq!(result.unwrap_err().code(), Some(401));
    }

    #[test]
    fn test_integer_conversion() {
        let value: i32 = scalar("42").try_into().unwrap();
        assert_eq!(value, 42);
        let value: i64 = scalar(" -7 ").try_into().unwrap();
        assert_eq!(value, -7);
        let value: u8 = scalar("255").try_into().unwrap();
        assert_eq!(value, 255);
    }

    #[test]
    fn test_integer_out_of_range() {
        let result: Result<u8, ConfError> = scalar("256").try_into();
        assert!(result.is_err());
        let result: Result<u16, ConfError> = scalar("-1").try_into();
        match result.unwrap_err() {
            ConfError::Conversion { value, target, code, .. } => {
                assert_eq!(value, "'-1'");
                assert_eq!(target, "u16");
                assert_eq!(code, Some(402));
            }
            other => panic!("Expected Conversion, got {:?}", other),
        }
    }

    #[test]
    fn test_float_conversion() {
        let value: f64 = scalar("3.14").try_into().unwrap();
        assert!((value - 3.14).abs() < 1e-9);
        let value: f32 = scalar("2.5").try_into().unwrap();
        assert_eq!(value, 2.5_f32);
        let result: Result<f64, ConfError> = scalar("fast").try_into();
        assert_eq!(result.unwrap_err().code(), Some(403));
    }

    #[test]
    fn test_bool_conversion() {
        for text in ["true", "TRUE", "yes", "On", "1"] {
            let value: bool = scalar(text).try_into().unwrap();
            assert!(value, "{} should be true", text);
        }
        for text in ["false", "No", "off", "0"] {
            let value: bool = scalar(text).try_into().unwrap();
            assert!(!value, "{} should be false", text);
        }
        let result: Result<bool, ConfError> = scalar("maybe").try_into();
        assert_eq!(result.unwrap_err().code(), Some(404));
    }

    #[test]
    fn test_option_conversion() {
        let value: Option<i32> = Scalar::new(None).try_into().unwrap();
        assert_eq!(value, None);
        let value: Option<i32> = scalar("5").try_into().unwrap();
        assert_eq!(value, Some(5));
        let result: Result<Option<i32>, ConfError> = scalar("five").try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_null_number_is_conversion_error() {
        let result: Result<i32, ConfError> = Scalar::new(None).try_into();
        match result.unwrap_err() {
            ConfError::Conversion { value, .. } => assert_eq!(value, "null"),
            other => panic!("Expected Conversion, got {:?}", other),
        }
    }
}
