use serde::de::DeserializeOwned;

use crate::error::{ErrorDetail, Result};

/// A structured text notation records can be decoded from.
pub trait Format: Sized {
    /// The data format's error type.
    type Error: serde::de::Error + ErrorDetail + 'static;

    /// Parses `string` as the data format `Self` as a `T` or returns an error
    /// if the `string` is an invalid `T`. **_Note:_** This method is _not_
    /// intended to be called directly. Instead, it is intended to be
    /// _implemented_ and then used indirectly via [`Format::decode()`].
    fn from_str<T: DeserializeOwned>(string: &str) -> Result<T, Self::Error>;

    /// Decodes `string` as a `T`. A blank `string` decodes to `T::default()`,
    /// so documents without metadata get every field's default.
    fn decode<T: DeserializeOwned + Default>(string: &str) -> Result<T> {
        if string.trim().is_empty() {
            return Ok(T::default());
        }

        Ok(Self::from_str(string)?)
    }
}

macro_rules! impl_format {
    ($name:ident : $func:expr, $E:ty) => (
        #[derive(Debug, Default, Copy, Clone)]
        pub struct $name;

        impl Format for $name {
            type Error = $E;

            fn from_str<T: DeserializeOwned>(s: &str) -> Result<T, $E> {
                $func(s)
            }
        }
    );
}

impl_format!(Yaml: serde_yaml::from_str, serde_yaml::Error);
