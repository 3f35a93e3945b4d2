/// Implements the conversions and formatting shared by the integer newtypes
/// ([`AssetId`](crate::AssetId), [`Round`](crate::Round)).
macro_rules! impl_u64_wrapper {
    ($wrapper:ident) => {
        impl ::std::convert::From<u64> for $wrapper {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl ::std::convert::From<$wrapper> for u64 {
            fn from(value: $wrapper) -> Self {
                value.0
            }
        }

        impl ::core::fmt::Display for $wrapper {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $wrapper {
            type Err = $crate::errors::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>()
                    .map(Self)
                    .map_err(|_| $crate::errors::ParseError::InvalidInteger(s.to_owned()))
            }
        }

        impl $wrapper {
            /// Returns the raw integer.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Returns true for the zero value, which the ledger treats as "unset".
            pub const fn is_zero(self) -> bool {
                self.0 == 0
            }
        }
    };
}
