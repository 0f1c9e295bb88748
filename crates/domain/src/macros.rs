//! Macro for implementing Display and FromStr for wire-named enums
//!
//! The backend speaks upper-case Spanish identifiers (`CIUDADANO`,
//! `PENDIENTE`, ...). This macro maps enum variants to those identifiers in
//! one place and provides case-insensitive parsing, with optional aliases.
//!
//! # Example
//!
//! ```rust
//! use informado_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shift {
//!     Morning,
//!     Night,
//! }
//!
//! impl_wire_enum_conversions!(Shift {
//!     Morning => "MANANA" | "MORNING",
//!     Night => "NOCHE",
//! });
//!
//! assert_eq!(Shift::Morning.to_string(), "MANANA");
//! assert_eq!("morning".parse::<Shift>(), Ok(Shift::Morning));
//! ```

/// Implements Display and FromStr for enums with upper-case wire names
///
/// - Display writes the primary wire name
/// - FromStr accepts the primary name or any alias, ignoring ASCII case
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $enum_name {
            /// Wire identifier used by the backend.
            #[must_use]
            pub const fn as_wire_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_wire_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let candidate = s.trim();
                $(
                    if candidate.eq_ignore_ascii_case($str)
                        $(|| candidate.eq_ignore_ascii_case($alias))*
                    {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
