//! Declares the `i32`-backed enumerations shared with the shader side.

/// Declares an enumeration once, with explicit `i32` discriminants, plus the
/// raw conversions both the engine and the backend use.
macro_rules! interface_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(i32)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant = $value,
            )+
        }

        impl $name {
            /// Every variant, in ascending raw order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Raw value as seen by the shader.
            #[inline]
            #[must_use]
            pub const fn as_raw(self) -> i32 {
                self as i32
            }

            /// Converts a raw shader value back, `None` if it is not a member.
            #[must_use]
            pub const fn from_raw(raw: i32) -> Option<Self> {
                $(
                    if raw == $value {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.as_raw()
            }
        }
    };
}
