// Generates a newtype over an integer wire code with named constants.
//
// Unlike a Rust enum, the generated type can hold any value of the
// underlying integer, so codes we do not recognize survive decoding and
// can be rejected where they are used.
macro_rules! enum_sim {
    (
        $(#[$enum_attr: meta])*
        pub struct $tname:ident ($size_t:ty) {
            $(
                $(#[$arm_attr: meta])*
                $enum_arm:ident = $num_exp:expr
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
        $(#[$enum_attr])*
        pub struct $tname($size_t);

        impl $tname {
            $(
                $(#[$arm_attr])*
                pub const $enum_arm: Self = Self($num_exp);
            )+

            /// Get the raw value.
            #[inline]
            pub const fn raw(&self) -> $size_t {
                self.0
            }

            /// Whether the value is one of the named constants.
            pub fn is_known(&self) -> bool {
                matches!(*self, $(Self::$enum_arm)|+)
            }

            /// The name of the matching constant, if any.
            pub fn name(&self) -> Option<&'static str> {
                match *self {
                    $(Self::$enum_arm => Some(stringify!($enum_arm)),)+
                    _ => None,
                }
            }
        }

        impl ::core::convert::From<$size_t> for $tname {
            #[inline]
            fn from(value: $size_t) -> $tname {
                $tname(value)
            }
        }

        impl ::core::convert::From<$tname> for $size_t {
            #[inline]
            fn from(value: $tname) -> $size_t {
                value.0
            }
        }

        impl ::core::fmt::Display for $tname {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match self.name() {
                    Some(name) => write!(f, "{}({:#x})", name, self.0),
                    None => write!(f, "unknown({:#x})", self.0),
                }
            }
        }
    };
}
