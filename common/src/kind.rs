//! Macro for defining labelled kind enums.

/// Defines a fieldless enum whose variants are identified by a human-readable
/// label on the wire and by a small integer in the database.
///
/// Variants are ordered by their declaration order.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube."]
///         #[label = "Cube"]
///         Cube = 1,
///
///         #[doc = "A sphere."]
///         #[label = "Round sphere"]
///         Sphere = 2,
///     }
/// }
///
/// assert_eq!(Kind::Sphere.to_string(), "Round sphere");
/// assert_eq!("Cube".parse::<Kind>().unwrap(), Kind::Cube);
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                #[label = $label:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
        )]
        #[doc = $doc]
        #[repr(u8)]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                #[strum(to_string = $label)]
                $variant = $value,
            )*
        }

        impl $name {
            #[doc = "All the variants in their declaration order."]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }

            /// Returns the human-readable label of this variant.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $label,
                    )*
                }
            }
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            $crate::private::postgres_types::accepts!(INT2);

            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &[u8],
            ) -> Result<
                $name,
                Box<dyn ::std::error::Error
                    + ::core::marker::Sync
                    + ::core::marker::Send>,
            > {
                match u8::try_from(i16::from_sql(ty, raw)?)? {
                    $(
                        v if Self::$variant.u8() == v => Ok(Self::$variant),
                    )*
                    v => Err(::std::format!(
                        "invalid `{}` value: {v}",
                        ::core::stringify!($name),
                    ).into()),
                }
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::accepts!(INT2);
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                i16::from(self.u8()).to_sql(ty, w)
            }
        }
    };
}

#[cfg(test)]
mod spec {
    define_kind! {
        #[doc = "Traffic light."]
        enum Light {
            #[doc = "Stop."]
            #[label = "Red light"]
            Red = 1,

            #[doc = "Wait."]
            #[label = "Yellow light"]
            Yellow = 2,

            #[doc = "Go."]
            #[label = "Green light"]
            Green = 3,
        }
    }

    #[test]
    fn displays_label() {
        assert_eq!(Light::Red.to_string(), "Red light");
        assert_eq!(Light::Green.label(), "Green light");
    }

    #[test]
    fn parses_label() {
        assert_eq!("Yellow light".parse::<Light>().unwrap(), Light::Yellow);
        assert!("Yellow".parse::<Light>().is_err());
        assert!("".parse::<Light>().is_err());
    }

    #[test]
    fn orders_by_declaration() {
        assert_eq!(Light::ALL, &[Light::Red, Light::Yellow, Light::Green]);
        assert!(Light::Red < Light::Green);
        assert_eq!(Light::Yellow.u8(), 2);
    }
}
