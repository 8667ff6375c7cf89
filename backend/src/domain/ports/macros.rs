//! `define_port_error!`: adapter error enums with `thiserror` messages.
//!
//! Every variant carries named fields and gets a snake_case constructor
//! taking `impl Into<_>` per field, so call sites read
//! `KitchenRepositoryError::query("timeout")`.

macro_rules! define_port_error {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
