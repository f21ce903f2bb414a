//! Helper macro for declaring repository port error enums.
//!
//! Each variant carries named fields and a display template; the macro derives
//! `thiserror::Error` and emits a snake_case constructor per variant whose
//! parameters accept `impl Into<FieldType>`.

macro_rules! define_port_error {
    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StoreError {
            Unavailable { message: String } => "store unavailable: {message}",
            Duplicate { key: String, attempts: u32 } => "duplicate {key} after {attempts} attempts",
        }
    }

    #[test]
    fn constructors_accept_borrowed_strings() {
        let err = StoreError::unavailable("pool closed");
        assert_eq!(err.to_string(), "store unavailable: pool closed");
    }

    #[test]
    fn constructors_keep_field_order_and_types() {
        let err = StoreError::duplicate("username", 2_u32);
        assert_eq!(
            err,
            StoreError::Duplicate {
                key: "username".to_owned(),
                attempts: 2,
            }
        );
        assert_eq!(err.to_string(), "duplicate username after 2 attempts");
    }
}
