//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident : $ty:ty } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: $ty },
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    pub fn [<$variant:snake>]($field: impl Into<$ty>) -> Self {
                        Self::$variant { $field: $field.into() }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExamplePortError {
            Unreachable { message: String } => "unreachable: {message}",
            Rejected { reason: String } => "rejected: {reason}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::unreachable("hello");
        assert_eq!(err.to_string(), "unreachable: hello");
        assert_eq!(
            err,
            ExamplePortError::Unreachable {
                message: "hello".to_owned()
            }
        );
    }

    #[test]
    fn constructor_names_are_snake_cased_variants() {
        let err = ExamplePortError::rejected("nope");
        assert!(matches!(err, ExamplePortError::Rejected { .. }));
    }
}
