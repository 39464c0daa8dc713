/// Defines a strongly typed array wrapper.
#[macro_export]
macro_rules! array_wrapper {
    ($name:ident, $t:ty, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(::ndarray::Array1<$t>);

        impl From<::ndarray::Array1<$t>> for $name {
            fn from(array: ::ndarray::Array1<$t>) -> Self {
                Self(array)
            }
        }

        impl From<Vec<$t>> for $name {
            fn from(vec: Vec<$t>) -> Self {
                Self(::ndarray::Array1::from(vec))
            }
        }

        impl<'a> From<&'a $name> for ::ndarray::ArrayView1<'a, $t> {
            fn from(array: &'a $name) -> Self {
                array.0.view()
            }
        }

        impl ::std::iter::FromIterator<$t> for $name {
            fn from_iter<T>(iter: T) -> Self
            where
                T: IntoIterator<Item = $t>,
            {
                Self(iter.into_iter().collect())
            }
        }

        impl $name {
            /// Vector length.
            #[must_use]
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Checks if the vector is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Iterates the vector.
            pub fn iter(&self) -> impl Iterator<Item = &$t> {
                self.0.iter()
            }

            /// Returns the underlying vector.
            #[must_use]
            pub fn vec(&self) -> &::ndarray::Array1<$t> {
                &self.0
            }
        }
    };
}
