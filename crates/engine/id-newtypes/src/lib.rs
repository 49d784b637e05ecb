mod range;

pub use range::IdRange;

/// Renders ids as `Field#3` rather than the raw `NonZeroU32` they wrap.
#[macro_export]
macro_rules! debug_display {
    ($name:ident) => {
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let name = stringify!($name);
                write!(f, "{}#{}", name.strip_suffix("Id").unwrap_or(name), usize::from(*self))
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(self, f)
            }
        }
    };
}

/// Implements `Index`/`IndexMut` on a container for an id and for an `IdRange` of that id.
#[macro_export]
macro_rules! index {
    ($($ty:ident.$field:ident[$name:ident] => $output:ty,)*) => {
        $(
            impl std::ops::Index<$name> for $ty {
                type Output = $output;

                fn index(&self, id: $name) -> &Self::Output {
                    &self.$field[usize::from(id)]
                }
            }

            impl std::ops::IndexMut<$name> for $ty {
                fn index_mut(&mut self, id: $name) -> &mut Self::Output {
                    &mut self.$field[usize::from(id)]
                }
            }

            impl std::ops::Index<$crate::IdRange<$name>> for $ty {
                type Output = [$output];

                fn index(&self, range: $crate::IdRange<$name>) -> &Self::Output {
                    let (start, end) = range.bounds();
                    &self.$field[start..end]
                }
            }
        )*
    };
}

/// Declares `NonZeroU32` backed ids, so that `Option<Id>` stays four bytes wide.
///
/// ```ignore
/// NonZeroU32! {
///     Operation.fields[FieldId] => Field,
/// }
/// ```
#[macro_export]
macro_rules! NonZeroU32 {
    ($($ty:ident.$field:ident[$name:ident] => $output:ty,)*) => {
        $(
            $crate::NonZeroU32! { $name, }
            $crate::index! { $ty.$field[$name] => $output, }
        )*
    };
    ($($name:ident,)*) => {
        $(
            #[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
            pub struct $name(std::num::NonZeroU32);

            impl From<usize> for $name {
                fn from(value: usize) -> Self {
                    Self(
                        u32::try_from(value)
                            .ok()
                            .and_then(|value| std::num::NonZeroU32::new(value.wrapping_add(1)))
                            .expect(concat!("Too many ", stringify!($name))),
                    )
                }
            }

            impl From<$name> for usize {
                fn from(id: $name) -> Self {
                    (id.0.get() - 1) as usize
                }
            }

            impl From<$name> for u32 {
                fn from(id: $name) -> Self {
                    id.0.get() - 1
                }
            }

            $crate::debug_display! { $name }
        )*
    };
}
