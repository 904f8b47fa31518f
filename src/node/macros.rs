/// Declares a node sum type over [`NodeType`](crate::node::NodeType)
/// payloads and implements [`NodeKind`](crate::node::NodeKind) for it, plus
/// [`VariantOf`](crate::node::VariantOf) for every payload.
///
/// Each variant wraps exactly one payload type and a payload type appears
/// in at most one variant.
#[macro_export]
macro_rules! node_kind {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($ty:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis enum $name {
            $($variant($ty)),+
        }

        impl $crate::node::NodeKind for $name {
            fn variants() -> &'static [$crate::node::Variant<Self>] {
                const VARIANTS: &[$crate::node::Variant<$name>] =
                    &[$($crate::node::Variant::of::<$ty>()),+];
                VARIANTS
            }

            fn type_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => <$ty as $crate::node::NodeType>::NAME),+
                }
            }

            fn key(&self) -> ::std::string::String {
                match self {
                    $(Self::$variant(node) => $crate::node::NodeType::key(node)),+
                }
            }

            fn bind(&mut self, attributes: &$crate::tag::Attributes) -> usize {
                match self {
                    $(Self::$variant(node) => $crate::node::bind_fields(node, attributes)),+
                }
            }
        }

        $(
            impl $crate::node::VariantOf<$name> for $ty {
                fn into_kind(self) -> $name {
                    $name::$variant(self)
                }

                fn from_kind(kind: &$name) -> ::std::option::Option<&Self> {
                    match kind {
                        $name::$variant(node) => ::std::option::Option::Some(node),
                        #[allow(unreachable_patterns)]
                        _ => ::std::option::Option::None,
                    }
                }

                fn from_kind_mut(kind: &mut $name) -> ::std::option::Option<&mut Self> {
                    match kind {
                        $name::$variant(node) => ::std::option::Option::Some(node),
                        #[allow(unreachable_patterns)]
                        _ => ::std::option::Option::None,
                    }
                }
            }
        )+
    };
}
