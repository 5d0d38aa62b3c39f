/// Defines a closed identifier enum.
///
/// Each variant carries a stable wire name (used by serde, `Display`, and the
/// generated manifest) and a human display name.
#[macro_export]
macro_rules! define_id_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $serde_name:literal : $display_name:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $serde_name)]
                $variant,
            )*
        }

        impl $enum_name {
            /// Stable wire identifier.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $serde_name,
                    )*
                }
            }

            /// Human-readable name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $display_name,
                    )*
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
