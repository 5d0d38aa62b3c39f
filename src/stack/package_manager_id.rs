use super::LanguageId;

crate::define_id_enum! {
    /// Package manager identifier, each tied to one language ecosystem
    PackageManagerId {
        Npm => "npm" : "npm",
        Yarn => "yarn" : "Yarn",
        Pnpm => "pnpm" : "pnpm",
        Pip => "pip" : "pip",
        Poetry => "poetry" : "Poetry",
        Pipenv => "pipenv" : "Pipenv",
        Uv => "uv" : "uv",
        GoMod => "gomod" : "go mod",
        Cargo => "cargo" : "Cargo",
        Bundler => "bundler" : "Bundler",
        Mix => "mix" : "Mix",
        Composer => "composer" : "Composer",
        Maven => "maven" : "Maven",
        Gradle => "gradle" : "Gradle",
    }
}

impl PackageManagerId {
    pub fn language(&self) -> LanguageId {
        match self {
            Self::Npm | Self::Yarn | Self::Pnpm => LanguageId::Node,
            Self::Pip | Self::Poetry | Self::Pipenv | Self::Uv => LanguageId::Python,
            Self::GoMod => LanguageId::Go,
            Self::Cargo => LanguageId::Rust,
            Self::Bundler => LanguageId::Ruby,
            Self::Mix => LanguageId::Elixir,
            Self::Composer => LanguageId::Php,
            Self::Maven | Self::Gradle => LanguageId::Java,
        }
    }
}
