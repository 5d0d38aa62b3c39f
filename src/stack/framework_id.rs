use super::LanguageId;

crate::define_id_enum! {
    /// Web framework identifier
    FrameworkId {
        NextJs => "nextjs" : "Next.js",
        Nuxt => "nuxt" : "Nuxt",
        Remix => "remix" : "Remix",
        Vite => "vite" : "Vite",
        Django => "django" : "Django",
        Flask => "flask" : "Flask",
        FastApi => "fastapi" : "FastAPI",
        Gin => "gin" : "Gin",
        Actix => "actix" : "Actix Web",
        Rails => "rails" : "Rails",
        Phoenix => "phoenix" : "Phoenix",
        Laravel => "laravel" : "Laravel",
        Spring => "spring" : "Spring Boot",
    }
}

impl FrameworkId {
    pub fn language(&self) -> LanguageId {
        match self {
            Self::NextJs | Self::Nuxt | Self::Remix | Self::Vite => LanguageId::Node,
            Self::Django | Self::Flask | Self::FastApi => LanguageId::Python,
            Self::Gin => LanguageId::Go,
            Self::Actix => LanguageId::Rust,
            Self::Rails => LanguageId::Ruby,
            Self::Phoenix => LanguageId::Elixir,
            Self::Laravel => LanguageId::Php,
            Self::Spring => LanguageId::Java,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_id_serialization() {
        assert_eq!(
            serde_json::to_string(&FrameworkId::NextJs).unwrap(),
            "\"nextjs\""
        );
        assert_eq!(
            serde_json::to_string(&FrameworkId::Spring).unwrap(),
            "\"spring\""
        );
    }

    #[test]
    fn test_framework_id_deserialization() {
        let fw: FrameworkId = serde_json::from_str("\"fastapi\"").unwrap();
        assert_eq!(fw, FrameworkId::FastApi);
        assert!(serde_json::from_str::<FrameworkId>("\"qwik\"").is_err());
    }

    #[test]
    fn test_framework_id_name() {
        assert_eq!(FrameworkId::Spring.name(), "Spring Boot");
        assert_eq!(FrameworkId::Actix.name(), "Actix Web");
    }

    #[test]
    fn test_framework_language() {
        assert_eq!(FrameworkId::Phoenix.language(), LanguageId::Elixir);
        assert_eq!(FrameworkId::Vite.language(), LanguageId::Node);
    }
}
